//! Editor state machine for the chip input.
//!
//! The widget owns one [`EditorState`] and drives it exclusively through
//! [`EditorState::apply`]. Every transition is pure and synchronous; `apply`
//! reports whether anything changed so the caller can skip re-render and
//! upstream propagation on no-ops.
//!
//! Committed tokens live in `ast` as raw strings. The text being typed is
//! the `draft`; serialization splices the draft into the token list, so the
//! upstream text field always reflects what the user sees.

use crate::lexer::tokenize;

/// Actions the input widget dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Rebuild from upstream text that changed for an external reason.
    /// Keeps only `focused`; cursor, draft, and selection reset.
    SyncFromText(String),
    FocusInput,
    BlurInput,
    SetDraft(String),
    ClearAll,
    RemoveChip(usize),
    /// Lift a committed chip back into the draft for editing. Focusing or
    /// blurring before the edit commits abandons it.
    EditChip(usize),
    /// Highlight a chip for keyboard deletion; `None` clears.
    SelectChip(Option<usize>),
    /// Dispatched when backspace is hit with the caret at the start of an
    /// empty draft: deletes the chip being edited, else the chip before
    /// the insertion point.
    BackspaceFromDraftStart,
    ApplySuggestion(String),
    /// Moves the highlight by `delta`, wrapping in both directions.
    MoveSuggestion { delta: isize, total: usize },
    OpenSuggestions,
    CloseSuggestions,
    SetSuggestionIndex(usize),
    /// Re-clamps the highlight after the candidate list shrank.
    ClampSuggestions(usize),
}

/// The chip input's entire state.
///
/// Invariants: `insertion_point <= ast.len()`; `editing_index` and
/// `selected_chip` point at existing chips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Committed tokens, chip order.
    pub ast: Vec<String>,
    /// Where the next committed token lands, `0..=ast.len()`.
    pub insertion_point: usize,
    /// Chip whose text currently lives in `draft`.
    pub editing_index: Option<usize>,
    /// Not-yet-committed text being typed.
    pub draft: String,
    /// Chip highlighted for keyboard deletion.
    pub selected_chip: Option<usize>,
    pub suggestions_open: bool,
    pub suggestion_index: usize,
    pub focused: bool,
}

impl EditorState {
    /// Builds the mount state from serialized filter text.
    pub fn from_text(text: &str) -> Self {
        let ast = tokenize(text);
        let insertion_point = ast.len();
        Self {
            ast,
            insertion_point,
            ..Self::default()
        }
    }

    /// Serialized form: `ast` with the draft spliced in, space-joined.
    ///
    /// This is the single source of truth for the upstream text field.
    /// Diff against the last emitted text before propagating; see
    /// [`EchoGuard`].
    pub fn serialize(&self) -> String {
        let mut tokens: Vec<&str> = self.ast.iter().map(String::as_str).collect();
        match self.editing_index {
            Some(index) if index < tokens.len() => tokens[index] = &self.draft,
            _ => tokens.insert(self.insertion_point.min(tokens.len()), &self.draft),
        }
        tokens.retain(|token| !token.is_empty());
        tokens.join(" ")
    }

    /// Applies one action. Returns `true` when the state changed.
    pub fn apply(&mut self, action: EditorAction) -> bool {
        let before = self.clone();
        self.transition(action);
        self.check_indices();
        *self != before
    }

    /// All cursor indices stay within the chip list after every transition.
    #[inline]
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn check_indices(&self) {
        debug_assert!(self.insertion_point <= self.ast.len());
        debug_assert!(self.editing_index.is_none_or(|i| i < self.ast.len()));
        debug_assert!(self.selected_chip.is_none_or(|i| i < self.ast.len()));
    }

    fn transition(&mut self, action: EditorAction) {
        match action {
            EditorAction::SyncFromText(text) => {
                let focused = self.focused;
                *self = Self::from_text(&text);
                self.focused = focused;
            }
            EditorAction::FocusInput => {
                self.focused = true;
                self.abandon_edit();
                self.selected_chip = None;
                self.insertion_point = self.ast.len();
                self.suggestions_open = true;
                self.suggestion_index = 0;
            }
            EditorAction::BlurInput => {
                self.focused = false;
                self.suggestions_open = false;
                self.abandon_edit();
                self.selected_chip = None;
            }
            EditorAction::SetDraft(text) => {
                self.draft = text;
                self.suggestions_open = true;
                self.suggestion_index = 0;
            }
            EditorAction::ClearAll => {
                self.ast.clear();
                self.insertion_point = 0;
                self.draft.clear();
                self.editing_index = None;
                self.selected_chip = None;
                self.suggestions_open = true;
                self.suggestion_index = 0;
            }
            EditorAction::RemoveChip(index) => self.remove_chip(index),
            EditorAction::EditChip(index) => {
                if index < self.ast.len() {
                    self.draft = self.ast[index].clone();
                    self.editing_index = Some(index);
                    self.selected_chip = None;
                    self.insertion_point = index;
                    self.suggestions_open = true;
                    self.suggestion_index = 0;
                }
            }
            EditorAction::SelectChip(selection) => match selection {
                Some(index) if index >= self.ast.len() => {}
                _ => self.selected_chip = selection,
            },
            EditorAction::BackspaceFromDraftStart => self.backspace_from_draft_start(),
            EditorAction::ApplySuggestion(token) => self.apply_suggestion(&token),
            EditorAction::MoveSuggestion { delta, total } => {
                if total > 0 {
                    let moved = self.suggestion_index as isize + delta;
                    self.suggestion_index = moved.rem_euclid(total as isize) as usize;
                }
            }
            EditorAction::OpenSuggestions => self.suggestions_open = true,
            EditorAction::CloseSuggestions => self.suggestions_open = false,
            EditorAction::SetSuggestionIndex(index) => self.suggestion_index = index,
            EditorAction::ClampSuggestions(total) => {
                if total == 0 {
                    self.suggestion_index = 0;
                } else if self.suggestion_index >= total {
                    self.suggestion_index = total - 1;
                }
            }
        }
    }

    /// Ends an edit session without committing: the lifted draft is dropped
    /// and the chip keeps its committed text. A plain trailing draft is
    /// left alone.
    fn abandon_edit(&mut self) {
        if self.editing_index.take().is_some() {
            self.draft.clear();
        }
    }

    fn remove_chip(&mut self, index: usize) {
        if index >= self.ast.len() {
            return;
        }
        self.ast.remove(index);
        if self.insertion_point > index {
            self.insertion_point -= 1;
        }
        self.editing_index = match self.editing_index {
            Some(editing) if editing == index => {
                self.draft.clear();
                None
            }
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };
        self.selected_chip = match self.selected_chip {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
    }

    fn backspace_from_draft_start(&mut self) {
        if !self.draft.is_empty() {
            return;
        }
        match self.editing_index {
            Some(index) => self.remove_chip(index),
            None => {
                if self.insertion_point > 0 {
                    let index = self.insertion_point - 1;
                    self.ast.remove(index);
                    self.insertion_point = index;
                }
            }
        }
    }

    fn apply_suggestion(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        if is_stage_token(token) {
            // Key-stage pick: make it the draft so the engine immediately
            // re-suggests concrete values for it.
            self.draft = token.to_string();
            self.suggestions_open = true;
            self.suggestion_index = 0;
            return;
        }
        match self.editing_index.take() {
            Some(index) if index < self.ast.len() => {
                self.ast[index] = token.to_string();
                self.insertion_point = index + 1;
            }
            _ => {
                let at = self.insertion_point.min(self.ast.len());
                self.ast.insert(at, token.to_string());
                self.insertion_point = at + 1;
            }
        }
        self.draft.clear();
        self.suggestions_open = true;
        self.suggestion_index = 0;
    }
}

/// Stage tokens become the next draft instead of committing: a key with a
/// trailing colon re-suggests its values, a bare sign re-suggests keys.
fn is_stage_token(token: &str) -> bool {
    token.ends_with(':') || token == "+" || token == "-"
}

/// Echo suppression for the host sync loop.
///
/// The widget emits serialized text upward and the host pushes text changes
/// back down. Without a guard every keystroke's own echo would arrive as a
/// "new" text and rebuild the state, wiping the draft and cursor. Record
/// each emission; rebuild only on texts that differ from the last one.
///
/// # Examples
///
/// ```
/// use filament_filter::{EchoGuard, EditorAction, EditorState};
///
/// let mut state = EditorState::from_text("loners:on");
/// let mut guard = EchoGuard::new();
///
/// state.apply(EditorAction::SetDraft("+cr".into()));
/// let emitted = state.serialize();
/// guard.record(&emitted);
///
/// // The host echoes our own text back: ignore it, the draft survives.
/// assert!(guard.is_echo(&emitted));
///
/// // A genuinely external change has to rebuild.
/// assert!(!guard.is_echo("focus:node-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EchoGuard {
    last_emitted: Option<String>,
}

impl EchoGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call with every text this editor propagates upward.
    pub fn record(&mut self, text: &str) {
        self.last_emitted = Some(text.to_string());
    }

    /// True when the incoming text is this editor's own last emission.
    pub fn is_echo(&self, incoming: &str) -> bool {
        self.last_emitted.as_deref() == Some(incoming)
    }
}
