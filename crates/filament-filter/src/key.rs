//! Key vocabulary of the filter language.
//!
//! Axis keys carry signed include/exclude predicates; control keys set
//! scalar display options. Keys match case-insensitively and two axes have
//! aliases (`id` for `node`, `source` for `location`). Values are matched
//! verbatim, never normalized.

use serde::Serialize;

/// Include/exclude sign on an axis token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Include,
    Exclude,
}

impl Sign {
    pub fn as_char(self) -> char {
        match self {
            Sign::Include => '+',
            Sign::Exclude => '-',
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Sign::Include => "include",
            Sign::Exclude => "exclude",
        }
    }

    pub fn opposite(self) -> Sign {
        match self {
            Sign::Include => Sign::Exclude,
            Sign::Exclude => Sign::Include,
        }
    }

    /// Splits a leading sign off a token or fragment.
    pub fn split(text: &str) -> (Option<Sign>, &str) {
        match text.as_bytes().first() {
            Some(b'+') => (Some(Sign::Include), &text[1..]),
            Some(b'-') => (Some(Sign::Exclude), &text[1..]),
            _ => (None, text),
        }
    }
}

/// A filterable dimension. Each axis owns one include and one exclude set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NodeId,
    Location,
    Crate,
    Process,
    Kind,
    Module,
}

/// All axes, suggestion order.
pub const AXES: [Axis; 6] = [
    Axis::NodeId,
    Axis::Location,
    Axis::Crate,
    Axis::Process,
    Axis::Kind,
    Axis::Module,
];

impl Axis {
    /// Canonical key, as emitted in suggestions.
    pub fn key(self) -> &'static str {
        match self {
            Axis::NodeId => "node",
            Axis::Location => "location",
            Axis::Crate => "crate",
            Axis::Process => "process",
            Axis::Kind => "kind",
            Axis::Module => "module",
        }
    }

    /// Placeholder shown in key suggestions, e.g. `+node:<id>`.
    pub fn placeholder(self) -> &'static str {
        match self {
            Axis::NodeId => "id",
            Axis::Location => "src",
            Axis::Crate => "crate",
            Axis::Process => "process",
            Axis::Kind => "kind",
            Axis::Module => "module",
        }
    }

    /// Human noun for descriptions.
    pub fn noun(self) -> &'static str {
        match self {
            Axis::NodeId => "node id",
            Axis::Location => "source location",
            Axis::Crate => "crate",
            Axis::Process => "process",
            Axis::Kind => "kind",
            Axis::Module => "module path",
        }
    }

    /// Resolves an already lower-cased key, aliases included.
    pub fn from_key(key: &str) -> Option<Axis> {
        Some(match key {
            "node" | "id" => Axis::NodeId,
            "location" | "source" => Axis::Location,
            "crate" => Axis::Crate,
            "process" => Axis::Process,
            "kind" => Axis::Kind,
            "module" => Axis::Module,
            _ => return None,
        })
    }
}

/// Non-axis keys that set scalar display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Loners,
    Source,
    ColorBy,
    GroupBy,
    LabelBy,
    Focus,
}

/// All control keys, suggestion order.
pub const CONTROL_KEYS: [ControlKey; 6] = [
    ControlKey::Loners,
    ControlKey::Source,
    ControlKey::ColorBy,
    ControlKey::GroupBy,
    ControlKey::LabelBy,
    ControlKey::Focus,
];

impl ControlKey {
    /// Display spelling. The UI writes the `*By` keys in camelCase.
    pub fn key(self) -> &'static str {
        match self {
            ControlKey::Loners => "loners",
            ControlKey::Source => "source",
            ControlKey::ColorBy => "colorBy",
            ControlKey::GroupBy => "groupBy",
            ControlKey::LabelBy => "labelBy",
            ControlKey::Focus => "focus",
        }
    }

    /// Resolves an already lower-cased key, aliases included.
    pub fn from_key(key: &str) -> Option<ControlKey> {
        Some(match key {
            "loners" => ControlKey::Loners,
            "source" => ControlKey::Source,
            "colorby" => ControlKey::ColorBy,
            "groupby" => ControlKey::GroupBy,
            "labelby" => ControlKey::LabelBy,
            "focus" | "subgraph" => ControlKey::Focus,
            _ => return None,
        })
    }
}

/// Node coloring dimension, set by `colorBy:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBy {
    Process,
    Crate,
}

impl ColorBy {
    pub fn from_value(value: &str) -> Option<ColorBy> {
        Some(match value {
            "process" => ColorBy::Process,
            "crate" => ColorBy::Crate,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorBy::Process => "process",
            ColorBy::Crate => "crate",
        }
    }
}

/// Node grouping dimension, set by `groupBy:`. `groupBy:none` is accepted
/// by the parser but maps to no grouping at all, hence no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Process,
    Crate,
}

impl GroupBy {
    pub fn from_value(value: &str) -> Option<GroupBy> {
        Some(match value {
            "process" => GroupBy::Process,
            "crate" => GroupBy::Crate,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GroupBy::Process => "process",
            GroupBy::Crate => "crate",
        }
    }
}

/// Node labeling dimension, set by `labelBy:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelBy {
    Process,
    Crate,
    Location,
}

impl LabelBy {
    pub fn from_value(value: &str) -> Option<LabelBy> {
        Some(match value {
            "process" => LabelBy::Process,
            "crate" => LabelBy::Crate,
            "location" => LabelBy::Location,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelBy::Process => "process",
            LabelBy::Crate => "crate",
            LabelBy::Location => "location",
        }
    }
}
