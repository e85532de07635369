use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Filter text plus the display name diagnostics should carry.
pub struct FilterInput {
    pub text: String,
    pub path: Option<String>,
}

/// Loads filter text from inline `-q` text, a file, or stdin (`-`).
///
/// Inline text wins when both are given. Trailing newlines from files and
/// stdin are trimmed so they don't count as committed-token whitespace.
pub fn load_filter_text(
    query_path: Option<&Path>,
    query_text: Option<&str>,
) -> Result<FilterInput, String> {
    if let Some(text) = query_text {
        return Ok(FilterInput {
            text: text.to_string(),
            path: None,
        });
    }

    if let Some(path) = query_path {
        if path.as_os_str() == "-" {
            return load_stdin();
        }
        return load_file(path);
    }

    Err("filter text is required: use a positional file, -q/--query, or \"-\" for stdin".to_string())
}

fn load_stdin() -> Result<FilterInput, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(FilterInput {
        text: buf.trim_end_matches(['\n', '\r']).to_string(),
        path: Some("<stdin>".to_string()),
    })
}

fn load_file(path: &Path) -> Result<FilterInput, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    Ok(FilterInput {
        text: content.trim_end_matches(['\n', '\r']).to_string(),
        path: Some(path.to_string_lossy().into_owned()),
    })
}
