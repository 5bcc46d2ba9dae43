//! # Template Rendering
//!
//! Literal `{{TOKEN}}` substitution over raw HTML templates.
//!
//! The renderer never escapes. Callers escape each untrusted value with
//! [`escape_html`] while building the [`Fields`] map, so the escaping policy
//! stays visible per field in [`pages`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod pages;

/// Token name → substitution value.
pub type Fields = BTreeMap<&'static str, String>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replace every `{{NAME}}` whose `NAME` is in `fields`.
///
/// Substitution is a single left-to-right pass: occurrences never overlap and
/// substituted values are not scanned again, so a value that itself contains
/// `{{...}}` is emitted verbatim. Unknown tokens are left untouched.
pub fn render(template: &str, fields: &Fields) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];

        let Some(end) = after.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };

        match fields.get(&after[..end]) {
            Some(value) => {
                out.push_str(value);
                rest = &after[end + CLOSE.len()..];
            }
            None => {
                out.push_str(OPEN);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Names of placeholder tokens in `template` that `fields` does not supply,
/// in order of first appearance.
pub fn unresolved_placeholders(template: &str, fields: &Fields) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            break;
        };

        let name = &after[..end];
        if is_token_name(name) {
            if !fields.contains_key(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
            rest = &after[end + CLOSE.len()..];
        } else {
            rest = after;
        }
    }

    missing
}

/// Render `template` and log a warning naming any placeholder left unresolved.
///
/// The page is still returned; a missing field degrades the page rather than
/// failing the request.
pub fn render_page(page: &str, template: &str, fields: &Fields) -> String {
    let missing = unresolved_placeholders(template, fields);
    if !missing.is_empty() {
        tracing::warn!(
            page,
            placeholders = ?missing,
            "Template placeholders were not replaced"
        );
    }

    render(template, fields)
}

/// HTML-escape `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Errors raised while loading templates at startup.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("could not read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The HTML templates, loaded once at process start and shared read-only.
#[derive(Debug, Clone)]
pub struct Templates {
    /// Single-agent profile / SMS compliance page
    pub compliance: String,
    /// Agent directory with search
    pub directory: String,
}

impl Templates {
    pub const COMPLIANCE_FILE: &'static str = "compliance.html";
    pub const DIRECTORY_FILE: &'static str = "directory.html";

    pub fn new<C: Into<String>, D: Into<String>>(compliance: C, directory: D) -> Self {
        Self {
            compliance: compliance.into(),
            directory: directory.into(),
        }
    }

    /// Read both templates from `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        Ok(Self {
            compliance: read_template(&dir.join(Self::COMPLIANCE_FILE))?,
            directory: read_template(&dir.join(Self::DIRECTORY_FILE))?,
        })
    }
}

fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}
