// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment errors into miette diagnostics.
//!
//! Unknown keys get a "did you mean" hint (Jaro-Winkler via `strsim`) and,
//! when the offending file is known, a labelled span in that file.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a valid key needs before it is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A configuration problem, ready for rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section defines.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(secman::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, if any is close enough.
        suggestion: Option<String>,
        /// Comma-separated keys valid at that location.
        valid_keys: String,
        #[label("not a secman setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("invalid type for `{key}`: {detail}")]
    #[diagnostic(code(secman::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(secman::config::missing_key),
        help("add `{key} = <value>` to your secman.toml")
    )]
    MissingKey { key: String },

    /// A value that parsed but makes no sense for a vault.
    #[error("validation error: {message}")]
    #[diagnostic(code(secman::config::validation))]
    Validation { message: String },

    /// Anything Figment reports that has no dedicated variant.
    #[error("configuration error: {0}")]
    #[diagnostic(code(secman::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert every error carried by a `figment::Error` into a `ConfigError`.
///
/// `toml_sources` holds `(path, contents)` pairs used to locate spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let dotted = error.path.join(".");
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let suggestion = suggest_key(field, expected);
                    let (span, src) = locate(&error, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion,
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.to_string(),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: dotted,
                    detail: format!("found {actual}"),
                    expected: expected.clone(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Resolve the file an error came from and the span of `field` within it.
fn locate(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(figment::Source::File(file)) = error.metadata.as_ref().and_then(|m| m.source.as_ref())
    else {
        return (None, None);
    };
    let file = file.display().to_string();
    let Some((name, content)) = toml_sources.iter().find(|(p, _)| *p == file) else {
        return (None, None);
    };

    let section = error.path.first().map(String::as_str);
    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` as a key in `content`.
///
/// With `section = Some("vault")` only lines under the `[vault]` header are
/// searched; with `None` only lines before the first header are.
pub fn find_key_offset(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            current = header.split(']').next().map(str::trim);
        } else if current == section {
            if let Some(rest) = trimmed.strip_prefix(field) {
                if rest.trim_start().starts_with('=') {
                    return Some(offset + (line.len() - trimmed.len()));
                }
            }
        }
        offset += line.len();
    }

    None
}

/// Closest valid key to `unknown`, if it clears the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_sites_file_for_typo() {
        let valid = &["root", "config_file", "sites_file", "encrypted_files_dir"];
        assert_eq!(suggest_key("site_file", valid), Some("sites_file".to_string()));
    }

    #[test]
    fn suggests_level_for_typo() {
        assert_eq!(suggest_key("levle", &["level"]), Some("level".to_string()));
    }

    #[test]
    fn no_suggestion_for_unrelated_key() {
        let valid = &["root", "config_file", "sites_file"];
        assert_eq!(suggest_key("qqqqqq", valid), None);
    }

    #[test]
    fn finds_key_inside_its_section_only() {
        let content = "[log]\nroot = 1\n[vault]\nroot = \"/x\"\n";
        let offset = find_key_offset(content, Some("vault"), "root").unwrap();
        assert_eq!(&content[offset..offset + 4], "root");
        assert!(offset > content.find("[vault]").unwrap());
    }

    #[test]
    fn key_prefix_does_not_match_longer_key() {
        let content = "[vault]\nrootdir = 1\n";
        assert_eq!(find_key_offset(content, Some("vault"), "root"), None);
    }
}
