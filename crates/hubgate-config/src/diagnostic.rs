// SPDX-FileCopyrightText: 2026 Hubgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Deserialization failures become diagnostics labelled at the offending key
//! of the TOML file that produced them. Unknown keys and unknown `kind`
//! values get a "did you mean" hint when a valid spelling is close enough.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must exceed to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A TOML document that contributed to the configuration.
#[derive(Debug, Clone)]
pub struct TomlSource {
    /// Display name: an absolute file path, or `<inline>`.
    pub name: String,
    pub content: String,
}

impl TomlSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A configuration error with source location and fix-up hints.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key not accepted by its section.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(hubgate::config::unknown_key),
        help("{}", hint(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys the section accepts, comma separated.
        valid_keys: String,
        #[label("not a key of this section")]
        at: Option<SourceSpan>,
        #[source_code]
        source_code: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(hubgate::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("this value")]
        at: Option<SourceSpan>,
        #[source_code]
        source_code: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(hubgate::config::missing_key),
        help("set `{key}` in hubgate.toml")
    )]
    MissingKey { key: String },

    /// An enum value (such as a service `kind`) outside the accepted set.
    #[error("unknown value `{value}` for `{key}`")]
    #[diagnostic(
        code(hubgate::config::unknown_variant),
        help("{}", hint(suggestion.as_deref(), valid_values))
    )]
    UnknownVariant {
        key: String,
        value: String,
        suggestion: Option<String>,
        valid_values: String,
    },

    /// A semantic check on an otherwise well-formed config failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(hubgate::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(hubgate::config::other))]
    Other(String),
}

fn hint(suggestion: Option<&str>, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid values: {valid}"),
        None => format!("valid values: {valid}"),
    }
}

impl ConfigError {
    /// Translate one figment failure, locating it in `sources` where possible.
    pub fn from_figment(error: &figment::Error, sources: &[TomlSource]) -> Self {
        use figment::error::Kind;

        let dotted = error.path.join(".");
        match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (at, source_code) = locate(error, sources, &error.path, field);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    at,
                    source_code,
                }
            }
            Kind::UnknownVariant(value, expected) => ConfigError::UnknownVariant {
                key: dotted,
                value: value.clone(),
                suggestion: suggest_key(value, expected),
                valid_values: expected.join(", "),
            },
            Kind::MissingField(field) if dotted.is_empty() => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: format!("{dotted}.{field}"),
            },
            Kind::InvalidType(actual, expected) => {
                // The path ends at the offending key; its parent is the section.
                let (at, source_code) = match error.path.split_last() {
                    Some((key, section)) => locate(error, sources, section, key),
                    None => (None, None),
                };
                ConfigError::InvalidType {
                    key: dotted,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                    at,
                    source_code,
                }
            }
            _ => ConfigError::Other(error.to_string()),
        }
    }
}

/// Convert every failure chained in `err` into its own diagnostic.
pub fn collect_figment_errors(err: figment::Error, sources: &[TomlSource]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| ConfigError::from_figment(&error, sources))
        .collect()
}

/// Span of `key` under `section` in the source that produced `error`.
///
/// Errors without file metadata (inline strings) fall back to the sole
/// source when exactly one was given.
fn locate(
    error: &figment::Error,
    sources: &[TomlSource],
    section: &[String],
    key: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    let source = match (origin, sources) {
        (Some(name), _) => sources.iter().find(|s| s.name == name),
        (None, [only]) => Some(only),
        (None, _) => None,
    };

    source
        .and_then(|s| {
            let offset = find_key_offset(&s.content, section, key)?;
            Some((
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(&s.name, s.content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["server"]` the search starts after the `[server]` header.
/// Array-of-tables paths such as `["services", "1"]` start after the second
/// `[[services]]` header. Top-level keys are searched from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let table = format!("[{section}]");
            let array = format!("[[{section}]]");
            match path.get(1).and_then(|i| i.parse::<usize>().ok()) {
                Some(index) => content
                    .match_indices(&array)
                    .nth(index)
                    .map(|(pos, _)| pos + array.len())?,
                None => content
                    .find(&array)
                    .map(|pos| pos + array.len())
                    .or_else(|| content.find(&table).map(|pos| pos + table.len()))?,
            }
        }
    };

    let mut line_start = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let body = line.trim_start();
        let is_key = body
            .strip_prefix(field)
            .is_some_and(|after| after.starts_with([' ', '=', '\t']));
        if is_key {
            return Some(line_start + (line.len() - body.len()));
        }
        line_start += line.len();
    }

    None
}

/// Closest entry of `candidates` to `unknown` by Jaro-Winkler similarity,
/// if any scores above the suggestion threshold.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(unknown, c), *c))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
