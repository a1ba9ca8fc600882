use serde::{Deserialize, Serialize};

/// Minimum spacing, in seconds, between two track-history samples.
pub const DEFAULT_TRACK_INTERVAL: f64 = 15.0;

/// Revision of the exercise message grammar.
///
/// Revisions only differ in their preamble: routing, exercise identifier,
/// static references and how the originator is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrammarVersion {
    Repmus2023,
    #[default]
    Repmus2024,
}

/// How an absent optional image is written at the end of a detection line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageField {
    /// Drop the trailing field entirely.
    #[default]
    Omit,
    /// Always write the field, `-` when there is no image.
    Placeholder,
}

/// Options shared by every section of an assembled report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub grammar: GrammarVersion,
    pub image_field: ImageField,
    pub include_full_summary: bool,
    pub include_track_history: bool,
    pub include_narrative: bool,
    pub track_interval: f64,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            grammar: GrammarVersion::default(),
            image_field: ImageField::default(),
            include_full_summary: false,
            include_track_history: false,
            include_narrative: false,
            track_interval: DEFAULT_TRACK_INTERVAL,
        }
    }
}

/// A rendered report: the file it belongs in and its ordered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMessage {
    pub filename: String,
    pub lines: Vec<String>,
}

impl ReportMessage {
    /// Full message text, one newline after every line.
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Lines beginning with the given keyword, e.g. `"MILCOREP"`.
    pub fn lines_with_keyword<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(move |line| line.split('/').next() == Some(keyword))
    }
}

/// Common error type for report generation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("malformed {field}: {reason}")]
    Format { field: String, reason: String },
    #[error("no {table} entry for '{key}'")]
    Lookup { table: &'static str, key: String },
    #[error("{field} out of range: {reason}")]
    Domain { field: String, reason: String },
}

impl ReportError {
    pub fn format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn lookup(table: &'static str, key: impl Into<String>) -> Self {
        Self::Lookup {
            table,
            key: key.into(),
        }
    }

    pub fn domain(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Domain {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Qualifies the offending field with the record it came from.
    pub fn within(self, record: &str) -> Self {
        match self {
            Self::Format { field, reason } => Self::Format {
                field: format!("{record} {field}"),
                reason,
            },
            Self::Domain { field, reason } => Self::Domain {
                field: format!("{record} {field}"),
                reason,
            },
            Self::Lookup { table, key } => Self::Lookup {
                table,
                key: format!("{key} ({record})"),
            },
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
