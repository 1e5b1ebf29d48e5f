use std::io;
use thiserror::Error;

/// Custom error types for the data generator
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown column type '{column_type}' for column '{column}' in schema '{schema}'")]
    UnsupportedColumnType {
        column_type: String,
        column: String,
        schema: String,
    },

    #[error("Specified list '{0}' does not exist")]
    ListNotFound(String),

    #[error("Invalid list '{0}' specified")]
    UnknownList(String),

    #[error("List '{0}' is empty")]
    EmptyList(String),

    #[error("List column '{0}' has no template value")]
    MissingListTemplate(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid range for '{name}': {min} > {max}")]
    Range { name: String, min: i64, max: i64 },

    #[error("Property error: {0}")]
    Property(String),

    #[error("Invalid table name specified")]
    InvalidTableName,
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Output modes supported by the generator. The mode only affects the
/// quoting/escaping policy applied to generated values, never the values
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// Delimited text, values wrapped in double quotes
    Csv,
    /// SQL insert values, wrapped in single quotes with embedded quotes doubled
    Sql,
}

impl OutputType {
    /// The conventional quote character for this output mode
    pub fn quote_char(&self) -> char {
        match self {
            OutputType::Csv => '"',
            OutputType::Sql => '\'',
        }
    }

    /// The conventional file extension for this output mode
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputType::Csv => "csv",
            OutputType::Sql => "sql",
        }
    }

    /// Escape a generated value for this output mode. SQL output doubles any
    /// embedded quote character; CSV output passes the value through and
    /// relies on the outer quotes alone.
    pub fn escape_value(&self, value: &str, quote: char) -> String {
        match self {
            OutputType::Csv => value.to_string(),
            OutputType::Sql => value.replace(quote, &format!("{quote}{quote}")),
        }
    }
}
