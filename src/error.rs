use thiserror::Error;

use crate::models::OutputFormat;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("API key is required (set ALPHA_VANTAGE_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid output format '{value}' (possible values are {expected})")]
    InvalidOutputFormat { value: String, expected: String },

    #[error("invalid interval '{value}' (possible values are {expected})")]
    InvalidInterval { value: String, expected: String },

    #[error("invalid {field} date '{value}' (expected format YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("{format} output format is not supported for {target}")]
    UnsupportedFormat {
        format: OutputFormat,
        target: &'static str,
    },

    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to {url} returned status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Alpha Vantage returned an error: {0}")]
    Api(String),

    #[error("failed to decode {context}: {reason}")]
    Decode { context: String, reason: String },

    #[error("failed to parse {field} '{value}' in {record}")]
    FieldParse {
        field: &'static str,
        value: String,
        record: String,
    },

    #[error("failed to read currency list: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn decode(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn field(field: &'static str, value: &str, record: impl Into<String>) -> Self {
        Self::FieldParse {
            field,
            value: value.to_string(),
            record: record.into(),
        }
    }

    /// Process exit status the binary reports for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingApiKey
            | Self::Configuration(_)
            | Self::Validation(_)
            | Self::InvalidOutputFormat { .. }
            | Self::InvalidInterval { .. }
            | Self::InvalidDate { .. }
            | Self::UnsupportedFormat { .. } => 2,
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::Api(_) => 3,
            Self::Decode { .. } | Self::FieldParse { .. } | Self::Csv(_) => 4,
        }
    }
}
