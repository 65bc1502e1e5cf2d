use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MebelError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Workbook decoding error: {message}")]
    WorkbookDecoding { message: String },

    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("Currency rates unavailable for {base}: {message}")]
    RatesUnavailable { base: String, message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl MebelError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn workbook_decoding(message: impl Into<String>) -> Self {
        Self::WorkbookDecoding {
            message: message.into(),
        }
    }

    pub fn unsupported_format(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    pub fn rates_unavailable(base: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RatesUnavailable {
            base: base.into(),
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::WorkbookDecoding { .. } => "WORKBOOK_DECODING_ERROR",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::RatesUnavailable { .. } => "RATES_UNAVAILABLE",
            Self::Timeout { .. } => "REQUEST_TIMEOUT",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::WorkbookDecoding { .. } => 422,
            Self::UnsupportedFormat { .. } => 415,
            Self::RatesUnavailable { .. } => 503,
            Self::Timeout { .. } => 408,
        }
    }
}

pub type MebelResult<T> = Result<T, MebelError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<MebelError> for ErrorResponse {
    fn from(error: MebelError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

impl From<validator::ValidationErrors> for MebelError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::validation("model", crate::format_validation_errors(&errors))
    }
}
