use chrono::NaiveDate;
use std::error::Error;
use std::fmt;

/// Everything that can go wrong between receiving preferences and handing back
/// a plan or a recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    InvalidPreferences(String),
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    Configuration(String),
    Transport(String),
    Extraction(String),
    Parse(String),
    Schema(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidPreferences(msg) => write!(f, "Invalid preferences: {}", msg),
            GenerationError::InvalidDateRange { start, end } => write!(
                f,
                "Invalid date range: end date {} is before start date {}",
                end, start
            ),
            GenerationError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            GenerationError::Transport(msg) => write!(f, "Model request failed: {}", msg),
            GenerationError::Extraction(msg) => write!(f, "JSON extraction error: {}", msg),
            GenerationError::Parse(msg) => write!(f, "JSON parse error: {}", msg),
            GenerationError::Schema(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err.to_string())
    }
}

impl GenerationError {
    /// Stable identifier returned to API clients alongside the message.
    pub fn error_code(&self) -> &'static str {
        match self {
            GenerationError::InvalidPreferences(_) => "INVALID_PREFERENCES",
            GenerationError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            GenerationError::Configuration(_) => "CONFIGURATION_ERROR",
            GenerationError::Transport(_) => "TRANSPORT_ERROR",
            GenerationError::Extraction(_) => "EXTRACTION_ERROR",
            GenerationError::Parse(_) => "PARSE_ERROR",
            GenerationError::Schema(_) => "SCHEMA_ERROR",
        }
    }

    /// Errors caused by the request itself rather than by the model or the server.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GenerationError::InvalidPreferences(_) | GenerationError::InvalidDateRange { .. }
        )
    }

    /// Plan generation swaps these for the mock plan; the rest abort the call.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GenerationError::Transport(_)
                | GenerationError::Extraction(_)
                | GenerationError::Parse(_)
                | GenerationError::Schema(_)
        )
    }
}
