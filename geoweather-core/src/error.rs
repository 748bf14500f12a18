use thiserror::Error;

/// Which upstream call a stage error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Weather,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "geocoding",
            Stage::Weather => "weather",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform failure returned by the geocoding and weather stages.
///
/// The `Display` text is what the user sees, so it is kept to a single line.
#[derive(Debug, Error, PartialEq)]
pub enum StageError {
    /// The provider answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Status { stage: Stage, status: u16 },

    /// The request could not be sent or its body could not be read.
    #[error("Request failed: {cause}")]
    Request { stage: Stage, cause: String },

    /// Geocoding returned no candidates.
    #[error("Location not found")]
    NotFound,

    /// The payload was not JSON or lacked an expected field.
    #[error("Error parsing data: {cause}")]
    Parse { stage: Stage, cause: String },
}

impl StageError {
    pub fn parse<S: Into<String>>(stage: Stage, cause: S) -> Self {
        Self::Parse { stage, cause: cause.into() }
    }

    pub fn stage(&self) -> Stage {
        match self {
            StageError::Status { stage, .. }
            | StageError::Request { stage, .. }
            | StageError::Parse { stage, .. } => *stage,
            StageError::NotFound => Stage::Geocoding,
        }
    }
}

/// Success payload or a [`StageError`].
pub type OperationResult<T> = Result<T, StageError>;
