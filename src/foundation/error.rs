/// Convenience result type used across splinecam.
pub type SplineCamResult<T> = Result<T, SplineCamError>;

/// Top-level error taxonomy.
///
/// Curve exhaustion and the frame budget are not represented here; they are normal run
/// outcomes (see [`crate::RunOutcome`]).
#[derive(thiserror::Error, Debug)]
pub enum SplineCamError {
    /// Invalid configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed spline-chain input.
    #[error("parse error at line {line}: {msg}")]
    Parse {
        /// 1-based line number in the input text.
        line: usize,
        /// What was wrong with the line.
        msg: String,
    },

    /// Misuse of the curve model (for example a segment index past the end).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failure writing an output frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplineCamError {
    /// Build a [`SplineCamError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SplineCamError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// Build a [`SplineCamError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SplineCamError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SplineCamError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
