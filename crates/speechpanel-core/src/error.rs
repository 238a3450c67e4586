//! Error taxonomy for the speech panel.
//!
//! The `Display` text of a [`PanelError`] is exactly what the panel shows in
//! its single error slot, so callers never format messages themselves.

use std::fmt;

use crate::types::Capability;

/// Shown when the user asks to speak an empty or whitespace-only input.
pub const BLANK_INPUT_MESSAGE: &str = "Please enter some text to speak";

/// Errors surfaced by the recognition and synthesis adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// The platform does not provide the engine.
    #[error("Speech {0} is not supported in your browser")]
    CapabilityUnavailable(Capability),

    /// The active engine reported a failure mid-operation.
    #[error("Speech {capability} error: {cause}")]
    EngineError { capability: Capability, cause: String },

    /// The request cannot be honoured in the current state.
    #[error("{0}")]
    InvalidRequest(String),
}

impl PanelError {
    pub fn engine(capability: Capability, cause: impl fmt::Display) -> Self {
        Self::EngineError {
            capability,
            cause: cause.to_string(),
        }
    }

    pub fn blank_input() -> Self {
        Self::InvalidRequest(BLANK_INPUT_MESSAGE.to_string())
    }

    /// An action needed an engine the platform never provided. Same text as
    /// the startup banner, but reported as a refused request.
    pub fn missing_engine(capability: Capability) -> Self {
        Self::InvalidRequest(Self::CapabilityUnavailable(capability).to_string())
    }

    /// Which flow the error belongs to, if any.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Self::CapabilityUnavailable(c) => Some(*c),
            Self::EngineError { capability, .. } => Some(*capability),
            Self::InvalidRequest(_) => None,
        }
    }
}

/// Failure cause reported by a platform engine (e.g. `"network"`,
/// `"not-allowed"`, `"interrupted"`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EngineFault(pub String);

impl EngineFault {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

impl From<&str> for EngineFault {
    fn from(cause: &str) -> Self {
        Self(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_unavailable_message() {
        let err = PanelError::CapabilityUnavailable(Capability::Recognition);
        assert_eq!(
            err.to_string(),
            "Speech recognition is not supported in your browser"
        );
        let err = PanelError::CapabilityUnavailable(Capability::Synthesis);
        assert_eq!(
            err.to_string(),
            "Speech synthesis is not supported in your browser"
        );
    }

    #[test]
    fn engine_error_includes_cause() {
        let err = PanelError::engine(Capability::Recognition, EngineFault::new("no-speech"));
        assert_eq!(err.to_string(), "Speech recognition error: no-speech");
        let err = PanelError::engine(Capability::Synthesis, "synthesis-failed");
        assert_eq!(err.to_string(), "Speech synthesis error: synthesis-failed");
    }

    #[test]
    fn blank_input_is_invalid_request() {
        let err = PanelError::blank_input();
        assert!(matches!(err, PanelError::InvalidRequest(_)));
        assert_eq!(err.to_string(), BLANK_INPUT_MESSAGE);
        assert_eq!(err.capability(), None);
    }

    #[test]
    fn missing_engine_is_invalid_request_with_banner_text() {
        let err = PanelError::missing_engine(Capability::Synthesis);
        assert!(matches!(err, PanelError::InvalidRequest(_)));
        assert_eq!(
            err.to_string(),
            "Speech synthesis is not supported in your browser"
        );
    }
}
