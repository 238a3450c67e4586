//! Shared types for the speech panel.
//!
//! Kept free of tokio and tracing so hosts can depend on the state and view
//! types without pulling in the adapter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::text::is_blank;

// ─── Capabilities ─────────────────────────────────────────────────────────

/// One of the two platform speech capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Recognition,
    Synthesis,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recognition => f.write_str("recognition"),
            Self::Synthesis => f.write_str("synthesis"),
        }
    }
}

// ─── Session state ────────────────────────────────────────────────────────

/// Session state. One instance per panel, living as long as the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    /// Whether recognition is (intended to be) active.
    pub listening: bool,
    /// Append-only within a listening session; reset by the next start.
    pub transcript: String,
    /// Text pending synthesis.
    pub input_text: String,
    /// Whether an utterance is currently playing.
    pub speaking: bool,
    /// Last error, or empty. Last write wins.
    pub error_message: String,
}

impl PanelState {
    pub fn record_error(&mut self, err: &PanelError) {
        self.error_message = err.to_string();
    }

    pub fn clear_error(&mut self) {
        self.error_message.clear();
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

// ─── Recognition results ──────────────────────────────────────────────────

/// One candidate transcription of a recognition result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: String,
    pub confidence: f32,
}

/// A recognition result: ranked alternatives, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub alternatives: Vec<RecognitionAlternative>,
    pub is_final: bool,
}

impl RecognitionResult {
    /// Single-alternative result, the common shape engines deliver.
    pub fn new(transcript: impl Into<String>, is_final: bool) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript: transcript.into(),
                confidence: 1.0,
            }],
            is_final,
        }
    }

    /// Transcript of the top-ranked alternative.
    pub fn transcript(&self) -> Option<&str> {
        self.alternatives.first().map(|a| a.transcript.as_str())
    }
}

// ─── Utterances ───────────────────────────────────────────────────────────

/// Identity of one synthesis request. Fresh per `speak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UtteranceId(pub u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance#{}", self.0)
    }
}

// ─── View ─────────────────────────────────────────────────────────────────

/// What the speak/stop toggle does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakAction {
    Speak,
    Stop,
}

/// Snapshot of everything the page needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub listening: bool,
    pub transcript: String,
    pub input_text: String,
    pub speaking: bool,
    pub error_message: String,
    /// The speak/stop toggle is disabled while the input is blank.
    pub speak_enabled: bool,
    pub speak_action: SpeakAction,
    pub recognition_available: bool,
    pub synthesis_available: bool,
}

impl PanelView {
    pub fn new(state: &PanelState, recognition_available: bool, synthesis_available: bool) -> Self {
        Self {
            listening: state.listening,
            transcript: state.transcript.clone(),
            input_text: state.input_text.clone(),
            speaking: state.speaking,
            error_message: state.error_message.clone(),
            speak_enabled: !is_blank(&state.input_text),
            speak_action: if state.speaking {
                SpeakAction::Stop
            } else {
                SpeakAction::Speak
            },
            recognition_available,
            synthesis_available,
        }
    }
}
