//! Capability traits for the two platform speech engines.
//!
//! The panel holds engines as trait objects (`Box<dyn RecognitionEngine>`,
//! `Box<dyn SynthesisEngine>`) so real platform bindings and scripted test
//! engines are interchangeable. Every operation is a request: outcomes are
//! reported later through the event listener, never through a return value.
//! The `Result` on `start`/`speak`/`cancel` only covers requests the engine
//! refuses on the spot.

use speechpanel_core::config::{RecognitionSettings, UtteranceSettings};
use speechpanel_core::error::EngineFault;
use speechpanel_core::types::UtteranceId;

use crate::events::{EventSender, UtteranceEvent};

// ─── Recognition ──────────────────────────────────────────────────────────

/// Continuous speech-to-text engine emitting interim and final results.
pub trait RecognitionEngine: Send {
    /// Register the listener for result, error and end events.
    fn set_listener(&mut self, listener: EventSender);

    fn configure(&mut self, settings: &RecognitionSettings);

    /// Begin listening.
    fn start(&mut self) -> Result<(), EngineFault>;

    /// Stop listening. Must be safe to call when not listening.
    fn stop(&mut self);
}

// ─── Synthesis ────────────────────────────────────────────────────────────

/// One text-to-speech request with its own start/end/error callbacks.
#[derive(Debug, Clone)]
pub struct Utterance {
    id: UtteranceId,
    text: String,
    settings: UtteranceSettings,
    listener: EventSender,
}

impl Utterance {
    pub(crate) fn new(
        id: UtteranceId,
        text: impl Into<String>,
        settings: UtteranceSettings,
        listener: EventSender,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            settings,
            listener,
        }
    }

    pub fn id(&self) -> UtteranceId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn settings(&self) -> &UtteranceSettings {
        &self.settings
    }

    /// Playback began.
    pub fn started(&self) {
        self.listener.utterance(self.id, UtteranceEvent::Start);
    }

    /// Playback finished.
    pub fn ended(&self) {
        self.listener.utterance(self.id, UtteranceEvent::End);
    }

    pub fn failed(&self, cause: impl Into<EngineFault>) {
        self.listener
            .utterance(self.id, UtteranceEvent::Error(cause.into()));
    }
}

/// Utterance-based text-to-speech engine.
pub trait SynthesisEngine: Send {
    /// Queue an utterance for playback.
    fn speak(&mut self, utterance: Utterance) -> Result<(), EngineFault>;

    /// Drop the playing utterance and everything queued behind it.
    fn cancel(&mut self) -> Result<(), EngineFault>;
}

// ─── Detection ────────────────────────────────────────────────────────────

/// Engines detected at startup. Either may be absent.
#[derive(Default)]
pub struct Capabilities {
    pub recognition: Option<Box<dyn RecognitionEngine>>,
    pub synthesis: Option<Box<dyn SynthesisEngine>>,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_recognition(mut self, engine: impl RecognitionEngine + 'static) -> Self {
        self.recognition = Some(Box::new(engine));
        self
    }

    pub fn with_synthesis(mut self, engine: impl SynthesisEngine + 'static) -> Self {
        self.synthesis = Some(Box::new(engine));
        self
    }
}
