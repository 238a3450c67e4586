//! `SpeechPanel` — the session. Owns the state and both adapters for the
//! lifetime of the page, maps user actions onto them and dispatches engine
//! events.
//!
//! Everything runs on whichever single thread owns the panel. Hosts either
//! pump the event receiver themselves ([`SpeechPanel::drain_events`]) or hand
//! the panel to [`PanelHandle`](crate::runtime::PanelHandle).

use tracing::{debug, info, warn};

use speechpanel_core::config::PanelConfig;
use speechpanel_core::error::PanelError;
use speechpanel_core::types::{Capability, PanelState, PanelView};

use crate::engine::Capabilities;
use crate::events::{EventReceiver, EventSender, PanelEvent};
use crate::recognition::RecognitionAdapter;
use crate::synthesis::SynthesisAdapter;

pub const PANEL_CLOSED_MESSAGE: &str = "Speech panel is closed";

pub struct SpeechPanel {
    state: PanelState,
    recognition: RecognitionAdapter,
    synthesis: SynthesisAdapter,
    closed: bool,
}

impl SpeechPanel {
    /// Mount the panel. Engines report through `events`; the matching
    /// receiver must be drained into [`handle_event`](Self::handle_event).
    pub fn new(capabilities: Capabilities, config: PanelConfig, events: EventSender) -> Self {
        let recognition =
            RecognitionAdapter::new(capabilities.recognition, config.recognition, &events);
        let synthesis = SynthesisAdapter::new(capabilities.synthesis, config.synthesis, &events);

        let mut state = PanelState::default();
        if !recognition.is_available() {
            let err = PanelError::CapabilityUnavailable(Capability::Recognition);
            warn!("panel: {err}");
            state.record_error(&err);
        }
        info!(
            "panel: mounted (recognition={}, synthesis={})",
            recognition.is_available(),
            synthesis.is_available()
        );

        Self {
            state,
            recognition,
            synthesis,
            closed: false,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn view(&self) -> PanelView {
        PanelView::new(
            &self.state,
            self.recognition.is_available(),
            self.synthesis.is_available(),
        )
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn recognition(&self) -> &RecognitionAdapter {
        &self.recognition
    }

    pub fn synthesis(&self) -> &SynthesisAdapter {
        &self.synthesis
    }

    // ─── Recognition actions ──────────────────────────────────────────────

    pub fn start_listening(&mut self) -> Result<(), PanelError> {
        self.ensure_open()?;
        self.recognition.start(&mut self.state)
    }

    pub fn stop_listening(&mut self) {
        if self.closed {
            return;
        }
        self.recognition.stop(&mut self.state);
    }

    /// Microphone toggle.
    pub fn toggle_listening(&mut self) -> Result<(), PanelError> {
        if self.state.listening {
            self.stop_listening();
            Ok(())
        } else {
            self.start_listening()
        }
    }

    // ─── Input actions ────────────────────────────────────────────────────

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
    }

    pub fn clear_input(&mut self) {
        self.state.input_text.clear();
    }

    // ─── Synthesis actions ────────────────────────────────────────────────

    pub fn speak(&mut self, text: &str) -> Result<(), PanelError> {
        self.ensure_open()?;
        self.synthesis.speak(&mut self.state, text)
    }

    /// Speak the current input text.
    pub fn speak_input(&mut self) -> Result<(), PanelError> {
        let text = self.state.input_text.clone();
        self.speak(&text)
    }

    pub fn stop_speaking(&mut self) {
        if self.closed {
            return;
        }
        self.synthesis.stop(&mut self.state);
    }

    /// Speak/stop toggle.
    pub fn toggle_speaking(&mut self) -> Result<(), PanelError> {
        if self.state.speaking {
            self.stop_speaking();
            Ok(())
        } else {
            self.speak_input()
        }
    }

    // ─── Settings ─────────────────────────────────────────────────────────

    pub fn set_config(&mut self, config: PanelConfig) {
        debug!("panel: applying config {config:?}");
        self.recognition.reconfigure(config.recognition);
        self.synthesis.set_settings(config.synthesis);
    }

    // ─── Events ───────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: PanelEvent) {
        if self.closed {
            debug!("panel: closed, dropping {event:?}");
            return;
        }
        match event {
            PanelEvent::Recognition(event) => self.recognition.handle_event(&mut self.state, event),
            PanelEvent::Utterance { id, event } => {
                self.synthesis.handle_event(&mut self.state, id, event)
            }
        }
    }

    /// Apply every event already queued on `events`. Returns how many were
    /// applied.
    pub fn drain_events(&mut self, events: &mut EventReceiver) -> usize {
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    // ─── Teardown ─────────────────────────────────────────────────────────

    /// Unmount: stop recognition and cancel synthesis. Idempotent; also run
    /// on drop.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.recognition.teardown();
        self.synthesis.teardown();
        self.state.listening = false;
        self.state.speaking = false;
        info!("panel: shut down");
    }

    fn ensure_open(&self) -> Result<(), PanelError> {
        if self.closed {
            return Err(PanelError::InvalidRequest(PANEL_CLOSED_MESSAGE.to_string()));
        }
        Ok(())
    }
}

impl Drop for SpeechPanel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel;

    #[test]
    fn mount_without_engines_sets_banner() {
        let (tx, _rx) = event_channel();
        let panel = SpeechPanel::new(Capabilities::none(), PanelConfig::default(), tx);
        assert_eq!(
            panel.state().error_message,
            "Speech recognition is not supported in your browser"
        );
        let view = panel.view();
        assert!(!view.recognition_available);
        assert!(!view.synthesis_available);
    }

    #[test]
    fn input_edits() {
        let (tx, _rx) = event_channel();
        let mut panel = SpeechPanel::new(Capabilities::none(), PanelConfig::default(), tx);
        panel.set_input_text("Hi there");
        assert!(panel.view().speak_enabled);
        panel.clear_input();
        assert_eq!(panel.state().input_text, "");
        assert!(!panel.view().speak_enabled);
    }

    #[test]
    fn actions_after_shutdown_are_refused() {
        let (tx, _rx) = event_channel();
        let mut panel = SpeechPanel::new(Capabilities::none(), PanelConfig::default(), tx);
        panel.shutdown();
        panel.shutdown();
        assert!(panel.is_closed());
        let err = panel.start_listening().unwrap_err();
        assert_eq!(err.to_string(), PANEL_CLOSED_MESSAGE);
    }
}
