//! Recognition adapter — continuous recognition engine → append-only
//! transcript + `listening` flag.
//!
//! ```text
//! Idle ──start──▶ Listening ──stop / error──▶ Idle
//!                   │  ▲
//!                   └──┘ end (no fault, still wanted) → restart
//! ```
//!
//! Engines may end a session on their own after a pause. The adapter keeps
//! the user's intent (`wants_listening`) apart from the error slot and reads
//! both when the `End` event is dispatched, never earlier, so a `stop()` or
//! an error that lands before a pending `End` always wins over the restart.

use tracing::{debug, info, warn};

use speechpanel_core::config::RecognitionSettings;
use speechpanel_core::error::{EngineFault, PanelError};
use speechpanel_core::text::append_fragment;
use speechpanel_core::types::{Capability, PanelState, RecognitionResult};

use crate::engine::RecognitionEngine;
use crate::events::{EventSender, RecognitionEvent};

pub struct RecognitionAdapter {
    engine: Option<Box<dyn RecognitionEngine>>,
    settings: RecognitionSettings,
    /// The user asked to listen and has not asked to stop.
    wants_listening: bool,
    /// The engine reported an error since the last `start`.
    faulted: bool,
    restarts: u64,
}

impl RecognitionAdapter {
    /// Register `listener` with the engine and apply `settings`.
    pub fn new(
        mut engine: Option<Box<dyn RecognitionEngine>>,
        settings: RecognitionSettings,
        listener: &EventSender,
    ) -> Self {
        if let Some(engine) = engine.as_mut() {
            engine.set_listener(listener.clone());
            engine.configure(&settings);
        }
        Self {
            engine,
            settings,
            wants_listening: false,
            faulted: false,
            restarts: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Number of automatic restarts performed so far.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }

    pub fn reconfigure(&mut self, settings: RecognitionSettings) {
        if let Some(engine) = self.engine.as_mut() {
            engine.configure(&settings);
        }
        self.settings = settings;
    }

    /// Start a new listening session. Resets the transcript.
    ///
    /// A no-op while a session is already wanted: the engine is not asked
    /// twice and the transcript is kept.
    pub fn start(&mut self, state: &mut PanelState) -> Result<(), PanelError> {
        let Some(engine) = self.engine.as_mut() else {
            let err = PanelError::CapabilityUnavailable(Capability::Recognition);
            state.record_error(&err);
            return Err(err);
        };
        if self.wants_listening {
            debug!("recognition: already listening");
            return Ok(());
        }

        state.clear_error();
        state.transcript.clear();
        self.faulted = false;

        if let Err(fault) = engine.start() {
            warn!("recognition: start refused: {fault}");
            return Err(self.fail(state, fault));
        }

        self.wants_listening = true;
        state.listening = true;
        info!("recognition: listening");
        Ok(())
    }

    pub fn stop(&mut self, state: &mut PanelState) {
        self.wants_listening = false;
        if let Some(engine) = self.engine.as_mut() {
            engine.stop();
        }
        if state.listening {
            info!("recognition: stopped");
        }
        state.listening = false;
    }

    pub fn handle_event(&mut self, state: &mut PanelState, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result { index, results } => {
                self.append_result(state, index, &results);
            }
            RecognitionEvent::Error(fault) => {
                warn!("recognition: engine error: {fault}");
                self.fail(state, fault);
            }
            RecognitionEvent::End => self.on_end(state),
        }
    }

    /// Stop the engine regardless of state. Idempotent.
    pub fn teardown(&mut self) {
        self.wants_listening = false;
        if let Some(engine) = self.engine.as_mut() {
            engine.stop();
        }
    }

    fn append_result(&self, state: &mut PanelState, index: usize, results: &[RecognitionResult]) {
        match results.get(index).and_then(RecognitionResult::transcript) {
            Some(fragment) => {
                debug!(
                    "recognition: result[{index}] ({} chars, final={})",
                    fragment.len(),
                    results[index].is_final
                );
                append_fragment(&mut state.transcript, fragment);
            }
            None => {
                warn!(
                    "recognition: result index {index} has no transcript ({} results)",
                    results.len()
                );
            }
        }
    }

    fn on_end(&mut self, state: &mut PanelState) {
        if self.faulted || !self.wants_listening || !self.settings.auto_restart {
            debug!(
                "recognition: ended (faulted={}, wanted={})",
                self.faulted, self.wants_listening
            );
            self.wants_listening = false;
            state.listening = false;
            return;
        }

        let Some(engine) = self.engine.as_mut() else {
            state.listening = false;
            return;
        };

        match engine.start() {
            Ok(()) => {
                self.restarts += 1;
                state.listening = true;
                debug!("recognition: engine ended on its own, restarted (#{})", self.restarts);
            }
            Err(fault) => {
                warn!("recognition: restart failed: {fault}");
                self.fail(state, fault);
            }
        }
    }

    fn fail(&mut self, state: &mut PanelState, fault: EngineFault) -> PanelError {
        let err = PanelError::engine(Capability::Recognition, fault);
        state.record_error(&err);
        state.listening = false;
        self.wants_listening = false;
        self.faulted = true;
        err
    }
}
