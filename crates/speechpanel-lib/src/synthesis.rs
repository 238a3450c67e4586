//! Synthesis adapter — utterance-based synthesis engine → `speaking` flag.
//!
//! At most one utterance is active. Each `speak` cancels the previous one and
//! issues a fresh [`UtteranceId`]; events tagged with any other id belong to
//! a cancelled utterance and are dropped, in the same spirit as an epoch bump
//! discarding in-flight work.

use tracing::{debug, info, warn};

use speechpanel_core::config::UtteranceSettings;
use speechpanel_core::error::PanelError;
use speechpanel_core::text::is_blank;
use speechpanel_core::types::{Capability, PanelState, UtteranceId};

use crate::engine::{SynthesisEngine, Utterance};
use crate::events::{EventSender, UtteranceEvent};

pub struct SynthesisAdapter {
    engine: Option<Box<dyn SynthesisEngine>>,
    settings: UtteranceSettings,
    listener: EventSender,
    next_id: u64,
    active: Option<UtteranceId>,
}

impl SynthesisAdapter {
    pub fn new(
        engine: Option<Box<dyn SynthesisEngine>>,
        settings: UtteranceSettings,
        listener: &EventSender,
    ) -> Self {
        Self {
            engine,
            settings,
            listener: listener.clone(),
            next_id: 0,
            active: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// The utterance whose events are currently honoured.
    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    pub fn settings(&self) -> &UtteranceSettings {
        &self.settings
    }

    /// Applies to utterances created after the call.
    pub fn set_settings(&mut self, settings: UtteranceSettings) {
        self.settings = settings;
    }

    /// Cancel whatever is playing and submit `text` as a new utterance.
    ///
    /// `speaking` only becomes true once the engine reports the start.
    pub fn speak(&mut self, state: &mut PanelState, text: &str) -> Result<(), PanelError> {
        let Some(engine) = self.engine.as_mut() else {
            let err = PanelError::missing_engine(Capability::Synthesis);
            state.record_error(&err);
            return Err(err);
        };
        if is_blank(text) {
            let err = PanelError::blank_input();
            state.record_error(&err);
            return Err(err);
        }

        self.active = None;
        cancel_in_flight(engine, state);

        self.next_id += 1;
        let id = UtteranceId(self.next_id);
        let utterance = Utterance::new(id, text, self.settings.clamped(), self.listener.clone());
        self.active = Some(id);

        if let Err(fault) = engine.speak(utterance) {
            warn!("synthesis: {id} refused: {fault}");
            self.active = None;
            state.speaking = false;
            let err = PanelError::engine(Capability::Synthesis, fault);
            state.record_error(&err);
            return Err(err);
        }

        info!("synthesis: submitted {id} ({} chars)", text.len());
        Ok(())
    }

    /// Cancel in-flight and queued speech. Best-effort: a failing cancel is
    /// recorded but `speaking` is still reset.
    pub fn stop(&mut self, state: &mut PanelState) {
        self.active = None;
        match self.engine.as_mut() {
            Some(engine) => cancel_in_flight(engine, state),
            None => state.speaking = false,
        }
    }

    pub fn handle_event(&mut self, state: &mut PanelState, id: UtteranceId, event: UtteranceEvent) {
        if self.active != Some(id) {
            debug!("synthesis: dropping {event:?} for stale {id}");
            return;
        }

        match event {
            UtteranceEvent::Start => {
                debug!("synthesis: {id} started");
                state.speaking = true;
                state.clear_error();
            }
            UtteranceEvent::End => {
                debug!("synthesis: {id} ended");
                self.active = None;
                state.speaking = false;
                state.clear_error();
            }
            UtteranceEvent::Error(fault) => {
                warn!("synthesis: {id} failed: {fault}");
                self.active = None;
                state.speaking = false;
                state.record_error(&PanelError::engine(Capability::Synthesis, fault));
            }
        }
    }

    /// Cancel unconditionally.
    pub fn teardown(&mut self) {
        self.active = None;
        if let Some(engine) = self.engine.as_mut() {
            if let Err(fault) = engine.cancel() {
                warn!("synthesis: cancel on teardown failed: {fault}");
            }
        }
    }
}

fn cancel_in_flight(engine: &mut Box<dyn SynthesisEngine>, state: &mut PanelState) {
    if let Err(fault) = engine.cancel() {
        warn!("synthesis: cancel failed: {fault}");
        state.record_error(&PanelError::engine(Capability::Synthesis, fault));
    }
    state.speaking = false;
}
