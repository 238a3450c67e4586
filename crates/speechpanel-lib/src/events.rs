//! Listener interface between platform engines and the panel.
//!
//! Engines never touch panel state. They push [`PanelEvent`]s into an
//! [`EventSender`] and the panel applies them one at a time, in arrival
//! order, from a single logical thread.

use tokio::sync::mpsc;

use speechpanel_core::error::EngineFault;
use speechpanel_core::types::{RecognitionResult, UtteranceId};

/// Lifecycle events of the recognition engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// New or updated results. `results[index]` is the one that changed.
    Result {
        index: usize,
        results: Vec<RecognitionResult>,
    },
    Error(EngineFault),
    /// The engine stopped, on request or on its own (e.g. after silence).
    End,
}

/// Lifecycle events of one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum UtteranceEvent {
    Start,
    End,
    Error(EngineFault),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Recognition(RecognitionEvent),
    Utterance {
        id: UtteranceId,
        event: UtteranceEvent,
    },
}

pub type EventReceiver = mpsc::UnboundedReceiver<PanelEvent>;

/// Cloneable sending half handed to engines. Sends never block.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<PanelEvent>,
}

/// Create the event channel a panel and its engines share.
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

impl EventSender {
    /// Deliver an event. Returns `false` once the panel is gone.
    pub fn send(&self, event: PanelEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn recognition_result(&self, index: usize, results: Vec<RecognitionResult>) -> bool {
        self.send(PanelEvent::Recognition(RecognitionEvent::Result { index, results }))
    }

    pub fn recognition_error(&self, cause: impl Into<EngineFault>) -> bool {
        self.send(PanelEvent::Recognition(RecognitionEvent::Error(cause.into())))
    }

    pub fn recognition_end(&self) -> bool {
        self.send(PanelEvent::Recognition(RecognitionEvent::End))
    }

    pub fn utterance(&self, id: UtteranceId, event: UtteranceEvent) -> bool {
        self.send(PanelEvent::Utterance { id, event })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (tx, mut rx) = event_channel();
        assert!(tx.recognition_result(0, vec![RecognitionResult::new("hi", false)]));
        assert!(tx.recognition_error("network"));
        assert!(tx.recognition_end());

        assert!(matches!(
            rx.try_recv(),
            Ok(PanelEvent::Recognition(RecognitionEvent::Result { index: 0, .. }))
        ));
        assert_eq!(
            rx.try_recv().ok(),
            Some(PanelEvent::Recognition(RecognitionEvent::Error(
                EngineFault::new("network")
            )))
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(PanelEvent::Recognition(RecognitionEvent::End))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn send_reports_closed_receiver() {
        let (tx, rx) = event_channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(!tx.utterance(UtteranceId(1), UtteranceEvent::Start));
    }
}
