//! Scripted engines for driving the panel from tests.
//!
//! Each fake is a cheap clone around shared state: one clone goes into the
//! panel as the engine, the test keeps the other to inspect calls and emit
//! events.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use speechpanel_lib::engine::{RecognitionEngine, SynthesisEngine, Utterance};
use speechpanel_lib::events::EventSender;
use speechpanel_lib::speechpanel_core::config::RecognitionSettings;
use speechpanel_lib::speechpanel_core::error::EngineFault;
use speechpanel_lib::speechpanel_core::types::RecognitionResult;

// ─── Recognition ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecognizerLog {
    pub starts: usize,
    pub stops: usize,
    pub settings: Option<RecognitionSettings>,
    /// Between an accepted `start` and `stop`/end.
    pub running: bool,
    refuse_next_start: Option<String>,
    listener: Option<EventSender>,
}

#[derive(Clone, Default)]
pub struct FakeRecognizer(Arc<Mutex<RecognizerLog>>);

impl FakeRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> MutexGuard<'_, RecognizerLog> {
        self.0.lock().unwrap()
    }

    pub fn starts(&self) -> usize {
        self.log().starts
    }

    pub fn stops(&self) -> usize {
        self.log().stops
    }

    pub fn refuse_next_start(&self, cause: &str) {
        self.log().refuse_next_start = Some(cause.to_string());
    }

    fn listener(&self) -> EventSender {
        self.log().listener.clone().expect("listener registered")
    }

    /// Emit a single-result event, as an interim result.
    pub fn emit_result(&self, text: &str) {
        self.listener()
            .recognition_result(0, vec![RecognitionResult::new(text, false)]);
    }

    pub fn emit_results(&self, index: usize, texts: &[&str]) {
        let results = texts
            .iter()
            .map(|t| RecognitionResult::new(*t, true))
            .collect();
        self.listener().recognition_result(index, results);
    }

    pub fn emit_error(&self, cause: &str) {
        self.listener().recognition_error(cause);
    }

    pub fn is_running(&self) -> bool {
        self.log().running
    }

    /// The engine ends its session, on request or after silence.
    pub fn emit_end(&self) {
        self.log().running = false;
        self.listener().recognition_end();
    }
}

impl RecognitionEngine for FakeRecognizer {
    fn set_listener(&mut self, listener: EventSender) {
        self.log().listener = Some(listener);
    }

    fn configure(&mut self, settings: &RecognitionSettings) {
        self.log().settings = Some(settings.clone());
    }

    fn start(&mut self) -> Result<(), EngineFault> {
        let mut log = self.log();
        log.starts += 1;
        // Platform engines refuse a second start while a session is live.
        if log.running {
            return Err(EngineFault::new("invalid-state"));
        }
        if let Some(cause) = log.refuse_next_start.take() {
            return Err(EngineFault::new(cause));
        }
        log.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        let mut log = self.log();
        log.stops += 1;
        log.running = false;
    }
}

// ─── Synthesis ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SynthLog {
    pub submitted: Vec<String>,
    pub started: Vec<String>,
    pub finished: Vec<String>,
    pub cancels: usize,
    pub fail_cancel: bool,
    current: Option<Utterance>,
    cancelled: Vec<Utterance>,
}

/// Plays one utterance at a time; the test decides when it starts and ends.
#[derive(Clone, Default)]
pub struct FakeSynth(Arc<Mutex<SynthLog>>);

impl FakeSynth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> MutexGuard<'_, SynthLog> {
        self.0.lock().unwrap()
    }

    pub fn fail_cancel(&self) {
        self.log().fail_cancel = true;
    }

    /// Fire `onStart` for the current utterance.
    pub fn play(&self) {
        let mut log = self.log();
        if let Some(u) = log.current.clone() {
            u.started();
            log.started.push(u.text().to_string());
        }
    }

    /// Fire `onEnd` for the current utterance.
    pub fn finish(&self) {
        let mut log = self.log();
        if let Some(u) = log.current.take() {
            u.ended();
            log.finished.push(u.text().to_string());
        }
    }

    pub fn fail(&self, cause: &str) {
        if let Some(u) = self.log().current.take() {
            u.failed(cause);
        }
    }

    /// Some platforms report an error on utterances they cancelled.
    pub fn report_cancelled(&self, cause: &str) {
        for u in self.log().cancelled.drain(..) {
            u.failed(cause);
        }
    }
}

impl SynthesisEngine for FakeSynth {
    fn speak(&mut self, utterance: Utterance) -> Result<(), EngineFault> {
        let mut log = self.log();
        log.submitted.push(utterance.text().to_string());
        log.current = Some(utterance);
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), EngineFault> {
        let mut log = self.log();
        log.cancels += 1;
        if let Some(u) = log.current.take() {
            log.cancelled.push(u);
        }
        if log.fail_cancel {
            return Err(EngineFault::new("cancel-failed"));
        }
        Ok(())
    }
}
