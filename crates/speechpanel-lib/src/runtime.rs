//! Async driver — runs a [`SpeechPanel`] on one tokio task.
//!
//! ```text
//! PanelHandle::toggle_listening() ─┐
//! PanelHandle::speak(...)         ─┼─▶ [cmd_tx] ─┐
//!                                  │             ├─▶ panel task ─▶ watch<PanelView>
//! engine callbacks ─▶ EventSender ─┴─▶ [events] ─┘
//! ```
//!
//! User commands and engine events are applied by the same task, one at a
//! time, so the panel state is the single source of truth when each event is
//! handled. Each channel is applied in send order; when both have work ready
//! the task picks between them, so a command and an engine event sent at the
//! same moment have no defined relative order. Commands that can fail carry
//! a oneshot reply.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

use speechpanel_core::config::PanelConfig;
use speechpanel_core::error::PanelError;
use speechpanel_core::types::PanelView;

use crate::events::EventReceiver;
use crate::panel::{SpeechPanel, PANEL_CLOSED_MESSAGE};

type Reply = oneshot::Sender<Result<(), PanelError>>;

enum Cmd {
    StartListening(Reply),
    StopListening,
    ToggleListening(Reply),
    SetInput(String),
    ClearInput,
    Speak(String, Reply),
    ToggleSpeaking(Reply),
    StopSpeaking,
    SetConfig(PanelConfig),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable handle to a panel running on its own task.
#[derive(Clone)]
pub struct PanelHandle {
    cmd_tx: mpsc::UnboundedSender<Cmd>,
    view_rx: watch::Receiver<PanelView>,
}

impl PanelHandle {
    /// Move `panel` onto a tokio task. Must be called inside a runtime.
    ///
    /// The task ends, tearing the panel down, on [`shutdown`](Self::shutdown)
    /// or once every handle is dropped.
    pub fn spawn(panel: SpeechPanel, events: EventReceiver) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(panel.view());
        tokio::spawn(panel_task(panel, cmd_rx, events, view_tx));
        Self { cmd_tx, view_rx }
    }

    pub async fn start_listening(&self) -> Result<(), PanelError> {
        self.request(Cmd::StartListening).await
    }

    pub fn stop_listening(&self) {
        let _ = self.cmd_tx.send(Cmd::StopListening);
    }

    pub async fn toggle_listening(&self) -> Result<(), PanelError> {
        self.request(Cmd::ToggleListening).await
    }

    pub fn set_input_text(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(Cmd::SetInput(text.into()));
    }

    pub fn clear_input(&self) {
        let _ = self.cmd_tx.send(Cmd::ClearInput);
    }

    pub async fn speak(&self, text: impl Into<String>) -> Result<(), PanelError> {
        let text = text.into();
        self.request(|reply| Cmd::Speak(text, reply)).await
    }

    pub async fn toggle_speaking(&self) -> Result<(), PanelError> {
        self.request(Cmd::ToggleSpeaking).await
    }

    pub fn stop_speaking(&self) {
        let _ = self.cmd_tx.send(Cmd::StopSpeaking);
    }

    pub fn set_config(&self, config: PanelConfig) {
        let _ = self.cmd_tx.send(Cmd::SetConfig(config));
    }

    /// Latest published view.
    pub fn view(&self) -> PanelView {
        self.view_rx.borrow().clone()
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.view_rx.clone()
    }

    /// Tear the panel down and wait for the task to finish. Safe to call
    /// more than once.
    pub async fn shutdown(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.cmd_tx.send(Cmd::Shutdown(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    async fn request(&self, make: impl FnOnce(Reply) -> Cmd) -> Result<(), PanelError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.cmd_tx.send(make(reply_tx)).is_err() {
            return Err(closed());
        }
        reply_rx.await.unwrap_or_else(|_| Err(closed()))
    }
}

fn closed() -> PanelError {
    PanelError::InvalidRequest(PANEL_CLOSED_MESSAGE.to_string())
}

// ─── Panel task ───────────────────────────────────────────────────────────

async fn panel_task(
    mut panel: SpeechPanel,
    mut cmd_rx: mpsc::UnboundedReceiver<Cmd>,
    mut events: EventReceiver,
    view_tx: watch::Sender<PanelView>,
) {
    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    debug!("panel task: all handles dropped");
                    panel.shutdown();
                    break;
                };
                let step = apply(&mut panel, cmd);
                // Publish first so a caller woken by a reply sees the new view.
                publish(&view_tx, &panel);
                match step {
                    Step::Continue => {}
                    Step::Reply(reply, result) => {
                        let _ = reply.send(result);
                    }
                    Step::Exit(done) => {
                        let _ = done.send(());
                        break;
                    }
                }
            }
            Some(event) = events.recv() => {
                panel.handle_event(event);
                publish(&view_tx, &panel);
            }
        }
    }
    debug!("panel task: exited");
}

/// What the task does after a command was applied.
enum Step {
    Continue,
    Reply(Reply, Result<(), PanelError>),
    Exit(oneshot::Sender<()>),
}

fn apply(panel: &mut SpeechPanel, cmd: Cmd) -> Step {
    match cmd {
        Cmd::StartListening(reply) => return Step::Reply(reply, panel.start_listening()),
        Cmd::ToggleListening(reply) => return Step::Reply(reply, panel.toggle_listening()),
        Cmd::Speak(text, reply) => return Step::Reply(reply, panel.speak(&text)),
        Cmd::ToggleSpeaking(reply) => return Step::Reply(reply, panel.toggle_speaking()),
        Cmd::Shutdown(done) => {
            panel.shutdown();
            return Step::Exit(done);
        }
        Cmd::StopListening => panel.stop_listening(),
        Cmd::SetInput(text) => panel.set_input_text(text),
        Cmd::ClearInput => panel.clear_input(),
        Cmd::StopSpeaking => panel.stop_speaking(),
        Cmd::SetConfig(config) => panel.set_config(config),
    }
    Step::Continue
}

fn publish(view_tx: &watch::Sender<PanelView>, panel: &SpeechPanel) {
    let view = panel.view();
    view_tx.send_if_modified(|current| {
        if *current == view {
            false
        } else {
            *current = view;
            true
        }
    });
}
