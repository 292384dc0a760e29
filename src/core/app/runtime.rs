use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use super::{apply_action, App, AppAction, AppCommand, ChatView, PendingRequest, UiIntent};
use crate::core::completion::CompletionBackend;
use crate::core::reveal::{RevealEvent, RevealTask};

/// Handle held by the presentation layer: intents go in, views come out.
#[derive(Clone)]
pub struct ChatHandle {
    intents: mpsc::UnboundedSender<UiIntent>,
    view: watch::Receiver<ChatView>,
}

impl ChatHandle {
    /// Returns false once the chat loop has stopped.
    pub fn send(&self, intent: UiIntent) -> bool {
        self.intents.send(intent).is_ok()
    }

    pub fn send_message(&self, text: impl Into<String>) -> bool {
        self.send(UiIntent::SendMessage(text.into()))
    }

    pub fn view(&self) -> ChatView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.view.clone()
    }
}

/// Start the chat loop. The join handle yields the final state once the
/// loop receives [`UiIntent::Shutdown`] or every handle is dropped.
pub fn spawn_chat(app: App, backend: Arc<dyn CompletionBackend>) -> (ChatHandle, JoinHandle<App>) {
    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(app.view());

    let handle = tokio::spawn(run_chat_loop(app, backend, intent_rx, view_tx));

    (
        ChatHandle {
            intents: intent_tx,
            view: view_rx,
        },
        handle,
    )
}

async fn run_chat_loop(
    mut app: App,
    backend: Arc<dyn CompletionBackend>,
    mut intents: mpsc::UnboundedReceiver<UiIntent>,
    view_tx: watch::Sender<ChatView>,
) -> App {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let (reveal_tx, mut reveal_rx) = mpsc::unbounded_channel::<(RevealEvent, u64)>();

    loop {
        let action = tokio::select! {
            intent = intents.recv() => match intent {
                Some(intent) => AppAction::Intent(intent),
                None => {
                    app.cancel_exchange();
                    break;
                }
            },
            Some(action) = action_rx.recv() => action,
            Some((event, generation)) = reveal_rx.recv() => AppAction::Reveal { event, generation },
        };

        let shutdown = match apply_action(&mut app, action) {
            Some(AppCommand::SpawnCompletion(pending)) => {
                spawn_completion(Arc::clone(&backend), pending, action_tx.clone());
                false
            }
            Some(AppCommand::StartReveal { cursor, generation }) => {
                let task = RevealTask::spawn(
                    cursor,
                    app.session.settings.reveal_interval,
                    generation,
                    reveal_tx.clone(),
                );
                app.session.attach_reveal(task);
                false
            }
            Some(AppCommand::Shutdown) => true,
            None => false,
        };

        publish(&view_tx, app.view());
        if shutdown {
            break;
        }
    }

    debug!("chat loop stopped");
    app
}

fn spawn_completion(
    backend: Arc<dyn CompletionBackend>,
    pending: PendingRequest,
    tx: mpsc::UnboundedSender<AppAction>,
) {
    tokio::spawn(async move {
        let PendingRequest {
            generation,
            payload,
            cancel_token,
        } = pending;

        tokio::select! {
            result = backend.complete(&payload) => {
                let _ = tx.send(AppAction::ReplyReceived { result, generation });
            }
            _ = cancel_token.cancelled() => {
                debug!(generation, "completion request cancelled");
            }
        }
    });
}

fn publish(view_tx: &watch::Sender<ChatView>, next: ChatView) {
    view_tx.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}
