//! Session state and the transitions driven by user intents and by the
//! completion and reveal tasks.
//!
//! [`App`] is plain state: every method runs synchronously and returns what
//! the caller has to spawn next. [`runtime`] owns the tasks and channels.

use tracing::{debug, error, warn};

use crate::core::builtin_models::ModelRegistry;
use crate::core::completion::CompletionError;
use crate::core::message::Message;
use crate::core::request::build_request;
use crate::core::reveal::{RevealCursor, RevealEvent};
use crate::core::sanitize::sanitize;

pub mod actions;
pub mod conversation;
pub mod runtime;
pub mod session;
pub mod ui_state;


pub use actions::{apply_action, AppAction, AppCommand, UiIntent};
pub use conversation::Conversation;
pub use runtime::{spawn_chat, ChatHandle};
pub use session::{PendingRequest, SessionContext, SessionSettings};
pub use ui_state::{ChatView, UiState};

pub struct App {
    pub session: SessionContext,
    pub conversation: Conversation,
    pub ui: UiState,
}

impl App {
    pub fn new(registry: ModelRegistry, settings: SessionSettings) -> Self {
        Self {
            session: SessionContext::new(registry, settings),
            conversation: Conversation::new(),
            ui: UiState::default(),
        }
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            messages: self.conversation.messages().to_vec(),
            typing: self.conversation.typing(),
            model: self.active_model().to_string(),
            panel_open: self.ui.panel_open,
        }
    }

    pub fn active_model(&self) -> &str {
        self.session.registry.active()
    }

    /// Switch the model used by the next request. Catalog labels are
    /// accepted in place of ids.
    pub fn select_model(&mut self, input: impl AsRef<str>) {
        let id = self.session.registry.resolve(input.as_ref());
        self.session.registry.select(id);
    }

    pub fn open_panel(&mut self) {
        self.ui.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.ui.panel_open = false;
        if self.session.settings.cancel_on_close && self.session.has_exchange_in_flight() {
            debug!("panel closed, cancelling exchange");
            self.cancel_exchange();
        }
    }

    /// A click outside the panel only matters while it is open.
    pub fn outside_click(&mut self) {
        if self.ui.panel_open {
            self.close_panel();
        }
    }

    /// Stop the in-flight exchange. Whatever was already revealed stays.
    pub fn cancel_exchange(&mut self) {
        self.session.invalidate();
        self.conversation.set_typing(false);
        self.conversation.finish_tail();
    }

    pub fn is_current_exchange(&self, generation: u64) -> bool {
        self.session.is_current(generation)
    }

    /// Record the user's message and build the request for it. Returns
    /// `None` when nothing is left after sanitizing.
    pub fn begin_exchange(&mut self, raw: &str) -> Option<PendingRequest> {
        let text = sanitize(raw);
        if text.trim().is_empty() {
            debug!("ignoring empty message");
            return None;
        }

        self.conversation.append(Message::outgoing(text));
        self.conversation.set_typing(true);

        let cancel_token = self.session.start_exchange();
        let payload = build_request(self.conversation.messages(), self.active_model());

        Some(PendingRequest {
            generation: self.session.current_generation,
            payload,
            cancel_token,
        })
    }

    /// Handle the decoded reply for `generation`. Returns the cursor to
    /// reveal, if the reply has anything to show.
    pub fn apply_reply(
        &mut self,
        generation: u64,
        result: Result<String, CompletionError>,
    ) -> Option<RevealCursor> {
        if !self.is_current_exchange(generation) {
            debug!(generation, "dropping reply from superseded exchange");
            return None;
        }

        self.conversation.set_typing(false);
        self.session.finish_request();

        match result {
            Ok(reply) => {
                let cursor = RevealCursor::new(&reply);
                if cursor.is_none() {
                    warn!(generation, "completion reply has no displayable lines");
                }
                cursor
            }
            Err(err) => {
                error!(generation, error = %err, "completion failed");
                None
            }
        }
    }

    /// Apply one reveal event. Returns whether the transcript changed.
    pub fn apply_reveal_event(&mut self, generation: u64, event: RevealEvent) -> bool {
        if !self.is_current_exchange(generation) {
            debug!(generation, "dropping reveal event from superseded exchange");
            return false;
        }

        match event {
            RevealEvent::Tick(text) => {
                self.conversation.replace_tail(Message::incoming(text));
                true
            }
            RevealEvent::Finished => {
                self.conversation.finish_tail();
                self.session.clear_reveal();
                false
            }
        }
    }
}
