use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ChatRequest;
use crate::core::builtin_models::ModelRegistry;
use crate::core::reveal::{RevealTask, DEFAULT_REVEAL_INTERVAL};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub reveal_interval: Duration,
    /// Closing the panel cancels the in-flight exchange
    pub cancel_on_close: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            reveal_interval: DEFAULT_REVEAL_INTERVAL,
            cancel_on_close: false,
        }
    }
}

/// One request on its way to the completion endpoint.
#[derive(Debug)]
pub struct PendingRequest {
    pub generation: u64,
    pub payload: ChatRequest,
    pub cancel_token: CancellationToken,
}

pub struct SessionContext {
    pub registry: ModelRegistry,
    pub settings: SessionSettings,
    /// Generation of the exchange whose events are authoritative
    pub current_generation: u64,
    pub request_cancel_token: Option<CancellationToken>,
    pub reveal: Option<RevealTask>,
}

impl SessionContext {
    pub fn new(registry: ModelRegistry, settings: SessionSettings) -> Self {
        Self {
            registry,
            settings,
            current_generation: 0,
            request_cancel_token: None,
            reveal: None,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current_generation == generation
    }

    /// Supersede whatever is running and open a new generation. Returns the
    /// token that cancels the new generation's request.
    pub fn start_exchange(&mut self) -> CancellationToken {
        self.invalidate();
        let token = CancellationToken::new();
        self.request_cancel_token = Some(token.clone());
        token
    }

    /// Cancel the running request and reveal and bump the generation so
    /// events already queued for them are dropped.
    pub fn invalidate(&mut self) {
        if let Some(token) = self.request_cancel_token.take() {
            token.cancel();
        }
        if let Some(task) = self.reveal.take() {
            task.cancel();
        }
        self.current_generation += 1;
        debug!(generation = self.current_generation, "exchange generation advanced");
    }

    /// The request for the current generation has been answered.
    pub fn finish_request(&mut self) {
        self.request_cancel_token = None;
    }

    pub fn attach_reveal(&mut self, task: RevealTask) {
        if let Some(previous) = self.reveal.replace(task) {
            previous.cancel();
        }
    }

    pub fn clear_reveal(&mut self) {
        self.reveal = None;
    }

    pub fn has_exchange_in_flight(&self) -> bool {
        self.request_cancel_token.is_some()
            || self.reveal.as_ref().is_some_and(|task| !task.is_finished())
    }
}
