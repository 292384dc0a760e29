use super::{App, PendingRequest};
use crate::core::completion::CompletionError;
use crate::core::reveal::{RevealCursor, RevealEvent};

/// Intents emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    OpenPanel,
    ClosePanel,
    OutsideClick,
    SendMessage(String),
    SelectModel(String),
    Shutdown,
}

pub enum AppAction {
    Intent(UiIntent),
    ReplyReceived {
        result: Result<String, CompletionError>,
        generation: u64,
    },
    Reveal {
        event: RevealEvent,
        generation: u64,
    },
}

/// Work the runtime has to start after a state transition.
#[derive(Debug)]
pub enum AppCommand {
    SpawnCompletion(PendingRequest),
    StartReveal {
        cursor: RevealCursor,
        generation: u64,
    },
    Shutdown,
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::Intent(intent) => handle_intent(app, intent),
        AppAction::ReplyReceived { result, generation } => app
            .apply_reply(generation, result)
            .map(|cursor| AppCommand::StartReveal { cursor, generation }),
        AppAction::Reveal { event, generation } => {
            app.apply_reveal_event(generation, event);
            None
        }
    }
}

fn handle_intent(app: &mut App, intent: UiIntent) -> Option<AppCommand> {
    match intent {
        UiIntent::OpenPanel => {
            app.open_panel();
            None
        }
        UiIntent::ClosePanel => {
            app.close_panel();
            None
        }
        UiIntent::OutsideClick => {
            app.outside_click();
            None
        }
        UiIntent::SendMessage(text) => app.begin_exchange(&text).map(AppCommand::SpawnCompletion),
        UiIntent::SelectModel(id) => {
            app.select_model(id);
            None
        }
        UiIntent::Shutdown => {
            app.cancel_exchange();
            Some(AppCommand::Shutdown)
        }
    }
}
