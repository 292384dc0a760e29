use serde::Serialize;

use crate::core::message::Message;

/// Panel chrome owned by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub panel_open: bool,
}

/// Everything the presentation layer needs to render the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub messages: Vec<Message>,
    pub typing: bool,
    pub model: String,
    pub panel_open: bool,
}

impl ChatView {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
