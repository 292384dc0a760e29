//! Projection of the conversation into a completion request.

use crate::api::{ChatMessage, ChatRequest};
use crate::core::message::Message;

/// Instruction sent ahead of every history. Never shown in the transcript.
pub const SYSTEM_INSTRUCTION: &str = "Explain like a teacher.";

pub fn build_request<'a, I>(conversation: I, model_id: &str) -> ChatRequest
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut messages = vec![ChatMessage::new("system", SYSTEM_INSTRUCTION)];
    messages.extend(
        conversation
            .into_iter()
            .map(|msg| ChatMessage::new(msg.sender.to_api_role(), msg.text.clone())),
    );

    ChatRequest {
        model: model_id.to_string(),
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_system_instruction_and_maps_roles() {
        let conversation = [Message::incoming("hi"), Message::outgoing("hey")];

        let request = build_request(&conversation, "m1");

        assert_eq!(request.model, "m1");
        assert_eq!(
            request.messages,
            vec![
                ChatMessage::new("system", SYSTEM_INSTRUCTION),
                ChatMessage::new("assistant", "hi"),
                ChatMessage::new("user", "hey"),
            ]
        );
    }

    #[test]
    fn empty_history_still_carries_instruction() {
        let request = build_request(std::iter::empty(), "m2");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "system");
    }
}
