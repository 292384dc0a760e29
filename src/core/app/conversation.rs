use crate::core::message::Message;

/// The message store: every turn of the session in order, plus the typing
/// indicator shown while a request is outstanding.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    tail_in_progress: bool,
    typing: bool,
}

impl Conversation {
    /// A conversation seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::greeting()],
            tail_in_progress: false,
            typing: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Push a finished message. Any in-progress tail becomes final.
    pub fn append(&mut self, message: Message) {
        self.tail_in_progress = false;
        self.messages.push(message);
    }

    /// Swap the in-progress tail for `message`, or append it as the new
    /// in-progress tail when there is none.
    pub fn replace_tail(&mut self, message: Message) {
        if self.tail_in_progress {
            self.messages.pop();
        }
        self.messages.push(message);
        self.tail_in_progress = true;
    }

    /// Mark the in-progress tail as final.
    pub fn finish_tail(&mut self) {
        self.tail_in_progress = false;
    }

    pub fn has_tail_in_progress(&self) -> bool {
        self.tail_in_progress
    }

    pub fn typing(&self) -> bool {
        self.typing
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
