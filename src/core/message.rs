use serde::{Deserialize, Serialize};

/// Greeting every conversation starts with.
pub const GREETING: &str = "Hello, how can I assist you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    Outgoing,
    Incoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub direction: Direction,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    /// Role used on the wire. Anything that is not the assistant is sent as
    /// the user.
    pub fn to_api_role(self) -> &'static str {
        match self {
            Sender::Assistant => "assistant",
            Sender::User => "user",
        }
    }

    pub fn is_assistant(self) -> bool {
        self == Sender::Assistant
    }
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
        }
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<&str> for Direction {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "outgoing" => Ok(Direction::Outgoing),
            "incoming" => Ok(Direction::Incoming),
            _ => Err(format!("invalid direction: {value}")),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        value.as_str().to_string()
    }
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender, direction: Direction) -> Self {
        Self {
            text: text.into(),
            sender,
            direction,
        }
    }

    /// A message typed by the user.
    pub fn outgoing(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, Direction::Outgoing)
    }

    /// A message produced by the assistant.
    pub fn incoming(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant, Direction::Incoming)
    }

    pub fn greeting() -> Self {
        Self::incoming(GREETING)
    }

    pub fn is_assistant(&self) -> bool {
        self.sender.is_assistant()
    }
}
