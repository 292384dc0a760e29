//! Incremental text rendering of the chat panel

use crate::core::app::ChatView;
use crate::core::message::Message;

const ASSISTANT_PREFIX: &str = "tutor> ";
const USER_PREFIX: &str = "you> ";
const TYPING_LINE: &str = "tutor is typing…";

/// Remembers the last rendered view so only what changed is printed.
pub struct ViewRenderer {
    last: ChatView,
}

impl ViewRenderer {
    /// Start from `initial`. Nothing is considered printed yet, so the
    /// first call to [`render`](Self::render) with an open panel prints the
    /// whole transcript.
    pub fn new(initial: &ChatView) -> Self {
        Self {
            last: ChatView {
                messages: Vec::new(),
                panel_open: false,
                ..initial.clone()
            },
        }
    }

    pub fn render(&mut self, next: &ChatView) -> Vec<String> {
        let mut lines = Vec::new();

        if next.model != self.last.model {
            lines.push(format!("[model: {}]", next.model));
        }

        match (self.last.panel_open, next.panel_open) {
            (false, true) => {
                lines.push("[panel opened]".to_string());
                for message in &next.messages {
                    lines.extend(message_lines(message));
                }
            }
            (true, false) => lines.push("[panel closed]".to_string()),
            (true, true) => lines.extend(transcript_changes(&self.last.messages, &next.messages)),
            (false, false) => {}
        }

        if next.panel_open && next.typing && !self.last.typing {
            lines.push(TYPING_LINE.to_string());
        }

        self.last = next.clone();
        lines
    }
}

fn transcript_changes(previous: &[Message], next: &[Message]) -> Vec<String> {
    let mut lines = Vec::new();

    for (index, message) in next.iter().enumerate() {
        match previous.get(index) {
            Some(old) if old == message => {}
            Some(old) if old.sender == message.sender && message.text.starts_with(&old.text) => {
                // A reveal tick extends the tail with more lines.
                let added = message.text[old.text.len()..].trim_start_matches('\n');
                lines.extend(added.lines().map(|line| continuation(message, line)));
            }
            _ => lines.extend(message_lines(message)),
        }
    }
    lines
}

fn prefix(message: &Message) -> &'static str {
    if message.is_assistant() {
        ASSISTANT_PREFIX
    } else {
        USER_PREFIX
    }
}

fn continuation(message: &Message, line: &str) -> String {
    format!("{:width$}{line}", "", width = prefix(message).len())
}

fn message_lines(message: &Message) -> Vec<String> {
    message
        .text
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                format!("{}{line}", prefix(message))
            } else {
                continuation(message, line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn closed_panel_prints_nothing_but_chrome() {
        let app = create_test_app();
        let mut renderer = ViewRenderer::new(&app.view());

        assert!(renderer.render(&app.view()).is_empty());
    }

    #[test]
    fn opening_prints_the_transcript() {
        let mut app = create_test_app();
        let mut renderer = ViewRenderer::new(&app.view());
        app.open_panel();

        let lines = renderer.render(&app.view());

        assert_eq!(
            lines,
            vec![
                "[panel opened]".to_string(),
                "tutor> Hello, how can I assist you today?".to_string(),
            ]
        );
    }

    #[test]
    fn reveal_ticks_print_only_new_lines() {
        let mut app = create_test_app();
        app.open_panel();
        let mut renderer = ViewRenderer::new(&app.view());
        renderer.render(&app.view());

        let pending = app.begin_exchange("explain").unwrap();
        assert_eq!(
            renderer.render(&app.view()),
            vec!["you> explain".to_string(), TYPING_LINE.to_string()]
        );

        let mut cursor = app
            .apply_reply(pending.generation, Ok("Title\n• one".to_string()))
            .unwrap();
        let mut printed = Vec::new();
        while let Some(text) = cursor.advance().map(str::to_owned) {
            app.apply_reveal_event(
                pending.generation,
                crate::core::reveal::RevealEvent::Tick(text),
            );
            printed.extend(renderer.render(&app.view()));
        }

        assert_eq!(printed, vec!["tutor> Title", "       • one"]);
    }

    #[test]
    fn model_switch_is_announced() {
        let mut app = create_test_app();
        let mut renderer = ViewRenderer::new(&app.view());
        app.select_model("Mistral");

        assert_eq!(
            renderer.render(&app.view()),
            vec!["[model: mistralai/mistral-nemo]".to_string()]
        );
    }
}
