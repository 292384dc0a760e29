//! Interactive chat loop
//!
//! Reads lines from stdin, turns them into intents for the chat runtime and
//! prints every view change it publishes.

mod setup;

pub use self::setup::{app_from_config, bootstrap_app};

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::model_list::catalog_lines;
use crate::commands::{help_text, process_input, CommandResult};
use crate::core::app::{spawn_chat, UiIntent};
use crate::core::completion::{CompletionBackend, CompletionClient, EndpointConfig};
use crate::ui::renderer::ViewRenderer;

pub async fn run_chat(model: Option<String>) -> Result<(), Box<dyn Error>> {
    let app = bootstrap_app(model.as_deref())?;
    let mut registry = app.session.registry.clone();

    let backend: Arc<dyn CompletionBackend> =
        Arc::new(CompletionClient::new(EndpointConfig::from_env()));
    let (handle, join) = spawn_chat(app, backend);

    let mut views = handle.subscribe();
    let mut renderer = ViewRenderer::new(&views.borrow_and_update());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a message and press Enter. /help lists the commands.");
    handle.send(UiIntent::OpenPanel);

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                for line in renderer.render(&view) {
                    println!("{line}");
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    handle.send(UiIntent::Shutdown);
                    break;
                };
                match process_input(&line) {
                    CommandResult::Intent(intent) => {
                        let panel_open = handle.view().panel_open;
                        let delivered = intents_for(intent, panel_open)
                            .into_iter()
                            .all(|intent| handle.send(intent));
                        if !delivered {
                            break;
                        }
                    }
                    CommandResult::ShowModels => {
                        let active = handle.view().model;
                        if registry.active() != active {
                            registry.select(active);
                        }
                        for line in catalog_lines(&registry) {
                            println!("{line}");
                        }
                    }
                    CommandResult::ShowHelp => print!("{}", help_text()),
                    CommandResult::Usage(usage) => eprintln!("⚠️  {usage}"),
                    CommandResult::Quit => {
                        handle.send(UiIntent::Shutdown);
                        break;
                    }
                }
            }
        }
    }

    let app = join.await?;
    debug!(messages = app.conversation.len(), "chat session ended");
    Ok(())
}

/// Messages are only typed into an open panel, so sending while it is
/// closed opens it first.
fn intents_for(intent: UiIntent, panel_open: bool) -> Vec<UiIntent> {
    match intent {
        UiIntent::SendMessage(_) if !panel_open => vec![UiIntent::OpenPanel, intent],
        intent => vec![intent],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sending_while_closed_reopens_the_panel() {
        let message = UiIntent::SendMessage("hello".to_string());

        assert_eq!(
            intents_for(message.clone(), false),
            vec![UiIntent::OpenPanel, message.clone()]
        );
        assert_eq!(intents_for(message.clone(), true), vec![message]);
    }

    #[test]
    fn other_intents_pass_through_while_closed() {
        assert_eq!(
            intents_for(UiIntent::ClosePanel, false),
            vec![UiIntent::ClosePanel]
        );
        assert_eq!(
            intents_for(UiIntent::SelectModel("gpt".to_string()), false),
            vec![UiIntent::SelectModel("gpt".to_string())]
        );
    }
}
