//! Panel-less "say" command: one exchange, printed without the reveal delay

use std::error::Error;
use std::io::{self, Write};

use crate::core::completion::{CompletionBackend, CompletionClient, EndpointConfig};
use crate::core::reveal::RevealEvent;
use crate::ui::chat_loop::bootstrap_app;

pub async fn run_say(prompt: Vec<String>, model: Option<String>) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: classchat say <prompt>");
        std::process::exit(1);
    }

    let mut app = bootstrap_app(model.as_deref())?;
    let Some(pending) = app.begin_exchange(&prompt) else {
        eprintln!("❌ Nothing left to send after removing markup from the prompt");
        std::process::exit(1);
    };

    let client = CompletionClient::new(EndpointConfig::from_env());
    let reply = match client.complete(&pending.payload).await {
        Ok(reply) => reply,
        Err(err) => {
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    };

    let generation = pending.generation;
    let Some(mut cursor) = app.apply_reply(generation, Ok(reply)) else {
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    while let Some(text) = cursor.advance().map(str::to_owned) {
        if let Some(line) = text.rsplit('\n').next() {
            writeln!(stdout, "{line}")?;
        }
        app.apply_reveal_event(generation, RevealEvent::Tick(text));
    }
    app.apply_reveal_event(generation, RevealEvent::Finished);
    stdout.flush()?;

    Ok(())
}
