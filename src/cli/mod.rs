//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod model_list;
pub mod say;
pub mod settings;


use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::cli::settings::{SettingError, SettingRegistry};
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "CLASSCHAT_LOG";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ")"
);

#[derive(Parser)]
#[command(name = "classchat")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A chat panel that explains things like a teacher")]
#[command(
    long_about = "Classchat sends your messages to an OpenAI-compatible chat completions \
endpoint and reveals each reply one line at a time.\n\n\
Environment Variables:\n\
  CLASSCHAT_API_KEY    Bearer token sent with every request\n\
  CLASSCHAT_ENDPOINT   Full URL of the chat completions endpoint\n\
  CLASSCHAT_LOG        Log filter, e.g. 'debug' or 'classchat=trace' (default: warn)\n\n\
Chat commands:\n\
  /open             Open the chat panel\n\
  /close            Close the chat panel\n\
  /click-outside    Simulate a click outside the panel\n\
  /model <model>    Switch models by catalog label or id\n\
  /models           List the model catalog\n\
  /help             Show the chat commands\n\
  /quit             Leave the chat"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to start with (catalog label or model id)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// Send a single prompt and print the reply
    Say {
        /// Prompt text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List the model catalog
    Models,
    /// Set configuration values, or show them when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(args.model).await,
        Commands::Say { prompt } => run_say(prompt, args.model).await,
        Commands::Models => list_models(args.model),
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let Some(key) = key else {
                config.print_all();
                return Ok(());
            };
            match apply_set(&mut config, &key, &value) {
                Ok(Some(message)) => {
                    config.save()?;
                    println!("{message}");
                }
                Ok(None) => {}
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_unset(&mut config, &key) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
    }
}

/// Apply `classchat set <key> <value...>` to `config`. With no value the
/// current setting is printed and `Ok(None)` is returned.
fn apply_set(
    config: &mut Config,
    key: &str,
    value: &[String],
) -> Result<Option<String>, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;

    if value.is_empty() {
        println!("{}", handler.format(config));
        return Ok(None);
    }
    handler.set(value, config).map(Some)
}

fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    Ok(handler.unset(config))
}
