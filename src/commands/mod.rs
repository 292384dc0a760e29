//! Slash commands for the line-oriented chat panel.
//!
//! Plain input is a message to send. Input starting with `/` is looked up in
//! the command registry and turned into a panel intent or a local action.

mod registry;


pub use registry::{all_commands, find_command, Command, CommandInvocation};

use crate::core::app::UiIntent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Forward to the chat loop.
    Intent(UiIntent),
    /// Print the model catalog.
    ShowModels,
    /// Print the command list.
    ShowHelp,
    /// Report a usage problem without sending anything.
    Usage(&'static str),
    Quit,
}

pub fn process_input(input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::Intent(UiIntent::SendMessage(input.to_string()));
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::Intent(UiIntent::SendMessage(input.to_string())),
    };
    let args = parts.next().unwrap_or("").trim();

    match find_command(command_name) {
        Some(command) => (command.handler)(CommandInvocation { args }),
        None => CommandResult::Intent(UiIntent::SendMessage(input.to_string())),
    }
}

pub(super) fn handle_open(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Intent(UiIntent::OpenPanel)
}

pub(super) fn handle_close(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Intent(UiIntent::ClosePanel)
}

pub(super) fn handle_click_outside(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Intent(UiIntent::OutsideClick)
}

pub(super) fn handle_model(invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Usage("Usage: /model <label or id>");
    }
    CommandResult::Intent(UiIntent::SelectModel(invocation.args.to_string()))
}

pub(super) fn handle_models(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::ShowModels
}

pub(super) fn handle_help(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::ShowHelp
}

pub(super) fn handle_quit(_invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Quit
}

/// Help text listing every registered command.
pub fn help_text() -> String {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  /{:<14} {}\n", command.name, command.help));
    }
    help
}
