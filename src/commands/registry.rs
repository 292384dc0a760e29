use super::CommandResult;

pub type CommandHandler = fn(CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "Show available commands.",
        handler: super::handle_help,
    },
    Command {
        name: "open",
        help: "Open the chat panel.",
        handler: super::handle_open,
    },
    Command {
        name: "close",
        help: "Close the chat panel.",
        handler: super::handle_close,
    },
    Command {
        name: "click-outside",
        help: "Click outside the panel; closes it when open.",
        handler: super::handle_click_outside,
    },
    Command {
        name: "model",
        help: "Switch models by catalog label or id.",
        handler: super::handle_model,
    },
    Command {
        name: "models",
        help: "List the model catalog.",
        handler: super::handle_models,
    },
    Command {
        name: "quit",
        help: "Leave the chat.",
        handler: super::handle_quit,
    },
];
