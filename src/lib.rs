//! Classchat is a chat panel that sends each message to an OpenAI-compatible
//! chat completions endpoint and reveals the reply one line at a time.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state, the model catalog, sanitizing, request
//!   building, the completion client and the reveal scheduler.
//! - [`ui`] runs the line-oriented chat loop and renders view changes.
//! - [`commands`] parses the slash commands typed into the chat loop.
//! - [`api`] defines the chat completion payloads sent to the endpoint.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`core::app`] and
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
