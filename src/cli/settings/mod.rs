//! Settings management for CLI set/unset commands.
//!
//! Each configuration key is backed by a [`SettingHandler`]. Handlers edit a
//! loaded [`Config`] in place; the caller decides when to persist it.

pub mod error;
pub mod handlers;
pub mod registry;


pub use error::SettingError;
pub use registry::SettingRegistry;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the value from the words given after the key. Returns the message
    /// to show on success.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the built-in default applies again.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for display in `classchat set` output.
    fn format(&self, config: &Config) -> String;
}

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
