//! Handlers for the individual configuration keys.

use super::error::SettingError;
use super::{format_bool, parse_bool, SettingHandler};
use crate::core::config::data::Config;
use crate::core::reveal::DEFAULT_REVEAL_INTERVAL;

/// Handler for the `default-model` setting.
pub struct DefaultModelHandler;

impl SettingHandler for DefaultModelHandler {
    fn key(&self) -> &'static str {
        "default-model"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = args.join(" ");
        if input.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set a default model, specify a catalog label or a model id:",
                example: "classchat set default-model mistral",
            });
        }

        let registry = config.model_registry();
        let id = registry.resolve(input.trim());
        let mut message = format!("✅ Set default-model to: {id}");
        if !registry.contains(&id) {
            message.push_str(" (not in the model catalog)");
        }
        config.default_model = Some(id);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.default_model = None;
        "✅ Unset default-model".to_string()
    }

    fn format(&self, config: &Config) -> String {
        match &config.default_model {
            Some(model) => format!("  default-model: {model}"),
            None => "  default-model: (unset)".to_string(),
        }
    }
}

/// Handler for the `reveal-interval-ms` setting.
pub struct RevealIntervalHandler;

impl SettingHandler for RevealIntervalHandler {
    fn key(&self) -> &'static str {
        "reveal-interval-ms"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = args.join(" ");
        if input.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set the reveal interval, specify milliseconds:",
                example: "classchat set reveal-interval-ms 250",
            });
        }

        let millis = input
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| SettingError::InvalidInterval(input.clone()))?;
        config.reveal_interval_ms = Some(millis);
        Ok(format!("✅ Set reveal-interval-ms to: {millis}"))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.reveal_interval_ms = None;
        format!(
            "✅ Unset reveal-interval-ms (will use default: {})",
            DEFAULT_REVEAL_INTERVAL.as_millis()
        )
    }

    fn format(&self, config: &Config) -> String {
        match config.reveal_interval_ms {
            Some(ms) => format!("  reveal-interval-ms: {ms}"),
            None => format!(
                "  reveal-interval-ms: (unset, default: {})",
                DEFAULT_REVEAL_INTERVAL.as_millis()
            ),
        }
    }
}

/// Data-driven handler for boolean (on/off) settings.
pub struct BooleanHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    default_display: &'static str,
    get: fn(&Config) -> Option<bool>,
    set_field: fn(&mut Config, Option<bool>),
}

impl SettingHandler for BooleanHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }

        let input = args.join(" ");
        let value = parse_bool(&input).ok_or(SettingError::InvalidBoolean(input))?;
        (self.set_field)(config, Some(value));
        Ok(format!("✅ Set {} to: {}", self.key, format_bool(value)))
    }

    fn unset(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        format!(
            "✅ Unset {} (will use default: {})",
            self.key, self.default_display
        )
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(value) => format!("  {}: {}", self.key, format_bool(value)),
            None => format!("  {}: (unset, default: {})", self.key, self.default_display),
        }
    }
}

/// Create a handler for the `cancel-on-close` setting.
pub fn cancel_on_close_handler() -> BooleanHandler {
    BooleanHandler {
        key: "cancel-on-close",
        hint: "To cancel pending replies when the panel closes, specify on or off:",
        example: "classchat set cancel-on-close on",
        default_display: "off",
        get: |c| c.cancel_on_close,
        set_field: |c, v| c.cancel_on_close = v,
    }
}
