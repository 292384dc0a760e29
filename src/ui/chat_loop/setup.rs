use crate::core::app::App;
use crate::core::config::{Config, ConfigError};

/// Build the session state from the user's configuration. `model`, when
/// given, overrides the configured default for this session only.
pub fn bootstrap_app(model: Option<&str>) -> Result<App, ConfigError> {
    let config = Config::load()?;
    Ok(app_from_config(&config, model))
}

pub fn app_from_config(config: &Config, model: Option<&str>) -> App {
    let mut app = App::new(config.model_registry(), config.session_settings());
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        app.select_model(model.trim());
    }
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builtin_models::ModelEntry;
    use std::time::Duration;

    #[test]
    fn config_defaults_flow_into_the_session() {
        let config = Config {
            default_model: Some("Deepseek".to_string()),
            reveal_interval_ms: Some(50),
            cancel_on_close: Some(true),
            custom_models: Vec::new(),
        };

        let app = app_from_config(&config, None);

        assert_eq!(app.active_model(), "deepseek/deepseek-r1:free");
        assert_eq!(app.session.settings.reveal_interval, Duration::from_millis(50));
        assert!(app.session.settings.cancel_on_close);
    }

    #[test]
    fn model_flag_overrides_config_default() {
        let config = Config {
            default_model: Some("openai/gpt-3.5-turbo".to_string()),
            custom_models: vec![ModelEntry {
                label: "Local".to_string(),
                id: "local/llama".to_string(),
            }],
            ..Config::default()
        };

        assert_eq!(
            app_from_config(&config, Some("local")).active_model(),
            "local/llama"
        );
        assert_eq!(
            app_from_config(&config, Some("  ")).active_model(),
            "openai/gpt-3.5-turbo"
        );
    }
}
