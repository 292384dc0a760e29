use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::app::SessionSettings;
use crate::core::builtin_models::{ModelEntry, ModelRegistry};
use crate::core::reveal::DEFAULT_REVEAL_INTERVAL;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Model active when a session starts (id or catalog label)
    pub default_model: Option<String>,
    /// Delay between revealed lines, in milliseconds
    pub reveal_interval_ms: Option<u64>,
    /// Cancel the in-flight exchange when the panel is closed
    pub cancel_on_close: Option<bool>,
    /// Extra entries appended to the built-in model catalog
    #[serde(default)]
    pub custom_models: Vec<ModelEntry>,
}

impl Config {
    pub fn reveal_interval(&self) -> Duration {
        self.reveal_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REVEAL_INTERVAL)
    }

    pub fn cancel_on_close(&self) -> bool {
        self.cancel_on_close.unwrap_or(false)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            reveal_interval: self.reveal_interval(),
            cancel_on_close: self.cancel_on_close(),
        }
    }

    /// Built-in catalog plus custom entries, with the configured default
    /// model active.
    pub fn model_registry(&self) -> ModelRegistry {
        let mut registry = ModelRegistry::builtin().with_custom(&self.custom_models);
        if let Some(model) = self.default_model.as_deref() {
            let id = registry.resolve(model);
            registry.select(id);
        }
        registry
    }
}

pub fn path_display(path: &Path) -> String {
    path.display().to_string()
}
