//! Model catalog and the active model selection
//!
//! The built-in catalog ships in builtin_models.toml and is embedded at
//! build time. Entries from the user's config are appended after it.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Human-readable name shown in the picker
    pub label: String,
    /// Provider-qualified identifier sent to the endpoint
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct BuiltinModelsConfig {
    default: String,
    models: Vec<ModelEntry>,
}

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
    default_id: String,
    active: String,
}

fn load_builtin_config() -> BuiltinModelsConfig {
    const CONFIG_CONTENT: &str = include_str!("../builtin_models.toml");

    toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_models.toml")
}

impl ModelRegistry {
    /// The embedded catalog with its default model active.
    pub fn builtin() -> Self {
        let config = load_builtin_config();
        Self::new(config.models, config.default)
    }

    pub fn new(entries: Vec<ModelEntry>, default_id: impl Into<String>) -> Self {
        let default_id = default_id.into();
        Self {
            entries,
            active: default_id.clone(),
            default_id,
        }
    }

    /// Append extra entries, skipping ids the catalog already offers.
    pub fn with_custom(mut self, extra: &[ModelEntry]) -> Self {
        for entry in extra {
            if !self.contains(&entry.id) {
                self.entries.push(entry.clone());
            }
        }
        self
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Find an entry by label (case-insensitive)
    pub fn find_by_label(&self, label: &str) -> Option<&ModelEntry> {
        self.entries
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(label))
    }

    /// Map user input to a model id: a catalog label resolves to its id,
    /// anything else is taken as an id verbatim.
    pub fn resolve(&self, input: &str) -> String {
        self.find_by_label(input)
            .map(|entry| entry.id.clone())
            .unwrap_or_else(|| input.to_string())
    }

    /// Make `id` the active model. Ids outside the catalog are accepted.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            warn!(model = %id, "selected model is not in the catalog");
        }
        self.active = id;
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
