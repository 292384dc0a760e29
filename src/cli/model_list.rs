//! Model listing functionality
//!
//! Prints the model catalog: built-in entries plus any custom models from the
//! configuration file.

use std::error::Error;

use crate::core::builtin_models::ModelRegistry;
use crate::core::config::Config;

pub fn list_models(model: Option<String>) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let mut registry = config.model_registry();
    if let Some(model) = model.as_deref() {
        let id = registry.resolve(model);
        registry.select(id);
    }

    for line in catalog_lines(&registry) {
        println!("{line}");
    }
    Ok(())
}

/// Lines describing every catalog entry. The built-in default and the
/// active model are marked.
pub fn catalog_lines(registry: &ModelRegistry) -> Vec<String> {
    let mut lines = vec![
        "🤖 Available Models".to_string(),
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".to_string(),
    ];

    for entry in registry.entries() {
        let mut marks = Vec::new();
        if entry.id == registry.default_id() {
            marks.push("default");
        }
        if entry.id == registry.active() {
            marks.push("active");
        }

        let mut line = format!("  • {:<10} {}", entry.label, entry.id);
        if !marks.is_empty() {
            line.push_str(&format!(" ({})", marks.join(", ")));
        }
        lines.push(line);
    }

    if !registry.contains(registry.active()) {
        lines.push(format!("  • {:<10} {} (active)", "(custom)", registry.active()));
    }
    lines
}
