use crate::core::config::data::Config;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: (unset)"),
        }
        println!(
            "  reveal-interval-ms: {}",
            self.reveal_interval().as_millis()
        );
        match self.cancel_on_close() {
            true => println!("  cancel-on-close: on"),
            false => println!("  cancel-on-close: off"),
        }
        if self.custom_models.is_empty() {
            println!("  custom-models: (none set)");
        } else {
            println!("  custom-models:");
            for entry in &self.custom_models {
                println!("    {}: {}", entry.label, entry.id);
            }
        }
    }
}
