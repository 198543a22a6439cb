pub mod settings;

pub use settings::{ClientSettings, DEFAULT_CONFIG_FILE};
