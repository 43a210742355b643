//! Persistent settings: the field mapping, classifier rules and display
//! preferences, stored as JSON under the application data directory.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
