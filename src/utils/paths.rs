use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".slot_metrics";
const HOME_ENV: &str = "SLOT_METRICS_HOME";

/// Returns the application data directory, defaulting to `~/.slot_metrics`.
///
/// `SLOT_METRICS_HOME` overrides the location.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
