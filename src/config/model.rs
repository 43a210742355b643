use serde::{Deserialize, Serialize};

use crate::sales::{
    aggregate::DEFAULT_TEST_MARKER, ClassifierConfig, DateOrder, FieldMapping,
};

/// User-tunable settings for reading exports and classifying sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fields: FieldMapping,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Descriptions containing this marker are treated as test sales and
    /// skipped. An empty marker disables the filter.
    #[serde(default = "Config::default_test_marker")]
    pub test_marker: String,
    #[serde(default)]
    pub date_order: DateOrder,
    #[serde(default = "Config::default_csv_delimiter")]
    pub csv_delimiter: char,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: FieldMapping::default(),
            classifier: ClassifierConfig::default(),
            test_marker: Self::default_test_marker(),
            date_order: DateOrder::default(),
            csv_delimiter: Self::default_csv_delimiter(),
            locale: Self::default_locale(),
            currency: Self::default_currency(),
        }
    }
}

impl Config {
    pub fn default_test_marker() -> String {
        DEFAULT_TEST_MARKER.into()
    }

    pub fn default_csv_delimiter() -> char {
        ','
    }

    pub fn default_locale() -> String {
        "pt-BR".into()
    }

    pub fn default_currency() -> String {
        "BRL".into()
    }
}
