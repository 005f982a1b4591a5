//! Options controlling how an uploaded file is parsed

use serde::{Serialize, Deserialize};

use super::null_handling::NullConfig;

/// Configuration for reading one delimited file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field delimiter
    pub delimiter: u8,

    /// Null handling configuration
    pub null_config: NullConfig,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_config: NullConfig::default(),
        }
    }
}
