//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Status given to an animal at intake when none is supplied.
fn default_intake_status() -> String {
    String::from("intake")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Status label applied by `refuge intake` when `--status` is omitted.
    #[serde(default = "default_intake_status")]
    pub intake_status: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            intake_status: default_intake_status(),
        }
    }
}
