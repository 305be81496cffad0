use serde::{Deserialize, Serialize};

/// Configuration for the profiles module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    /// Upper bound on entries returned by the user directory.
    #[serde(default = "default_directory_limit")]
    pub directory_limit: usize,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            directory_limit: default_directory_limit(),
        }
    }
}

fn default_directory_limit() -> usize {
    1000
}
