//! Answer configuration from TOML (`[answer]` section)

use relay_domain::DEFAULT_FALLBACK_ANSWER;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnswerConfig {
    /// Returned when the upstream produced no usable answer.
    pub fallback: String,
}

impl Default for FileAnswerConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_ANSWER.to_string(),
        }
    }
}
