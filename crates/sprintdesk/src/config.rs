//! Portal configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sprintdesk_countdown::CountdownConfig;
use sprintdesk_session::SessionConfig;
use tracing::debug;

use crate::SprintdeskError;

/// Filter used when `RUST_LOG` is not set.
pub(crate) const DEFAULT_LOG_FILTER: &str = "sprintdesk=info";

/// Everything a [`Portal`](crate::Portal) can be tuned with.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```json
/// { "countdown": { "total_secs": 600, "warning_secs": 120, "modal_secs": 60 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Credential storage keys.
    pub session: SessionConfig,
    /// Countdown timing and policy.
    pub countdown: CountdownConfig,
    /// `tracing` filter directive used by [`telemetry::init`](crate::telemetry::init)
    /// when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            countdown: CountdownConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PortalConfig {
    /// Parse a config from a JSON string. The countdown section is
    /// [`validated`](CountdownConfig::validated) before it is returned.
    pub fn from_json_str(json: &str) -> Result<Self, SprintdeskError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.countdown = config.countdown.validated();
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SprintdeskError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded portal config");
        Self::from_json_str(&json)
    }
}
