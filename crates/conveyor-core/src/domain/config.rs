//! Queue configuration: cloud client vs. local emulator.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming the emulator endpoint. Its presence switches
/// the dispatch layer into emulator mode.
pub const EMULATOR_HOST_ENV: &str = "TASK_EMULATOR_HOST";

/// Environment variable for the optional store namespace.
pub const NAMESPACE_ENV: &str = "TASK_NAMESPACE";

/// Decides whether enqueues go to the real queue service or to the local
/// document-store emulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    pub use_local_emulator: bool,
    pub emulator_host: Option<String>,
    pub namespace: Option<String>,
}

impl QueueConfig {
    /// Configuration for the real queue service.
    pub fn cloud() -> Self {
        Self {
            use_local_emulator: false,
            emulator_host: None,
            namespace: None,
        }
    }

    /// Configuration for emulator mode against the given endpoint.
    pub fn emulator(host: impl Into<String>) -> Self {
        Self {
            use_local_emulator: true,
            emulator_host: Some(host.into()),
            namespace: None,
        }
    }

    /// Load from the environment: emulator mode iff the emulator host
    /// variable is set.
    pub fn from_env() -> Self {
        let emulator_host = std::env::var(EMULATOR_HOST_ENV).ok();
        Self {
            use_local_emulator: emulator_host.is_some(),
            emulator_host,
            namespace: std::env::var(NAMESPACE_ENV).ok(),
        }
    }

    /// Reject invalid combinations at startup rather than at call time.
    pub fn validate(&self) -> Result<()> {
        if self.use_local_emulator && self.emulator_host.is_none() {
            return Err(Error::Configuration(
                "emulator enabled but emulator_host is not set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_config_is_valid() {
        assert!(QueueConfig::cloud().validate().is_ok());
    }

    #[test]
    fn emulator_config_with_host_is_valid() {
        assert!(QueueConfig::emulator("localhost:8081").validate().is_ok());
    }

    #[test]
    fn emulator_without_host_is_rejected() {
        let config = QueueConfig {
            use_local_emulator: true,
            emulator_host: None,
            namespace: None,
        };
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }
}
