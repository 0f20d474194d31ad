use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// `upgradectl` configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// endpoint: https://mycluster.westus.cloudapp.azure.com:19080
/// server-timeout: 120
/// max-replica-set-check-timeout: 4294967295
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfigFile {
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Seconds the cluster may spend on the operation.
    #[serde(default, alias = "server-timeout")]
    pub server_timeout: Option<u64>,
    /// Inclusive upper bound for `UpgradeReplicaSetCheckTimeoutInSeconds`.
    #[serde(default, alias = "max-replica-set-check-timeout")]
    pub max_replica_set_check_timeout: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    // An empty file is a valid, empty config.
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
