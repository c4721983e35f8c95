use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url for the target network
    pub rpc_url: String,

    /// Directory holding the deployment ledger and token-address table
    pub state_dir: PathBuf,

    /// Directory holding compiled contract artifacts ({Type}.json)
    pub artifacts_dir: PathBuf,

    /// Bound on each transaction confirmation wait, in seconds
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    /// Redeploy contracts even when the ledger already has them
    #[serde(default)]
    pub force_redeploy: bool,
}

const fn default_confirmation_timeout_secs() -> u64 {
    300
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    pub const fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_omitted_fields() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "http://localhost:8545"
            state_dir = "state"
            artifacts_dir = "artifacts"
            "#,
        )
        .unwrap();

        assert_eq!(config.confirmation_timeout(), Duration::from_secs(300));
        assert!(!config.force_redeploy);
    }
}
