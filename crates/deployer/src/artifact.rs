//! Compiled-contract artifacts.
//!
//! Artifacts are opaque external inputs: one JSON file per contract type
//! with an `abi` array and a `bytecode` hex string, the shape a Solidity
//! toolchain emits. The orchestrator never inspects them beyond those two
//! fields.

use crate::DeployError;
use alloy_primitives::Bytes;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// A loaded artifact for one contract type.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub contract_type: String,
    /// ABI descriptor, stored opaquely into deployment records
    pub abi: serde_json::Value,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: serde_json::Value,
    bytecode: Bytes,
}

/// Loads artifacts from a directory of `{ContractType}.json` files.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn load(&self, contract_type: &str) -> Result<ContractArtifact, DeployError> {
        let path = self.dir.join(format!("{contract_type}.json"));
        if !path.exists() {
            return Err(DeployError::ArtifactNotFound {
                contract_type: contract_type.to_string(),
                dir: self.dir.clone(),
            });
        }

        let invalid = |reason: String| DeployError::InvalidArtifact {
            contract_type: contract_type.to_string(),
            reason,
        };

        let contents = fs::read_to_string(&path).map_err(|e| invalid(e.to_string()))?;
        let raw: RawArtifact =
            serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

        if raw.bytecode.is_empty() {
            return Err(invalid("empty bytecode".to_string()));
        }

        Ok(ContractArtifact {
            contract_type: contract_type.to_string(),
            abi: raw.abi,
            bytecode: raw.bytecode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_artifacts_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bridge-artifacts-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_artifact() {
        let dir = temp_artifacts_dir("load");
        fs::write(
            dir.join("ParadiseBridge.json"),
            r#"{"abi": [{"type": "function", "name": "depositNativeTokens"}], "bytecode": "0x6080604052"}"#,
        )
        .unwrap();

        let store = ArtifactStore::new(dir);
        let artifact = store.load("ParadiseBridge").unwrap();
        assert_eq!(artifact.contract_type, "ParadiseBridge");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_missing_artifact() {
        let store = ArtifactStore::new(temp_artifacts_dir("missing"));
        let err = store.load("UpgradeableBeacon").unwrap_err();
        assert!(matches!(err, DeployError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_empty_bytecode_is_rejected() {
        let dir = temp_artifacts_dir("empty");
        fs::write(
            dir.join("BeaconProxy.json"),
            r#"{"abi": [], "bytecode": "0x"}"#,
        )
        .unwrap();

        let store = ArtifactStore::new(dir);
        let err = store.load("BeaconProxy").unwrap_err();
        assert!(matches!(err, DeployError::InvalidArtifact { .. }));
    }
}
