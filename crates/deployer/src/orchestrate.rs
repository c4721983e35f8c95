//! Grouped multi-stage deployment sequencing.
//!
//! Every contract in the list goes through three stages: the raw
//! implementation, an UpgradeableBeacon pointing at it, and one or more
//! BeaconProxy instances pointing at the beacon. The plan is computed as
//! pure data first, then executed strictly in order; each stage's
//! constructor needs an address the previous stage produced.

use crate::{ContractDeployer, DeployError};
use alloy_primitives::Bytes;
use alloy_provider::Provider;
use alloy_sol_types::SolConstructor;
use binding::proxy::{BeaconProxy, UpgradeableBeacon};
use config::ContractEntry;
use ledger::DeploymentRecord;
use std::collections::BTreeMap;

pub const IMPL_PREFIX: &str = "Impl";
pub const UPBEACON_PREFIX: &str = "UpBeacon";
pub const PROXY_SUFFIX: &str = "Proxy";

/// One stage of a grouped deployment. `implementation` and `beacon` name
/// the prerequisite record the stage's constructor consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStage {
    Implementation { name: String, contract_type: String },
    Beacon { name: String, implementation: String },
    Proxy { name: String, beacon: String },
}

impl DeployStage {
    pub fn name(&self) -> &str {
        match self {
            Self::Implementation { name, .. }
            | Self::Beacon { name, .. }
            | Self::Proxy { name, .. } => name,
        }
    }
}

pub fn impl_name(base: &str) -> String {
    format!("{IMPL_PREFIX}{base}")
}

pub fn beacon_name(base: &str) -> String {
    format!("{UPBEACON_PREFIX}{base}")
}

pub fn proxy_name(instance: &str) -> String {
    format!("{instance}{PROXY_SUFFIX}")
}

/// Compute the ordered deployment plan for a contract list.
///
/// For a `Single` entry the plan is implementation, beacon, proxy. For a
/// `Grouped` entry one implementation and one beacon back every child
/// proxy, giving independent instances with shared upgrade logic.
pub fn plan(entries: &[ContractEntry]) -> Vec<DeployStage> {
    let mut stages = Vec::new();
    for entry in entries {
        match entry {
            ContractEntry::Single(name) => {
                stages.push(DeployStage::Implementation {
                    name: impl_name(name),
                    contract_type: name.clone(),
                });
                stages.push(DeployStage::Beacon {
                    name: beacon_name(name),
                    implementation: impl_name(name),
                });
                stages.push(DeployStage::Proxy {
                    name: proxy_name(name),
                    beacon: beacon_name(name),
                });
            }
            ContractEntry::Grouped { base, children } => {
                stages.push(DeployStage::Implementation {
                    name: impl_name(base),
                    contract_type: base.clone(),
                });
                stages.push(DeployStage::Beacon {
                    name: beacon_name(base),
                    implementation: impl_name(base),
                });
                for child in children {
                    stages.push(DeployStage::Proxy {
                        name: proxy_name(child),
                        beacon: beacon_name(base),
                    });
                }
            }
        }
    }
    stages
}

/// Execute the grouped deployment plan in order.
///
/// A stage whose prerequisite record is absent aborts the whole run: no
/// beacon is created without its implementation, no proxy without its
/// beacon.
pub async fn deploy_grouped<P>(
    deployer: &mut ContractDeployer<P>,
    entries: &[ContractEntry],
) -> Result<BTreeMap<String, DeploymentRecord>, DeployError>
where
    P: Provider + Clone,
{
    let mut results: BTreeMap<String, DeploymentRecord> = BTreeMap::new();

    for stage in plan(entries) {
        let record = match &stage {
            DeployStage::Implementation {
                name,
                contract_type,
            } => deployer.deploy(name, contract_type, &[]).await?,
            DeployStage::Beacon {
                name,
                implementation,
            } => {
                let implementation = require(&results, name, implementation)?;
                let args = UpgradeableBeacon::constructorCall {
                    implementation: implementation.address,
                }
                .abi_encode();
                deployer.deploy(name, "UpgradeableBeacon", &args).await?
            }
            DeployStage::Proxy { name, beacon } => {
                let beacon = require(&results, name, beacon)?;
                let args = BeaconProxy::constructorCall {
                    beacon: beacon.address,
                    data: Bytes::new(),
                }
                .abi_encode();
                deployer.deploy(name, "BeaconProxy", &args).await?
            }
        };
        results.insert(stage.name().to_string(), record);
    }

    Ok(results)
}

fn require<'a>(
    results: &'a BTreeMap<String, DeploymentRecord>,
    name: &str,
    required: &str,
) -> Result<&'a DeploymentRecord, DeployError> {
    results
        .get(required)
        .ok_or_else(|| DeployError::MissingPrerequisite {
            name: name.to_string(),
            required: required.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;
    use crate::ArtifactStore;
    use alloy_primitives::{Address, TxHash};
    use ledger::DeploymentLedger;
    use std::fs;
    use std::path::PathBuf;

    fn single(name: &str) -> ContractEntry {
        ContractEntry::Single(name.to_string())
    }

    #[test]
    fn test_single_entry_plan_order() {
        let stages = plan(&[single("ParadiseBridge")]);

        assert_eq!(
            stages,
            vec![
                DeployStage::Implementation {
                    name: "ImplParadiseBridge".to_string(),
                    contract_type: "ParadiseBridge".to_string(),
                },
                DeployStage::Beacon {
                    name: "UpBeaconParadiseBridge".to_string(),
                    implementation: "ImplParadiseBridge".to_string(),
                },
                DeployStage::Proxy {
                    name: "ParadiseBridgeProxy".to_string(),
                    beacon: "UpBeaconParadiseBridge".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_grouped_entry_shares_one_beacon() {
        let stages = plan(&[ContractEntry::Grouped {
            base: "ParadiseBridge".to_string(),
            children: vec!["MainBridge".to_string(), "BackupBridge".to_string()],
        }]);

        assert_eq!(stages.len(), 4);
        assert_eq!(
            stages[1],
            DeployStage::Beacon {
                name: "UpBeaconParadiseBridge".to_string(),
                implementation: "ImplParadiseBridge".to_string(),
            }
        );
        for (stage, child) in stages[2..].iter().zip(["MainBridge", "BackupBridge"]) {
            assert_eq!(
                *stage,
                DeployStage::Proxy {
                    name: proxy_name(child),
                    beacon: "UpBeaconParadiseBridge".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_prerequisites_always_precede_dependents() {
        let stages = plan(&[
            single("ParadiseBridge"),
            ContractEntry::Grouped {
                base: "Vault".to_string(),
                children: vec!["VaultA".to_string(), "VaultB".to_string()],
            },
        ]);

        let position = |name: &str| {
            stages
                .iter()
                .position(|s| s.name() == name)
                .unwrap_or_else(|| panic!("stage {name} missing"))
        };

        for stage in &stages {
            match stage {
                DeployStage::Implementation { .. } => {}
                DeployStage::Beacon {
                    name,
                    implementation,
                } => assert!(position(implementation) < position(name)),
                DeployStage::Proxy { name, beacon } => {
                    assert!(position(beacon) < position(name));
                }
            }
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bridge-orchestrate-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    // With every stage already in the ledger, a rerun must not touch the
    // provider at all (MockProvider panics on use).
    #[tokio::test]
    async fn test_rerun_with_full_ledger_issues_no_transactions() {
        let dir = temp_dir("rerun");
        let mut ledger = DeploymentLedger::open(&dir, "bsctest");
        for (name, contract_type) in [
            ("ImplParadiseBridge", "ParadiseBridge"),
            ("UpBeaconParadiseBridge", "UpgradeableBeacon"),
            ("ParadiseBridgeProxy", "BeaconProxy"),
        ] {
            ledger
                .record(DeploymentRecord {
                    name: name.to_string(),
                    contract_type: contract_type.to_string(),
                    address: Address::from([name.len() as u8; 20]),
                    interface: serde_json::Value::Array(vec![]),
                    transaction_hash: TxHash::from([0x05u8; 32]),
                    gas_used: 100,
                    newly_created: true,
                })
                .unwrap();
        }

        let mut deployer = ContractDeployer::new(
            MockProvider,
            ArtifactStore::new(dir.join("artifacts")),
            ledger,
        );

        let results = deploy_grouped(&mut deployer, &[single("ParadiseBridge")])
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.values().all(|r| !r.newly_created));
    }
}
