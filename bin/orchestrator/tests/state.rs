//! Offline tests against the on-disk deployment state.
//!
//! These use a lazy HTTP provider that never gets queried, so they run
//! without any network.


use alloy_primitives::{Address, TxHash};
use config::Network;
use ledger::{DeploymentLedger, DeploymentRecord};
use orchestrator::{config::Config, Workspace};
use std::fs;
use std::path::PathBuf;

fn temp_state_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bridge-orchestrator-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn test_config(state_dir: &PathBuf) -> Config {
    Config {
        rpc_url: "http://localhost:8545".to_string(),
        state_dir: state_dir.clone(),
        artifacts_dir: state_dir.join("artifacts"),
        confirmation_timeout_secs: 1,
        force_redeploy: false,
    }
}

#[test]
fn test_bridge_address_requires_deploy_stage() {
    let dir = temp_state_dir("undeployed");
    let config = test_config(&dir);
    let provider = client::create_provider(&config.rpc_url).unwrap();

    let workspace =
        Workspace::open(provider, Address::from([1u8; 20]), Network::Paradise, &config).unwrap();

    let err = workspace.bridge_address().unwrap_err();
    assert!(err.to_string().contains("deploy stage"));
}

#[test]
fn test_bridge_address_resolves_from_persisted_ledger() {
    let dir = temp_state_dir("deployed");
    let bridge = Address::from([0x42u8; 20]);

    let mut ledger = DeploymentLedger::open(&dir, Network::Paradise.key());
    ledger
        .record(DeploymentRecord {
            name: "ParadiseBridgeProxy".to_string(),
            contract_type: "BeaconProxy".to_string(),
            address: bridge,
            interface: serde_json::Value::Array(vec![]),
            transaction_hash: TxHash::from([0x07u8; 32]),
            gas_used: 100,
            newly_created: true,
        })
        .unwrap();

    let config = test_config(&dir);
    let provider = client::create_provider(&config.rpc_url).unwrap();
    let workspace =
        Workspace::open(provider, Address::from([1u8; 20]), Network::Paradise, &config).unwrap();

    assert_eq!(workspace.bridge_address().unwrap(), bridge);
}

#[test]
fn test_workspace_loads_network_configuration() {
    let dir = temp_state_dir("config");
    let config = test_config(&dir);
    let provider = client::create_provider(&config.rpc_url).unwrap();

    let workspace =
        Workspace::open(provider, Address::from([1u8; 20]), Network::BscTest, &config).unwrap();

    let deploy_config = workspace.deploy_config();
    assert_eq!(deploy_config.network, Network::BscTest);
    assert_eq!(deploy_config.bridge_erc20_deploy_configs.len(), 1);
    assert_eq!(deploy_config.bridge_erc20_deploy_configs[0].name, "BridgePDT");
}
