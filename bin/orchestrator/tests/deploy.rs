//! End-to-end rollout tests against a live network.
//!
//! These need tests/test-config.toml pointing at a funded test network and
//! a private key (see setup.rs). Run with `cargo test -- --ignored`.


use config::Network;
use orchestrator::Workspace;

fn target_network() -> Network {
    std::env::var("TEST_NETWORK")
        .unwrap_or_else(|_| "bsctest".to_string())
        .parse()
        .expect("Invalid TEST_NETWORK")
}

#[tokio::test]
#[ignore] // requires a live network and a funded key
async fn test_full_rollout() {
    let config = setup::load_test_config();
    let (provider, deployer) = setup::setup_wallet_provider(&config);

    let mut workspace = Workspace::open(provider, deployer, target_network(), &config).unwrap();
    workspace.run().await.unwrap();

    let bridge = workspace.bridge_address().unwrap();
    eprintln!("✓ Bridge proxy at {bridge}");
}

#[tokio::test]
#[ignore] // requires a live network and a funded key
async fn test_rerun_is_idempotent() {
    let config = setup::load_test_config();
    let (provider, deployer) = setup::setup_wallet_provider(&config);

    let mut workspace = Workspace::open(provider, deployer, target_network(), &config).unwrap();
    workspace.run().await.unwrap();

    // Second pass: every contract is reused and every step skips.
    let records = workspace.deploy().await.unwrap();
    assert!(records.values().all(|r| !r.newly_created));

    let tx_hashes = workspace.configure().await.unwrap();
    assert!(tx_hashes.is_empty(), "rerun sent {} transactions", tx_hashes.len());
}
