//! Contract bindings for all contracts the deployment orchestrator touches.
//!
//! This crate consolidates the Solidity interfaces used across the project:
//! - ParadiseBridge (the bridge configuration surface)
//! - Upgradeability plumbing (UpgradeableBeacon, BeaconProxy)
//! - BridgeERC20 auxiliary tokens
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod bridge;
pub mod proxy;
pub mod token;
