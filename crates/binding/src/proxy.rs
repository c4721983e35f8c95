//! Upgradeability contract bindings (OpenZeppelin beacon pattern).
//!
//! One shared implementation sits behind an UpgradeableBeacon; any number
//! of BeaconProxy instances delegate to whatever the beacon points at.

use alloy_sol_types::sol;

sol! {
    /// UpgradeableBeacon - holds the implementation address shared by its proxies
    #[sol(rpc)]
    contract UpgradeableBeacon {
        constructor(address implementation);

        /// Current implementation address
        function implementation() external view returns (address);

        /// Point the beacon at a new implementation (owner only)
        function upgradeTo(address newImplementation) external;
    }

    /// BeaconProxy - delegates all calls to the beacon's implementation,
    /// keeping its own storage
    #[sol(rpc)]
    contract BeaconProxy {
        constructor(address beacon, bytes data);
    }
}
