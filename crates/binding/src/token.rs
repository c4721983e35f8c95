//! BridgeERC20 token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// ERC20 token minted for the bridge, with the bridge contract as its
    /// controller (allowed to mint on inbound and burn on outbound transfers)
    #[sol(rpc)]
    contract BridgeERC20 {
        constructor(
            string name,
            string symbol,
            uint8 decimals,
            uint256 totalSupply,
            address bridge
        );

        /// Emitted when tokens are transferred
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// The bridge contract controlling mint and burn
        function bridge() external view returns (address);
    }
}
