//! ParadiseBridge contract bindings.
//!
//! Only the configuration surface the orchestrator drives is declared here;
//! the transfer-side methods of the bridge are out of scope.

use alloy_sol_types::sol;

sol! {
    /// ParadiseBridge - the cross-chain bridge contract, consumed through
    /// its configuration method surface.
    #[sol(rpc)]
    contract ParadiseBridge {
        /// Per-token bridge policy.
        #[derive(Debug, Default, PartialEq, Eq)]
        struct TokenBridgeConfig {
            bool enabled;
            bool burn;
            uint256 minBridgeAmount;
            uint256 maxBridgeAmount;
            uint256 bridgeFee;
        }

        /// Per-token transfer-approval policy.
        #[derive(Debug, Default, PartialEq, Eq)]
        struct ApprovalConfig {
            bool enabled;
            bool transferAllowed;
        }

        /// Emitted when `role` is granted to `account`
        event RoleGranted(
            bytes32 indexed role,
            address indexed account,
            address indexed sender
        );

        /// Role identifier for addresses allowed to approve bridge transfers
        function BRIDGE_APPROVER_ROLE() external view returns (bytes32);

        /// Query role membership
        function hasRole(bytes32 role, address account) external view returns (bool);

        /// Grant a role to an account (admin only)
        function grantRole(bytes32 role, address account) external;

        /// Whether the bridge accepts transfers
        function bridgeRunningStatus() external view returns (bool);

        /// Toggle the bridge running flag
        function setBridgeRunningStatus(bool status) external;

        /// Whether fees are charged globally
        function globalFeeStatus() external view returns (bool);

        /// Toggle the global fee flag
        function setGlobalFeeStatus(bool status) external;

        /// Recipient of collected bridge fees
        function feeRecipient() external view returns (address);

        /// Update the fee recipient
        function setFeeRecipient(address recipient) external;

        /// Whether bridging to native tokens requires approval
        function bridgeToNativeApprovalStatus() external view returns (bool);

        /// Toggle the bridge-to-native approval flag
        function setBridgeToNativeApprovalStatus(bool status) external;

        /// Bridge policy registered for a token (zeroed when unregistered)
        function bridgeableTokens(address token) external view returns (TokenBridgeConfig memory);

        /// Register bridgeable tokens with their per-token policies
        function addBridgeableTokens(
            address[] calldata tokens,
            TokenBridgeConfig[] calldata configs
        ) external;

        /// Approval policy registered for a token (zeroed when unregistered)
        function bridgeApprovalConfigs(address token) external view returns (ApprovalConfig memory);

        /// Register approval policies for tokens
        function addBridgeApprovalConfig(
            address[] calldata tokens,
            ApprovalConfig[] calldata configs
        ) external;

        /// Bridge policy applied to the chain's native token
        function nativeTokensBridgeConfig() external view returns (TokenBridgeConfig memory);

        /// Set the native-token bridge policy
        function setNativeTokensBridgeConfig(TokenBridgeConfig calldata config) external;

        /// Deposit native-token collateral into the bridge
        function depositNativeTokens() external payable;
    }
}
