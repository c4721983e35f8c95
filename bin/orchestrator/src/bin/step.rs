//! CLI tool to run individual rollout stages for testing.
//!
//! Every stage is idempotent, so a stage can be rerun freely; stages that
//! need the bridge proxy refuse to run before the deploy stage.

use clap::{Parser, Subcommand};
use config::Network;
use orchestrator::{config::Config, Stage, Workspace};
use tracing::info;

#[derive(Parser)]
#[command(name = "step")]
#[command(about = "Run individual rollout stages for testing")]
struct Cli {
    /// Target network (rinkeby, paradise, bsctest)
    #[arg(short, long)]
    network: Network,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY")]
    private_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy the contract list through the implementation/beacon/proxy stages
    Deploy,

    /// Reconcile the bridge running flag, fee flag and fee recipient
    Flags,

    /// Reconcile the bridge-to-native approval flag
    NativeApproval,

    /// Grant the approver role to the configured accounts
    Approvers,

    /// Deploy the auxiliary bridge tokens
    Erc20Tokens,

    /// Register the configured tokens as bridgeable
    BridgeableTokens,

    /// Register the configured transfer-approval policies
    ApprovalConfigs,

    /// Set the native-token bridge policy
    NativeConfig,

    /// Deposit native-token collateral into the bridge
    Deposit,
}

impl Command {
    const fn stage(&self) -> Stage {
        match self {
            Self::Deploy => Stage::Deploy,
            Self::Flags => Stage::Flags,
            Self::NativeApproval => Stage::NativeApproval,
            Self::Approvers => Stage::Approvers,
            Self::Erc20Tokens => Stage::Erc20Tokens,
            Self::BridgeableTokens => Stage::BridgeableTokens,
            Self::ApprovalConfigs => Stage::ApprovalConfigs,
            Self::NativeConfig => Stage::NativeConfig,
            Self::Deposit => Stage::Deposit,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;

    let (provider, deployer_address) =
        client::create_wallet_provider(&config.rpc_url, &cli.private_key)?;

    info!("Loaded config:");
    info!("  Network: {}", cli.network);
    info!("  State dir: {}", config.state_dir.display());
    info!("  Deployer: {deployer_address}");

    let mut workspace = Workspace::open(provider, deployer_address, cli.network, &config)?;

    let stage = cli.command.stage();
    info!("Running stage: {stage:?}");

    let tx_hashes = workspace.run_stage(stage).await?;
    info!("Stage completed ({} transaction(s) sent)", tx_hashes.len());

    Ok(())
}
