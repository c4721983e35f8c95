use alloy_primitives::utils::format_ether;
use alloy_provider::Provider;
use clap::Parser;
use config::Network;
use orchestrator::{config::Config, Workspace};
use tracing::info;

#[derive(Parser)]
#[command(name = "orchestrator")]
#[command(about = "Deploy and configure the bridge contracts on a network")]
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
    let balance = provider.get_balance(deployer_address).await?;

    info!("Starting bridge deployment");
    info!(
        "  Network: {} (chain id {})",
        cli.network,
        cli.network.chain_id()
    );
    info!("  RPC URL: {}", config.rpc_url);
    info!("  State dir: {}", config.state_dir.display());
    info!("  Deployer: {deployer_address}");
    info!("  Balance: {} native tokens", format_ether(balance));

    let mut workspace = Workspace::open(provider, deployer_address, cli.network, &config)?;
    workspace.run().await
}
