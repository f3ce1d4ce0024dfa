// CLI tool for launching SPL tokens
//
// Prompts for token parameters (or reads a token file), pins the metadata
// document to IPFS, creates the mint and initial supply, and registers the
// metadata on-chain.

mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use solana_sdk::signature::Signer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use token_launcher::{
    keypair::load_keypair, Cluster, LightRpcClient, PinataClient, PromptCollector, TokenFile,
    TokenInputSource, TokenLauncher, TokenMetadataDocument,
};

use cli::Cli;
use output::{info, success, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is read once here; the library only sees explicit config
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let config = cli.launcher_config().context("Invalid launcher configuration")?;
    tracing::debug!(config = ?config, "Resolved configuration");

    let mut source: Box<dyn TokenInputSource> = match &cli.input {
        Some(path) => Box::new(TokenFile::new(path)),
        None => Box::new(PromptCollector::stdio()),
    };

    if cli.dry_run {
        let input = source.provide().context("Failed to collect token input")?;
        input.validate()?;
        let document = TokenMetadataDocument::from(&input);
        info("Dry run: no metadata uploaded, no transactions sent");
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    // Fail on missing credentials before asking anything
    let pinner = PinataClient::new(&config.pinata).context("Pinata is not configured")?;
    let payer = load_keypair(&config.keypair_path).context("Failed to load payer keypair")?;
    let ledger = LightRpcClient::from_config(&config);

    info(&format!("Cluster: {} ({})", config.cluster, ledger.url()));
    info(&format!("Payer: {}", payer.pubkey()));
    if config.cluster == Cluster::MainnetBeta {
        warn("Running against mainnet-beta: transactions spend real SOL");
    }

    let cluster = config.cluster;
    let launcher = TokenLauncher::new(ledger, pinner, payer, config);
    let report = launcher
        .launch(source.as_mut())
        .await
        .context("Token launch failed")?;

    success(&format!("Metadata URI: {}", report.metadata_uri));
    success(&format!("Mint Address: {}", report.record.mint));
    success(&format!(
        "Associated Token Account: {}",
        report.record.associated_account
    ));
    success(&format!(
        "Total Supply Minted: {} ({} base units), tx {}",
        report.input.supply, report.record.amount, report.record.mint_to_signature
    ));
    success(&format!(
        "Metadata registered: {} (tx {})",
        report.record.metadata_account, report.metadata_signature
    ));
    info(&format!("Payer public key: {}", launcher.payer()));
    info(&format!("View on Solana Explorer ({}): {}", cluster, report.explorer_url));

    Ok(())
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("token_launcher={}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
