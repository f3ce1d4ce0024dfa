// Command-line flags; every value can also come from the environment

use clap::Parser;
use std::path::PathBuf;

use token_launcher::{core::DEFAULT_KEYPAIR_PATH, Cluster, LauncherConfig, LauncherResult};

#[derive(Parser, Debug)]
#[command(name = "token-launcher")]
#[command(about = "Launch an SPL token with pinned Metaplex metadata", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Solana cluster (devnet, testnet, mainnet-beta, localnet)
    #[arg(long, env = "SOLANA_CLUSTER", default_value = "devnet")]
    pub cluster: Cluster,

    /// RPC URL (defaults to the cluster's public endpoint)
    #[arg(long, env = "SOLANA_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Path to payer keypair file
    #[arg(long, env = "KEYPAIR_PATH", default_value = DEFAULT_KEYPAIR_PATH)]
    pub keypair: PathBuf,

    /// Pinata JWT used as bearer token
    #[arg(long, env = "PINATA_JWT", hide_env_values = true)]
    pub pinata_jwt: Option<String>,

    /// Pinata API base URL
    #[arg(long, env = "PINATA_API_URL")]
    pub pinata_api_url: Option<String>,

    /// IPFS gateway used to build the metadata URI
    #[arg(long, env = "PINATA_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// Read token parameters from a TOML file instead of prompting
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Collect and validate input, print the metadata document, then stop
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn launcher_config(&self) -> LauncherResult<LauncherConfig> {
        let mut config = LauncherConfig::for_cluster(self.cluster);

        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = rpc_url.clone();
        }
        config.keypair_path = self.keypair.clone();
        config.pinata.jwt = self.pinata_jwt.clone();
        if let Some(api_url) = &self.pinata_api_url {
            config.pinata.api_url = api_url.clone();
        }
        if let Some(gateway_url) = &self.gateway_url {
            config.pinata.gateway_url = gateway_url.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
