//! Launcher configuration
//!
//! Everything the pipeline needs from the environment is collected here once,
//! by the binary, and passed down explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::{
    LauncherError, LauncherResult, DEFAULT_AIRDROP_LAMPORTS, DEFAULT_CONFIRM_ATTEMPTS,
    DEFAULT_CONFIRM_INTERVAL_MS, DEFAULT_GATEWAY_URL, DEFAULT_KEYPAIR_PATH, DEFAULT_PINATA_API_URL,
};

/// Solana cluster the launcher talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl Cluster {
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://localhost:8899",
        }
    }

    /// Faucet grants only exist off mainnet
    pub fn allows_airdrop(&self) -> bool {
        !matches!(self, Cluster::MainnetBeta)
    }

    /// Explorer page for `address`; a local cluster is addressed through `rpc_url`
    pub fn explorer_address_url(&self, address: &impl fmt::Display, rpc_url: &str) -> String {
        let base = format!("https://explorer.solana.com/address/{}", address);
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        match self {
            Cluster::Devnet => query.append_pair("cluster", "devnet"),
            Cluster::Testnet => query.append_pair("cluster", "testnet"),
            Cluster::MainnetBeta => return base,
            Cluster::Localnet => query
                .append_pair("cluster", "custom")
                .append_pair("customUrl", rpc_url),
        };
        format!("{}?{}", base, query.finish())
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Cluster {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet" | "mainnet-beta" => Ok(Cluster::MainnetBeta),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(LauncherError::Config(format!("unknown cluster '{}'", other))),
        }
    }
}

/// Pinata endpoints and credential
#[derive(Clone, Serialize, Deserialize)]
pub struct PinataConfig {
    pub api_url: String,
    pub gateway_url: String,
    /// Bearer token, usually from `PINATA_JWT`
    #[serde(skip_serializing)]
    pub jwt: Option<String>,
}

// Keeps the JWT out of logs
impl fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataConfig")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("jwt", &self.jwt.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PINATA_API_URL.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            jwt: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    pub cluster: Cluster,
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub pinata: PinataConfig,
    /// Faucet request size when the payer is empty
    pub airdrop_lamports: u64,
    /// Number of `getSignatureStatuses` polls before giving up
    pub confirm_attempts: u32,
    pub confirm_interval_ms: u64,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::for_cluster(Cluster::Devnet)
    }
}

impl LauncherConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            cluster,
            rpc_url: cluster.default_rpc_url().to_string(),
            keypair_path: PathBuf::from(DEFAULT_KEYPAIR_PATH),
            pinata: PinataConfig::default(),
            airdrop_lamports: DEFAULT_AIRDROP_LAMPORTS,
            confirm_attempts: DEFAULT_CONFIRM_ATTEMPTS,
            confirm_interval_ms: DEFAULT_CONFIRM_INTERVAL_MS,
        }
    }

    pub fn validate(&self) -> LauncherResult<()> {
        validate_url("rpc_url", &self.rpc_url)?;
        validate_url("pinata.api_url", &self.pinata.api_url)?;
        validate_url("pinata.gateway_url", &self.pinata.gateway_url)?;

        if self.keypair_path.as_os_str().is_empty() {
            return Err(LauncherError::Config("keypair_path cannot be empty".to_string()));
        }

        if self.confirm_attempts == 0 {
            return Err(LauncherError::Config(
                "confirm_attempts must be greater than 0".to_string(),
            ));
        }

        if self.cluster.allows_airdrop() && self.airdrop_lamports == 0 {
            return Err(LauncherError::Config(
                "airdrop_lamports must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> LauncherResult<()> {
    if value.trim().is_empty() {
        return Err(LauncherError::Config(format!("{} cannot be empty", field)));
    }
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| LauncherError::Config(format!("{} is not a valid URL: {}", field, e)))
}
