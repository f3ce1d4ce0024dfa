//! Token launcher
//!
//! Walks an operator through launching a fungible SPL token: token parameters
//! are collected, a metadata document is pinned to IPFS, a mint is created and
//! funded with the initial supply, and the metadata URI is registered with the
//! Metaplex Token Metadata program.

pub mod client;
pub mod config;
pub mod core;
pub mod input;
pub mod keypair;
pub mod metadata;
pub mod mint;
pub mod pipeline;
pub mod registrar;

pub use client::{LedgerClient, LightRpcClient};
pub use config::{Cluster, LauncherConfig, PinataConfig};
pub use crate::core::{LauncherError, LauncherResult};
pub use input::{PromptCollector, TokenFile, TokenInput, TokenInputSource};
pub use metadata::{MetadataPinner, MetadataPublisher, PinataClient, TokenMetadataDocument};
pub use mint::{mint_amount, MintProvisioner};
pub use pipeline::{LaunchReport, MintRecord, PipelineError, Stage, TokenLauncher};
pub use registrar::{derive_metadata_address, metadata_address, MetadataRegistrar};
