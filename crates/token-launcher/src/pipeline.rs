//! Collect → publish → provision → register, each gated on the previous step

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::fmt;
use thiserror::Error;
use tracing::{error, info};

use crate::client::LedgerClient;
use crate::config::LauncherConfig;
use crate::core::{LauncherError, LauncherResult};
use crate::input::{TokenInput, TokenInputSource};
use crate::metadata::{MetadataPinner, MetadataPublisher};
use crate::mint::MintProvisioner;
use crate::registrar::MetadataRegistrar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collecting,
    PublishingMetadata,
    Provisioning,
    RegisteringMetadata,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Collecting => "collecting input",
            Stage::PublishingMetadata => "publishing metadata",
            Stage::Provisioning => "provisioning mint",
            Stage::RegisteringMetadata => "registering metadata",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    /// Stage that was running when the error occurred
    pub stage: Stage,
    #[source]
    pub source: LauncherError,
}

/// Addresses produced along the way; the ledger is the only place they live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRecord {
    pub mint: Pubkey,
    pub associated_account: Pubkey,
    pub metadata_account: Pubkey,
    pub amount: u64,
    pub mint_to_signature: Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchReport {
    pub input: TokenInput,
    pub metadata_uri: String,
    pub record: MintRecord,
    pub metadata_signature: Signature,
    pub explorer_url: String,
}

pub struct TokenLauncher<L, P> {
    ledger: L,
    publisher: MetadataPublisher<P>,
    payer: Keypair,
    config: LauncherConfig,
}

impl<L: LedgerClient, P: MetadataPinner> TokenLauncher<L, P> {
    pub fn new(ledger: L, pinner: P, payer: Keypair, config: LauncherConfig) -> Self {
        let publisher = MetadataPublisher::new(pinner, config.pinata.gateway_url.clone());
        Self {
            ledger,
            publisher,
            payer,
            config,
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub async fn launch(
        &self,
        source: &mut dyn TokenInputSource,
    ) -> Result<LaunchReport, PipelineError> {
        let mut stage = Stage::Collecting;
        match self.run(source, &mut stage).await {
            Ok(report) => {
                enter(&mut stage, Stage::Done);
                Ok(report)
            }
            Err(source) => {
                let failed_at = stage;
                error!(stage = %failed_at, error = %source, "Token launch aborted");
                enter(&mut stage, Stage::Failed);
                Err(PipelineError {
                    stage: failed_at,
                    source,
                })
            }
        }
    }

    async fn run(
        &self,
        source: &mut dyn TokenInputSource,
        stage: &mut Stage,
    ) -> LauncherResult<LaunchReport> {
        enter(stage, Stage::Collecting);
        let input = source.provide()?.normalized();
        input.validate()?;
        info!(name = %input.name, symbol = %input.symbol, decimals = input.decimals, supply = input.supply, "Token input collected");

        enter(stage, Stage::PublishingMetadata);
        let metadata_uri = self.publisher.publish(&input).await?;
        info!(uri = %metadata_uri, "Metadata URI ready");

        enter(stage, Stage::Provisioning);
        let provisioned = MintProvisioner::new(&self.ledger, &self.payer, &self.config)
            .provision(&input)
            .await?;

        enter(stage, Stage::RegisteringMetadata);
        let registration = MetadataRegistrar::new(&self.ledger, &self.payer)
            .register(&provisioned.mint, &metadata_uri, &input.name, &input.symbol)
            .await?;

        let explorer_url = self
            .config
            .cluster
            .explorer_address_url(&provisioned.mint, &self.config.rpc_url);
        Ok(LaunchReport {
            input,
            metadata_uri,
            record: MintRecord {
                mint: provisioned.mint,
                associated_account: provisioned.associated_account,
                metadata_account: registration.metadata_account,
                amount: provisioned.amount,
                mint_to_signature: provisioned.mint_to_signature,
            },
            metadata_signature: registration.signature,
            explorer_url,
        })
    }
}

fn enter(stage: &mut Stage, next: Stage) {
    *stage = next;
    info!(stage = %next, "Pipeline stage");
}
