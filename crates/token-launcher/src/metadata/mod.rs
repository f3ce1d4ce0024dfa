//! Off-chain metadata document and its publication to a pinning service

pub mod pinata;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::core::{LauncherError, LauncherResult, MAX_URI_LENGTH};
use crate::input::TokenInput;

pub use pinata::PinataClient;

/// JSON uploaded to the pinning service and referenced by the on-chain URI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    pub properties: MetadataProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataProperties {
    pub website: String,
    pub links: BTreeMap<String, String>,
}

impl From<&TokenInput> for TokenMetadataDocument {
    fn from(input: &TokenInput) -> Self {
        Self {
            name: input.name.clone(),
            symbol: input.symbol.clone(),
            description: input.description.clone().unwrap_or_default(),
            image: input.image_url.clone().unwrap_or_default(),
            properties: MetadataProperties {
                website: input.website.clone().unwrap_or_default(),
                links: input.social_links.clone(),
            },
        }
    }
}

/// Content-addressed storage for metadata documents
#[async_trait]
pub trait MetadataPinner: Send + Sync {
    /// Pin the document and return its content hash
    async fn pin_json(&self, document: &TokenMetadataDocument) -> LauncherResult<String>;
}

pub struct MetadataPublisher<P> {
    pinner: P,
    gateway_url: String,
}

impl<P: MetadataPinner> MetadataPublisher<P> {
    pub fn new(pinner: P, gateway_url: impl Into<String>) -> Self {
        Self {
            pinner,
            gateway_url: gateway_url.into(),
        }
    }

    pub fn gateway_uri(&self, content_hash: &str) -> String {
        format!("{}/ipfs/{}", self.gateway_url.trim_end_matches('/'), content_hash)
    }

    /// Pin the token's metadata and return the gateway URI for it
    pub async fn publish(&self, input: &TokenInput) -> LauncherResult<String> {
        let document = TokenMetadataDocument::from(input);

        let content_hash = self.pinner.pin_json(&document).await.map_err(|e| {
            error!(error = %e, "Failed to upload metadata to IPFS");
            e
        })?;
        info!(hash = %content_hash, "Metadata uploaded to IPFS");

        let uri = self.gateway_uri(&content_hash);
        if uri.len() > MAX_URI_LENGTH {
            return Err(LauncherError::validation(format!(
                "Metadata URI must be at most {} bytes, got {}",
                MAX_URI_LENGTH,
                uri.len()
            )));
        }
        Ok(uri)
    }
}
