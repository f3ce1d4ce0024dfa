//! Pinata JSON pinning client
//! Blocking ureq calls are moved off the async runtime with `spawn_blocking`

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{MetadataPinner, TokenMetadataDocument};
use crate::config::PinataConfig;
use crate::core::{LauncherError, LauncherResult, PIN_JSON_PATH};

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

pub struct PinataClient {
    agent: ureq::Agent,
    endpoint: String,
    jwt: String,
}

impl PinataClient {
    /// Fails fast when no JWT is configured
    pub fn new(config: &PinataConfig) -> LauncherResult<Self> {
        let jwt = config
            .jwt
            .as_deref()
            .map(str::trim)
            .filter(|jwt| !jwt.is_empty())
            .ok_or_else(|| {
                LauncherError::MissingCredential(
                    "PINATA_JWT environment variable is not set. Please set it in your .env file."
                        .to_string(),
                )
            })?
            .to_string();

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .build();

        Ok(Self {
            agent,
            endpoint: format!("{}{}", config.api_url.trim_end_matches('/'), PIN_JSON_PATH),
            jwt,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetadataPinner for PinataClient {
    async fn pin_json(&self, document: &TokenMetadataDocument) -> LauncherResult<String> {
        let body = serde_json::to_value(document)?;
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let authorization = format!("Bearer {}", self.jwt);

        debug!(endpoint = %endpoint, "Pinning metadata JSON");

        let response: PinResponse = tokio::task::spawn_blocking(move || {
            let response = agent
                .post(&endpoint)
                .set("Content-Type", "application/json")
                .set("Authorization", &authorization)
                .send_json(body)
                .map_err(|e| match e {
                    ureq::Error::Status(code, response) => {
                        let detail = response.into_string().unwrap_or_default();
                        LauncherError::Pinning(format!("HTTP {}: {}", code, detail))
                    }
                    transport => LauncherError::Pinning(transport.to_string()),
                })?;

            response
                .into_json::<PinResponse>()
                .map_err(|e| LauncherError::Pinning(format!("unexpected response body: {}", e)))
        })
        .await
        .map_err(|e| LauncherError::Pinning(format!("pinning task failed: {}", e)))??;

        if response.ipfs_hash.is_empty() {
            return Err(LauncherError::Pinning("response carried an empty IpfsHash".to_string()));
        }
        Ok(response.ipfs_hash)
    }
}
