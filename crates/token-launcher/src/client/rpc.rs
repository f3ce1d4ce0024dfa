//! Lightweight Solana JSON-RPC client
//!
//! Implements only the methods the launcher needs over ureq, avoiding the
//! dependency chain of solana-client.

use async_trait::async_trait;
use base64::Engine;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::time::Duration;
use tracing::debug;

use super::LedgerClient;
use crate::config::LauncherConfig;
use crate::core::{
    LauncherError, LauncherResult, DEFAULT_CONFIRM_ATTEMPTS, DEFAULT_CONFIRM_INTERVAL_MS,
};

/// RPC response wrapper
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// `{ context, value }` envelope used by most account methods
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    err: Option<Value>,
    confirmation_status: Option<String>,
}

pub struct LightRpcClient {
    url: String,
    agent: ureq::Agent,
    confirm_attempts: u32,
    confirm_interval: Duration,
}

impl LightRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .build();

        Self {
            url: url.into(),
            agent,
            confirm_attempts: DEFAULT_CONFIRM_ATTEMPTS,
            confirm_interval: Duration::from_millis(DEFAULT_CONFIRM_INTERVAL_MS),
        }
    }

    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(config.rpc_url.clone())
            .with_confirmation(config.confirm_attempts, Duration::from_millis(config.confirm_interval_ms))
    }

    pub fn with_confirmation(mut self, attempts: u32, interval: Duration) -> Self {
        self.confirm_attempts = attempts.max(1);
        self.confirm_interval = interval;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make a JSON-RPC call
    async fn call<T>(&self, method: &str, params: Value) -> LauncherResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        debug!(method = method, "RPC call");

        // ureq is sync
        let agent = self.agent.clone();
        let url = self.url.clone();
        let method_name = method.to_string();
        let response: RpcResponse<T> = tokio::task::spawn_blocking(move || {
            let response = agent
                .post(&url)
                .set("Content-Type", "application/json")
                .send_json(request_body)
                .map_err(|e| LauncherError::Rpc(format!("{} request failed: {}", method_name, e)))?;
            response
                .into_json::<RpcResponse<T>>()
                .map_err(|e| LauncherError::Rpc(format!("{} returned invalid JSON: {}", method_name, e)))
        })
        .await
        .map_err(|e| LauncherError::Rpc(format!("RPC task failed: {}", e)))??;

        if let Some(error) = response.error {
            return Err(LauncherError::Rpc(format!(
                "{} failed ({}): {}",
                method, error.code, error.message
            )));
        }
        response
            .result
            .ok_or_else(|| LauncherError::Rpc(format!("{} returned no result", method)))
    }

    async fn signature_status(&self, signature: &Signature) -> LauncherResult<Option<SignatureStatus>> {
        let statuses: WithContext<Vec<Option<SignatureStatus>>> = self
            .call(
                "getSignatureStatuses",
                json!([[signature.to_string()], { "searchTransactionHistory": true }]),
            )
            .await?;
        Ok(statuses.value.into_iter().next().flatten())
    }
}

fn parse_signature(raw: &str) -> LauncherResult<Signature> {
    raw.parse()
        .map_err(|e| LauncherError::Rpc(format!("Failed to parse signature {}: {}", raw, e)))
}

#[async_trait]
impl LedgerClient for LightRpcClient {
    async fn get_balance(&self, address: &Pubkey) -> LauncherResult<u64> {
        let balance: WithContext<u64> = self
            .call("getBalance", json!([address.to_string(), { "commitment": "confirmed" }]))
            .await?;
        Ok(balance.value)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> LauncherResult<Signature> {
        let signature: String = self
            .call("requestAirdrop", json!([address.to_string(), lamports]))
            .await?;
        parse_signature(&signature)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LauncherResult<u64> {
        self.call("getMinimumBalanceForRentExemption", json!([data_len]))
            .await
    }

    async fn account_exists(&self, address: &Pubkey) -> LauncherResult<bool> {
        let account: WithContext<Option<Value>> = self
            .call(
                "getAccountInfo",
                json!([address.to_string(), { "encoding": "base64", "commitment": "confirmed" }]),
            )
            .await?;
        Ok(account.value.is_some())
    }

    async fn latest_blockhash(&self) -> LauncherResult<Hash> {
        let latest: WithContext<BlockhashValue> = self
            .call("getLatestBlockhash", json!([{ "commitment": "confirmed" }]))
            .await?;
        latest
            .value
            .blockhash
            .parse()
            .map_err(|e| LauncherError::Rpc(format!("Failed to parse blockhash: {}", e)))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> LauncherResult<Signature> {
        let serialized_tx = bincode::serialize(transaction)?;
        let encoded_tx = base64::engine::general_purpose::STANDARD.encode(&serialized_tx);

        let signature: String = self
            .call(
                "sendTransaction",
                json!([encoded_tx, { "encoding": "base64", "preflightCommitment": "confirmed" }]),
            )
            .await?;
        parse_signature(&signature)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> LauncherResult<()> {
        for attempt in 1..=self.confirm_attempts {
            if let Some(status) = self.signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(LauncherError::TransactionFailed(format!(
                        "{}: {}",
                        signature, err
                    )));
                }
                if matches!(
                    status.confirmation_status.as_deref(),
                    Some("confirmed") | Some("finalized")
                ) {
                    debug!(signature = %signature, attempt, "Transaction confirmed");
                    return Ok(());
                }
            }
            if attempt < self.confirm_attempts {
                tokio::time::sleep(self.confirm_interval).await;
            }
        }

        Err(LauncherError::ConfirmationTimeout {
            signature: signature.to_string(),
            attempts: self.confirm_attempts,
        })
    }
}
