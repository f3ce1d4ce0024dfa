//! Ledger access used by the provisioning steps

pub mod rpc;

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::debug;

use crate::core::LauncherResult;

pub use rpc::LightRpcClient;

/// The cluster calls the launcher makes, and nothing more
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn get_balance(&self, address: &Pubkey) -> LauncherResult<u64>;

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> LauncherResult<Signature>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LauncherResult<u64>;

    async fn account_exists(&self, address: &Pubkey) -> LauncherResult<bool>;

    async fn latest_blockhash(&self) -> LauncherResult<Hash>;

    async fn send_transaction(&self, transaction: &Transaction) -> LauncherResult<Signature>;

    /// Wait until the signature reaches confirmed commitment
    async fn confirm_transaction(&self, signature: &Signature) -> LauncherResult<()>;
}

/// Build, sign, submit and confirm a transaction paid for by `payer`
pub async fn send_and_confirm<L: LedgerClient + ?Sized>(
    ledger: &L,
    instructions: &[Instruction],
    payer: &Keypair,
    signers: &[&Keypair],
) -> LauncherResult<Signature> {
    let blockhash = ledger.latest_blockhash().await?;

    let mut all_signers = vec![payer];
    all_signers.extend_from_slice(signers);

    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&payer.pubkey()),
        &all_signers,
        blockhash,
    );

    let signature = ledger.send_transaction(&transaction).await?;
    debug!(signature = %signature, "Transaction submitted, awaiting confirmation");
    ledger.confirm_transaction(&signature).await?;
    Ok(signature)
}
