//! Shared test infrastructure: recording mocks for the ledger and the
//! pinning service, plus a one-shot local HTTP server

#![allow(dead_code)]

pub mod http;

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use spl_token::instruction::TokenInstruction;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, Once};

use token_launcher::{LauncherError, LauncherResult, LedgerClient, MetadataPinner, TokenMetadataDocument};

static INIT: Once = Once::new();

/// Initialize tracing for tests; safe to call from every test
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("token_launcher=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    GetBalance(Pubkey),
    RequestAirdrop(Pubkey, u64),
    RentExemption(usize),
    AccountExists(Pubkey),
    LatestBlockhash,
    SendTransaction,
    ConfirmTransaction(Signature),
}

#[derive(Default)]
struct LedgerState {
    balance: u64,
    existing_accounts: HashSet<Pubkey>,
    calls: Vec<LedgerCall>,
    transactions: Vec<Transaction>,
    sends: usize,
    fail_send_at: Option<usize>,
}

/// In-memory ledger that accepts every transaction and records the calls
#[derive(Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl MockLedger {
    pub fn with_balance(lamports: u64) -> Self {
        let ledger = Self::default();
        ledger.state.lock().unwrap().balance = lamports;
        ledger
    }

    pub fn with_existing_account(self, address: Pubkey) -> Self {
        self.state.lock().unwrap().existing_accounts.insert(address);
        self
    }

    /// Reject the n-th `send_transaction` (1-based)
    pub fn failing_send_at(self, n: usize) -> Self {
        self.state.lock().unwrap().fail_send_at = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Transactions the ledger accepted, in submission order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn airdrops(&self) -> Vec<(Pubkey, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                LedgerCall::RequestAirdrop(address, lamports) => Some((address, lamports)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: LedgerCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_balance(&self, address: &Pubkey) -> LauncherResult<u64> {
        self.record(LedgerCall::GetBalance(*address));
        Ok(self.state.lock().unwrap().balance)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> LauncherResult<Signature> {
        self.record(LedgerCall::RequestAirdrop(*address, lamports));
        self.state.lock().unwrap().balance += lamports;
        Ok(Signature::new_unique())
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> LauncherResult<u64> {
        self.record(LedgerCall::RentExemption(data_len));
        Ok(1_461_600)
    }

    async fn account_exists(&self, address: &Pubkey) -> LauncherResult<bool> {
        self.record(LedgerCall::AccountExists(*address));
        Ok(self.state.lock().unwrap().existing_accounts.contains(address))
    }

    async fn latest_blockhash(&self) -> LauncherResult<Hash> {
        self.record(LedgerCall::LatestBlockhash);
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> LauncherResult<Signature> {
        self.record(LedgerCall::SendTransaction);
        let mut state = self.state.lock().unwrap();
        state.sends += 1;
        if state.fail_send_at == Some(state.sends) {
            return Err(LauncherError::Rpc("simulated send failure".to_string()));
        }
        state.transactions.push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn confirm_transaction(&self, signature: &Signature) -> LauncherResult<()> {
        self.record(LedgerCall::ConfirmTransaction(*signature));
        Ok(())
    }
}

/// Pinning service that hands back a fixed content hash
#[derive(Clone)]
pub struct MockPinner {
    hash: Option<String>,
    documents: Arc<Mutex<Vec<TokenMetadataDocument>>>,
}

impl MockPinner {
    pub fn returning(hash: &str) -> Self {
        Self {
            hash: Some(hash.to_string()),
            documents: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            hash: None,
            documents: Arc::default(),
        }
    }

    pub fn documents(&self) -> Vec<TokenMetadataDocument> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataPinner for MockPinner {
    async fn pin_json(&self, document: &TokenMetadataDocument) -> LauncherResult<String> {
        self.documents.lock().unwrap().push(document.clone());
        self.hash
            .clone()
            .ok_or_else(|| LauncherError::Pinning("HTTP 401: invalid JWT".to_string()))
    }
}

/// Program ids of a transaction's instructions, in order
pub fn program_ids(transaction: &Transaction) -> Vec<Pubkey> {
    let message = &transaction.message;
    message
        .instructions
        .iter()
        .map(|ix| message.account_keys[ix.program_id_index as usize])
        .collect()
}

/// Every `MintTo` amount across the given transactions
pub fn minted_amounts(transactions: &[Transaction]) -> Vec<u64> {
    transactions
        .iter()
        .flat_map(|tx| {
            let message = &tx.message;
            message.instructions.iter().filter_map(move |ix| {
                if message.account_keys[ix.program_id_index as usize] != spl_token::id() {
                    return None;
                }
                match TokenInstruction::unpack(&ix.data) {
                    Ok(TokenInstruction::MintTo { amount }) => Some(amount),
                    _ => None,
                }
            })
        })
        .collect()
}
