//! Mint creation, associated account setup and initial supply

use solana_program::program_pack::Pack;
use solana_sdk::{
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::state::Mint;
use tracing::{error, info};

use crate::client::{send_and_confirm, LedgerClient};
use crate::config::{Cluster, LauncherConfig};
use crate::core::{LauncherError, LauncherResult};
use crate::input::TokenInput;

/// Relative slack for f64 representation error when scaling by `10^decimals`
const SCALE_TOLERANCE: f64 = 1e-9;

/// Base-unit amount for `supply` whole tokens: `supply * 10^decimals`.
/// Fractions of a base unit are rejected, not rounded.
pub fn mint_amount(supply: f64, decimals: u8) -> LauncherResult<u64> {
    let scaled = supply * 10f64.powi(i32::from(decimals));
    // u64::MAX as f64 rounds up to 2^64, which is itself out of range
    if !scaled.is_finite() || scaled < 0.0 || scaled >= u64::MAX as f64 {
        return Err(LauncherError::AmountOverflow { supply, decimals });
    }
    let whole = scaled.round();
    if (scaled - whole).abs() > scaled.abs() * SCALE_TOLERANCE {
        return Err(LauncherError::ExcessPrecision { supply, decimals });
    }
    Ok(whole as u64)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedMint {
    pub mint: Pubkey,
    pub associated_account: Pubkey,
    pub amount: u64,
    pub mint_to_signature: Signature,
}

pub struct MintProvisioner<'a, L: ?Sized> {
    ledger: &'a L,
    payer: &'a Keypair,
    cluster: Cluster,
    airdrop_lamports: u64,
}

impl<'a, L: LedgerClient + ?Sized> MintProvisioner<'a, L> {
    pub fn new(ledger: &'a L, payer: &'a Keypair, config: &LauncherConfig) -> Self {
        Self {
            ledger,
            payer,
            cluster: config.cluster,
            airdrop_lamports: config.airdrop_lamports,
        }
    }

    /// Create the mint, fund the payer's associated account and mint the supply.
    /// Nothing is rolled back if a later step fails.
    pub async fn provision(&self, input: &TokenInput) -> LauncherResult<ProvisionedMint> {
        let amount = mint_amount(input.supply, input.decimals)?;

        self.ensure_funded()
            .await
            .map_err(log_failure("check payer balance"))?;

        let mint = self
            .create_mint(input.decimals)
            .await
            .map_err(log_failure("create mint"))?;

        let associated_account = self
            .ensure_associated_account(&mint)
            .await
            .map_err(log_failure("create associated token account"))?;

        let mint_to_signature = self
            .mint_supply(&mint, &associated_account, amount)
            .await
            .map_err(log_failure("mint total supply"))?;
        info!(supply = input.supply, amount, "Total supply minted");

        Ok(ProvisionedMint {
            mint,
            associated_account,
            amount,
            mint_to_signature,
        })
    }

    /// Returns the payer balance in lamports, airdropping when it is empty
    pub async fn ensure_funded(&self) -> LauncherResult<u64> {
        let payer = self.payer.pubkey();
        let balance = self.ledger.get_balance(&payer).await?;
        info!(payer = %payer, balance_sol = lamports_to_sol(balance), "Payer balance");

        if balance > 0 {
            return Ok(balance);
        }

        if !self.cluster.allows_airdrop() {
            return Err(LauncherError::InsufficientFunds(format!(
                "payer {} has 0 SOL on {}",
                payer, self.cluster
            )));
        }

        info!(
            sol = lamports_to_sol(self.airdrop_lamports),
            "Payer has 0 SOL, requesting airdrop"
        );
        let signature = self
            .ledger
            .request_airdrop(&payer, self.airdrop_lamports)
            .await?;
        self.ledger.confirm_transaction(&signature).await?;
        info!(signature = %signature, "Airdrop successful");

        Ok(balance + self.airdrop_lamports)
    }

    /// Payer is mint authority; no freeze authority
    pub async fn create_mint(&self, decimals: u8) -> LauncherResult<Pubkey> {
        let mint = Keypair::new();
        let payer = self.payer.pubkey();

        let rent = self
            .ledger
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;

        let instructions = [
            system_instruction::create_account(
                &payer,
                &mint.pubkey(),
                rent,
                Mint::LEN as u64,
                &spl_token::id(),
            ),
            spl_token::instruction::initialize_mint2(
                &spl_token::id(),
                &mint.pubkey(),
                &payer,
                None,
                decimals,
            )?,
        ];

        let signature = send_and_confirm(self.ledger, &instructions, self.payer, &[&mint]).await?;
        info!(mint = %mint.pubkey(), signature = %signature, "Token mint created");
        Ok(mint.pubkey())
    }

    /// Get or create the payer's associated token account for `mint`
    pub async fn ensure_associated_account(&self, mint: &Pubkey) -> LauncherResult<Pubkey> {
        let owner = self.payer.pubkey();
        let address = get_associated_token_address(&owner, mint);

        if self.ledger.account_exists(&address).await? {
            info!(account = %address, "Associated token account already exists");
            return Ok(address);
        }

        let instruction =
            create_associated_token_account_idempotent(&owner, &owner, mint, &spl_token::id());
        let signature = send_and_confirm(self.ledger, &[instruction], self.payer, &[]).await?;
        info!(account = %address, signature = %signature, "Associated token account created");
        Ok(address)
    }

    pub async fn mint_supply(
        &self,
        mint: &Pubkey,
        account: &Pubkey,
        amount: u64,
    ) -> LauncherResult<Signature> {
        let authority = self.payer.pubkey();
        let instruction =
            spl_token::instruction::mint_to(&spl_token::id(), mint, account, &authority, &[], amount)?;

        let signature = send_and_confirm(self.ledger, &[instruction], self.payer, &[]).await?;
        info!(signature = %signature, "MintTo transaction confirmed");
        Ok(signature)
    }
}

fn log_failure(step: &'static str) -> impl FnOnce(LauncherError) -> LauncherError {
    move |e| {
        error!(error = %e, "Failed to {}", step);
        e
    }
}
