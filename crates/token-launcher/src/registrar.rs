//! Metaplex metadata registration for a freshly created mint

use mpl_token_metadata::{
    instructions::{CreateMetadataAccountV3, CreateMetadataAccountV3InstructionArgs},
    types::DataV2,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_program,
};
use tracing::{error, info};

use crate::client::{send_and_confirm, LedgerClient};
use crate::core::{metadata_program_id, LauncherResult, METADATA_SEED};

/// Derive metadata PDA for an SPL mint under `program_id`
pub fn derive_metadata_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED, program_id.as_ref(), mint.as_ref()],
        program_id,
    )
}

/// Metadata account of `mint` under the Token Metadata program
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    derive_metadata_address(&metadata_program_id(), mint).0
}

/// `CreateMetadataAccountV3` for a fungible token: no royalty, no creators,
/// no collection or uses, mutable. `authority` pays and holds every role.
pub fn create_metadata_instruction(
    mint: &Pubkey,
    authority: &Pubkey,
    uri: &str,
    name: &str,
    symbol: &str,
) -> Instruction {
    let data = DataV2 {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };

    CreateMetadataAccountV3 {
        metadata: metadata_address(mint),
        mint: *mint,
        mint_authority: *authority,
        payer: *authority,
        update_authority: (*authority, true),
        system_program: system_program::ID,
        rent: None,
    }
    .instruction(CreateMetadataAccountV3InstructionArgs {
        data,
        is_mutable: true,
        collection_details: None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRegistration {
    pub metadata_account: Pubkey,
    pub signature: Signature,
}

pub struct MetadataRegistrar<'a, L: ?Sized> {
    ledger: &'a L,
    payer: &'a Keypair,
}

impl<'a, L: LedgerClient + ?Sized> MetadataRegistrar<'a, L> {
    pub fn new(ledger: &'a L, payer: &'a Keypair) -> Self {
        Self { ledger, payer }
    }

    pub async fn register(
        &self,
        mint: &Pubkey,
        uri: &str,
        name: &str,
        symbol: &str,
    ) -> LauncherResult<MetadataRegistration> {
        let metadata_account = metadata_address(mint);
        let instruction = create_metadata_instruction(mint, &self.payer.pubkey(), uri, name, symbol);

        let signature = send_and_confirm(self.ledger, &[instruction], self.payer, &[])
            .await
            .map_err(|e| {
                error!(error = %e, mint = %mint, "Failed to register metadata on-chain");
                e
            })?;

        info!(
            metadata_account = %metadata_account,
            signature = %signature,
            "Metadata attached to token mint"
        );
        Ok(MetadataRegistration {
            metadata_account,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_address_is_deterministic() {
        let mint = Pubkey::new_unique();
        let program_id = metadata_program_id();

        let first = derive_metadata_address(&program_id, &mint);
        let second = derive_metadata_address(&program_id, &mint);
        assert_eq!(first, second);
        assert_eq!(metadata_address(&mint), first.0);

        // PDAs have no private key
        assert!(!first.0.is_on_curve());
    }

    #[test]
    fn test_metadata_address_depends_on_inputs() {
        let mint = Pubkey::new_unique();
        let other_mint = Pubkey::new_unique();
        let program_id = metadata_program_id();

        assert_ne!(
            derive_metadata_address(&program_id, &mint).0,
            derive_metadata_address(&program_id, &other_mint).0
        );
        assert_ne!(
            derive_metadata_address(&program_id, &mint).0,
            derive_metadata_address(&Pubkey::new_unique(), &mint).0
        );
    }

    #[test]
    fn test_create_metadata_instruction_accounts() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let ix = create_metadata_instruction(
            &mint,
            &authority,
            "https://gateway.pinata.cloud/ipfs/QmFoo",
            "Foo",
            "FOO",
        );

        assert_eq!(ix.program_id, metadata_program_id());
        assert_eq!(ix.accounts[0].pubkey, metadata_address(&mint));
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, mint);
        assert_eq!(ix.accounts[2].pubkey, authority);
        assert!(ix.accounts[2].is_signer);
        assert!(!ix.data.is_empty());
    }
}
