pub mod constants;
pub mod error;

pub use constants::*;
pub use error::{LauncherError, LauncherResult};

use solana_sdk::pubkey::Pubkey;

/// Metaplex Token Metadata program
pub fn metadata_program_id() -> Pubkey {
    mpl_token_metadata::ID
}
