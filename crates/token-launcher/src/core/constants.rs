use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub const MIN_DECIMALS: u8 = 1;
pub const MAX_DECIMALS: u8 = 18;

/// Metaplex `DataV2` limits, enforced on-chain by the metadata program
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

pub const METADATA_SEED: &[u8] = b"metadata";

pub const DEFAULT_AIRDROP_LAMPORTS: u64 = 2 * LAMPORTS_PER_SOL;

pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud";
pub const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

pub const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

pub const DEFAULT_CONFIRM_ATTEMPTS: u32 = 60;
pub const DEFAULT_CONFIRM_INTERVAL_MS: u64 = 500;
