use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    /// Operator-facing validation message, printed verbatim on re-prompt
    #[error("{0}")]
    Validation(String),

    #[error("Input closed while waiting for {0}")]
    InputClosed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to load keypair from {path}: {reason}")]
    Keypair { path: String, reason: String },

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Pinning service error: {0}")]
    Pinning(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Transaction {signature} not confirmed after {attempts} status checks")]
    ConfirmationTimeout { signature: String, attempts: u32 },

    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Supply {supply} with {decimals} decimals does not fit in a u64 amount")]
    AmountOverflow { supply: f64, decimals: u8 },

    #[error("Supply {supply} has more precision than {decimals} decimals allow")]
    ExcessPrecision { supply: f64, decimals: u8 },

    #[error("Failed to build instruction: {0}")]
    Instruction(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LauncherError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LauncherError::Validation(msg.into())
    }
}

impl From<serde_json::Error> for LauncherError {
    fn from(err: serde_json::Error) -> Self {
        LauncherError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for LauncherError {
    fn from(err: bincode::Error) -> Self {
        LauncherError::Serialization(err.to_string())
    }
}

impl From<solana_program::program_error::ProgramError> for LauncherError {
    fn from(err: solana_program::program_error::ProgramError) -> Self {
        LauncherError::Instruction(err.to_string())
    }
}

pub type LauncherResult<T> = Result<T, LauncherError>;
