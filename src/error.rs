use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::graph::{AccountRole, OpKind};

/// SDK-specific error types for RWA token operations
///
/// These cover local assembly and account-read failures only. Once the
/// returned instructions are submitted, on-chain program rejections come
/// back through the caller's transport layer unchanged; this crate never
/// interprets or wraps them.
#[derive(Debug, Error)]
pub enum RwaSdkError {
    /// Structurally invalid identity filter tree
    #[error("Malformed identity filter: {0}")]
    MalformedFilter(String),

    /// Two counters in the same change batch carry the same id
    #[error("Duplicate counter id {0} in batch")]
    DuplicateCounterId(u8),

    /// The operation has no account graph to resolve
    #[error("Operation {0:?} is not resolvable")]
    UnsupportedOperation(OpKind),

    /// A required role is missing from the account graph
    #[error("Account graph is missing role {0:?}")]
    UnresolvedRole(AccountRole),

    /// Destination token account requires an incoming memo and none was supplied
    #[error("Destination token account requires a transfer memo")]
    MemoRequired,

    /// User setup needs at least one compliance level
    #[error("At least one level with expiry is required")]
    EmptyLevels,

    /// An account probe failed for a reason other than not-found
    #[error("Account resolution failed: {0}")]
    AccountResolutionFailed(String),

    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Account not found on-chain
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),

    /// Program error from instruction construction
    #[error("Program error: {0}")]
    ProgramError(#[from] solana_sdk::program_error::ProgramError),
}

/// Result type alias for SDK operations
pub type Result<T, E = RwaSdkError> = std::result::Result<T, E>;
