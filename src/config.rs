use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// Deployed address of the asset controller program.
pub const ASSET_CONTROLLER_PROGRAM_ID: Pubkey =
    pubkey!("7tXjmbkZVY3Gmg9kDBebcNXT1yC5pyoxxXVLwdbv9tvP");

/// Deployed address of the policy engine program.
pub const POLICY_ENGINE_PROGRAM_ID: Pubkey =
    pubkey!("FsE8mCJyvgMzqJbfHbJQm3iuf3cRZC6n2vZi1Q8rQCy2");

/// Deployed address of the identity registry program.
pub const IDENTITY_REGISTRY_PROGRAM_ID: Pubkey =
    pubkey!("7Zis9Cg1pa3PMRCMfJBgzoQThoBA21QMrkmEnx6nZdQQ");

/// Deployed address of the data registry program.
pub const DATA_REGISTRY_PROGRAM_ID: Pubkey =
    pubkey!("8Bp1xoRscjuHoG1KT41zAaujGTx2fyB2uzTt8GTeWZX8");

/// Program ids the resolver and instruction builders derive addresses against.
///
/// Injected everywhere instead of read from globals so test doubles can point
/// at alternate deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramConfig {
    pub asset_controller: Pubkey,
    pub policy_engine: Pubkey,
    pub identity_registry: Pubkey,
    pub data_registry: Pubkey,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            asset_controller: ASSET_CONTROLLER_PROGRAM_ID,
            policy_engine: POLICY_ENGINE_PROGRAM_ID,
            identity_registry: IDENTITY_REGISTRY_PROGRAM_ID,
            data_registry: DATA_REGISTRY_PROGRAM_ID,
        }
    }
}
