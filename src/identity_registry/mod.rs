//! Identity registry program client: identity accounts, wallet links and
//! compliance levels.

pub mod data;
pub mod instructions;

pub use data::{
    fetch_identity_account, fetch_identity_account_at, fetch_identity_registry_account,
    fetch_wallet_identity,
    fetch_wallet_identity_at, find_identity_accounts, find_identity_accounts_for_owner,
    find_wallet_identities, IdentityAccount, IdentityLevel, IdentityRegistryAccount,
    WalletIdentity,
};
pub use instructions::*;
