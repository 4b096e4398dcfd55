//! Identity registry account layouts and fetch helpers.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::core::connection::{fetch_account, AccountReader, MemcmpFilter};
use crate::error::Result;
use crate::pda;
use crate::types::decode_anchor_account;

// Scan offsets into the serialized accounts, counted from the start of the
// account data (8-byte tag included).
const OFFSET_REGISTRY: usize = 9;
const OFFSET_OWNER: usize = 41;
const OFFSET_IDENTITY_ACCOUNT: usize = 8;

/// Per-asset identity registry state.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct IdentityRegistryAccount {
    pub version: u8,
    pub asset_mint: Pubkey,
    pub authority: Pubkey,
    pub delegate: Pubkey,
    pub allow_multiple_wallets: bool,
}

impl IdentityRegistryAccount {
    pub const DISCRIMINATOR: [u8; 8] = [154, 254, 118, 4, 115, 36, 125, 78];
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityLevel {
    pub level: u8,
    pub expiry: i64,
}

/// Identity account of one owner for one asset.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct IdentityAccount {
    pub version: u8,
    pub identity_registry: Pubkey,
    pub owner: Pubkey,
    pub num_wallets: u16,
    pub country: u8,
    pub levels: Vec<IdentityLevel>,
}

impl IdentityAccount {
    pub const DISCRIMINATOR: [u8; 8] = [194, 90, 181, 160, 182, 206, 116, 158];
}

/// Link from a wallet address back to its identity account.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WalletIdentity {
    pub identity_account: Pubkey,
    pub wallet: Pubkey,
}

impl WalletIdentity {
    pub const DISCRIMINATOR: [u8; 8] = [101, 142, 55, 104, 168, 77, 57, 85];
}

pub async fn fetch_identity_registry_account(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
) -> Result<IdentityRegistryAccount> {
    let address = pda::identity_registry_pda(config, asset_mint);
    let account = fetch_account(reader, &address).await?;
    decode_anchor_account(IdentityRegistryAccount::DISCRIMINATOR, &account.data)
}

/// Decode an identity account at a known address, e.g. one read off a
/// wallet link.
pub async fn fetch_identity_account_at(
    reader: &impl AccountReader,
    address: &Pubkey,
) -> Result<IdentityAccount> {
    let account = fetch_account(reader, address).await?;
    decode_anchor_account(IdentityAccount::DISCRIMINATOR, &account.data)
}

pub async fn fetch_identity_account(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
    owner: &Pubkey,
) -> Result<IdentityAccount> {
    let address = pda::identity_account_pda(config, asset_mint, owner);
    let account = fetch_account(reader, &address).await?;
    decode_anchor_account(IdentityAccount::DISCRIMINATOR, &account.data)
}

/// Fetch the wallet link at a known address, decoding it when present.
pub async fn fetch_wallet_identity_at(
    reader: &impl AccountReader,
    address: &Pubkey,
) -> Result<WalletIdentity> {
    let account = fetch_account(reader, address).await?;
    decode_anchor_account(WalletIdentity::DISCRIMINATOR, &account.data)
}

pub async fn fetch_wallet_identity(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<WalletIdentity> {
    let address = pda::wallet_identity_pda(config, asset_mint, wallet);
    fetch_wallet_identity_at(reader, &address).await
}

/// Scan every identity account registered for an asset.
pub async fn find_identity_accounts(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
) -> Result<Vec<(Pubkey, IdentityAccount)>> {
    let registry = pda::identity_registry_pda(config, asset_mint);
    let filters = [
        MemcmpFilter::new(0, IdentityAccount::DISCRIMINATOR.to_vec()),
        MemcmpFilter::new(OFFSET_REGISTRY, registry.to_bytes().to_vec()),
    ];
    let accounts = reader
        .get_program_accounts(&config.identity_registry, &filters)
        .await
        .map_err(|e| crate::error::RwaSdkError::Connection(e.to_string()))?;
    accounts
        .into_iter()
        .map(|(address, account)| {
            Ok((
                address,
                decode_anchor_account(IdentityAccount::DISCRIMINATOR, &account.data)?,
            ))
        })
        .collect()
}

/// Scan identity accounts held by one owner across all assets.
pub async fn find_identity_accounts_for_owner(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    owner: &Pubkey,
) -> Result<Vec<(Pubkey, IdentityAccount)>> {
    let filters = [
        MemcmpFilter::new(0, IdentityAccount::DISCRIMINATOR.to_vec()),
        MemcmpFilter::new(OFFSET_OWNER, owner.to_bytes().to_vec()),
    ];
    let accounts = reader
        .get_program_accounts(&config.identity_registry, &filters)
        .await
        .map_err(|e| crate::error::RwaSdkError::Connection(e.to_string()))?;
    accounts
        .into_iter()
        .map(|(address, account)| {
            Ok((
                address,
                decode_anchor_account(IdentityAccount::DISCRIMINATOR, &account.data)?,
            ))
        })
        .collect()
}

/// Scan every wallet linked to one identity account.
pub async fn find_wallet_identities(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    identity_account: &Pubkey,
) -> Result<Vec<(Pubkey, WalletIdentity)>> {
    let filters = [
        MemcmpFilter::new(0, WalletIdentity::DISCRIMINATOR.to_vec()),
        MemcmpFilter::new(OFFSET_IDENTITY_ACCOUNT, identity_account.to_bytes().to_vec()),
    ];
    let accounts = reader
        .get_program_accounts(&config.identity_registry, &filters)
        .await
        .map_err(|e| crate::error::RwaSdkError::Connection(e.to_string()))?;
    accounts
        .into_iter()
        .map(|(address, account)| {
            Ok((
                address,
                decode_anchor_account(WalletIdentity::DISCRIMINATOR, &account.data)?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::decode_anchor_account;

    fn encode(tag: [u8; 8], value: &impl BorshSerialize) -> Vec<u8> {
        let mut data = tag.to_vec();
        value.serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn identity_account_field_offsets_match_scan_constants() {
        let account = IdentityAccount {
            version: 1,
            identity_registry: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            num_wallets: 1,
            country: 0,
            levels: vec![IdentityLevel { level: 1, expiry: 0 }],
        };
        let data = encode(IdentityAccount::DISCRIMINATOR, &account);
        assert_eq!(
            &data[OFFSET_REGISTRY..OFFSET_REGISTRY + 32],
            account.identity_registry.as_ref()
        );
        assert_eq!(&data[OFFSET_OWNER..OFFSET_OWNER + 32], account.owner.as_ref());
    }

    #[test]
    fn wallet_identity_offset_matches_scan_constant() {
        let link = WalletIdentity {
            identity_account: Pubkey::new_unique(),
            wallet: Pubkey::new_unique(),
        };
        let data = encode(WalletIdentity::DISCRIMINATOR, &link);
        assert_eq!(
            &data[OFFSET_IDENTITY_ACCOUNT..OFFSET_IDENTITY_ACCOUNT + 32],
            link.identity_account.as_ref()
        );
    }

    #[test]
    fn decode_tolerates_realloc_padding() {
        let account = IdentityRegistryAccount {
            version: 1,
            asset_mint: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            delegate: Pubkey::new_unique(),
            allow_multiple_wallets: false,
        };
        let mut data = encode(IdentityRegistryAccount::DISCRIMINATOR, &account);
        data.extend_from_slice(&[0u8; 64]);
        let decoded: IdentityRegistryAccount =
            decode_anchor_account(IdentityRegistryAccount::DISCRIMINATOR, &data).unwrap();
        assert_eq!(decoded, account);
    }

    #[test]
    fn decode_rejects_wrong_tag() {
        let link = WalletIdentity {
            identity_account: Pubkey::new_unique(),
            wallet: Pubkey::new_unique(),
        };
        let data = encode(IdentityAccount::DISCRIMINATOR, &link);
        let decoded: Result<WalletIdentity> = decode_anchor_account(WalletIdentity::DISCRIMINATOR, &data);
        assert!(decoded.is_err());
    }
}
