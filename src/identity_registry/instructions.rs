//! Instruction builders for the identity registry program.
//!
//! Builders are pure: they derive every address locally and never touch the
//! network. Account order matches the on-chain handlers exactly.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::config::ProgramConfig;
use crate::error::Result;
use crate::pda;
use crate::types::{anchor_ix_data, event_cpi_accounts};

const IX_CREATE_IDENTITY_REGISTRY: [u8; 8] = [0xb4, 0x03, 0x27, 0x16, 0xb7, 0xd4, 0x27, 0xd1];
const IX_CREATE_IDENTITY_ACCOUNT: [u8; 8] = [0x52, 0xf0, 0x23, 0x81, 0x71, 0x86, 0x74, 0x46];
const IX_ADD_LEVEL: [u8; 8] = [0x66, 0xcc, 0x40, 0xa9, 0xfc, 0xb1, 0xc0, 0xe8];
const IX_REFRESH_LEVEL: [u8; 8] = [0x17, 0x44, 0xed, 0x6f, 0x90, 0xa9, 0xef, 0x5b];
const IX_REMOVE_LEVEL: [u8; 8] = [0xc2, 0xe7, 0xbb, 0x36, 0xc5, 0x88, 0xaa, 0x37];
const IX_REVOKE_IDENTITY_ACCOUNT: [u8; 8] = [0x4d, 0x58, 0xb6, 0x3d, 0xeb, 0x31, 0x02, 0x89];
const IX_ATTACH_WALLET: [u8; 8] = [0x3d, 0x81, 0xfc, 0xbe, 0x08, 0xca, 0xb3, 0x5a];
const IX_DETACH_WALLET: [u8; 8] = [0xa6, 0x46, 0xec, 0xfe, 0xa6, 0x74, 0xc9, 0x32];
const IX_CHANGE_COUNTRY: [u8; 8] = [0xd0, 0xe3, 0xe0, 0xf6, 0x09, 0xfe, 0x3e, 0xb3];

/// Create the per-asset identity registry.
pub fn create_identity_registry(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    authority: &Pubkey,
    delegate: Option<Pubkey>,
    allow_multiple_wallets: Option<bool>,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(
            IX_CREATE_IDENTITY_REGISTRY,
            &(*authority, delegate, allow_multiple_wallets),
        )?,
    })
}

/// Create an identity account for an owner, linking the owner's own wallet
/// and allocating the policy engine tracker in the same transaction.
pub fn create_identity_account(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    level: u8,
    expiry: i64,
    country: u8,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new(pda::wallet_identity_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.identity_registry));
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(
            IX_CREATE_IDENTITY_ACCOUNT,
            &(*owner, level, expiry, country),
        )?,
    })
}

fn level_change_accounts(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
) -> Vec<AccountMeta> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(*asset_mint, false),
    ];
    accounts.extend(event_cpi_accounts(&config.identity_registry));
    accounts
}

/// Add compliance levels with matching expiries to an identity account.
#[allow(clippy::too_many_arguments)]
pub fn add_level_to_identity_account(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    levels: Vec<u8>,
    expiries: Vec<i64>,
    enforce_limits: bool,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts: level_change_accounts(config, payer, signer, asset_mint, owner),
        data: anchor_ix_data(IX_ADD_LEVEL, &(levels, expiries, enforce_limits))?,
    })
}

/// Remove compliance levels from an identity account.
pub fn remove_level_from_identity_account(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    levels: Vec<u8>,
    enforce_limits: bool,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts: level_change_accounts(config, payer, signer, asset_mint, owner),
        data: anchor_ix_data(IX_REMOVE_LEVEL, &(levels, enforce_limits))?,
    })
}

/// Update the expiry of a level already present on an identity account.
pub fn refresh_level_to_identity_account(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    level: u8,
    expiry: i64,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
    ];
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(IX_REFRESH_LEVEL, &(level, expiry))?,
    })
}

/// Change the country code recorded on an identity account.
pub fn change_country(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    new_country: u8,
    enforce_limits: bool,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(*asset_mint, false),
    ];
    accounts.extend(event_cpi_accounts(&config.identity_registry));
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(IX_CHANGE_COUNTRY, &(new_country, enforce_limits))?,
    })
}

/// Revoke an owner's identity account and its primary wallet link.
pub fn revoke_identity_account(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new(pda::wallet_identity_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(*asset_mint, false),
    ];
    accounts.extend(event_cpi_accounts(&config.identity_registry));
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(IX_REVOKE_IDENTITY_ACCOUNT, owner)?,
    })
}

/// Link an additional wallet to the owner's identity account. The owner
/// signs as authority.
pub fn attach_wallet_to_identity(
    config: &ProgramConfig,
    payer: &Pubkey,
    owner: &Pubkey,
    asset_mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new(pda::wallet_identity_pda(config, asset_mint, wallet), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.identity_registry));
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(IX_ATTACH_WALLET, wallet)?,
    })
}

/// Unlink a wallet from the owner's identity account. The wallet's token
/// account must already be empty; it is checked on-chain.
pub fn detach_wallet_from_identity(
    config: &ProgramConfig,
    payer: &Pubkey,
    owner: &Pubkey,
    asset_mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<Instruction> {
    let token_account = spl_associated_token_account::get_associated_token_address_with_program_id(
        wallet,
        asset_mint,
        &spl_token_2022::id(),
    );
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(*owner, true),
        AccountMeta::new(pda::wallet_identity_pda(config, asset_mint, wallet), false),
        AccountMeta::new(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(token_account, false),
        AccountMeta::new_readonly(*asset_mint, false),
    ];
    accounts.extend(event_cpi_accounts(&config.identity_registry));
    Ok(Instruction {
        program_id: config.identity_registry,
        accounts,
        data: anchor_ix_data(IX_DETACH_WALLET, &())?,
    })
}
