//! Instruction builders for the policy engine program.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::config::ProgramConfig;
use crate::error::Result;
use crate::pda;
use crate::policy::{
    CounterChangeRequest, CounterLimitChangeRequest, IssuancePolicies, PolicyAttachRequest,
    PolicyDetachRequest,
};
use crate::types::{anchor_ix_data, event_cpi_accounts};

const IX_CREATE_POLICY_ENGINE: [u8; 8] = [0x55, 0x69, 0xcf, 0x99, 0x49, 0x7d, 0xe1, 0x36];
const IX_ATTACH_TO_POLICY_ENGINE: [u8; 8] = [0x63, 0x3b, 0x75, 0x15, 0x92, 0x0b, 0x36, 0xad];
const IX_DETACH_FROM_POLICY_ENGINE: [u8; 8] = [0x9c, 0x89, 0x43, 0x79, 0x2e, 0xcf, 0x2d, 0x0c];
const IX_CREATE_TRACKER_ACCOUNT: [u8; 8] = [0x28, 0x10, 0x28, 0xbf, 0x6d, 0xb1, 0x53, 0xbe];
const IX_CHANGE_COUNTERS: [u8; 8] = [0x9c, 0x6b, 0x58, 0xcc, 0x71, 0x83, 0xf1, 0xc0];
const IX_CHANGE_COUNTER_LIMITS: [u8; 8] = [0xc8, 0x02, 0x08, 0x66, 0x2b, 0xa8, 0x8d, 0x8b];
const IX_CHANGE_MAPPING: [u8; 8] = [0x67, 0x01, 0x34, 0x14, 0xa0, 0xc2, 0x71, 0x7d];
const IX_CHANGE_ISSUANCE_POLICIES: [u8; 8] = [0xba, 0xc9, 0xa3, 0x9d, 0x20, 0xfa, 0xa6, 0x25];
const IX_SET_COUNTERS: [u8; 8] = [0x7f, 0x97, 0x93, 0x8d, 0xab, 0x35, 0x1c, 0x87];
const IX_ADD_LOCK: [u8; 8] = [0xf2, 0x66, 0xb7, 0x6b, 0x6d, 0xa8, 0x52, 0x8c];
const IX_REMOVE_LOCK: [u8; 8] = [0x01, 0x11, 0x79, 0x4a, 0x3e, 0xf1, 0x7f, 0x78];

/// Create the per-asset policy engine and its transfer-hook extra metas list.
pub fn create_policy_engine(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    authority: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new(pda::extra_metas_pda(config, asset_mint), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts,
        data: anchor_ix_data(IX_CREATE_POLICY_ENGINE, authority)?,
    })
}

fn engine_change_accounts(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    with_system: bool,
) -> Vec<AccountMeta> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
    ];
    if with_system {
        accounts.push(AccountMeta::new_readonly(system_program::id(), false));
    }
    accounts.extend(event_cpi_accounts(&config.policy_engine));
    accounts
}

/// Attach a validated policy to the asset's policy engine.
pub fn attach_policy(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    request: &PolicyAttachRequest,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: engine_change_accounts(config, payer, signer, asset_mint, true),
        data: anchor_ix_data(
            IX_ATTACH_TO_POLICY_ENGINE,
            &(
                &request.identity_filter,
                &request.policy_type,
                request.custom_error,
            ),
        )?,
    })
}

/// Detach a policy by its content hash.
pub fn detach_policy(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    request: &PolicyDetachRequest,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: engine_change_accounts(config, payer, signer, asset_mint, true),
        data: anchor_ix_data(IX_DETACH_FROM_POLICY_ENGINE, &request.hash)?,
    })
}

/// Add and remove holder counters in one batch.
pub fn change_counters(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    request: &CounterChangeRequest,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: engine_change_accounts(config, payer, signer, asset_mint, true),
        data: anchor_ix_data(IX_CHANGE_COUNTERS, &(&request.removed_ids, &request.added))?,
    })
}

/// Add and remove counter limits in one batch.
pub fn change_counter_limits(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    request: &CounterLimitChangeRequest,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: engine_change_accounts(config, payer, signer, asset_mint, true),
        data: anchor_ix_data(
            IX_CHANGE_COUNTER_LIMITS,
            &(&request.removed_indices, &request.added),
        )?,
    })
}

/// Overwrite entries of the 256-slot level mapping table.
pub fn change_mapping(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    source_levels: Vec<u8>,
    target_levels: Vec<u8>,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: engine_change_accounts(config, payer, signer, asset_mint, false),
        data: anchor_ix_data(IX_CHANGE_MAPPING, &(source_levels, target_levels))?,
    })
}

/// Replace the issuance-time policies on the engine.
pub fn change_issuance_policies(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    policies: &IssuancePolicies,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: engine_change_accounts(config, payer, signer, asset_mint, false),
        data: anchor_ix_data(IX_CHANGE_ISSUANCE_POLICIES, policies)?,
    })
}

/// Set counter values directly, bypassing recomputation.
pub fn set_counters(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    counter_ids: Vec<u8>,
    values: Vec<u64>,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
    ];
    accounts.extend(event_cpi_accounts(&config.policy_engine));
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts,
        data: anchor_ix_data(IX_SET_COUNTERS, &(counter_ids, values))?,
    })
}

/// Create the transfer tracker for an owner's identity account.
pub fn create_tracker_account(
    config: &ProgramConfig,
    payer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.policy_engine));
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts,
        data: anchor_ix_data(IX_CREATE_TRACKER_ACCOUNT, &())?,
    })
}

fn lock_accounts(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
) -> Vec<AccountMeta> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*signer, true),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.policy_engine));
    accounts
}

/// Lock part of an owner's balance until a release timestamp.
#[allow(clippy::too_many_arguments)]
pub fn add_lock(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    release_timestamp: i64,
    reason: u64,
    reason_string: String,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: lock_accounts(config, payer, signer, asset_mint, owner),
        data: anchor_ix_data(
            IX_ADD_LOCK,
            &(amount, release_timestamp, reason, reason_string),
        )?,
    })
}

/// Remove a lock from the owner's tracker by index.
pub fn remove_lock(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    index: u8,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.policy_engine,
        accounts: lock_accounts(config, payer, signer, asset_mint, owner),
        data: anchor_ix_data(IX_REMOVE_LOCK, &index)?,
    })
}
