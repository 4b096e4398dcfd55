//! Policy engine account layouts and fetch helpers.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::core::connection::{fetch_account, AccountReader};
use crate::error::Result;
use crate::pda;
use crate::policy::{Counter, CounterLimit, IssuancePolicies, Policy};
use crate::types::decode_anchor_account;

/// Side of a tracked transfer relative to the holder.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// One transfer recorded on a holder's tracker.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedTransfer {
    pub amount: u64,
    pub timestamp: i64,
    pub side: Side,
}

/// Per-holder transfer ledger kept inside the velocity window.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TrackerAccount {
    pub version: u8,
    pub asset_mint: Pubkey,
    pub identity_account: Pubkey,
    pub transfers: Vec<TrackedTransfer>,
    pub total_amount: u64,
}

impl TrackerAccount {
    pub const DISCRIMINATOR: [u8; 8] = [83, 95, 166, 148, 57, 30, 90, 210];
}

/// Per-asset policy engine state.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PolicyEngineAccount {
    pub version: u8,
    pub asset_mint: Pubkey,
    pub authority: Pubkey,
    pub delegate: Pubkey,
    pub max_timeframe: i64,
    pub enforce_policy_issuance: bool,
    pub policies: Vec<Policy>,
    pub counters: Vec<Counter>,
    pub counter_limits: Vec<CounterLimit>,
    pub mapping: [u8; 256],
    pub issuance_policies: IssuancePolicies,
}

impl PolicyEngineAccount {
    pub const DISCRIMINATOR: [u8; 8] = [124, 85, 205, 80, 2, 18, 26, 45];
}

pub async fn fetch_policy_engine_account(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
) -> Result<PolicyEngineAccount> {
    let address = pda::policy_engine_pda(config, asset_mint);
    let account = fetch_account(reader, &address).await?;
    decode_anchor_account(PolicyEngineAccount::DISCRIMINATOR, &account.data)
}

pub async fn fetch_tracker_account(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
    owner: &Pubkey,
) -> Result<TrackerAccount> {
    let address = pda::tracker_account_pda(config, asset_mint, owner);
    let account = fetch_account(reader, &address).await?;
    decode_anchor_account(TrackerAccount::DISCRIMINATOR, &account.data)
}
