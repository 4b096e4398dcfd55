//! Asset controller account layout and fetch helper.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::core::connection::{fetch_account, AccountReader};
use crate::error::Result;
use crate::pda;
use crate::types::decode_anchor_account;

/// Per-asset controller state.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssetControllerAccount {
    pub version: u8,
    pub asset_mint: Pubkey,
    pub authority: Pubkey,
    pub delegate: Pubkey,
}

impl AssetControllerAccount {
    pub const DISCRIMINATOR: [u8; 8] = [70, 136, 149, 138, 12, 87, 52, 105];
}

pub async fn fetch_asset_controller_account(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    asset_mint: &Pubkey,
) -> Result<AssetControllerAccount> {
    let address = pda::asset_controller_pda(config, asset_mint);
    let account = fetch_account(reader, &address).await?;
    decode_anchor_account(AssetControllerAccount::DISCRIMINATOR, &account.data)
}
