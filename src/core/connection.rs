use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcProgramAccountsConfig;
use solana_client::rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType};
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;
use std::error::Error;

use spl_token_2022::extension::memo_transfer::MemoTransfer;
use spl_token_2022::extension::{BaseStateWithExtensions, StateWithExtensions};

use crate::error::{Result, RwaSdkError};
use crate::types::TokenAccountState;

/// Byte-prefix filter for program account scans.
#[derive(Debug, Clone)]
pub struct MemcmpFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl MemcmpFilter {
    pub fn new(offset: usize, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }
}

/// Read-only account access the assemblers need. Implemented for the RPC
/// client below and by in-memory doubles in tests.
#[async_trait]
pub trait AccountReader: Send + Sync {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<(Pubkey, Account)>, Box<dyn Error + Send + Sync>>;
}

#[async_trait]
impl AccountReader for RpcClient {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        let response = self
            .get_account_with_commitment(pubkey, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<(Pubkey, Account)>, Box<dyn Error + Send + Sync>> {
        let filters = filters
            .iter()
            .map(|f| {
                RpcFilterType::Memcmp(Memcmp::new(
                    f.offset,
                    MemcmpEncodedBytes::Bytes(f.bytes.clone()),
                ))
            })
            .collect();
        let config = RpcProgramAccountsConfig {
            filters: Some(filters),
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .get_program_accounts_with_config(program_id, config)
            .await?;
        Ok(accounts)
    }
}

/// Fetch an account that must exist.
pub async fn fetch_account(reader: &impl AccountReader, pubkey: &Pubkey) -> Result<Account> {
    reader
        .get_account(pubkey)
        .await
        .map_err(|e| RwaSdkError::Connection(e.to_string()))?
        .ok_or(RwaSdkError::AccountNotFound(*pubkey))
}

/// Probe a token account and report whether it exists and, if so, whether the
/// memo-transfer extension requires incoming transfers to carry a memo.
pub async fn probe_token_account(
    reader: &impl AccountReader,
    token_account: &Pubkey,
) -> Result<TokenAccountState> {
    let account = reader
        .get_account(token_account)
        .await
        .map_err(|e| RwaSdkError::AccountResolutionFailed(e.to_string()))?;
    let Some(account) = account else {
        return Ok(TokenAccountState::Missing);
    };
    let state = StateWithExtensions::<spl_token_2022::state::Account>::unpack(&account.data)
        .map_err(|e| RwaSdkError::InvalidAccountData(e.to_string()))?;
    let requires_memo = state
        .get_extension::<MemoTransfer>()
        .map(|ext| bool::from(ext.require_incoming_transfer_memos))
        .unwrap_or(false);
    Ok(TokenAccountState::Exists { requires_memo })
}
