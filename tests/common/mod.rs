use std::collections::HashMap;
use std::error::Error;

use async_trait::async_trait;
use borsh::BorshSerialize;
use solana_sdk::account::Account;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;

use spl_token_2022::extension::memo_transfer::MemoTransfer;
use spl_token_2022::extension::{BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut};
use spl_token_2022::state::{Account as TokenAccount, AccountState};

use rwa_token_sdk::{AccountReader, MemcmpFilter};

/// In-memory account map standing in for the cluster.
#[derive(Default)]
pub struct MockChain {
    accounts: HashMap<Pubkey, Account>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_anchor(
        &mut self,
        address: Pubkey,
        program: Pubkey,
        tag: [u8; 8],
        value: &impl BorshSerialize,
    ) {
        let mut data = tag.to_vec();
        value.serialize(&mut data).unwrap();
        self.accounts.insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner: program,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn insert_token_account(
        &mut self,
        address: Pubkey,
        mint: Pubkey,
        owner: Pubkey,
        requires_memo: bool,
    ) {
        self.accounts.insert(
            address,
            Account {
                lamports: 2_000_000,
                data: token_account_data(&mint, &owner, requires_memo),
                owner: spl_token_2022::id(),
                executable: false,
                rent_epoch: 0,
            },
        );
    }
}

#[async_trait]
impl AccountReader for MockChain {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        Ok(self.accounts.get(pubkey).cloned())
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<(Pubkey, Account)>, Box<dyn Error + Send + Sync>> {
        let mut matches: Vec<(Pubkey, Account)> = self
            .accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| {
                filters.iter().all(|f| {
                    account.data.len() >= f.offset + f.bytes.len()
                        && account.data[f.offset..f.offset + f.bytes.len()] == f.bytes[..]
                })
            })
            .map(|(address, account)| (*address, account.clone()))
            .collect();
        matches.sort_by_key(|(address, _)| *address);
        Ok(matches)
    }
}

pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, requires_memo: bool) -> Vec<u8> {
    let base = TokenAccount {
        mint: *mint,
        owner: *owner,
        state: AccountState::Initialized,
        ..TokenAccount::default()
    };
    if requires_memo {
        let len = ExtensionType::try_calculate_account_len::<TokenAccount>(&[
            ExtensionType::MemoTransfer,
        ])
        .unwrap();
        let mut data = vec![0u8; len];
        let mut state =
            StateWithExtensionsMut::<TokenAccount>::unpack_uninitialized(&mut data).unwrap();
        let ext = state.init_extension::<MemoTransfer>(true).unwrap();
        ext.require_incoming_transfer_memos = true.into();
        state.base = base;
        state.pack_base();
        state.init_account_type().unwrap();
        data
    } else {
        let mut data = vec![0u8; TokenAccount::LEN];
        TokenAccount::pack(base, &mut data).unwrap();
        data
    }
}
