//! Account graph resolution.
//!
//! Every protocol operation needs a fixed set of derived addresses. The
//! resolver maps logical roles to addresses up front so instruction builders
//! assemble account lists from a single named table instead of ad hoc
//! derivation at each call site. Resolution is pure; no network access.

use std::collections::BTreeMap;

use solana_sdk::instruction::AccountMeta;
use solana_sdk::pubkey::Pubkey;

use crate::config::ProgramConfig;
use crate::error::{Result, RwaSdkError};
use crate::pda;

/// Protocol operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Setup,
    Issue,
    Transfer,
    Revoke,
    Seize,
    Burn,
    CreateTracker,
    AddLock,
    RemoveLock,
    AttachPolicy,
    DetachPolicy,
    ChangeCounters,
    ChangeCounterLimits,
    ChangeMapping,
    ChangeIssuancePolicies,
    SetCounters,
    CreateIdentity,
    AddLevel,
    RemoveLevel,
    RefreshLevel,
    ChangeCountry,
    RevokeIdentity,
    AttachWallet,
    DetachWallet,
    FreezeTokenAccount,
    ThawTokenAccount,
    CloseMint,
    EnableMemoTransfer,
    DisableMemoTransfer,
    UpdateMetadata,
    UpdateInterestRate,
}

/// Logical account roles an operation can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountRole {
    AssetMint,
    AssetController,
    PolicyEngineProgram,
    PolicyEngine,
    ExtraMetasList,
    IdentityRegistryProgram,
    IdentityRegistry,
    DataRegistryProgram,
    DataRegistry,
    SourceIdentity,
    DestinationIdentity,
    SourceWalletIdentity,
    DestinationWalletIdentity,
    SourceTracker,
    DestinationTracker,
}

/// A participant in an operation. The wallet defaults to the owner address
/// when the owner holds through their own wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub owner: Pubkey,
    pub wallet: Option<Pubkey>,
}

impl Participant {
    pub fn new(owner: Pubkey) -> Self {
        Self {
            owner,
            wallet: None,
        }
    }

    pub fn with_wallet(owner: Pubkey, wallet: Pubkey) -> Self {
        Self {
            owner,
            wallet: Some(wallet),
        }
    }

    pub fn wallet_address(&self) -> Pubkey {
        self.wallet.unwrap_or(self.owner)
    }
}

/// Order-sensitive suffix appended after the core token accounts of Transfer
/// and Seize so the transfer hook can re-derive context. The hook dispatcher
/// reads these positionally; both operations must emit the same sequence.
pub const TRANSFER_HOOK_SUFFIX: [(AccountRole, bool); 11] = [
    (AccountRole::ExtraMetasList, false),
    (AccountRole::PolicyEngineProgram, false),
    (AccountRole::PolicyEngine, true),
    (AccountRole::IdentityRegistryProgram, false),
    (AccountRole::IdentityRegistry, false),
    (AccountRole::SourceWalletIdentity, false),
    (AccountRole::DestinationWalletIdentity, false),
    (AccountRole::SourceIdentity, false),
    (AccountRole::DestinationIdentity, false),
    (AccountRole::SourceTracker, true),
    (AccountRole::DestinationTracker, true),
];

/// Resolved mapping from roles to addresses for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGraph {
    pub op: OpKind,
    accounts: BTreeMap<AccountRole, Pubkey>,
}

impl AccountGraph {
    pub fn address(&self, role: AccountRole) -> Result<Pubkey> {
        self.accounts
            .get(&role)
            .copied()
            .ok_or(RwaSdkError::UnresolvedRole(role))
    }

    /// Build the transfer-hook remaining-accounts suffix from the role table.
    pub fn hook_remaining_accounts(&self) -> Result<Vec<AccountMeta>> {
        TRANSFER_HOOK_SUFFIX
            .iter()
            .map(|&(role, writable)| {
                let address = self.address(role)?;
                Ok(if writable {
                    AccountMeta::new(address, false)
                } else {
                    AccountMeta::new_readonly(address, false)
                })
            })
            .collect()
    }
}

/// Derives the account graph for each operation from injected program ids.
#[derive(Debug, Clone, Default)]
pub struct AccountGraphResolver {
    config: ProgramConfig,
}

impl AccountGraphResolver {
    pub fn new(config: ProgramConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Number of participants an operation's graph is derived from.
    fn participant_arity(op: OpKind) -> usize {
        match op {
            OpKind::Transfer | OpKind::Seize => 2,
            OpKind::Issue
            | OpKind::Revoke
            | OpKind::CreateTracker
            | OpKind::AddLock
            | OpKind::RemoveLock
            | OpKind::CreateIdentity
            | OpKind::AddLevel
            | OpKind::RemoveLevel
            | OpKind::RefreshLevel
            | OpKind::ChangeCountry
            | OpKind::RevokeIdentity
            | OpKind::AttachWallet
            | OpKind::DetachWallet => 1,
            _ => 0,
        }
    }

    fn is_resolvable(op: OpKind) -> bool {
        !matches!(
            op,
            OpKind::Burn
                | OpKind::FreezeTokenAccount
                | OpKind::ThawTokenAccount
                | OpKind::CloseMint
                | OpKind::EnableMemoTransfer
                | OpKind::DisableMemoTransfer
                | OpKind::UpdateMetadata
                | OpKind::UpdateInterestRate
        )
    }

    /// Resolve the full named-role table for an operation.
    ///
    /// Participants are positional: the first is the source (or sole owner),
    /// the second the destination. Deterministic for fixed inputs.
    pub fn resolve_for_operation(
        &self,
        op: OpKind,
        asset_mint: &Pubkey,
        participants: &[Participant],
    ) -> Result<AccountGraph> {
        if !Self::is_resolvable(op) {
            return Err(RwaSdkError::UnsupportedOperation(op));
        }
        let arity = Self::participant_arity(op);
        if participants.len() < arity {
            let missing = if participants.is_empty() {
                AccountRole::SourceIdentity
            } else {
                AccountRole::DestinationIdentity
            };
            return Err(RwaSdkError::UnresolvedRole(missing));
        }

        let cfg = &self.config;
        let mut accounts = BTreeMap::new();
        accounts.insert(AccountRole::AssetMint, *asset_mint);
        accounts.insert(
            AccountRole::AssetController,
            pda::asset_controller_pda(cfg, asset_mint),
        );
        accounts.insert(AccountRole::PolicyEngineProgram, cfg.policy_engine);
        accounts.insert(
            AccountRole::PolicyEngine,
            pda::policy_engine_pda(cfg, asset_mint),
        );
        accounts.insert(
            AccountRole::ExtraMetasList,
            pda::extra_metas_pda(cfg, asset_mint),
        );
        accounts.insert(AccountRole::IdentityRegistryProgram, cfg.identity_registry);
        accounts.insert(
            AccountRole::IdentityRegistry,
            pda::identity_registry_pda(cfg, asset_mint),
        );
        accounts.insert(AccountRole::DataRegistryProgram, cfg.data_registry);
        accounts.insert(
            AccountRole::DataRegistry,
            pda::data_registry_pda(cfg, asset_mint),
        );

        if arity >= 1 {
            let source = &participants[0];
            accounts.insert(
                AccountRole::SourceIdentity,
                pda::identity_account_pda(cfg, asset_mint, &source.owner),
            );
            accounts.insert(
                AccountRole::SourceWalletIdentity,
                pda::wallet_identity_pda(cfg, asset_mint, &source.wallet_address()),
            );
            accounts.insert(
                AccountRole::SourceTracker,
                pda::tracker_account_pda(cfg, asset_mint, &source.owner),
            );
        }
        if arity >= 2 {
            let destination = &participants[1];
            accounts.insert(
                AccountRole::DestinationIdentity,
                pda::identity_account_pda(cfg, asset_mint, &destination.owner),
            );
            accounts.insert(
                AccountRole::DestinationWalletIdentity,
                pda::wallet_identity_pda(cfg, asset_mint, &destination.wallet_address()),
            );
            accounts.insert(
                AccountRole::DestinationTracker,
                pda::tracker_account_pda(cfg, asset_mint, &destination.owner),
            );
        }

        Ok(AccountGraph { op, accounts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_deterministic() {
        let resolver = AccountGraphResolver::default();
        let mint = Pubkey::new_unique();
        let parties = [
            Participant::new(Pubkey::new_unique()),
            Participant::new(Pubkey::new_unique()),
        ];
        let a = resolver
            .resolve_for_operation(OpKind::Transfer, &mint, &parties)
            .unwrap();
        let b = resolver
            .resolve_for_operation(OpKind::Transfer, &mint, &parties)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_participant_is_an_unresolved_role() {
        let resolver = AccountGraphResolver::default();
        let mint = Pubkey::new_unique();
        let err = resolver
            .resolve_for_operation(OpKind::Transfer, &mint, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            RwaSdkError::UnresolvedRole(AccountRole::SourceIdentity)
        ));
    }

    #[test]
    fn extension_ops_have_no_graph() {
        let resolver = AccountGraphResolver::default();
        let mint = Pubkey::new_unique();
        let err = resolver
            .resolve_for_operation(OpKind::CloseMint, &mint, &[])
            .unwrap_err();
        assert!(matches!(err, RwaSdkError::UnsupportedOperation(_)));
    }

    #[test]
    fn hook_suffix_requires_destination_roles() {
        let resolver = AccountGraphResolver::default();
        let mint = Pubkey::new_unique();
        let graph = resolver
            .resolve_for_operation(OpKind::Issue, &mint, &[Participant::new(Pubkey::new_unique())])
            .unwrap();
        // Issue has no destination side, so the hook suffix cannot be built.
        assert!(graph.hook_remaining_accounts().is_err());
    }
}
