//! Instruction builders and transaction assemblers for the asset controller
//! program.
//!
//! Plain builders are pure. The transfer assembler is the one network-aware
//! path: it reads the destination's wallet link and token account state to
//! decide on memo and account-creation pre-instructions.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_program;

use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_associated_token_account::instruction::create_associated_token_account;

use crate::config::ProgramConfig;
use crate::core::connection::{probe_token_account, AccountReader};
use crate::error::{Result, RwaSdkError};
use crate::graph::{AccountGraphResolver, OpKind, Participant};
use crate::identity_registry::data::{fetch_identity_account_at, fetch_wallet_identity};
use crate::pda;
use crate::types::{anchor_ix_data, event_cpi_accounts, IxReturn, TokenAccountState};

const IX_CREATE_ASSET_CONTROLLER: [u8; 8] = [97, 185, 6, 250, 248, 242, 68, 105];
const IX_ISSUE_TOKENS: [u8; 8] = [0x28, 0xcf, 0x91, 0x6a, 0xf9, 0x36, 0x17, 0xb3];
const IX_UPDATE_METADATA: [u8; 8] = [0xaa, 0xb6, 0x2b, 0xef, 0x61, 0x4e, 0xe1, 0xba];
const IX_REVOKE_TOKENS: [u8; 8] = [0xd7, 0x2a, 0x0f, 0x86, 0xad, 0x50, 0x21, 0x15];
const IX_SEIZE_TOKENS: [u8; 8] = [0x4f, 0x1e, 0x45, 0x36, 0x4e, 0x01, 0x10, 0x17];
const IX_BURN_TOKENS: [u8; 8] = [0x4c, 0x0f, 0x33, 0xfe, 0xe5, 0xd7, 0x79, 0x42];
const IX_FREEZE_TOKEN_ACCOUNT: [u8; 8] = [0x8a, 0xa8, 0xb2, 0x6d, 0xcd, 0xe0, 0xd1, 0x5d];
const IX_THAW_TOKEN_ACCOUNT: [u8; 8] = [0xc7, 0xac, 0x60, 0x5d, 0xf4, 0xfc, 0x89, 0xab];
const IX_CLOSE_MINT_ACCOUNT: [u8; 8] = [0x0e, 0x79, 0x48, 0xf6, 0x60, 0xe0, 0x2a, 0xa2];
const IX_ENABLE_MEMO_TRANSFER: [u8; 8] = [0xba, 0x4e, 0x61, 0xac, 0x47, 0xac, 0x63, 0x00];
const IX_DISABLE_MEMO_TRANSFER: [u8; 8] = [68, 156, 197, 9, 43, 91, 114, 19];
const IX_UPDATE_INTEREST_RATE: [u8; 8] = [0x1d, 0xae, 0x6d, 0xa3, 0xe3, 0x4b, 0x02, 0x90];

// Setup and seize run the transfer hook plus several CPIs and overrun the
// default compute budget.
const COMPUTE_UNIT_LIMIT: u32 = 450_000;

fn associated_token_account(wallet: &Pubkey, asset_mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(wallet, asset_mint, &spl_token_2022::id())
}

fn memo_instruction(message: &str, signer: &Pubkey) -> Instruction {
    Instruction {
        program_id: spl_memo::id(),
        accounts: vec![AccountMeta::new(*signer, true)],
        data: message.as_bytes().to_vec(),
    }
}

/// Arguments for creating an asset controller and its mint.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateAssetControllerArgs {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub delegate: Option<Pubkey>,
    pub interest_rate: Option<i16>,
    pub allow_multiple_wallets: Option<bool>,
    pub enforce_policy_issuance: Option<bool>,
}

/// Metadata fields to overwrite; `None` leaves a field untouched.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateMetadataArgs {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub uri: Option<String>,
}

/// Create the asset controller, mint and sibling registries in one
/// instruction. The mint must co-sign.
pub fn create_asset_controller(
    config: &ProgramConfig,
    payer: &Pubkey,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    args: &CreateAssetControllerArgs,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*authority, false),
        AccountMeta::new(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new(*asset_mint, true),
        AccountMeta::new(pda::extra_metas_pda(config, asset_mint), false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(pda::data_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new_readonly(config.identity_registry, false),
        AccountMeta::new_readonly(config.data_registry, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_CREATE_ASSET_CONTROLLER, args)?,
    })
}

/// Assemble the full asset setup: a raised compute budget, a fresh mint
/// keypair and the controller creation instruction.
pub fn setup_asset_controller(
    config: &ProgramConfig,
    payer: &Pubkey,
    authority: &Pubkey,
    args: &CreateAssetControllerArgs,
) -> Result<IxReturn> {
    let mint = Keypair::new();
    let create_ix = create_asset_controller(config, payer, authority, &mint.pubkey(), args)?;
    Ok(IxReturn {
        instructions: vec![
            ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT),
            create_ix,
        ],
        signers: vec![mint],
    })
}

/// Mint tokens to an owner's associated token account.
#[allow(clippy::too_many_arguments)]
pub fn issue_tokens(
    config: &ProgramConfig,
    payer: &Pubkey,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    to: &Pubkey,
    amount: u64,
    issuance_timestamp: i64,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new_readonly(*to, false),
        AccountMeta::new(associated_token_account(to, asset_mint), false),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::identity_account_pda(config, asset_mint, to), false),
        AccountMeta::new(pda::tracker_account_pda(config, asset_mint, to), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::wallet_identity_pda(config, asset_mint, to), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_ISSUE_TOKENS, &(amount, issuance_timestamp))?,
    })
}

/// Overwrite token metadata fields on the mint.
pub fn update_metadata(
    config: &ProgramConfig,
    payer: &Pubkey,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    args: &UpdateMetadataArgs,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_UPDATE_METADATA, args)?,
    })
}

/// Arguments for the transfer assembler.
#[derive(Debug, Clone)]
pub struct TransferTokensArgs {
    pub asset_mint: Pubkey,
    /// Owner of the source tokens.
    pub from: Pubkey,
    /// Destination wallet address.
    pub to: Pubkey,
    pub amount: u64,
    pub decimals: u8,
    /// Signing wallet when the source holds through a linked wallet rather
    /// than the owner address itself.
    pub wallet: Option<Pubkey>,
    /// Transfer memo; mandatory when the destination enabled the
    /// memo-transfer extension, ignored otherwise.
    pub message: Option<String>,
    /// Create the destination associated token account when missing.
    pub create_destination_account: bool,
}

/// Assemble a compliant transfer.
///
/// The destination owner is read from the chain through its wallet link, the
/// transfer-hook account suffix is appended to the token instruction, and
/// memo or account-creation pre-instructions are emitted as needed.
pub async fn transfer_tokens(
    reader: &impl AccountReader,
    config: &ProgramConfig,
    args: &TransferTokensArgs,
) -> Result<Vec<Instruction>> {
    let source_wallet = args.wallet.unwrap_or(args.from);
    let mint = &args.asset_mint;

    let wallet_link = fetch_wallet_identity(reader, config, mint, &args.to).await?;
    let destination_identity =
        fetch_identity_account_at(reader, &wallet_link.identity_account).await?;

    let resolver = AccountGraphResolver::new(*config);
    let graph = resolver.resolve_for_operation(
        OpKind::Transfer,
        mint,
        &[
            Participant::with_wallet(args.from, source_wallet),
            Participant::with_wallet(destination_identity.owner, args.to),
        ],
    )?;
    let remaining = graph.hook_remaining_accounts()?;

    let source_token_account = associated_token_account(&source_wallet, mint);
    let destination_token_account = associated_token_account(&args.to, mint);

    let mut instructions = Vec::new();
    match probe_token_account(reader, &destination_token_account).await? {
        TokenAccountState::Missing => {
            if args.create_destination_account {
                instructions.push(create_associated_token_account(
                    &args.from,
                    &args.to,
                    mint,
                    &spl_token_2022::id(),
                ));
            }
        }
        TokenAccountState::Exists { requires_memo } => {
            if requires_memo {
                match &args.message {
                    Some(message) => {
                        instructions.push(memo_instruction(message, &source_wallet))
                    }
                    None => return Err(RwaSdkError::MemoRequired),
                }
            }
        }
    }

    let mut transfer_ix = spl_token_2022::instruction::transfer_checked(
        &spl_token_2022::id(),
        &source_token_account,
        mint,
        &destination_token_account,
        &source_wallet,
        &[],
        args.amount,
        args.decimals,
    )?;
    transfer_ix.accounts.extend(remaining);
    instructions.push(transfer_ix);
    Ok(instructions)
}

/// Pull tokens back from a holder's token account to the authority.
#[allow(clippy::too_many_arguments)]
pub fn revoke_tokens(
    config: &ProgramConfig,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    wallet: Option<Pubkey>,
    amount: u64,
    reason: String,
) -> Result<Instruction> {
    let wallet = wallet.unwrap_or(*owner);
    let accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new(associated_token_account(&wallet, asset_mint), false),
        AccountMeta::new_readonly(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::identity_account_pda(config, asset_mint, owner), false),
        AccountMeta::new(pda::tracker_account_pda(config, asset_mint, owner), false),
        AccountMeta::new_readonly(config.policy_engine, false),
        AccountMeta::new(pda::policy_engine_pda(config, asset_mint), false),
        AccountMeta::new_readonly(pda::wallet_identity_pda(config, asset_mint, &wallet), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_REVOKE_TOKENS, &(amount, reason))?,
    })
}

/// Forcibly move tokens between two wallets. Emits the same hook suffix as a
/// transfer and needs the raised compute budget.
pub fn seize_tokens(
    config: &ProgramConfig,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
    amount: u64,
    reason: String,
) -> Result<IxReturn> {
    let resolver = AccountGraphResolver::new(*config);
    let graph = resolver.resolve_for_operation(
        OpKind::Seize,
        asset_mint,
        &[Participant::new(*from), Participant::new(*to)],
    )?;
    let mut accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new(associated_token_account(to, asset_mint), false),
        AccountMeta::new(associated_token_account(from, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    accounts.extend(graph.hook_remaining_accounts()?);
    let seize_ix = Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_SEIZE_TOKENS, &(amount, reason))?,
    };
    Ok(IxReturn {
        instructions: vec![
            ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT),
            seize_ix,
        ],
        signers: vec![],
    })
}

/// Burn tokens from the owner's own token account.
pub fn burn_tokens(
    config: &ProgramConfig,
    owner: &Pubkey,
    asset_mint: &Pubkey,
    wallet: Option<Pubkey>,
    amount: u64,
    reason: String,
) -> Result<Instruction> {
    let wallet = wallet.unwrap_or(*owner);
    let accounts = vec![
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new(associated_token_account(&wallet, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_BURN_TOKENS, &(amount, reason))?,
    })
}

/// Freeze a wallet's associated token account.
pub fn freeze_token_account(
    config: &ProgramConfig,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new(associated_token_account(wallet, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_FREEZE_TOKEN_ACCOUNT, &())?,
    })
}

/// Thaw a wallet's associated token account, re-checking its identity.
pub fn thaw_token_account(
    config: &ProgramConfig,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new(pda::identity_registry_pda(config, asset_mint), false),
        AccountMeta::new(associated_token_account(wallet, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_THAW_TOKEN_ACCOUNT, &())?,
    })
}

/// Close the mint once supply is zero.
pub fn close_mint_account(
    config: &ProgramConfig,
    authority: &Pubkey,
    asset_mint: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_CLOSE_MINT_ACCOUNT, &())?,
    })
}

/// Require incoming transfers to the owner's token account to carry a memo.
pub fn enable_memo_transfer(
    config: &ProgramConfig,
    payer: &Pubkey,
    owner: &Pubkey,
    asset_mint: &Pubkey,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new_readonly(*asset_mint, false),
        AccountMeta::new(associated_token_account(owner, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_ENABLE_MEMO_TRANSFER, &())?,
    })
}

/// Stop requiring memos on incoming transfers.
pub fn disable_memo_transfer(
    config: &ProgramConfig,
    owner: &Pubkey,
    asset_mint: &Pubkey,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new(associated_token_account(owner, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_DISABLE_MEMO_TRANSFER, &())?,
    })
}

/// Update the interest-bearing extension rate in basis points.
pub fn update_interest_bearing_mint_rate(
    config: &ProgramConfig,
    authority: &Pubkey,
    asset_mint: &Pubkey,
    rate: i16,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*asset_mint, false),
        AccountMeta::new_readonly(pda::asset_controller_pda(config, asset_mint), false),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
    ];
    accounts.extend(event_cpi_accounts(&config.asset_controller));
    Ok(Instruction {
        program_id: config.asset_controller,
        accounts,
        data: anchor_ix_data(IX_UPDATE_INTEREST_RATE, &rate)?,
    })
}

/// Onboard a holder: identity account with the first level, remaining levels
/// in a follow-up instruction, and the holder's associated token account.
#[allow(clippy::too_many_arguments)]
pub fn setup_user(
    config: &ProgramConfig,
    payer: &Pubkey,
    signer: &Pubkey,
    asset_mint: &Pubkey,
    owner: &Pubkey,
    country: u8,
    levels: &[(u8, i64)],
) -> Result<IxReturn> {
    let Some(((first_level, first_expiry), rest)) = levels.split_first() else {
        return Err(RwaSdkError::EmptyLevels);
    };
    let mut instructions = vec![crate::identity_registry::instructions::create_identity_account(
        config,
        payer,
        signer,
        asset_mint,
        owner,
        *first_level,
        *first_expiry,
        country,
    )?];
    if !rest.is_empty() {
        let (levels, expiries): (Vec<u8>, Vec<i64>) = rest.iter().copied().unzip();
        instructions.push(
            crate::identity_registry::instructions::add_level_to_identity_account(
                config, payer, signer, asset_mint, owner, levels, expiries, true,
            )?,
        );
    }
    instructions.push(create_associated_token_account(
        payer,
        owner,
        asset_mint,
        &spl_token_2022::id(),
    ));
    Ok(IxReturn {
        instructions,
        signers: vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProgramConfig {
        ProgramConfig::default()
    }

    #[test]
    fn setup_prepends_compute_budget_and_signs_with_mint() {
        let payer = Pubkey::new_unique();
        let args = CreateAssetControllerArgs {
            decimals: 6,
            name: "Test Asset".to_string(),
            symbol: "TA".to_string(),
            uri: "https://example.com/ta.json".to_string(),
            delegate: None,
            interest_rate: None,
            allow_multiple_wallets: None,
            enforce_policy_issuance: None,
        };
        let setup = setup_asset_controller(&config(), &payer, &payer, &args).unwrap();
        assert_eq!(setup.instructions.len(), 2);
        assert_eq!(
            setup.instructions[0].program_id,
            solana_sdk::compute_budget::id()
        );
        assert_eq!(setup.signers.len(), 1);
        let mint = setup.signers[0].pubkey();
        let mint_meta = &setup.instructions[1].accounts[3];
        assert_eq!(mint_meta.pubkey, mint);
        assert!(mint_meta.is_signer);
    }

    #[test]
    fn seize_suffix_matches_hook_table() {
        let authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        let seize =
            seize_tokens(&config(), &authority, &mint, &from, &to, 10, "court order".into())
                .unwrap();
        let ix = &seize.instructions[1];
        // 6 named accounts + 2 event accounts + 11 hook accounts
        assert_eq!(ix.accounts.len(), 19);
        let suffix = &ix.accounts[8..];
        assert_eq!(suffix[0].pubkey, pda::extra_metas_pda(&config(), &mint));
        assert_eq!(suffix[1].pubkey, config().policy_engine);
        assert!(suffix[2].is_writable);
        assert!(suffix[9].is_writable);
        assert!(suffix[10].is_writable);
    }

    #[test]
    fn setup_user_requires_a_level() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let err = setup_user(&config(), &payer, &payer, &mint, &owner, 0, &[]).unwrap_err();
        assert!(matches!(err, RwaSdkError::EmptyLevels));
    }

    #[test]
    fn setup_user_splits_levels_and_appends_token_account() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let setup = setup_user(
            &config(),
            &payer,
            &payer,
            &mint,
            &owner,
            8,
            &[(1, 0), (2, 100), (3, 200)],
        )
        .unwrap();
        assert_eq!(setup.instructions.len(), 3);
        assert_eq!(
            setup.instructions[0].program_id,
            config().identity_registry
        );
        assert_eq!(
            setup.instructions[2].program_id,
            spl_associated_token_account::id()
        );
    }
}
