use solana_sdk::pubkey::Pubkey;

use crate::config::ProgramConfig;

/// Identity level that skips all policy checks when attached to an account.
pub const POLICY_SKIP_LEVEL: u8 = u8::MAX;

//=============================================================================
// PDA Derivation
//=============================================================================

/// Derive a program address from an ordered seed list.
///
/// Deterministic for fixed inputs. The bump search never fails for the seed
/// schemas used by this protocol; a failure would indicate corrupted seeds.
pub fn derive_address(program_id: &Pubkey, seeds: &[&[u8]]) -> (Pubkey, u8) {
    Pubkey::find_program_address(seeds, program_id)
}

/// Registry instance of one protocol program for an asset. The controller,
/// policy engine and identity registry each keep one, seeded by the mint.
pub fn registry_pda(program_id: &Pubkey, asset_mint: &Pubkey) -> Pubkey {
    derive_address(program_id, &[asset_mint.as_ref()]).0
}

pub fn asset_controller_pda(config: &ProgramConfig, asset_mint: &Pubkey) -> Pubkey {
    registry_pda(&config.asset_controller, asset_mint)
}

pub fn policy_engine_pda(config: &ProgramConfig, asset_mint: &Pubkey) -> Pubkey {
    registry_pda(&config.policy_engine, asset_mint)
}

pub fn identity_registry_pda(config: &ProgramConfig, asset_mint: &Pubkey) -> Pubkey {
    registry_pda(&config.identity_registry, asset_mint)
}

pub fn data_registry_pda(config: &ProgramConfig, asset_mint: &Pubkey) -> Pubkey {
    registry_pda(&config.data_registry, asset_mint)
}

/// Identity account of an owner for one asset, seeded by the registry PDA.
pub fn identity_account_pda(config: &ProgramConfig, asset_mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    let registry = identity_registry_pda(config, asset_mint);
    derive_address(
        &config.identity_registry,
        &[registry.as_ref(), owner.as_ref()],
    )
    .0
}

/// Link between a wallet address and an owner's identity account.
pub fn wallet_identity_pda(config: &ProgramConfig, asset_mint: &Pubkey, wallet: &Pubkey) -> Pubkey {
    derive_address(
        &config.identity_registry,
        &[wallet.as_ref(), asset_mint.as_ref()],
    )
    .0
}

/// Per-owner balance and lock ledger kept by the policy engine.
pub fn tracker_account_pda(config: &ProgramConfig, asset_mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    let identity_account = identity_account_pda(config, asset_mint, owner);
    derive_address(
        &config.policy_engine,
        &[asset_mint.as_ref(), identity_account.as_ref()],
    )
    .0
}

/// Transfer-hook extra account metas list for an asset.
pub fn extra_metas_pda(config: &ProgramConfig, asset_mint: &Pubkey) -> Pubkey {
    derive_address(
        &config.policy_engine,
        &[b"extra-account-metas", asset_mint.as_ref()],
    )
    .0
}

/// Signer-less event authority of a program.
pub fn event_authority_pda(program_id: &Pubkey) -> Pubkey {
    derive_address(program_id, &[b"__event_authority"]).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProgramConfig {
        ProgramConfig::default()
    }

    #[test]
    fn derivation_is_deterministic() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let a = identity_account_pda(&config(), &mint, &owner);
        let b = identity_account_pda(&config(), &mint, &owner);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_inputs_yield_distinct_addresses() {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        assert_ne!(
            identity_account_pda(&config(), &mint_a, &owner),
            identity_account_pda(&config(), &mint_b, &owner),
        );
        assert_ne!(
            identity_account_pda(&config(), &mint_a, &owner),
            identity_account_pda(&config(), &mint_a, &Pubkey::new_unique()),
        );
    }

    #[test]
    fn registry_pdas_differ_per_program() {
        let mint = Pubkey::new_unique();
        let cfg = config();
        let controller = asset_controller_pda(&cfg, &mint);
        let engine = policy_engine_pda(&cfg, &mint);
        let registry = identity_registry_pda(&cfg, &mint);
        assert_ne!(controller, engine);
        assert_ne!(engine, registry);
    }

    #[test]
    fn tracker_is_seeded_by_identity_account() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let cfg = config();
        let identity = identity_account_pda(&cfg, &mint, &owner);
        let expected =
            derive_address(&cfg.policy_engine, &[mint.as_ref(), identity.as_ref()]).0;
        assert_eq!(tracker_account_pda(&cfg, &mint, &owner), expected);
    }
}
