mod common;

use common::MockChain;
use solana_sdk::pubkey::Pubkey;

use rwa_token_sdk::identity_registry::{
    fetch_identity_account, fetch_wallet_identity, find_identity_accounts,
    find_wallet_identities, IdentityAccount, IdentityLevel, WalletIdentity,
};
use rwa_token_sdk::policy_engine::{fetch_tracker_account, Side, TrackedTransfer, TrackerAccount};
use rwa_token_sdk::{pda, ProgramConfig, RwaSdkError};

fn identity(config: &ProgramConfig, mint: &Pubkey, owner: Pubkey, country: u8) -> IdentityAccount {
    IdentityAccount {
        version: 1,
        identity_registry: pda::identity_registry_pda(config, mint),
        owner,
        num_wallets: 1,
        country,
        levels: vec![IdentityLevel {
            level: 1,
            expiry: i64::MAX,
        }],
    }
}

fn register(chain: &mut MockChain, config: &ProgramConfig, mint: &Pubkey, owner: Pubkey) {
    let address = pda::identity_account_pda(config, mint, &owner);
    chain.insert_anchor(
        address,
        config.identity_registry,
        IdentityAccount::DISCRIMINATOR,
        &identity(config, mint, owner, 0),
    );
}

#[tokio::test]
async fn fetch_decodes_identity_account() {
    let config = ProgramConfig::default();
    let mint = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let mut chain = MockChain::new();
    register(&mut chain, &config, &mint, owner);

    let account = fetch_identity_account(&chain, &config, &mint, &owner)
        .await
        .unwrap();
    assert_eq!(account.owner, owner);
    assert_eq!(account.levels.len(), 1);
    assert_eq!(account.levels[0].level, 1);
}

#[tokio::test]
async fn fetch_missing_identity_is_not_found() {
    let config = ProgramConfig::default();
    let chain = MockChain::new();
    let err = fetch_identity_account(
        &chain,
        &config,
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RwaSdkError::AccountNotFound(_)));
}

#[tokio::test]
async fn scan_returns_only_the_asset_under_query() {
    let config = ProgramConfig::default();
    let mint_a = Pubkey::new_unique();
    let mint_b = Pubkey::new_unique();
    let mut chain = MockChain::new();
    let holders_a = [Pubkey::new_unique(), Pubkey::new_unique()];
    for owner in holders_a {
        register(&mut chain, &config, &mint_a, owner);
    }
    register(&mut chain, &config, &mint_b, Pubkey::new_unique());

    let found = find_identity_accounts(&chain, &config, &mint_a)
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    for (_, account) in &found {
        assert_eq!(
            account.identity_registry,
            pda::identity_registry_pda(&config, &mint_a)
        );
    }
}

#[tokio::test]
async fn wallet_links_scan_by_identity_account() {
    let config = ProgramConfig::default();
    let mint = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let identity_address = pda::identity_account_pda(&config, &mint, &owner);
    let mut chain = MockChain::new();

    let wallets = [owner, Pubkey::new_unique(), Pubkey::new_unique()];
    for wallet in wallets {
        chain.insert_anchor(
            pda::wallet_identity_pda(&config, &mint, &wallet),
            config.identity_registry,
            WalletIdentity::DISCRIMINATOR,
            &WalletIdentity {
                identity_account: identity_address,
                wallet,
            },
        );
    }
    // a link belonging to someone else
    chain.insert_anchor(
        pda::wallet_identity_pda(&config, &mint, &Pubkey::new_unique()),
        config.identity_registry,
        WalletIdentity::DISCRIMINATOR,
        &WalletIdentity {
            identity_account: Pubkey::new_unique(),
            wallet: Pubkey::new_unique(),
        },
    );

    let found = find_wallet_identities(&chain, &config, &identity_address)
        .await
        .unwrap();
    assert_eq!(found.len(), 3);

    let link = fetch_wallet_identity(&chain, &config, &mint, &wallets[1])
        .await
        .unwrap();
    assert_eq!(link.identity_account, identity_address);
    assert_eq!(link.wallet, wallets[1]);
}

#[tokio::test]
async fn tracker_fetch_decodes_the_transfer_ledger() {
    let config = ProgramConfig::default();
    let mint = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let mut chain = MockChain::new();

    let tracker = TrackerAccount {
        version: 1,
        asset_mint: mint,
        identity_account: pda::identity_account_pda(&config, &mint, &owner),
        transfers: vec![
            TrackedTransfer {
                amount: 500,
                timestamp: 1_700_000_000,
                side: Side::Buy,
            },
            TrackedTransfer {
                amount: 200,
                timestamp: 1_700_000_100,
                side: Side::Sell,
            },
        ],
        total_amount: 300,
    };
    chain.insert_anchor(
        pda::tracker_account_pda(&config, &mint, &owner),
        config.policy_engine,
        TrackerAccount::DISCRIMINATOR,
        &tracker,
    );

    let fetched = fetch_tracker_account(&chain, &config, &mint, &owner)
        .await
        .unwrap();
    assert_eq!(fetched, tracker);
}
