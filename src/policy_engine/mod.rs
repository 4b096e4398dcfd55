//! Policy engine program client: attached policies, counters, locks and the
//! per-holder tracker accounts.

pub mod data;
pub mod instructions;

pub use data::{
    fetch_policy_engine_account, fetch_tracker_account, PolicyEngineAccount, Side,
    TrackerAccount, TrackedTransfer,
};
pub use instructions::*;
