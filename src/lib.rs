//! Client SDK for a permissioned-asset protocol on Solana.
//!
//! The protocol splits compliance across three cooperating programs: an
//! asset controller owning the Token-2022 mint, a policy engine enforcing
//! transfer policies through a transfer hook, and an identity registry
//! tracking holders, their wallets and compliance levels. This crate builds
//! the instructions for all three, resolves the account graphs they share
//! and decodes their on-chain state.

pub mod asset_controller;
pub mod config;
pub mod core;
pub mod error;
pub mod filter;
pub mod graph;
pub mod identity_registry;
pub mod pda;
pub mod policy;
pub mod policy_engine;
pub mod types;

pub use crate::config::ProgramConfig;
pub use crate::core::connection::{AccountReader, MemcmpFilter};
pub use crate::error::{Result, RwaSdkError};
pub use crate::filter::{
    FilterComparison, FilterData, FilterInner, FilterLevel, FilterMode, FilterTarget,
    IdentityFilter,
};
pub use crate::graph::{
    AccountGraph, AccountGraphResolver, AccountRole, OpKind, Participant, TRANSFER_HOOK_SUFFIX,
};
pub use crate::pda::POLICY_SKIP_LEVEL;
pub use crate::policy::{
    Counter, CounterChangeRequest, CounterLimit, CounterLimitChangeRequest, IssuancePolicies,
    Policy, PolicyAttachRequest, PolicyDetachRequest, PolicyType,
};
pub use crate::types::{IxReturn, TokenAccountState};
