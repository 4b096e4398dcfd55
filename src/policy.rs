//! Policy, counter and counter-limit models.
//!
//! These mirror the policy engine's on-chain types byte for byte. Enum
//! variant order is part of the binary contract; unused variants stay in
//! place so later discriminants keep their values.

use std::collections::HashSet;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RwaSdkError};
use crate::filter::IdentityFilter;

/// Enforcement behavior of an attached policy.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum PolicyType {
    IdentityApproval,
    TransactionAmountLimit { limit: u64 },
    TransactionAmountVelocity { limit: u64, timeframe: i64 },
    TransactionCountVelocity { limit: u64, timeframe: i64 },
    MaxBalance { limit: u64 },
    MinBalance { limit: u64 },
    MinMaxBalance { min: u64, max: u64 },
    TransferPause,
    ForbiddenIdentityGroup,
    ForceFullTransfer,
    BlockFlowbackEndTime { time: i64 },
}

/// A policy attached to an asset's policy engine. The hash is assigned
/// on-chain from the policy content and keys detach requests.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    pub hash: String,
    pub identity_filter: IdentityFilter,
    pub policy_type: PolicyType,
}

/// Running count of holders matching a filter. Ids are caller-assigned and
/// unique within one asset's policy engine.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Counter {
    pub value: u64,
    pub id: u8,
    pub identity_filter: IdentityFilter,
}

/// Constraint evaluated against one or more counters.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum CounterLimit {
    HoldersLimit { max: u64, min: u64, counter_id: u8 },
    GroupedHoldersLimit { max: u64, min: u64, counters: Vec<u8> },
    PercentageLimit {
        higher_counter_id: u8,
        lower_counter_id: u8,
        min_percentage: u8,
        max_percentage: u8,
    },
}

/// Issuance-time policies kept on the policy engine account.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct IssuancePolicies {
    pub disallow_backdating: bool,
    pub max_supply: u64,
    pub us_lock_period: u64,
    pub non_us_lock_period: u64,
}

//=============================================================================
// Request objects consumed by the instruction builders
//=============================================================================

/// Validated arguments for attaching a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyAttachRequest {
    pub identity_filter: IdentityFilter,
    pub policy_type: PolicyType,
    pub custom_error: u8,
}

impl PolicyAttachRequest {
    pub fn new(
        identity_filter: IdentityFilter,
        policy_type: PolicyType,
        custom_error: u8,
    ) -> Result<Self> {
        identity_filter.validate()?;
        Ok(Self {
            identity_filter,
            policy_type,
            custom_error,
        })
    }
}

/// Arguments for detaching a policy by its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDetachRequest {
    pub hash: String,
}

impl PolicyDetachRequest {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

/// Validated batch of counter additions and removals.
///
/// Duplicate ids within one batch are unambiguously a caller bug and are
/// rejected locally; collisions with counters already on-chain are left to
/// the program to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterChangeRequest {
    pub added: Vec<Counter>,
    pub removed_ids: Vec<u8>,
}

impl CounterChangeRequest {
    pub fn new(added: Vec<Counter>, removed_ids: Vec<u8>) -> Result<Self> {
        let mut seen = HashSet::new();
        for counter in &added {
            counter.identity_filter.validate()?;
            if !seen.insert(counter.id) {
                return Err(RwaSdkError::DuplicateCounterId(counter.id));
            }
        }
        Ok(Self { added, removed_ids })
    }
}

/// Batch of counter-limit additions and removals. Referenced counter ids are
/// validated on submission by the program, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterLimitChangeRequest {
    pub added: Vec<CounterLimit>,
    pub removed_indices: Vec<u8>,
}

impl CounterLimitChangeRequest {
    pub fn new(added: Vec<CounterLimit>, removed_indices: Vec<u8>) -> Self {
        Self {
            added,
            removed_indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{
        FilterComparison, FilterData, FilterInner, FilterLevel, FilterMode, FilterTarget,
    };

    fn any_filter() -> IdentityFilter {
        IdentityFilter::simple(FilterInner::single(FilterData::new(
            FilterLevel::Level(1),
            FilterTarget::BothAnd,
            FilterMode::Include,
        )))
    }

    fn counter(id: u8) -> Counter {
        Counter {
            value: 0,
            id,
            identity_filter: any_filter(),
        }
    }

    #[test]
    fn policy_type_discriminants_are_stable() {
        // MaxBalance sits after the two velocity variants and must encode
        // with tag 4.
        let bytes = borsh::to_vec(&PolicyType::MaxBalance { limit: 10 }).unwrap();
        assert_eq!(bytes[0], 4);
        let bytes = borsh::to_vec(&PolicyType::BlockFlowbackEndTime { time: 0 }).unwrap();
        assert_eq!(bytes[0], 10);
    }

    #[test]
    fn duplicate_counter_id_is_rejected() {
        let err = CounterChangeRequest::new(vec![counter(0), counter(0)], vec![]).unwrap_err();
        assert!(matches!(err, RwaSdkError::DuplicateCounterId(0)));
    }

    #[test]
    fn distinct_counter_ids_are_accepted() {
        let req = CounterChangeRequest::new(vec![counter(0), counter(1)], vec![2]).unwrap();
        assert_eq!(req.added.len(), 2);
        assert_eq!(req.removed_ids, vec![2]);
    }

    #[test]
    fn attach_request_rejects_malformed_filter() {
        let malformed =
            IdentityFilter::Simple(FilterInner::Multiple(FilterComparison::And, vec![]));
        let err =
            PolicyAttachRequest::new(malformed, PolicyType::IdentityApproval, 0).unwrap_err();
        assert!(matches!(err, RwaSdkError::MalformedFilter(_)));
    }
}
