//! Identity filter expression trees.
//!
//! Filters gate which participants a policy or counter applies to. The tree
//! is serialized as-is and evaluated by the policy engine program; no
//! evaluation happens client-side. Variant order is part of the binary
//! contract and must not be reordered.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RwaSdkError};

/// Attribute a filter leaf matches on.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterLevel {
    Level(u8),
    LevelMappingAny(u8),
    LevelMapping { source: u8, target: u8 },
    Country(u8),
    CountryMapping(u8),
}

/// Which side of a transfer the leaf is evaluated against.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterTarget {
    Sender,
    Receiver,
    BothAnd,
    BothOr,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Include,
    Exclude,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterComparison {
    Or,
    And,
}

/// Leaf of the filter tree.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterData {
    pub level: FilterLevel,
    pub target: FilterTarget,
    pub mode: FilterMode,
}

impl FilterData {
    pub fn new(level: FilterLevel, target: FilterTarget, mode: FilterMode) -> Self {
        Self {
            level,
            target,
            mode,
        }
    }
}

/// Combination of one or more leaves.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum FilterInner {
    Single(FilterData),
    Tuple(FilterData, FilterComparison, FilterData),
    Multiple(FilterComparison, Vec<FilterData>),
}

impl FilterInner {
    pub fn single(data: FilterData) -> Self {
        Self::Single(data)
    }

    pub fn tuple(left: FilterData, comparison: FilterComparison, right: FilterData) -> Self {
        Self::Tuple(left, comparison, right)
    }

    /// An empty `Multiple` has no defined evaluation semantics on-chain and
    /// is rejected here.
    pub fn multiple(comparison: FilterComparison, data: Vec<FilterData>) -> Result<Self> {
        if data.is_empty() {
            return Err(RwaSdkError::MalformedFilter(
                "multiple filter with zero leaves".to_string(),
            ));
        }
        Ok(Self::Multiple(comparison, data))
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Multiple(_, data) if data.is_empty() => Err(RwaSdkError::MalformedFilter(
                "multiple filter with zero leaves".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Filter tree attached to a policy or counter.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum IdentityFilter {
    /// Evaluated unconditionally.
    Simple(FilterInner),
    /// The second expression is only evaluated when the first matches.
    IfThen(FilterInner, FilterInner),
}

impl IdentityFilter {
    pub fn simple(inner: FilterInner) -> Self {
        Self::Simple(inner)
    }

    pub fn if_then(condition: FilterInner, then: FilterInner) -> Self {
        Self::IfThen(condition, then)
    }

    /// Walk the tree and reject structurally invalid nodes.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Simple(inner) => inner.validate(),
            Self::IfThen(condition, then) => {
                condition.validate()?;
                then.validate()
            }
        }
    }

    /// Serialize to the wire encoding expected by the policy engine.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(borsh::to_vec(self)?)
    }

    /// Decode a filter tree from its wire encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::try_from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(level: u8) -> FilterData {
        FilterData::new(
            FilterLevel::Level(level),
            FilterTarget::BothAnd,
            FilterMode::Include,
        )
    }

    #[test]
    fn empty_multiple_is_rejected() {
        let err = FilterInner::multiple(FilterComparison::And, vec![]).unwrap_err();
        assert!(matches!(err, RwaSdkError::MalformedFilter(_)));
    }

    #[test]
    fn nested_filter_round_trips() {
        let filter = IdentityFilter::if_then(
            FilterInner::tuple(leaf(1), FilterComparison::Or, leaf(2)),
            FilterInner::multiple(
                FilterComparison::And,
                vec![
                    leaf(3),
                    FilterData::new(
                        FilterLevel::LevelMapping {
                            source: 4,
                            target: 5,
                        },
                        FilterTarget::Receiver,
                        FilterMode::Exclude,
                    ),
                    FilterData::new(
                        FilterLevel::Country(7),
                        FilterTarget::Sender,
                        FilterMode::Include,
                    ),
                ],
            )
            .unwrap(),
        );
        let bytes = filter.to_bytes().unwrap();
        let decoded = IdentityFilter::from_bytes(&bytes).unwrap();
        assert_eq!(filter, decoded);
    }

    #[test]
    fn variant_tags_follow_declaration_order() {
        // Wire contract: Simple = 0, IfThen = 1; Single = 0, Tuple = 1,
        // Multiple = 2; Or = 0, And = 1.
        let single = IdentityFilter::simple(FilterInner::single(leaf(1)));
        let bytes = single.to_bytes().unwrap();
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], 0);

        let multi = IdentityFilter::if_then(
            FilterInner::single(leaf(1)),
            FilterInner::multiple(FilterComparison::And, vec![leaf(2)]).unwrap(),
        );
        let bytes = multi.to_bytes().unwrap();
        assert_eq!(bytes[0], 1);
    }

    #[test]
    fn structural_equality_is_order_sensitive() {
        let a = FilterInner::tuple(leaf(1), FilterComparison::Or, leaf(2));
        let b = FilterInner::tuple(leaf(2), FilterComparison::Or, leaf(1));
        assert_ne!(a, b);
    }
}
