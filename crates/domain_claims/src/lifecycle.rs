//! Claim lifecycle
//!
//! The lifecycle is the only code that writes a claim's status. Legality is
//! decided by two rules: the actor must hold the processor role, and the
//! `(from, to)` pair must appear in the [`TransitionTable`].
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            ▼                              │
//!        pending ◀──▶ reviewing ──▶ approved / rejected
//!            │                              ▲
//!            └──────────────────────────────┘
//!
//! under-review: accepted in stored data, never a target
//! ```
//!
//! The current table is permissive: every status may move to any of
//! `pending`, `reviewing`, `approved` or `rejected`, including itself.
//! Re-applying the current status is accepted and still refreshes the
//! modification timestamp.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

/// Role of the actor requesting a lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Claim owner; may submit a claim, never move it
    Customer,
    /// Back-office handler; the only role that changes status
    Processor,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Customer => "customer",
            ActorRole::Processor => "processor",
        }
    }

    pub fn can_change_status(&self) -> bool {
        matches!(self, ActorRole::Processor)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed next states per state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    allowed: BTreeMap<ClaimStatus, BTreeSet<ClaimStatus>>,
}

impl TransitionTable {
    /// Targets a processor may assign
    pub const ASSIGNABLE: [ClaimStatus; 4] = [
        ClaimStatus::Pending,
        ClaimStatus::Reviewing,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
    ];

    /// Table with no transitions at all
    pub fn empty() -> Self {
        Self {
            allowed: BTreeMap::new(),
        }
    }

    /// Current rules: any status may move to any assignable status
    pub fn permissive() -> Self {
        ClaimStatus::ALL
            .into_iter()
            .flat_map(|from| Self::ASSIGNABLE.into_iter().map(move |to| (from, to)))
            .fold(Self::empty(), |table, (from, to)| table.with_transition(from, to))
    }

    pub fn with_transition(mut self, from: ClaimStatus, to: ClaimStatus) -> Self {
        self.allowed.entry(from).or_default().insert(to);
        self
    }

    pub fn without_transition(mut self, from: ClaimStatus, to: ClaimStatus) -> Self {
        if let Some(targets) = self.allowed.get_mut(&from) {
            targets.remove(&to);
        }
        self
    }

    pub fn allows(&self, from: ClaimStatus, to: ClaimStatus) -> bool {
        self.allowed
            .get(&from)
            .is_some_and(|targets| targets.contains(&to))
    }

    pub fn targets(&self, from: ClaimStatus) -> Vec<ClaimStatus> {
        self.allowed
            .get(&from)
            .map(|targets| targets.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Record of an applied status change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub changed_by: ActorRole,
    pub changed_at: DateTime<Utc>,
}

impl StatusChange {
    /// True when the status itself did not move
    pub fn is_reapplied(&self) -> bool {
        self.from == self.to
    }
}

/// Claim lifecycle state machine
#[derive(Debug, Clone, Default)]
pub struct ClaimLifecycle {
    table: TransitionTable,
}

impl ClaimLifecycle {
    pub fn new(table: TransitionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Checks a requested change without applying it
    pub fn authorize(
        &self,
        current: ClaimStatus,
        target: Option<ClaimStatus>,
        role: ActorRole,
    ) -> Result<ClaimStatus, ClaimError> {
        if !role.can_change_status() {
            return Err(ClaimError::Forbidden {
                role: role.to_string(),
                action: "change claim status".to_string(),
            });
        }
        let target = target.ok_or_else(|| ClaimError::validation("target status is required"))?;
        if !self.table.allows(current, target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: current.to_string(),
                to: target.to_string(),
            });
        }
        Ok(target)
    }

    /// Applies a status change. Only the status and modification time change.
    pub fn set_status(
        &self,
        claim: &mut Claim,
        target: Option<ClaimStatus>,
        role: ActorRole,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, ClaimError> {
        let from = claim.status();
        let to = self.authorize(from, target, role)?;
        claim.set_status(to, now);

        Ok(StatusChange {
            from,
            to,
            changed_by: role,
            changed_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_table_allows_every_assignable_target() {
        let table = TransitionTable::permissive();
        for from in ClaimStatus::ALL {
            for to in TransitionTable::ASSIGNABLE {
                assert!(table.allows(from, to), "{} -> {} should be allowed", from, to);
            }
        }
    }

    #[test]
    fn test_under_review_is_never_a_target() {
        let table = TransitionTable::permissive();
        for from in ClaimStatus::ALL {
            assert!(!table.allows(from, ClaimStatus::UnderReview));
        }
    }

    #[test]
    fn test_tightened_table_rejects_removed_transition() {
        let lifecycle = ClaimLifecycle::new(
            TransitionTable::permissive()
                .without_transition(ClaimStatus::Approved, ClaimStatus::Pending),
        );

        let err = lifecycle
            .authorize(ClaimStatus::Approved, Some(ClaimStatus::Pending), ActorRole::Processor)
            .unwrap_err();
        assert!(matches!(err, ClaimError::InvalidStatusTransition { .. }));
        assert!(lifecycle
            .authorize(ClaimStatus::Approved, Some(ClaimStatus::Rejected), ActorRole::Processor)
            .is_ok());
    }

    #[test]
    fn test_customer_is_forbidden() {
        let lifecycle = ClaimLifecycle::default();
        let err = lifecycle
            .authorize(ClaimStatus::Pending, Some(ClaimStatus::Approved), ActorRole::Customer)
            .unwrap_err();
        assert!(matches!(err, ClaimError::Forbidden { .. }));
    }

    #[test]
    fn test_missing_target_is_validation_error() {
        let lifecycle = ClaimLifecycle::default();
        let err = lifecycle
            .authorize(ClaimStatus::Pending, None, ActorRole::Processor)
            .unwrap_err();
        assert!(matches!(err, ClaimError::Validation(_)));
    }

    #[test]
    fn test_targets_are_sorted() {
        let table = TransitionTable::empty()
            .with_transition(ClaimStatus::Pending, ClaimStatus::Rejected)
            .with_transition(ClaimStatus::Pending, ClaimStatus::Reviewing);
        assert_eq!(
            table.targets(ClaimStatus::Pending),
            vec![ClaimStatus::Reviewing, ClaimStatus::Rejected]
        );
        assert!(table.targets(ClaimStatus::Approved).is_empty());
    }
}
