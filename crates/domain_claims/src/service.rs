//! Claims application service
//!
//! Wires the eligibility evaluator, tier classifier and lifecycle to the
//! persistence port. Every write is retried on conflict: creation with a
//! fresh claim number, updates by reloading the claim and re-applying the
//! request to its current state.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::ClaimId;

use crate::claim::{Claim, ClaimStatus, EvidenceFile, EvidenceUpdate, NewClaimRequest};
use crate::claim_number::{ClaimNumberGenerator, TimestampClaimNumbers};
use crate::classification::ClaimTier;
use crate::config::ClaimsConfig;
use crate::eligibility::{EligibilityResult, TransactionFacts};
use crate::error::ClaimError;
use crate::lifecycle::{ActorRole, ClaimLifecycle, StatusChange};
use crate::ports::{ClaimQuery, ClaimsPort};

/// Eligibility and tier for a transaction, without a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClaimAssessment {
    pub eligibility: EligibilityResult,
    pub tier: ClaimTier,
}

/// Claims service
pub struct ClaimsService {
    port: Arc<dyn ClaimsPort>,
    lifecycle: ClaimLifecycle,
    numbers: Arc<dyn ClaimNumberGenerator>,
    config: ClaimsConfig,
}

impl ClaimsService {
    pub fn new(port: Arc<dyn ClaimsPort>, config: ClaimsConfig) -> Self {
        let numbers = Arc::new(TimestampClaimNumbers::new(config.claim_number_prefix.clone()));
        Self {
            port,
            lifecycle: ClaimLifecycle::default(),
            numbers,
            config,
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: ClaimLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_number_generator(mut self, numbers: Arc<dyn ClaimNumberGenerator>) -> Self {
        self.numbers = numbers;
        self
    }

    pub fn lifecycle(&self) -> &ClaimLifecycle {
        &self.lifecycle
    }

    /// Pre-submission checklist for a transaction
    pub fn assess(&self, facts: &TransactionFacts, today: NaiveDate) -> ClaimAssessment {
        let assessment = ClaimAssessment {
            eligibility: facts.evaluate(today),
            tier: ClaimTier::classify(facts.amount),
        };
        debug!(
            amount = %facts.amount,
            reason = %facts.reason,
            eligible = assessment.eligibility.is_eligible,
            tier = %assessment.tier,
            "Assessed transaction"
        );
        assessment
    }

    /// Creates a claim, evaluating eligibility and tier once
    ///
    /// # Errors
    ///
    /// * `ClaimError::Validation` - blank fields, negative amount or future date
    /// * `ClaimError::Conflict` - every generated claim number was already taken
    pub async fn create_claim(
        &self,
        request: NewClaimRequest,
        now: DateTime<Utc>,
    ) -> Result<Claim, ClaimError> {
        let id = ClaimId::new_v7();

        for attempt in 0..self.config.creation_retry_attempts {
            let claim_number = self.numbers.generate(now, attempt);
            let claim = Claim::create(id, claim_number, request.clone(), now)?;

            match self.port.insert_claim(&claim).await {
                Ok(()) => {
                    info!(
                        claim_id = %claim.id(),
                        claim_number = %claim.claim_number(),
                        eligible = claim.is_eligible(),
                        tier = %claim.tier(),
                        "Claim created"
                    );
                    return Ok(claim);
                }
                Err(e) if e.is_conflict() => {
                    warn!(
                        claim_number = %claim.claim_number(),
                        attempt = attempt + 1,
                        "Claim number taken, regenerating"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ClaimError::Conflict(format!(
            "no unique claim number after {} attempts",
            self.config.creation_retry_attempts
        )))
    }

    pub async fn get_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        Ok(self.port.load_claim(id).await?)
    }

    pub async fn list_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.port.find_claims(query).await?)
    }

    /// Moves a claim to `target` on behalf of an actor
    ///
    /// # Errors
    ///
    /// * `ClaimError::NotFound` - unknown claim
    /// * `ClaimError::Forbidden` - actor is not a processor
    /// * `ClaimError::Validation` - no target status given
    /// * `ClaimError::InvalidStatusTransition` - pair not in the transition table
    /// * `ClaimError::Conflict` - concurrent writers won every attempt
    pub async fn set_claim_status(
        &self,
        id: ClaimId,
        target: Option<ClaimStatus>,
        role: ActorRole,
        now: DateTime<Utc>,
    ) -> Result<Claim, ClaimError> {
        let result = self
            .update_claim(id, |claim| self.lifecycle.set_status(claim, target, role, now))
            .await;

        match result {
            Ok((claim, change)) => {
                log_status_change(&claim, &change);
                Ok(claim)
            }
            Err(e) => {
                warn!(claim_id = %id, role = %role, error = %e, "Status change rejected");
                Err(e)
            }
        }
    }

    /// Appends to or replaces a claim's evidence references
    pub async fn attach_evidence(
        &self,
        id: ClaimId,
        files: Vec<EvidenceFile>,
        mode: EvidenceUpdate,
        now: DateTime<Utc>,
    ) -> Result<Claim, ClaimError> {
        let count = files.len();
        let (claim, ()) = self
            .update_claim(id, |claim| claim.attach_evidence(files.clone(), mode, now))
            .await?;

        info!(
            claim_id = %claim.id(),
            files = count,
            total = claim.evidence().len(),
            mode = ?mode,
            "Evidence updated"
        );
        Ok(claim)
    }

    /// Load, apply, compare-and-swap; repeated while another writer wins
    async fn update_claim<T, F>(&self, id: ClaimId, mut apply: F) -> Result<(Claim, T), ClaimError>
    where
        F: FnMut(&mut Claim) -> Result<T, ClaimError>,
    {
        for attempt in 0..self.config.update_retry_attempts {
            let mut claim = self.port.load_claim(id).await?;
            let expected_version = claim.version();
            let outcome = apply(&mut claim)?;
            claim.next_version();

            match self.port.save_claim(&claim, expected_version).await {
                Ok(()) => return Ok((claim, outcome)),
                Err(e) if e.is_conflict() => {
                    warn!(claim_id = %id, attempt = attempt + 1, "Concurrent update, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ClaimError::Conflict(format!(
            "claim {} changed concurrently {} times",
            id, self.config.update_retry_attempts
        )))
    }
}

fn log_status_change(claim: &Claim, change: &StatusChange) {
    if change.is_reapplied() {
        debug!(
            claim_id = %claim.id(),
            status = %change.to,
            "Status re-applied"
        );
    }
    info!(
        claim_id = %claim.id(),
        claim_number = %claim.claim_number(),
        from = %change.from,
        to = %change.to,
        role = %change.changed_by,
        "Claim status changed"
    );
}
