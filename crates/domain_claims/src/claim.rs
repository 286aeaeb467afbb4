//! Claim aggregate
//!
//! Stored claim documents use snake_case keys. The nested `eligibility`
//! block keeps the camelCase check names (`transactionValue`,
//! `overHundredPounds`) that the eligibility checklist is known by.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ClaimId;
use crate::classification::ClaimTier;
use crate::eligibility::{ClaimReason, EligibilityResult, TransactionFacts};
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    /// Submitted, awaiting a processor
    Pending,
    /// Picked up by a processor
    Reviewing,
    /// Claim upheld
    Approved,
    /// Claim refused
    Rejected,
    /// Legacy status found in stored data; nothing transitions into it
    UnderReview,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Pending,
        ClaimStatus::Reviewing,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::UnderReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Reviewing => "reviewing",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::UnderReview => "under-review",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ClaimError::validation(format!("unknown claim status '{}'", s)))
    }
}

/// Reference to an evidence file held by the upload collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub locator: String,
}

/// How an evidence update combines with the existing list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceUpdate {
    Append,
    Replace,
}

/// Customer-supplied fields for a new claim
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewClaimRequest {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 64))]
    pub account_number: String,
    #[validate(length(min = 1, max = 200))]
    pub merchant_name: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub reason: ClaimReason,
    /// Identity of the submitting customer
    #[validate(length(min = 1, max = 128))]
    pub submitted_by: String,
}

impl NewClaimRequest {
    pub fn facts(&self) -> TransactionFacts {
        TransactionFacts::new(self.amount, self.transaction_date, self.reason.clone())
    }

    fn check(&self, today: NaiveDate) -> Result<(), ClaimError> {
        self.validate()?;
        let blank = [
            ("customer_name", &self.customer_name),
            ("account_number", &self.account_number),
            ("merchant_name", &self.merchant_name),
            ("description", &self.description),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
        if let Some((field, _)) = blank {
            return Err(ClaimError::validation(format!("{} must not be blank", field)));
        }
        self.facts().validate(today)
    }
}

/// A Section 75 claim
///
/// Eligibility and tier are computed once in [`Claim::create`] and never
/// change. Status changes go through [`crate::lifecycle::ClaimLifecycle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    id: ClaimId,
    /// Human-readable claim number
    claim_number: String,
    /// Cardholder name
    pub customer_name: String,
    /// Card account the transaction was made on
    pub account_number: String,
    /// Merchant the goods or services were bought from
    pub merchant_name: String,
    /// Customer's account of what went wrong
    pub description: String,
    /// Reason for claim, as submitted
    reason: ClaimReason,
    /// Transaction amount
    amount: Decimal,
    /// Date of the card transaction
    transaction_date: NaiveDate,
    /// Identity of the submitting customer
    pub submitted_by: String,
    /// Eligibility verdict computed at creation
    eligibility: EligibilityResult,
    /// Tier computed at creation from `amount`
    tier: ClaimTier,
    /// Current lifecycle status
    status: ClaimStatus,
    /// Evidence file references
    evidence: Vec<EvidenceFile>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last modification timestamp
    updated_at: DateTime<Utc>,
    /// Persistence concurrency token, bumped on every stored write.
    /// Metadata only: re-applying a status still bumps it, so it sits
    /// outside the "only status and updated_at change" rule.
    #[serde(default)]
    version: u64,
}

impl Claim {
    /// Validates the request, evaluates eligibility and tier, and opens the
    /// claim in `pending`.
    pub fn create(
        id: ClaimId,
        claim_number: impl Into<String>,
        request: NewClaimRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        let today = now.date_naive();
        request.check(today)?;

        let eligibility = request.facts().evaluate(today);
        let tier = ClaimTier::classify(request.amount);

        Ok(Self {
            id,
            claim_number: claim_number.into(),
            customer_name: request.customer_name,
            account_number: request.account_number,
            merchant_name: request.merchant_name,
            description: request.description,
            reason: request.reason,
            amount: request.amount,
            transaction_date: request.transaction_date,
            submitted_by: request.submitted_by,
            eligibility,
            tier,
            status: ClaimStatus::Pending,
            evidence: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn claim_number(&self) -> &str {
        &self.claim_number
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn reason(&self) -> &ClaimReason {
        &self.reason
    }

    pub fn transaction_date(&self) -> NaiveDate {
        self.transaction_date
    }

    pub fn eligibility(&self) -> &EligibilityResult {
        &self.eligibility
    }

    pub fn tier(&self) -> ClaimTier {
        self.tier
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn evidence(&self) -> &[EvidenceFile] {
        &self.evidence
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_eligible(&self) -> bool {
        self.eligibility.is_eligible
    }

    /// Appends to or replaces the evidence list. Not allowed once terminal.
    pub fn attach_evidence(
        &mut self,
        files: Vec<EvidenceFile>,
        mode: EvidenceUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        if self.status.is_terminal() {
            return Err(ClaimError::ClaimClosed(self.claim_number.clone()));
        }
        match mode {
            EvidenceUpdate::Append => self.evidence.extend(files),
            EvidenceUpdate::Replace => self.evidence = files,
        }
        self.updated_at = now;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: ClaimStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    pub(crate) fn next_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn request() -> NewClaimRequest {
        NewClaimRequest {
            customer_name: "Jane Smith".to_string(),
            account_number: "4929-0001".to_string(),
            merchant_name: "Acme Sofas Ltd".to_string(),
            description: "Sofa arrived with a broken frame".to_string(),
            amount: dec!(2500.00),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            reason: ClaimReason::FaultyGoods,
            submitted_by: "customer-42".to_string(),
        }
    }

    #[test]
    fn test_create_opens_pending_claim() {
        let claim = Claim::create(ClaimId::new(), "S75-2024-000001", request(), now()).unwrap();

        assert_eq!(claim.status(), ClaimStatus::Pending);
        assert_eq!(claim.tier(), ClaimTier::Tier2);
        assert!(claim.is_eligible());
        assert!(claim.evidence().is_empty());
        assert_eq!(claim.created_at(), claim.updated_at());
        assert_eq!(claim.version(), 0);
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let mut req = request();
        req.merchant_name = "   ".to_string();
        let err = Claim::create(ClaimId::new(), "S75-2024-000001", req, now()).unwrap_err();
        assert!(matches!(err, ClaimError::Validation(ref msg) if msg.contains("merchant_name")));

        let mut req = request();
        req.customer_name = String::new();
        assert!(Claim::create(ClaimId::new(), "S75-2024-000001", req, now()).is_err());
    }

    #[test]
    fn test_create_rejects_future_transaction() {
        let mut req = request();
        req.transaction_date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert!(Claim::create(ClaimId::new(), "S75-2024-000001", req, now()).is_err());
    }

    #[test]
    fn test_transaction_facts_agree_with_frozen_assessment() {
        let claim = Claim::create(ClaimId::new(), "S75-2024-000001", request(), now()).unwrap();

        assert_eq!(claim.amount(), dec!(2500.00));
        assert_eq!(claim.reason(), &ClaimReason::FaultyGoods);
        assert_eq!(claim.transaction_date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(claim.tier(), ClaimTier::classify(claim.amount()));
        assert_eq!(
            claim.eligibility(),
            &TransactionFacts::new(claim.amount(), claim.transaction_date(), claim.reason().clone())
                .evaluate(now().date_naive())
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("under-review".parse::<ClaimStatus>().unwrap(), ClaimStatus::UnderReview);
        assert_eq!("approved".parse::<ClaimStatus>().unwrap(), ClaimStatus::Approved);
        assert!("closed".parse::<ClaimStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&ClaimStatus::UnderReview).unwrap(),
            "\"under-review\""
        );
    }

    #[test]
    fn test_evidence_append_and_replace() {
        let mut claim = Claim::create(ClaimId::new(), "S75-2024-000001", request(), now()).unwrap();
        let file = |name: &str| EvidenceFile {
            name: name.to_string(),
            size: 1024,
            content_type: "application/pdf".to_string(),
            locator: format!("evidence/{}", name),
        };

        claim.attach_evidence(vec![file("receipt.pdf")], EvidenceUpdate::Append, now()).unwrap();
        claim.attach_evidence(vec![file("photo.pdf")], EvidenceUpdate::Append, now()).unwrap();
        assert_eq!(claim.evidence().len(), 2);

        claim.attach_evidence(vec![file("statement.pdf")], EvidenceUpdate::Replace, now()).unwrap();
        assert_eq!(claim.evidence().len(), 1);
        assert_eq!(claim.evidence()[0].name, "statement.pdf");
    }

    #[test]
    fn test_evidence_rejected_once_terminal() {
        let mut claim = Claim::create(ClaimId::new(), "S75-2024-000001", request(), now()).unwrap();
        claim.set_status(ClaimStatus::Rejected, now());

        let err = claim.attach_evidence(Vec::new(), EvidenceUpdate::Replace, now()).unwrap_err();
        assert!(matches!(err, ClaimError::ClaimClosed(_)));
    }
}
