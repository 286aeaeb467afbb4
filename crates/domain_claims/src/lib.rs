//! Section 75 Claims Domain
//!
//! Decides whether a disputed credit-card transaction qualifies for Section 75
//! protection, classifies the claim's monetary tier, and governs the claim's
//! status from submission to outcome.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submit -> pending <-> reviewing -> approved / rejected
//! ```
//!
//! Eligibility and tier are evaluated once, at creation, and frozen on the
//! claim. Status is written only by [`lifecycle::ClaimLifecycle`], and only
//! for actors holding the processor role.

pub mod eligibility;
pub mod classification;
pub mod claim;
pub mod claim_number;
pub mod lifecycle;
pub mod ports;
pub mod service;
pub mod config;
pub mod error;

pub use eligibility::{evaluate, ClaimReason, EligibilityResult, TransactionFacts};
pub use classification::{classify, ClaimTier};
pub use claim::{Claim, ClaimStatus, EvidenceFile, EvidenceUpdate, NewClaimRequest};
pub use claim_number::{ClaimNumberGenerator, TimestampClaimNumbers};
pub use lifecycle::{ActorRole, ClaimLifecycle, StatusChange, TransitionTable};
pub use ports::{ClaimQuery, ClaimsPort};
pub use service::{ClaimAssessment, ClaimsService};
pub use config::ClaimsConfig;
pub use error::{ClaimError, ErrorKind};
