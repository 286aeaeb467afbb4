//! Claims Domain Ports
//!
//! The persistence collaborator seen from the core. Durability belongs to the
//! adapter; the core decides every value written to status, eligibility and
//! tier.
//!
//! Adapters must provide two guarantees:
//!
//! - `insert_claim` fails with [`PortError::Conflict`] when the claim number
//!   is already taken, so the service can retry with a fresh number.
//! - `save_claim` is a compare-and-swap on the claim version: the write only
//!   lands if the stored version still equals `expected_version`, otherwise
//!   it fails with [`PortError::Conflict`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{ClaimsPort, mock::InMemoryClaimsPort};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ClaimsPort> = Arc::new(InMemoryClaimsPort::new());
//! let service = ClaimsService::new(port, ClaimsConfig::default());
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::claim::{Claim, ClaimStatus};

/// Query parameters for finding claims
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    /// Filter by status
    pub status: Option<ClaimStatus>,
    /// Filter by submitting customer
    pub submitted_by: Option<String>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ClaimQuery {
    pub fn by_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn by_customer(submitted_by: impl Into<String>) -> Self {
        Self {
            submitted_by: Some(submitted_by.into()),
            ..Default::default()
        }
    }

    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(status) = self.status {
            if claim.status() != status {
                return false;
            }
        }
        if let Some(ref submitted_by) = self.submitted_by {
            if &claim.submitted_by != submitted_by {
                return false;
            }
        }
        true
    }
}

/// Port for claim persistence
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Stores a new claim; conflicts on a duplicate id or claim number
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Loads a claim by identifier
    async fn load_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Stores an updated claim if the stored version equals `expected_version`
    async fn save_claim(&self, claim: &Claim, expected_version: u64) -> Result<(), PortError>;

    /// Finds claims matching a query, newest first
    async fn find_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError>;
}

/// In-memory implementation of ClaimsPort
///
/// Claims are held as JSON documents, the same nested shape a document
/// column would hold, so every load exercises the stored representation.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use chrono::Utc;
    use serde_json::Value;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};

    #[derive(Debug, Clone)]
    struct StoredClaim {
        claim_number: String,
        version: u64,
        document: Value,
    }

    /// In-memory claim store
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryClaimsPort {
        claims: Arc<RwLock<HashMap<ClaimId, StoredClaim>>>,
    }

    impl InMemoryClaimsPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims for testing, bypassing uniqueness checks
        pub async fn with_claims(claims: Vec<Claim>) -> Result<Self, PortError> {
            let port = Self::new();
            {
                let mut stored = port.claims.write().await;
                for claim in claims {
                    stored.insert(claim.id(), to_stored(&claim)?);
                }
            }
            Ok(port)
        }

        /// Raw stored document, as an adapter would read it back
        pub async fn document(&self, id: ClaimId) -> Option<Value> {
            self.claims.read().await.get(&id).map(|s| s.document.clone())
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }
    }

    fn to_stored(claim: &Claim) -> Result<StoredClaim, PortError> {
        let document = serde_json::to_value(claim)
            .map_err(|e| PortError::transformation(e.to_string()))?;
        Ok(StoredClaim {
            claim_number: claim.claim_number().to_string(),
            version: claim.version(),
            document,
        })
    }

    fn from_stored(stored: &StoredClaim) -> Result<Claim, PortError> {
        serde_json::from_value(stored.document.clone())
            .map_err(|e| PortError::transformation(e.to_string()))
    }

    impl DomainPort for InMemoryClaimsPort {}

    #[async_trait]
    impl HealthCheckable for InMemoryClaimsPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-claims-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some(format!("{} claims held", self.len().await)),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimsPort for InMemoryClaimsPort {
        async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            if claims.contains_key(&claim.id()) {
                return Err(PortError::conflict(format!("claim {} already exists", claim.id())));
            }
            if claims.values().any(|s| s.claim_number == claim.claim_number()) {
                return Err(PortError::conflict(format!(
                    "claim number {} already exists",
                    claim.claim_number()
                )));
            }
            claims.insert(claim.id(), to_stored(claim)?);
            Ok(())
        }

        async fn load_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
            let claims = self.claims.read().await;
            let stored = claims.get(&id).ok_or_else(|| PortError::not_found("Claim", id))?;
            from_stored(stored)
        }

        async fn save_claim(&self, claim: &Claim, expected_version: u64) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            let stored = claims
                .get_mut(&claim.id())
                .ok_or_else(|| PortError::not_found("Claim", claim.id()))?;
            if stored.version != expected_version {
                return Err(PortError::conflict(format!(
                    "claim {} is at version {}, expected {}",
                    claim.id(),
                    stored.version,
                    expected_version
                )));
            }
            *stored = to_stored(claim)?;
            Ok(())
        }

        async fn find_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
            let claims = self.claims.read().await;
            let mut results = claims
                .values()
                .map(from_stored)
                .collect::<Result<Vec<_>, _>>()?;
            results.retain(|c| query.matches(c));
            results.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.claim_number().cmp(a.claim_number()))
            });

            let offset = query.offset.unwrap_or(0) as usize;
            let limit = query.limit.map_or(usize::MAX, |l| l as usize);
            Ok(results.into_iter().skip(offset).take(limit).collect())
        }
    }
}
