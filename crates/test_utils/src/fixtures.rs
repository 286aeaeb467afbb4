//! Pre-built Test Fixtures
//!
//! Fixed dates and the worked claim scenarios, so results do not depend on
//! the day the suite runs.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::ports::mock::InMemoryClaimsPort;
use domain_claims::{
    ClaimNumberGenerator, ClaimReason, ClaimsConfig, ClaimsService, EvidenceFile, TransactionFacts,
};

/// Fixture for time values
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Evaluation instant used across the suite
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    /// Calendar date of [`TemporalFixtures::now`]
    pub fn today() -> NaiveDate {
        Self::now().date_naive()
    }

    /// An instant `seconds` after [`TemporalFixtures::now`]
    pub fn later(seconds: i64) -> DateTime<Utc> {
        Self::now() + chrono::Duration::seconds(seconds)
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Worked scenarios with known outcomes
pub struct ScenarioFixtures;

impl ScenarioFixtures {
    /// £2,500 faulty sofa: eligible, Tier2
    pub fn faulty_goods_tier2() -> TransactionFacts {
        TransactionFacts::new(dec!(2500.00), TemporalFixtures::date(2024, 1, 15), ClaimReason::FaultyGoods)
    }

    /// £15,750 undelivered order: eligible, Tier4
    pub fn non_delivery_tier4() -> TransactionFacts {
        TransactionFacts::new(dec!(15750.00), TemporalFixtures::date(2023, 11, 28), ClaimReason::NonDelivery)
    }

    /// £50 purchase: below the floor
    pub fn below_floor() -> TransactionFacts {
        TransactionFacts::new(dec!(50.00), TemporalFixtures::date(2024, 3, 10), ClaimReason::Misrepresentation)
    }

    /// £35,000 purchase: above the ceiling
    pub fn above_ceiling() -> TransactionFacts {
        TransactionFacts::new(dec!(35000.00), TemporalFixtures::date(2024, 2, 20), ClaimReason::FaultyGoods)
    }

    /// £500 returned on a whim
    pub fn change_of_mind() -> TransactionFacts {
        TransactionFacts::new(dec!(500), TemporalFixtures::date(2024, 4, 2), ClaimReason::ChangeOfMind)
    }

    /// Amounts sitting exactly on a tier or eligibility boundary
    pub fn boundary_amounts() -> [Decimal; 5] {
        [dec!(100), dec!(1000), dec!(5000), dec!(10000), dec!(30000)]
    }
}

/// Fixture for evidence references
pub struct EvidenceFixtures;

impl EvidenceFixtures {
    pub fn receipt() -> EvidenceFile {
        EvidenceFile {
            name: "receipt.pdf".to_string(),
            size: 48_213,
            content_type: "application/pdf".to_string(),
            locator: "evidence/receipt.pdf".to_string(),
        }
    }

    pub fn photo() -> EvidenceFile {
        EvidenceFile {
            name: "damage.jpg".to_string(),
            size: 1_204_551,
            content_type: "image/jpeg".to_string(),
            locator: "evidence/damage.jpg".to_string(),
        }
    }
}

/// Claim number generator that always returns the same number
#[derive(Debug, Clone)]
pub struct FixedClaimNumbers(pub String);

impl ClaimNumberGenerator for FixedClaimNumbers {
    fn generate(&self, _now: DateTime<Utc>, _attempt: u32) -> String {
        self.0.clone()
    }
}

/// A service over a fresh in-memory store, with the store handle for inspection
pub fn service_with_memory_store() -> (ClaimsService, InMemoryClaimsPort) {
    let store = InMemoryClaimsPort::new();
    let service = ClaimsService::new(Arc::new(store.clone()), ClaimsConfig::default());
    (service, store)
}
