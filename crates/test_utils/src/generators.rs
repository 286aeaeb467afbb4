//! Property-Based Test Generators
//!
//! Proptest strategies for transaction facts and claim data.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{ClaimReason, ClaimStatus, EvidenceFile, TransactionFacts};

/// Amounts in pence from 0 to £50,000, covering every tier and both limits
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|pence| Decimal::new(pence, 2))
}

/// Any two-decimal amount, negatives included
pub fn any_amount_strategy() -> impl Strategy<Value = Decimal> {
    any::<i64>().prop_map(|pence| Decimal::new(pence, 2))
}

/// Known reasons plus arbitrary free text
pub fn reason_strategy() -> impl Strategy<Value = ClaimReason> {
    prop_oneof![
        Just(ClaimReason::FaultyGoods),
        Just(ClaimReason::Misrepresentation),
        Just(ClaimReason::NonDelivery),
        Just(ClaimReason::SupplierFailure),
        Just(ClaimReason::ChangeOfMind),
        "[a-z]{3,12}(-[a-z]{3,8})?".prop_map(ClaimReason::from),
    ]
}

/// Qualifying reasons only
pub fn qualifying_reason_strategy() -> impl Strategy<Value = ClaimReason> {
    prop_oneof![
        Just(ClaimReason::FaultyGoods),
        Just(ClaimReason::Misrepresentation),
        Just(ClaimReason::NonDelivery),
        Just(ClaimReason::SupplierFailure),
    ]
}

/// Dates from ten years before `today` up to `today`
pub fn transaction_date_strategy(today: NaiveDate) -> impl Strategy<Value = NaiveDate> {
    (0u64..=3650u64).prop_map(move |days_back| today - Days::new(days_back))
}

pub fn transaction_facts_strategy(today: NaiveDate) -> impl Strategy<Value = TransactionFacts> {
    (amount_strategy(), transaction_date_strategy(today), reason_strategy())
        .prop_map(|(amount, date, reason)| TransactionFacts::new(amount, date, reason))
}

pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    proptest::sample::select(ClaimStatus::ALL.to_vec())
}

pub fn evidence_file_strategy() -> impl Strategy<Value = EvidenceFile> {
    (
        "[a-z]{1,12}\\.(pdf|jpg|png)",
        0u64..20_000_000u64,
        prop_oneof![
            Just("application/pdf".to_string()),
            Just("image/jpeg".to_string()),
            Just("image/png".to_string()),
        ],
    )
        .prop_map(|(name, size, content_type)| EvidenceFile {
            locator: format!("evidence/{}", name),
            name,
            size,
            content_type,
        })
}
