//! Section 75 eligibility evaluation
//!
//! Maps the facts of a card transaction to nine boolean checks in five groups.
//! Every check is always computed, because the result is shown to the customer
//! as an itemised checklist, and the overall verdict is the conjunction of all
//! nine.
//!
//! ```text
//! transactionType   isPurchaseOfGoodsOrServices, isNotRestrictedTransaction
//! purchaseMethod    wasCreditCardUsed, wasNotCashOrTransfer
//! transactionValue  overHundredPounds, underThirtyThousandPounds
//! timePeriod        withinSixYears
//! reasonForClaim    isValidReason, isNotChangeOfMind
//! ```

use std::fmt;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Lowest transaction value covered (inclusive)
pub const MIN_CLAIM_AMOUNT: Decimal = dec!(100);

/// Highest transaction value covered (inclusive)
pub const MAX_CLAIM_AMOUNT: Decimal = dec!(30000);

/// Six years approximated as 6 * 365 days, with no leap-day adjustment.
pub const CLAIM_WINDOW_DAYS: u64 = 6 * 365;

// Placeholders: intake does not capture purchase context yet, so these facts
// are assumed for every claim until the form collects them.
pub const IS_PURCHASE_OF_GOODS_OR_SERVICES: bool = true;
pub const IS_NOT_RESTRICTED_TRANSACTION: bool = true;
pub const WAS_CREDIT_CARD_USED: bool = true;
pub const WAS_NOT_CASH_OR_TRANSFER: bool = true;

/// Reason given by the customer for the dispute
///
/// Unknown reasons are kept verbatim rather than rejected; they simply fail
/// the `isValidReason` check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimReason {
    FaultyGoods,
    Misrepresentation,
    NonDelivery,
    SupplierFailure,
    ChangeOfMind,
    Other(String),
}

impl ClaimReason {
    pub fn as_str(&self) -> &str {
        match self {
            ClaimReason::FaultyGoods => "faulty-goods",
            ClaimReason::Misrepresentation => "misrepresentation",
            ClaimReason::NonDelivery => "non-delivery",
            ClaimReason::SupplierFailure => "supplier-failure",
            ClaimReason::ChangeOfMind => "change-of-mind",
            ClaimReason::Other(raw) => raw,
        }
    }

    /// Reasons that Section 75 recognises as grounds for a claim
    pub fn is_qualifying(&self) -> bool {
        matches!(
            self,
            ClaimReason::FaultyGoods
                | ClaimReason::Misrepresentation
                | ClaimReason::NonDelivery
                | ClaimReason::SupplierFailure
        )
    }
}

impl From<&str> for ClaimReason {
    fn from(raw: &str) -> Self {
        match raw {
            "faulty-goods" => ClaimReason::FaultyGoods,
            "misrepresentation" => ClaimReason::Misrepresentation,
            "non-delivery" => ClaimReason::NonDelivery,
            "supplier-failure" => ClaimReason::SupplierFailure,
            "change-of-mind" => ClaimReason::ChangeOfMind,
            other => ClaimReason::Other(other.to_string()),
        }
    }
}

impl From<String> for ClaimReason {
    fn from(raw: String) -> Self {
        ClaimReason::from(raw.as_str())
    }
}

impl From<ClaimReason> for String {
    fn from(reason: ClaimReason) -> Self {
        reason.as_str().to_string()
    }
}

impl fmt::Display for ClaimReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about the disputed transaction supplied at intake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFacts {
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub reason: ClaimReason,
}

impl TransactionFacts {
    pub fn new(amount: Decimal, transaction_date: NaiveDate, reason: impl Into<ClaimReason>) -> Self {
        Self {
            amount,
            transaction_date,
            reason: reason.into(),
        }
    }

    /// Rejects negative amounts and transaction dates after `today`
    pub fn validate(&self, today: NaiveDate) -> Result<(), ClaimError> {
        if self.amount < Decimal::ZERO {
            return Err(ClaimError::validation(format!(
                "transaction amount must not be negative, got {}",
                self.amount
            )));
        }
        if self.transaction_date > today {
            return Err(ClaimError::validation(format!(
                "transaction date {} is in the future",
                self.transaction_date
            )));
        }
        Ok(())
    }

    pub fn evaluate(&self, today: NaiveDate) -> EligibilityResult {
        evaluate(self.amount, self.transaction_date, &self.reason, today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTypeChecks {
    pub is_purchase_of_goods_or_services: bool,
    pub is_not_restricted_transaction: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseMethodChecks {
    pub was_credit_card_used: bool,
    pub was_not_cash_or_transfer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionValueChecks {
    pub over_hundred_pounds: bool,
    pub under_thirty_thousand_pounds: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriodChecks {
    pub within_six_years: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonForClaimChecks {
    pub is_valid_reason: bool,
    pub is_not_change_of_mind: bool,
}

/// A single line of the eligibility checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub group: &'static str,
    pub check: &'static str,
    pub passed: bool,
}

/// Outcome of an eligibility evaluation
///
/// Frozen onto the claim at creation; a different outcome needs a new claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub transaction_type: TransactionTypeChecks,
    pub purchase_method: PurchaseMethodChecks,
    pub transaction_value: TransactionValueChecks,
    pub time_period: TimePeriodChecks,
    pub reason_for_claim: ReasonForClaimChecks,
    pub is_eligible: bool,
}

impl EligibilityResult {
    /// Assembles a result from its groups, deriving the verdict
    pub fn from_checks(
        transaction_type: TransactionTypeChecks,
        purchase_method: PurchaseMethodChecks,
        transaction_value: TransactionValueChecks,
        time_period: TimePeriodChecks,
        reason_for_claim: ReasonForClaimChecks,
    ) -> Self {
        let mut result = Self {
            transaction_type,
            purchase_method,
            transaction_value,
            time_period,
            reason_for_claim,
            is_eligible: false,
        };
        result.is_eligible = result.checks().iter().all(|c| c.passed);
        result
    }

    /// All nine checks in display order
    pub fn checks(&self) -> [CheckOutcome; 9] {
        let outcome = |group, check, passed| CheckOutcome { group, check, passed };
        [
            outcome("transactionType", "isPurchaseOfGoodsOrServices", self.transaction_type.is_purchase_of_goods_or_services),
            outcome("transactionType", "isNotRestrictedTransaction", self.transaction_type.is_not_restricted_transaction),
            outcome("purchaseMethod", "wasCreditCardUsed", self.purchase_method.was_credit_card_used),
            outcome("purchaseMethod", "wasNotCashOrTransfer", self.purchase_method.was_not_cash_or_transfer),
            outcome("transactionValue", "overHundredPounds", self.transaction_value.over_hundred_pounds),
            outcome("transactionValue", "underThirtyThousandPounds", self.transaction_value.under_thirty_thousand_pounds),
            outcome("timePeriod", "withinSixYears", self.time_period.within_six_years),
            outcome("reasonForClaim", "isValidReason", self.reason_for_claim.is_valid_reason),
            outcome("reasonForClaim", "isNotChangeOfMind", self.reason_for_claim.is_not_change_of_mind),
        ]
    }

    pub fn failed_checks(&self) -> Vec<CheckOutcome> {
        self.checks().into_iter().filter(|c| !c.passed).collect()
    }
}

/// Evaluates Section 75 eligibility for a transaction as of `today`
pub fn evaluate(
    amount: Decimal,
    transaction_date: NaiveDate,
    reason: &ClaimReason,
    today: NaiveDate,
) -> EligibilityResult {
    let within_six_years = today
        .checked_sub_days(Days::new(CLAIM_WINDOW_DAYS))
        .map_or(true, |window_start| transaction_date >= window_start);

    EligibilityResult::from_checks(
        TransactionTypeChecks {
            is_purchase_of_goods_or_services: IS_PURCHASE_OF_GOODS_OR_SERVICES,
            is_not_restricted_transaction: IS_NOT_RESTRICTED_TRANSACTION,
        },
        PurchaseMethodChecks {
            was_credit_card_used: WAS_CREDIT_CARD_USED,
            was_not_cash_or_transfer: WAS_NOT_CASH_OR_TRANSFER,
        },
        TransactionValueChecks {
            over_hundred_pounds: amount >= MIN_CLAIM_AMOUNT,
            under_thirty_thousand_pounds: amount <= MAX_CLAIM_AMOUNT,
        },
        TimePeriodChecks { within_six_years },
        ReasonForClaimChecks {
            is_valid_reason: reason.is_qualifying(),
            is_not_change_of_mind: *reason != ClaimReason::ChangeOfMind,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_value_boundaries_are_inclusive() {
        let today = date(2024, 6, 1);
        let at_min = evaluate(dec!(100), today, &ClaimReason::FaultyGoods, today);
        let at_max = evaluate(dec!(30000), today, &ClaimReason::FaultyGoods, today);
        let below = evaluate(dec!(99.99), today, &ClaimReason::FaultyGoods, today);
        let above = evaluate(dec!(30000.01), today, &ClaimReason::FaultyGoods, today);

        assert!(at_min.is_eligible);
        assert!(at_max.is_eligible);
        assert!(!below.transaction_value.over_hundred_pounds);
        assert!(!above.transaction_value.under_thirty_thousand_pounds);
    }

    #[test]
    fn test_six_year_window_is_2190_days() {
        let today = date(2024, 6, 1);
        let edge = today - Days::new(2190);
        let past_edge = today - Days::new(2191);

        assert!(evaluate(dec!(500), edge, &ClaimReason::NonDelivery, today).time_period.within_six_years);
        assert!(!evaluate(dec!(500), past_edge, &ClaimReason::NonDelivery, today).time_period.within_six_years);
    }

    #[test]
    fn test_unknown_reason_is_accepted_but_fails_validity() {
        let today = date(2024, 6, 1);
        let reason = ClaimReason::from("billing-error");
        let result = evaluate(dec!(500), today, &reason, today);

        assert_eq!(reason, ClaimReason::Other("billing-error".to_string()));
        assert!(!result.reason_for_claim.is_valid_reason);
        assert!(result.reason_for_claim.is_not_change_of_mind);
        assert!(!result.is_eligible);
    }

    #[test]
    fn test_failed_checks_lists_only_failures() {
        let today = date(2024, 6, 1);
        let result = evaluate(dec!(50), today, &ClaimReason::ChangeOfMind, today);
        let failed: Vec<&str> = result.failed_checks().iter().map(|c| c.check).collect();

        assert_eq!(failed, vec!["overHundredPounds", "isValidReason", "isNotChangeOfMind"]);
    }

    #[test]
    fn test_validate_rejects_negative_amount_and_future_date() {
        let today = date(2024, 6, 1);
        assert!(TransactionFacts::new(dec!(-1), today, "faulty-goods").validate(today).is_err());
        assert!(TransactionFacts::new(dec!(500), date(2024, 6, 2), "faulty-goods").validate(today).is_err());
        assert!(TransactionFacts::new(dec!(0), today, "faulty-goods").validate(today).is_ok());
    }

    #[test]
    fn test_serialized_shape_is_nested() {
        let today = date(2024, 6, 1);
        let result = evaluate(dec!(2500), today, &ClaimReason::FaultyGoods, today);
        let json = serde_json::to_value(result).unwrap();

        assert_eq!(json["transactionValue"]["overHundredPounds"], true);
        assert_eq!(json["reasonForClaim"]["isNotChangeOfMind"], true);
        assert_eq!(json["isEligible"], true);
    }

    #[test]
    fn test_reason_serializes_as_wire_name() {
        let json = serde_json::to_string(&ClaimReason::SupplierFailure).unwrap();
        assert_eq!(json, "\"supplier-failure\"");
        let back: ClaimReason = serde_json::from_str("\"lost-parcel\"").unwrap();
        assert_eq!(back.as_str(), "lost-parcel");
    }
}
