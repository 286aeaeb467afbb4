//! Monetary tier classification
//!
//! ```text
//! [100, 1000)     Tier1
//! [1000, 5000)    Tier2
//! [5000, 10000)   Tier3
//! [10000, 30000]  Tier4   (closed at the top, matching the eligibility ceiling)
//! otherwise       Unclassified
//! ```

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::eligibility::{MAX_CLAIM_AMOUNT, MIN_CLAIM_AMOUNT};

const TIER_2_FLOOR: Decimal = dec!(1000);
const TIER_3_FLOOR: Decimal = dec!(5000);
const TIER_4_FLOOR: Decimal = dec!(10000);

/// Claim tier derived from the transaction amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Unclassified,
}

impl ClaimTier {
    /// Classifies an amount. Total over all decimals.
    pub fn classify(amount: Decimal) -> Self {
        if amount >= MIN_CLAIM_AMOUNT && amount < TIER_2_FLOOR {
            ClaimTier::Tier1
        } else if amount >= TIER_2_FLOOR && amount < TIER_3_FLOOR {
            ClaimTier::Tier2
        } else if amount >= TIER_3_FLOOR && amount < TIER_4_FLOOR {
            ClaimTier::Tier3
        } else if amount >= TIER_4_FLOOR && amount <= MAX_CLAIM_AMOUNT {
            ClaimTier::Tier4
        } else {
            ClaimTier::Unclassified
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimTier::Tier1 => "Tier1",
            ClaimTier::Tier2 => "Tier2",
            ClaimTier::Tier3 => "Tier3",
            ClaimTier::Tier4 => "Tier4",
            ClaimTier::Unclassified => "Unclassified",
        }
    }

    /// Customer-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ClaimTier::Tier1 => "Class 1",
            ClaimTier::Tier2 => "Class 2",
            ClaimTier::Tier3 => "Class 3",
            ClaimTier::Tier4 => "Class 4",
            ClaimTier::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for ClaimTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an amount into its claim tier
pub fn classify(amount: Decimal) -> ClaimTier {
    ClaimTier::classify(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(dec!(99.99)), ClaimTier::Unclassified);
        assert_eq!(classify(dec!(100)), ClaimTier::Tier1);
        assert_eq!(classify(dec!(999.99)), ClaimTier::Tier1);
        assert_eq!(classify(dec!(1000)), ClaimTier::Tier2);
        assert_eq!(classify(dec!(4999.99)), ClaimTier::Tier2);
        assert_eq!(classify(dec!(5000)), ClaimTier::Tier3);
        assert_eq!(classify(dec!(9999.99)), ClaimTier::Tier3);
        assert_eq!(classify(dec!(10000)), ClaimTier::Tier4);
        assert_eq!(classify(dec!(30000)), ClaimTier::Tier4);
        assert_eq!(classify(dec!(30000.01)), ClaimTier::Unclassified);
    }

    #[test]
    fn test_negative_and_zero_are_unclassified() {
        assert_eq!(classify(dec!(0)), ClaimTier::Unclassified);
        assert_eq!(classify(dec!(-500)), ClaimTier::Unclassified);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ClaimTier::Tier2.label(), "Class 2");
        assert_eq!(ClaimTier::Unclassified.label(), "Unclassified");
        assert_eq!(serde_json::to_string(&ClaimTier::Tier4).unwrap(), "\"Tier4\"");
    }
}
