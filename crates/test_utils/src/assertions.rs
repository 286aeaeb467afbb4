//! Custom Test Assertions
//!
//! Assertion helpers that print the failing checklist or the differing claim
//! fields instead of a bare `false`.

use domain_claims::{Claim, EligibilityResult};

/// Asserts that every check passed
pub fn assert_eligible(result: &EligibilityResult) {
    let failed = result.failed_checks();
    assert!(
        result.is_eligible && failed.is_empty(),
        "Expected eligible, failed checks: {:?}",
        failed.iter().map(|c| c.check).collect::<Vec<_>>()
    );
}

/// Asserts that the named check failed and the verdict is negative
pub fn assert_check_failed(result: &EligibilityResult, check: &str) {
    let outcome = result
        .checks()
        .into_iter()
        .find(|c| c.check == check)
        .unwrap_or_else(|| panic!("No eligibility check named {}", check));
    assert!(!outcome.passed, "Expected {} to fail", check);
    assert!(!result.is_eligible, "A failed check must make the claim ineligible");
}

/// Asserts two versions of a claim differ at most in status, modification
/// time and persistence version
pub fn assert_only_status_changed(before: &Claim, after: &Claim) {
    let mut before_doc = serde_json::to_value(before).expect("claim serializes");
    let mut after_doc = serde_json::to_value(after).expect("claim serializes");
    for field in ["status", "updated_at", "version"] {
        before_doc[field] = serde_json::Value::Null;
        after_doc[field] = serde_json::Value::Null;
    }
    assert_eq!(before_doc, after_doc, "Fields other than status changed");
}
