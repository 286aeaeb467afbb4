//! Test Data Builders
//!
//! Builds claim submissions with sensible defaults so tests only state the
//! fields they care about. Customer details are generated with `fake`.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use domain_claims::{ClaimReason, NewClaimRequest, TransactionFacts};

use crate::fixtures::ScenarioFixtures;

/// Builder for claim submissions
pub struct NewClaimRequestBuilder {
    customer_name: String,
    account_number: String,
    merchant_name: String,
    description: String,
    amount: Decimal,
    transaction_date: NaiveDate,
    reason: ClaimReason,
    submitted_by: String,
}

impl Default for NewClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClaimRequestBuilder {
    /// Starts from the eligible Tier2 scenario
    pub fn new() -> Self {
        let facts = ScenarioFixtures::faulty_goods_tier2();
        let account: u32 = (10_000_000..99_999_999).fake();
        Self {
            customer_name: Name().fake(),
            account_number: account.to_string(),
            merchant_name: CompanyName().fake(),
            description: Sentence(4..12).fake(),
            amount: facts.amount,
            transaction_date: facts.transaction_date,
            reason: facts.reason,
            submitted_by: "customer-1".to_string(),
        }
    }

    /// Takes amount, date and reason from a scenario
    pub fn from_facts(facts: TransactionFacts) -> Self {
        Self::new()
            .with_amount(facts.amount)
            .with_transaction_date(facts.transaction_date)
            .with_reason(facts.reason)
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    pub fn with_merchant_name(mut self, name: impl Into<String>) -> Self {
        self.merchant_name = name.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_transaction_date(mut self, date: NaiveDate) -> Self {
        self.transaction_date = date;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<ClaimReason>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn submitted_by(mut self, customer: impl Into<String>) -> Self {
        self.submitted_by = customer.into();
        self
    }

    pub fn build(self) -> NewClaimRequest {
        NewClaimRequest {
            customer_name: self.customer_name,
            account_number: self.account_number,
            merchant_name: self.merchant_name,
            description: self.description,
            amount: self.amount,
            transaction_date: self.transaction_date,
            reason: self.reason,
            submitted_by: self.submitted_by,
        }
    }
}
