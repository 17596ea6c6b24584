//! Customer dataset row — the unit every scoring and analytics path reads.

use crate::types::{AccountNumber, ClusterId};
use serde::{Deserialize, Serialize};

/// One row of the clustered customer dataset.
///
/// INVARIANTS:
///   - Every numeric/boolean field coerces to 0/false when absent at
///     ingestion; no path downstream re-checks for missing values.
///   - `customer_account_category` is always present (possibly empty) and is
///     matched case-insensitively by the rule engine.
///   - `cluster` is the training-assigned label carried by the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRecord {
    pub account_number: AccountNumber,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_account_category: String,
    pub total_txn_count: f64,
    pub avg_spend_amt: f64,
    pub total_spent: f64,
    pub has_paid_school: bool,
    pub has_paid_utility: bool,
    pub uses_mobile_money: bool,
    pub pays_taxes: bool,
    pub merchant_payments: bool,
    pub has_used_credit_card: bool,
    pub has_paid_tv_internet: bool,
    pub has_paid_gov_services: bool,
    pub sent_money_to_china: bool,
    pub has_paid_for_import_export: bool,
    pub cluster: ClusterId,
    pub score_segment: Option<String>,
}
