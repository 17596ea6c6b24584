//! Product recommendation rules — ordered, independent, no short-circuit.
//!
//! RULES:
//!   - Every rule evaluates for every customer, in declaration order.
//!   - A customer may match zero, one, or many rules; matches append.
//!   - Duplicates are kept at the customer level. The trailing school-fee
//!     rule re-adds the tuition product on purpose, so it can appear twice
//!     for the same customer. Observed behavior — do not deduplicate.
//!   - When nothing matched, the generic fallback product is emitted.
//!
//! Thresholds and product/reason strings are constants, never computed.

use crate::customer::CustomerRecord;
use serde::{Deserialize, Serialize};

// ── Thresholds (RWF) ─────────────────────────────────────────────────────────

pub const MORTGAGE_MIN_AVG_SPEND: f64 = 50_000.0;
pub const CREDIT_LINE_MIN_AVG_SPEND: f64 = 80_000.0;
pub const BILL_PAY_MIN_AVG_SPEND: f64 = 10_000.0;

// ── Category phrase sets (matched case-insensitively) ────────────────────────

const SALARY_EARNER_PHRASES: &[&str] = &[
    "salary earners public",
    "salary earners private",
    "salary ear priv",
];

const MERCHANT_PHRASES: &[&str] = &["micro sme", "sole traders", "retail broker"];

/// One recommended product with the reason it was offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: String,
    pub reason: String,
}

impl Recommendation {
    fn new(product: &str, reason: &str) -> Self {
        Self {
            product: product.to_string(),
            reason: reason.to_string(),
        }
    }
}

type RuleFn = fn(&CustomerRecord, &str) -> Vec<Recommendation>;

/// The rule table. Declaration order is part of the observed contract —
/// recommendation lists are compared downstream, so never reorder entries.
const RULES: &[(&str, RuleFn)] = &[
    ("agriculture", agriculture),
    ("salary_earner", salary_earner),
    ("student", student),
    ("bank_staff", bank_staff),
    ("school_fees", school_fees),
    ("merchant_sme", merchant_sme),
    ("credit_card_high_spend", credit_card_high_spend),
    ("import_export", import_export),
    ("utility_and_internet", utility_and_internet),
    ("school_fees_fallback", school_fees_fallback),
    ("mobile_money_spender", mobile_money_spender),
];

/// Evaluate every rule against one customer. Never returns an empty list.
pub fn recommend(c: &CustomerRecord) -> Vec<Recommendation> {
    let category = c.customer_account_category.to_lowercase();
    let mut products = Vec::new();
    for (_, rule) in RULES {
        products.extend(rule(c, &category));
    }
    if products.is_empty() {
        products.push(Recommendation::new(
            "General Banking Package",
            "No clear pattern detected, but offer general BK services",
        ));
    }
    products
}

// ── Rules, in declaration order ──────────────────────────────────────────────

/// Soft match for primary agricultural producers.
fn agriculture(_c: &CustomerRecord, category: &str) -> Vec<Recommendation> {
    if !category.contains("agricul") {
        return Vec::new();
    }
    vec![Recommendation::new(
        "Agri Loan",
        "Tailored for agricultural financing needs",
    )]
}

fn salary_earner(c: &CustomerRecord, category: &str) -> Vec<Recommendation> {
    if !SALARY_EARNER_PHRASES.iter().any(|p| category.contains(p)) {
        return Vec::new();
    }
    let mut out = vec![
        Recommendation::new("BK Quick", "Suitable for salary advances up to RWF 500k"),
        Recommendation::new("BK Quick Plus", "Higher limit loan with no collateral"),
    ];
    if c.avg_spend_amt > MORTGAGE_MIN_AVG_SPEND {
        out.push(Recommendation::new(
            "Mortgage Loan",
            "Eligible based on income and expense level",
        ));
    }
    out
}

fn student(_c: &CustomerRecord, category: &str) -> Vec<Recommendation> {
    if !category.contains("student") {
        return Vec::new();
    }
    vec![
        Recommendation::new(
            "Student Savings Account",
            "Ideal for managing low income and savings goals",
        ),
        Recommendation::new(
            "Prepaid Card",
            "Smart and safe way to manage student expenses",
        ),
    ]
}

fn bank_staff(_c: &CustomerRecord, category: &str) -> Vec<Recommendation> {
    if !category.contains("bk staff") {
        return Vec::new();
    }
    vec![
        Recommendation::new("BK Quick", "Special staff access to instant mobile loans"),
        Recommendation::new("BK Quick Plus", "Larger limit with quicker approval"),
        Recommendation::new("Mortgage Loan", "Staff-eligible housing finance solution"),
    ]
}

fn school_fees(c: &CustomerRecord, _category: &str) -> Vec<Recommendation> {
    if !c.has_paid_school {
        return Vec::new();
    }
    vec![
        Recommendation::new(
            "Tuza na BK",
            "Supports tuition fee payment with RWF 500k loan",
        ),
        Recommendation::new(
            "Kira Kibondo",
            "Children's saving account for long-term education goals",
        ),
    ]
}

fn merchant_sme(c: &CustomerRecord, category: &str) -> Vec<Recommendation> {
    let category_match = MERCHANT_PHRASES.iter().any(|p| category.contains(p));
    if !category_match && !c.merchant_payments {
        return Vec::new();
    }
    vec![
        Recommendation::new("SME Stock Loan", "Support inventory or stock purchase"),
        Recommendation::new("POS Device", "Enable seamless merchant payments"),
    ]
}

fn credit_card_high_spend(c: &CustomerRecord, _category: &str) -> Vec<Recommendation> {
    if !c.has_used_credit_card || c.avg_spend_amt <= CREDIT_LINE_MIN_AVG_SPEND {
        return Vec::new();
    }
    vec![
        Recommendation::new(
            "Secured Personal Loan",
            "Eligible due to card history and high spending",
        ),
        Recommendation::new("Credit Line", "Ongoing access to flexible credit"),
    ]
}

fn import_export(c: &CustomerRecord, _category: &str) -> Vec<Recommendation> {
    if !c.has_paid_for_import_export {
        return Vec::new();
    }
    vec![Recommendation::new(
        "SME Bank Guarantee",
        "Secure trade operations and guarantee obligations",
    )]
}

fn utility_and_internet(c: &CustomerRecord, _category: &str) -> Vec<Recommendation> {
    if !c.has_paid_utility || !c.has_paid_tv_internet {
        return Vec::new();
    }
    vec![
        Recommendation::new("Smart Save", "Digital savings based on active lifestyle"),
        Recommendation::new("BK Wallet", "Ideal for digital transactions and mobile pay"),
    ]
}

/// Re-adds the tuition product for school-fee payers with a generic reason.
/// Intentionally duplicates the earlier school-fee rule's product.
fn school_fees_fallback(c: &CustomerRecord, _category: &str) -> Vec<Recommendation> {
    if !c.has_paid_school {
        return Vec::new();
    }
    vec![Recommendation::new(
        "Tuza na BK",
        "Supports tuition fee payment even without strong profile match",
    )]
}

fn mobile_money_spender(c: &CustomerRecord, _category: &str) -> Vec<Recommendation> {
    if c.avg_spend_amt <= BILL_PAY_MIN_AVG_SPEND || !c.uses_mobile_money {
        return Vec::new();
    }
    vec![
        Recommendation::new(
            "Bill Payments",
            "Customer uses mobile money frequently and can benefit from paying utilities through BK",
        ),
        Recommendation::new(
            "Merchant Services",
            "Encourage use of BK POS and BK merchants for smoother digital payments",
        ),
    ]
}
