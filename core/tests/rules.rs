use advisor_core::{customer::CustomerRecord, rules};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_record(category: &str) -> CustomerRecord {
    CustomerRecord {
        account_number: "4001".to_string(),
        customer_id: "c-4001".to_string(),
        customer_name: "Test Customer".to_string(),
        customer_account_category: category.to_string(),
        ..CustomerRecord::default()
    }
}

fn products(c: &CustomerRecord) -> Vec<String> {
    rules::recommend(c).into_iter().map(|r| r.product).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Fallback guarantee: the engine never returns an empty list, whatever the
/// input looks like.
#[test]
fn recommend_is_never_empty() {
    let nothing = make_record("Unknown");
    let recs = rules::recommend(&nothing);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].product, "General Banking Package");

    let everything = CustomerRecord {
        customer_account_category: "Agriculture Micro SME BK Staff Student".to_string(),
        avg_spend_amt: 100_000.0,
        has_paid_school: true,
        has_paid_utility: true,
        uses_mobile_money: true,
        merchant_payments: true,
        has_used_credit_card: true,
        has_paid_tv_internet: true,
        has_paid_for_import_export: true,
        ..CustomerRecord::default()
    };
    assert!(!rules::recommend(&everything).is_empty());
}

/// A school-fee payer who matches nothing else gets the tuition product
/// exactly twice: once from the school-fee rule, once from the trailing
/// fallback rule. Observed duplication, preserved on purpose.
#[test]
fn school_fee_payer_gets_tuition_product_twice() {
    let mut c = make_record("Unknown");
    c.has_paid_school = true;

    let got = products(&c);
    assert_eq!(got, vec!["Tuza na BK", "Kira Kibondo", "Tuza na BK"]);
    assert_eq!(got.iter().filter(|p| *p == "Tuza na BK").count(), 2);
}

/// The mortgage product is gated on average spend strictly above 50,000:
/// two otherwise-identical salary earners on either side of the threshold
/// differ by exactly one entry.
#[test]
fn salary_earner_mortgage_threshold_boundary() {
    let mut below = make_record("Salary Earners Private");
    below.avg_spend_amt = 49_999.0;
    let mut above = make_record("Salary Earners Private");
    above.avg_spend_amt = 50_001.0;

    let below_recs = rules::recommend(&below);
    let above_recs = rules::recommend(&above);
    assert_eq!(above_recs.len(), below_recs.len() + 1);
    assert!(above_recs.iter().any(|r| r.product == "Mortgage Loan"));
    assert!(!below_recs.iter().any(|r| r.product == "Mortgage Loan"));
}

/// End-to-end scenario pinned by the observed contract: a public salary
/// earner with avg spend 60k and school fees paid gets exactly these six
/// products, in rule-declaration order.
#[test]
fn salary_earner_with_school_fees_full_list() {
    let mut c = make_record("Salary Earners Public");
    c.avg_spend_amt = 60_000.0;
    c.has_paid_school = true;

    let got = products(&c);
    assert_eq!(
        got,
        vec![
            "BK Quick",
            "BK Quick Plus",
            "Mortgage Loan",
            "Tuza na BK",
            "Kira Kibondo",
            "Tuza na BK",
        ]
    );
}

/// Category matching is case-insensitive substring matching.
#[test]
fn category_match_is_case_insensitive() {
    let c = make_record("PRIMARY AGRICULTURAL PRODUCERS");
    assert_eq!(products(&c), vec!["Agri Loan"]);
}

/// The merchant rule fires on the category phrase set OR the
/// merchant_payments flag.
#[test]
fn merchant_rule_fires_on_flag_without_category() {
    let mut c = make_record("Unknown");
    c.merchant_payments = true;
    assert_eq!(products(&c), vec!["SME Stock Loan", "POS Device"]);
}

/// Credit-card rule needs both the flag and spend above 80,000.
#[test]
fn credit_card_rule_needs_both_conditions() {
    let mut card_only = make_record("Unknown");
    card_only.has_used_credit_card = true;
    card_only.avg_spend_amt = 80_000.0;
    assert_eq!(products(&card_only), vec!["General Banking Package"]);

    let mut both = make_record("Unknown");
    both.has_used_credit_card = true;
    both.avg_spend_amt = 80_001.0;
    assert_eq!(products(&both), vec!["Secured Personal Loan", "Credit Line"]);
}

/// Utility + TV/internet must both be present for the digital-lifestyle
/// pairing.
#[test]
fn utility_rule_needs_both_flags() {
    let mut utility_only = make_record("Unknown");
    utility_only.has_paid_utility = true;
    assert_eq!(products(&utility_only), vec!["General Banking Package"]);

    let mut both = make_record("Unknown");
    both.has_paid_utility = true;
    both.has_paid_tv_internet = true;
    assert_eq!(products(&both), vec!["Smart Save", "BK Wallet"]);
}

/// Mobile-money spenders above the low threshold get the bill-pay pair;
/// at or below it, nothing.
#[test]
fn mobile_money_spender_threshold() {
    let mut active = make_record("Unknown");
    active.uses_mobile_money = true;
    active.avg_spend_amt = 10_001.0;
    assert_eq!(products(&active), vec!["Bill Payments", "Merchant Services"]);

    let mut quiet = make_record("Unknown");
    quiet.uses_mobile_money = true;
    quiet.avg_spend_amt = 10_000.0;
    assert_eq!(products(&quiet), vec!["General Banking Package"]);
}

/// Matched rules append in declaration order with no short-circuit: a BK
/// staff member who is also an import/export payer sees the staff products
/// first, then the trade guarantee.
#[test]
fn matches_append_in_declaration_order() {
    let mut c = make_record("BK Staff");
    c.has_paid_for_import_export = true;
    assert_eq!(
        products(&c),
        vec![
            "BK Quick",
            "BK Quick Plus",
            "Mortgage Loan",
            "SME Bank Guarantee",
        ]
    );
}
