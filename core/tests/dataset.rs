use advisor_core::{dataset, store::AdvisorStore};
use std::fs;
use std::path::PathBuf;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn temp_csv(tag: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("advisor-{tag}-{}.csv", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

fn make_store() -> AdvisorStore {
    let store = AdvisorStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Pandas-style exports mix True/False, 1/0, and floats in flag columns —
/// the loader normalizes all of them.
#[test]
fn import_coerces_mixed_boolean_styles() {
    let csv = "\
account_number,customer_id,customer_name,customer_account_category,total_txn_count,avg_spend_amt,total_spent,has_paid_school,has_paid_utility,uses_mobile_money,pays_taxes,merchant_payments,has_used_credit_card,has_paid_tv_internet,has_paid_gov_services,sent_money_to_china,has_paid_for_import_export,cluster,score_segment
A1,c1,Alice,Student,10,25000,250000,True,1,1.0,0,False,0,0,0,0,0,2,high_value
B2,c2,Bob,Unknown,,,,,,,,,,,,,,,
";
    let path = temp_csv("bools", csv);
    let store = make_store();

    assert_eq!(dataset::import_csv(&store, path.to_str().unwrap()).unwrap(), 2);

    let alice = store.find_customer("A1").unwrap().unwrap();
    assert!(alice.has_paid_school);
    assert!(alice.has_paid_utility);
    assert!(alice.uses_mobile_money);
    assert!(!alice.merchant_payments);
    assert_eq!(alice.cluster, 2);
    assert_eq!(alice.score_segment.as_deref(), Some("high_value"));

    // Every absent cell coerces to 0/false/empty, not an error.
    let bob = store.find_customer("B2").unwrap().unwrap();
    assert_eq!(bob.total_txn_count, 0.0);
    assert_eq!(bob.avg_spend_amt, 0.0);
    assert!(!bob.has_paid_school);
    assert_eq!(bob.cluster, 0);
    assert!(bob.score_segment.is_none());

    fs::remove_file(&path).ok();
}

/// Columns the schema does not expect are ignored; columns the file lacks
/// default to 0/empty.
#[test]
fn import_tolerates_schema_drift() {
    let csv = "\
account_number,customer_name,extra_column,avg_spend_amt
A1,Alice,whatever,60000
";
    let path = temp_csv("drift", csv);
    let store = make_store();

    assert_eq!(dataset::import_csv(&store, path.to_str().unwrap()).unwrap(), 1);

    let alice = store.find_customer("A1").unwrap().unwrap();
    assert_eq!(alice.avg_spend_amt, 60_000.0);
    assert_eq!(alice.customer_account_category, "");
    assert_eq!(alice.customer_id, "");

    fs::remove_file(&path).ok();
}

/// A missing file is a dataset error, not a panic.
#[test]
fn import_missing_file_is_an_error() {
    let store = make_store();
    assert!(dataset::import_csv(&store, "/nonexistent/data.csv").is_err());
}
