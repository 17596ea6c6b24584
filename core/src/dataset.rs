//! Dataset ingestion — the clustered customer CSV into the store.
//!
//! The loader is deliberately forgiving: any absent or unparseable numeric
//! or boolean cell coerces to 0/false, which is the invariant every scoring
//! and analytics path relies on.

use crate::{customer::CustomerRecord, error::AdvisorResult, store::AdvisorStore};
use csv::StringRecord;
use std::collections::HashMap;

/// Import every row of the CSV into the customer table.
/// Returns the number of imported rows.
pub fn import_csv(store: &AdvisorStore, path: &str) -> AdvisorResult<usize> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let mut imported = 0usize;
    for row in reader.records() {
        let row = row?;
        store.insert_customer(&record_from_row(&headers, &row))?;
        imported += 1;
    }
    log::info!("dataset: imported {imported} rows from {path}");
    Ok(imported)
}

fn record_from_row(headers: &HashMap<String, usize>, row: &StringRecord) -> CustomerRecord {
    CustomerRecord {
        account_number: text(headers, row, "account_number"),
        customer_id: text(headers, row, "customer_id"),
        customer_name: text(headers, row, "customer_name"),
        customer_account_category: text(headers, row, "customer_account_category"),
        total_txn_count: number(headers, row, "total_txn_count"),
        avg_spend_amt: number(headers, row, "avg_spend_amt"),
        total_spent: number(headers, row, "total_spent"),
        has_paid_school: flag(headers, row, "has_paid_school"),
        has_paid_utility: flag(headers, row, "has_paid_utility"),
        uses_mobile_money: flag(headers, row, "uses_mobile_money"),
        pays_taxes: flag(headers, row, "pays_taxes"),
        merchant_payments: flag(headers, row, "merchant_payments"),
        has_used_credit_card: flag(headers, row, "has_used_credit_card"),
        has_paid_tv_internet: flag(headers, row, "has_paid_tv_internet"),
        has_paid_gov_services: flag(headers, row, "has_paid_gov_services"),
        sent_money_to_china: flag(headers, row, "sent_money_to_china"),
        has_paid_for_import_export: flag(headers, row, "has_paid_for_import_export"),
        cluster: number(headers, row, "cluster") as i64,
        score_segment: {
            let s = text(headers, row, "score_segment");
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        },
    }
}

fn cell<'a>(headers: &HashMap<String, usize>, row: &'a StringRecord, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|i| row.get(*i))
        .unwrap_or("")
        .trim()
}

fn text(headers: &HashMap<String, usize>, row: &StringRecord, name: &str) -> String {
    cell(headers, row, name).to_string()
}

fn number(headers: &HashMap<String, usize>, row: &StringRecord, name: &str) -> f64 {
    cell(headers, row, name).parse::<f64>().unwrap_or(0.0)
}

/// Accepts 1/0, true/false in any case, and numeric strings (non-zero ⇒ true).
fn flag(headers: &HashMap<String, usize>, row: &StringRecord, name: &str) -> bool {
    let raw = cell(headers, row, name);
    if raw.eq_ignore_ascii_case("true") {
        return true;
    }
    if raw.eq_ignore_ascii_case("false") {
        return false;
    }
    raw.parse::<f64>().map(|v| v != 0.0).unwrap_or(false)
}
