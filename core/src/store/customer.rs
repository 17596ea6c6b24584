use super::AdvisorStore;
use crate::{customer::CustomerRecord, error::AdvisorResult, types::ClusterId};
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const CUSTOMER_COLUMNS: &str = "account_number, customer_id, customer_name, \
     customer_account_category, total_txn_count, avg_spend_amt, total_spent, \
     has_paid_school, has_paid_utility, uses_mobile_money, pays_taxes, \
     merchant_payments, has_used_credit_card, has_paid_tv_internet, \
     has_paid_gov_services, sent_money_to_china, has_paid_for_import_export, \
     cluster, score_segment";

fn row_to_customer(row: &Row) -> rusqlite::Result<CustomerRecord> {
    Ok(CustomerRecord {
        account_number: row.get(0)?,
        customer_id: row.get(1)?,
        customer_name: row.get(2)?,
        customer_account_category: row.get(3)?,
        total_txn_count: row.get(4)?,
        avg_spend_amt: row.get(5)?,
        total_spent: row.get(6)?,
        has_paid_school: row.get::<_, i64>(7)? != 0,
        has_paid_utility: row.get::<_, i64>(8)? != 0,
        uses_mobile_money: row.get::<_, i64>(9)? != 0,
        pays_taxes: row.get::<_, i64>(10)? != 0,
        merchant_payments: row.get::<_, i64>(11)? != 0,
        has_used_credit_card: row.get::<_, i64>(12)? != 0,
        has_paid_tv_internet: row.get::<_, i64>(13)? != 0,
        has_paid_gov_services: row.get::<_, i64>(14)? != 0,
        sent_money_to_china: row.get::<_, i64>(15)? != 0,
        has_paid_for_import_export: row.get::<_, i64>(16)? != 0,
        cluster: row.get(17)?,
        score_segment: row.get(18)?,
    })
}

impl AdvisorStore {
    // ── Customer dataset ─────────────────────────────────────────

    pub fn insert_customer(&self, c: &CustomerRecord) -> AdvisorResult<()> {
        self.conn.execute(
            "INSERT INTO customer (
                account_number, customer_id, customer_name,
                customer_account_category, total_txn_count, avg_spend_amt,
                total_spent, has_paid_school, has_paid_utility,
                uses_mobile_money, pays_taxes, merchant_payments,
                has_used_credit_card, has_paid_tv_internet,
                has_paid_gov_services, sent_money_to_china,
                has_paid_for_import_export, cluster, score_segment
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                      ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                &c.account_number,
                &c.customer_id,
                &c.customer_name,
                &c.customer_account_category,
                c.total_txn_count,
                c.avg_spend_amt,
                c.total_spent,
                c.has_paid_school as i64,
                c.has_paid_utility as i64,
                c.uses_mobile_money as i64,
                c.pays_taxes as i64,
                c.merchant_payments as i64,
                c.has_used_credit_card as i64,
                c.has_paid_tv_internet as i64,
                c.has_paid_gov_services as i64,
                c.sent_money_to_china as i64,
                c.has_paid_for_import_export as i64,
                c.cluster,
                c.score_segment.as_deref(),
            ],
        )?;
        Ok(())
    }

    /// First row matching the account, in dataset order.
    pub fn find_customer(&self, account_number: &str) -> AdvisorResult<Option<CustomerRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer
             WHERE account_number = ?1 ORDER BY rowid LIMIT 1"
        ))?;
        stmt.query_row(params![account_number], row_to_customer)
            .optional()
            .map_err(Into::into)
    }

    /// Every row whose account is in the given set, in dataset order.
    pub fn find_customers(&self, accounts: &[String]) -> AdvisorResult<Vec<CustomerRecord>> {
        if accounts.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=accounts.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer
             WHERE account_number IN ({placeholders}) ORDER BY rowid"
        ))?;
        let rows = stmt.query_map(params_from_iter(accounts.iter()), row_to_customer)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn customers_page(&self, offset: u64, limit: u64) -> AdvisorResult<Vec<CustomerRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer
             ORDER BY rowid LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], row_to_customer)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn all_customers(&self) -> AdvisorResult<Vec<CustomerRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], row_to_customer)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn distinct_account_count(&self) -> AdvisorResult<i64> {
        self.conn
            .query_row("SELECT COUNT(DISTINCT account_number) FROM customer", [], |r| {
                r.get(0)
            })
            .map_err(Into::into)
    }

    /// Distinct accounts per cluster label, ascending by cluster id.
    pub fn cluster_distribution(&self) -> AdvisorResult<Vec<(ClusterId, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT cluster, COUNT(DISTINCT account_number) FROM customer
             GROUP BY cluster ORDER BY cluster",
        )?;
        let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Row counts per score_segment value, most frequent first.
    /// Rows without a segment are skipped.
    pub fn segment_counts(&self) -> AdvisorResult<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT score_segment, COUNT(*) FROM customer
             WHERE score_segment IS NOT NULL AND score_segment != ''
             GROUP BY score_segment
             ORDER BY COUNT(*) DESC, score_segment",
        )?;
        let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
