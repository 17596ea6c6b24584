use super::AdvisorStore;
use crate::{customer::CustomerRecord, error::AdvisorResult};
use rusqlite::params;

impl AdvisorStore {
    // ── Derived recommendations table ────────────────────────────

    pub fn upsert_recommendation(
        &self,
        account_number: &str,
        document: &str,
        generated_at: &str,
    ) -> AdvisorResult<()> {
        self.conn.execute(
            "INSERT INTO recommendation_result (account_number, recommendations, generated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(account_number) DO UPDATE SET
                 recommendations = excluded.recommendations,
                 generated_at    = excluded.generated_at",
            params![account_number, document, generated_at],
        )?;
        Ok(())
    }

    pub fn recommendation_row_count(&self) -> AdvisorResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM recommendation_result", [], |r| r.get(0))
            .map_err(Into::into)
    }

    /// Every customer row joined with its stored recommendation document,
    /// in dataset order. The document is None for accounts the generation
    /// pass has not covered.
    pub fn customers_with_recommendations(
        &self,
    ) -> AdvisorResult<Vec<(CustomerRecord, Option<String>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.account_number, c.customer_id, c.customer_name,
                    c.customer_account_category, c.total_txn_count,
                    c.avg_spend_amt, c.total_spent, c.has_paid_school,
                    c.has_paid_utility, c.uses_mobile_money, c.pays_taxes,
                    c.merchant_payments, c.has_used_credit_card,
                    c.has_paid_tv_internet, c.has_paid_gov_services,
                    c.sent_money_to_china, c.has_paid_for_import_export,
                    c.cluster, c.score_segment, r.recommendations
             FROM customer c
             LEFT JOIN recommendation_result r
               ON r.account_number = c.account_number
             ORDER BY c.rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            let record = CustomerRecord {
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
            };
            Ok((record, row.get(19)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
