//! The read path — single, batch, and paged scoring plus analytics reads.
//!
//! Per-request errors stay local to that request; nothing here ever touches
//! the analytics cache except to read it or to fill it on a first miss.

use crate::{
    analytics::{self, AnalyticsSnapshot},
    cache::AnalyticsCache,
    error::{AdvisorError, AdvisorResult},
    scorer::{CustomerScorer, ScoredCustomer},
    store::AdvisorStore,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerPage {
    pub offset: u64,
    pub limit: u64,
    pub records_returned: usize,
    pub data: Vec<ScoredCustomer>,
}

pub struct AdvisorService {
    store: AdvisorStore,
    scorer: CustomerScorer,
    cache: Arc<AnalyticsCache>,
}

impl AdvisorService {
    pub fn new(store: AdvisorStore, scorer: CustomerScorer, cache: Arc<AnalyticsCache>) -> Self {
        Self {
            store,
            scorer,
            cache,
        }
    }

    /// Score one customer by account number.
    pub fn customer(&self, account_number: &str) -> AdvisorResult<ScoredCustomer> {
        let record = self
            .store
            .find_customer(account_number)?
            .ok_or_else(|| AdvisorError::NotFound {
                account: account_number.to_string(),
            })?;
        Ok(self.scorer.score_customer(&record))
    }

    /// Score every dataset row matching one of the given accounts.
    /// An entirely unmatched batch is an error, not an empty success.
    pub fn customers_batch(&self, accounts: &[String]) -> AdvisorResult<Vec<ScoredCustomer>> {
        let records = self.store.find_customers(accounts)?;
        if records.is_empty() {
            return Err(AdvisorError::NoMatches);
        }
        Ok(records
            .iter()
            .map(|r| self.scorer.score_customer(r))
            .collect())
    }

    pub fn customers_page(&self, offset: u64, limit: u64) -> AdvisorResult<CustomerPage> {
        let records = self.store.customers_page(offset, limit)?;
        let data: Vec<ScoredCustomer> = records
            .iter()
            .map(|r| self.scorer.score_customer(r))
            .collect();
        Ok(CustomerPage {
            offset,
            limit,
            records_returned: data.len(),
            data,
        })
    }

    /// The current analytics snapshot. When the background refresher has not
    /// produced one yet, aggregate now; if that also fails there is nothing
    /// to serve.
    pub fn analytics(&self) -> AdvisorResult<Arc<AnalyticsSnapshot>> {
        if let Some(snapshot) = self.cache.get() {
            return Ok(snapshot);
        }
        match analytics::aggregate(&self.store) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.cache.replace(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => {
                log::warn!("analytics: on-demand aggregation failed: {e}");
                Err(AdvisorError::AnalyticsUnavailable)
            }
        }
    }
}
