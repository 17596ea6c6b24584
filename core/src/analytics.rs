//! Analytics aggregation — full-dataset summary built over a derived
//! recommendations table.
//!
//! One aggregation pass:
//!   1. (Re)generates the recommendations table when it is empty.
//!   2. Joins every customer row against its stored recommendation document.
//!   3. Folds totals, cluster distribution, top products, and segment counts
//!      into one immutable snapshot.
//!
//! Failure policy lives with the callers: the cache keeps serving the
//! previous snapshot on an Err, and the service surfaces unavailability only
//! when no snapshot has ever been computed.

use crate::{
    error::AdvisorResult,
    rules::{self, Recommendation},
    store::AdvisorStore,
    types::ClusterId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialization version of the stored recommendation document.
pub const RECOMMENDATION_DOC_VERSION: u32 = 1;

pub const TOP_PRODUCT_LIMIT: usize = 10;

// ── Recommendation document codec ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDoc {
    pub version: u32,
    pub items: Vec<Recommendation>,
}

pub fn encode_recommendations(items: &[Recommendation]) -> AdvisorResult<String> {
    let doc = RecommendationDoc {
        version: RECOMMENDATION_DOC_VERSION,
        items: items.to_vec(),
    };
    serde_json::to_string(&doc).map_err(Into::into)
}

/// Decode a stored recommendation document.
/// Fails closed: anything malformed decodes to the empty list.
pub fn decode_recommendations(raw: &str) -> Vec<Recommendation> {
    match serde_json::from_str::<RecommendationDoc>(raw) {
        Ok(doc) if doc.version == RECOMMENDATION_DOC_VERSION => doc.items,
        Ok(doc) => {
            log::warn!(
                "analytics: unknown recommendation document version {} ignored",
                doc.version
            );
            Vec::new()
        }
        Err(e) => {
            log::warn!("analytics: malformed recommendation document ignored: {e}");
            Vec::new()
        }
    }
}

// ── Snapshot ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterShare {
    pub cluster: ClusterId,
    pub value: i64,
    /// Share of distinct accounts, formatted "NN.NN%".
    pub percentage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCount {
    pub name: String,
    pub value: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentCount {
    pub name: String,
    pub value: i64,
}

/// Immutable analytics summary over the whole dataset.
/// Created wholesale by `aggregate`, replaced wholesale by the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub total_customers: i64,
    pub total_recommendations: i64,
    pub avg_products_per_customer: f64,
    pub cluster_distribution: Vec<ClusterShare>,
    pub product_recommendations: Vec<ProductCount>,
    pub customer_segments: Vec<SegmentCount>,
    pub last_updated: DateTime<Utc>,
}

// ── Generation pass ──────────────────────────────────────────────────────────

/// Write the derived recommendations table: one row per account, the rule
/// engine's output encoded as a versioned document. When the dataset repeats
/// an account, the later row wins.
pub fn generate_recommendations(store: &AdvisorStore) -> AdvisorResult<usize> {
    let customers = store.all_customers()?;
    let generated_at = Utc::now().to_rfc3339();
    let mut written = 0usize;
    for c in &customers {
        let document = encode_recommendations(&rules::recommend(c))?;
        store.upsert_recommendation(&c.account_number, &document, &generated_at)?;
        written += 1;
    }
    log::info!("analytics: recommendation table generated ({written} rows)");
    Ok(written)
}

// ── Aggregation pass ─────────────────────────────────────────────────────────

pub fn aggregate(store: &AdvisorStore) -> AdvisorResult<AnalyticsSnapshot> {
    // (Re)build the join cache when it is missing. A failed generation is
    // not fatal — fall back to running the rule engine per row instead.
    let mut direct_compute = false;
    if store.recommendation_row_count()? == 0 {
        if let Err(e) = generate_recommendations(store) {
            log::warn!("analytics: generation failed, computing recommendations directly: {e}");
            direct_compute = true;
        }
    }

    let rows = store.customers_with_recommendations()?;
    let total_customers = store.distinct_account_count()?;

    let mut total_recommendations: i64 = 0;
    let mut product_counts: HashMap<String, i64> = HashMap::new();
    for (record, document) in &rows {
        let items = match document {
            Some(raw) => decode_recommendations(raw),
            None if direct_compute => rules::recommend(record),
            // Populated table, uncovered account: counts as no recommendations.
            None => Vec::new(),
        };
        total_recommendations += items.len() as i64;
        for item in &items {
            *product_counts.entry(item.product.clone()).or_insert(0) += 1;
        }
    }

    let avg_products_per_customer = if total_customers > 0 {
        round2(total_recommendations as f64 / total_customers as f64)
    } else {
        0.0
    };

    let cluster_distribution = store
        .cluster_distribution()?
        .into_iter()
        .map(|(cluster, value)| ClusterShare {
            cluster,
            value,
            percentage: format!("{:.2}%", value as f64 / total_customers as f64 * 100.0),
        })
        .collect();

    // Descending count; ties by name so snapshots are deterministic.
    let mut ranked: Vec<(String, i64)> = product_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let product_recommendations = ranked
        .into_iter()
        .take(TOP_PRODUCT_LIMIT)
        .map(|(name, value)| ProductCount {
            name,
            value,
            description: "Top recommended product.".to_string(),
        })
        .collect();

    let customer_segments = store
        .segment_counts()?
        .into_iter()
        .map(|(name, value)| SegmentCount { name, value })
        .collect();

    Ok(AnalyticsSnapshot {
        total_customers,
        total_recommendations,
        avg_products_per_customer,
        cluster_distribution,
        product_recommendations,
        customer_segments,
        last_updated: Utc::now(),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
