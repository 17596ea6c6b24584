//! Per-customer scoring — cluster assignment fused with the product rules.

use crate::{
    classifier::ClusterClassifier,
    customer::CustomerRecord,
    features,
    rules::{self, Recommendation},
    types::ClusterId,
};
use serde::{Deserialize, Serialize};

/// One scored customer, as served by the read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCustomer {
    pub customer_id: String,
    pub customer_name: String,
    pub account_number: String,
    pub cluster: ClusterId,
    pub recommended_products: Vec<Recommendation>,
}

pub struct CustomerScorer {
    classifier: ClusterClassifier,
}

impl CustomerScorer {
    pub fn new(classifier: ClusterClassifier) -> Self {
        Self { classifier }
    }

    /// Cluster id + recommendation list for one record.
    /// Pure per call — safe to run concurrently for different records.
    pub fn score(&self, c: &CustomerRecord) -> (ClusterId, Vec<Recommendation>) {
        let cluster = self.classifier.classify(&features::feature_vector(c));
        (cluster, rules::recommend(c))
    }

    pub fn score_customer(&self, c: &CustomerRecord) -> ScoredCustomer {
        let (cluster, recommended_products) = self.score(c);
        ScoredCustomer {
            customer_id: c.customer_id.clone(),
            customer_name: c.customer_name.clone(),
            account_number: c.account_number.clone(),
            cluster,
            recommended_products,
        }
    }
}
