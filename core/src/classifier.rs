//! Cluster assignment — pre-fitted standard scaler + k-means centroids.
//!
//! Both artifacts come from the offline training pipeline and are loaded
//! once at process start. A load failure is fatal: without them no scoring
//! request can be served, so it is never a per-request error.

use crate::{
    error::{AdvisorError, AdvisorResult},
    features::{FeatureVector, FEATURE_COUNT},
    types::ClusterId,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub const SCALER_FILE: &str = "scaler.json";
pub const CLUSTER_MODEL_FILE: &str = "cluster_model.json";

/// Per-feature mean/scale pair fit by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Per-feature z-score. A zero scale entry passes the feature through
    /// unscaled, matching what the training pipeline stores for
    /// zero-variance columns.
    pub fn transform(&self, x: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let s = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            out[i] = (x[i] - self.mean[i]) / s;
        }
        out
    }
}

/// Fitted k-means centroids in scaled feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansModel {
    pub centroids: Vec<Vec<f64>>,
}

impl KMeansModel {
    /// Nearest centroid by squared Euclidean distance.
    /// Ties resolve to the lowest centroid index.
    pub fn predict(&self, x: &FeatureVector) -> ClusterId {
        let mut best = 0usize;
        let mut best_dist = f64::INFINITY;
        for (i, centroid) in self.centroids.iter().enumerate() {
            let dist: f64 = centroid
                .iter()
                .zip(x.iter())
                .map(|(c, v)| (c - v) * (c - v))
                .sum();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best as ClusterId
    }
}

#[derive(Debug)]
pub struct ClusterClassifier {
    scaler: StandardScaler,
    model: KMeansModel,
}

impl ClusterClassifier {
    /// Wrap already-deserialized artifacts, validating their shape against
    /// the feature contract.
    pub fn new(scaler: StandardScaler, model: KMeansModel) -> AdvisorResult<Self> {
        if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
            return Err(AdvisorError::ArtifactLoad {
                path: SCALER_FILE.to_string(),
                reason: format!(
                    "expected {FEATURE_COUNT} mean/scale entries, got {}/{}",
                    scaler.mean.len(),
                    scaler.scale.len()
                ),
            });
        }
        if model.centroids.is_empty() {
            return Err(AdvisorError::ArtifactLoad {
                path: CLUSTER_MODEL_FILE.to_string(),
                reason: "no centroids".to_string(),
            });
        }
        if let Some(bad) = model.centroids.iter().find(|c| c.len() != FEATURE_COUNT) {
            return Err(AdvisorError::ArtifactLoad {
                path: CLUSTER_MODEL_FILE.to_string(),
                reason: format!(
                    "centroid has {} dimensions, expected {FEATURE_COUNT}",
                    bad.len()
                ),
            });
        }
        Ok(Self { scaler, model })
    }

    /// Load both artifacts from the model directory.
    pub fn load(model_dir: &str) -> AdvisorResult<Self> {
        let scaler = read_artifact(&format!("{model_dir}/{SCALER_FILE}"))?;
        let model = read_artifact(&format!("{model_dir}/{CLUSTER_MODEL_FILE}"))?;
        let classifier = Self::new(scaler, model)?;
        log::info!(
            "classifier: loaded scaler + {} centroids from {model_dir}",
            classifier.cluster_count()
        );
        Ok(classifier)
    }

    /// Scale then predict. Deterministic for fixed artifacts and input.
    pub fn classify(&self, features: &FeatureVector) -> ClusterId {
        self.model.predict(&self.scaler.transform(features))
    }

    pub fn cluster_count(&self) -> usize {
        self.model.centroids.len()
    }
}

fn read_artifact<T: DeserializeOwned>(path: &str) -> AdvisorResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AdvisorError::ArtifactLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| AdvisorError::ArtifactLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
