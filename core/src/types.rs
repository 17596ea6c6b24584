//! Shared primitive types used across the entire crate.

/// Cluster label assigned by the pre-trained behavioral model.
pub type ClusterId = i64;

/// Customer account identifier as it appears in the dataset.
/// Treated as unique per lookup; dataset rows may repeat it.
pub type AccountNumber = String;
