//! advisor-core — customer segmentation and product recommendation engine.
//!
//! Pipeline: customer record → feature vector → cluster classifier → cluster
//! id; customer record → rule engine → product list. The scorer fuses both
//! for the read path; the analytics pass folds the same rule output over the
//! whole dataset into a background-refreshed snapshot.

pub mod analytics;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod customer;
pub mod dataset;
pub mod error;
pub mod features;
pub mod rules;
pub mod scorer;
pub mod service;
pub mod store;
pub mod types;
