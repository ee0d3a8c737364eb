//! Fluent builder API for whole datasets.
//!
//! The [`DatasetBuilder`] runs the account, contact, deal and activity stages
//! in order with one random source and checks the result before returning it.

mod dataset;

pub use dataset::{Dataset, DatasetBuilder, DatasetMetrics};
