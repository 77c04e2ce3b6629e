//! housing-stats-core: regression summary of the California Housing dataset
//!
//! Loads the dataset through a [`DatasetSource`], fits an OLS regression of the
//! median house value on a selection of features (via regress-rs) and
//! describes every selected feature and the target with rounded descriptive
//! statistics. The result is a [`RegressionSummary`] ready to be serialized.

pub mod dataset;
pub mod errors;
pub mod metadata;
pub mod models;
pub mod selection;
pub mod stats;
pub mod summary;
pub mod types;

pub use dataset::{CaliforniaHousing, Dataset, DatasetSource, InMemorySource};
pub use errors::{StatsError, StatsResult};
pub use summary::{build_regression_summary, summarize_dataset};
pub use types::*;
