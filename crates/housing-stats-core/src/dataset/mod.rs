//! Datasets and the sources they are loaded from

pub mod california;
mod fetch;

pub use california::CaliforniaHousing;

use crate::errors::{StatsError, StatsResult};

/// A fixed numeric table: F feature columns of N rows each, one target per row,
/// and the free-text description the column names are read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    target: Vec<f64>,
    descr: String,
    attribute_line_offset: usize,
}

impl Dataset {
    /// Build a dataset from column-major features.
    ///
    /// # Arguments
    /// * `features` - Feature columns (each Vec<f64> is one feature, N values)
    /// * `target` - Target values (N values)
    /// * `descr` - Description text
    /// * `attribute_line_offset` - Line of `descr` describing feature 0; feature
    ///   `j` is described on line `attribute_line_offset + j`
    pub fn new(
        features: Vec<Vec<f64>>,
        target: Vec<f64>,
        descr: String,
        attribute_line_offset: usize,
    ) -> StatsResult<Self> {
        if features.is_empty() {
            return Err(StatsError::EmptyInput { field: "features" });
        }
        if target.is_empty() {
            return Err(StatsError::EmptyInput { field: "target" });
        }
        for col in &features {
            if col.len() != target.len() {
                return Err(StatsError::DimensionMismatch {
                    y_len: target.len(),
                    x_rows: col.len(),
                });
            }
        }

        Ok(Self {
            features,
            target,
            descr,
            attribute_line_offset,
        })
    }

    /// Number of rows
    pub fn n_samples(&self) -> usize {
        self.target.len()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    pub fn descr(&self) -> &str {
        &self.descr
    }

    /// Description lines of the feature columns, one per feature.
    ///
    /// Shorter than `n_features()` when the description runs out of lines.
    pub fn attribute_lines(&self) -> Vec<&str> {
        self.descr
            .lines()
            .skip(self.attribute_line_offset)
            .take(self.n_features())
            .collect()
    }
}

/// Something a [`Dataset`] can be loaded from
pub trait DatasetSource {
    fn load(&self) -> StatsResult<Dataset>;
}

/// Source handing out copies of a dataset already in memory
#[derive(Debug, Clone)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> StatsResult<Dataset> {
        Ok(self.dataset.clone())
    }
}
