//! Feature column selection

use crate::dataset::Dataset;
use crate::errors::{StatsError, StatsResult};

/// Reduced feature matrix together with the metadata line of every column
#[derive(Debug, Clone)]
pub struct SelectedFeatures<'a> {
    /// Selected columns, in selection order (each Vec<f64> is one feature column)
    pub columns: Vec<Vec<f64>>,
    /// Raw metadata line per selected column
    pub metadata_lines: Vec<&'a str>,
}

/// Select feature columns by index, preserving the order of `indices`.
///
/// # Errors
/// * `EmptyInput` for an empty selection
/// * `ColumnOutOfRange` for an index >= number of features
/// * `DuplicateColumn` when an index appears twice
/// * `MalformedMetadata` when the dataset has no metadata line for a column
pub fn select_columns<'a>(
    dataset: &'a Dataset,
    indices: &[usize],
) -> StatsResult<SelectedFeatures<'a>> {
    if indices.is_empty() {
        return Err(StatsError::EmptyInput {
            field: "feature_indices",
        });
    }

    let n_features = dataset.n_features();
    let lines = dataset.attribute_lines();

    let mut columns = Vec::with_capacity(indices.len());
    let mut metadata_lines = Vec::with_capacity(indices.len());

    for (pos, &index) in indices.iter().enumerate() {
        if index >= n_features {
            return Err(StatsError::ColumnOutOfRange { index, n_features });
        }
        if indices[..pos].contains(&index) {
            return Err(StatsError::DuplicateColumn(format!("index {index}")));
        }

        let line = lines.get(index).copied().ok_or_else(|| {
            StatsError::MalformedMetadata(format!("no description line for feature {index}"))
        })?;

        columns.push(dataset.features()[index].clone());
        metadata_lines.push(line);
    }

    log::debug!("selected feature columns {indices:?} of {n_features}");

    Ok(SelectedFeatures {
        columns,
        metadata_lines,
    })
}
