//! Regression summary assembly
//!
//! Runs the whole pipeline: load the dataset, select the feature columns, fit
//! OLS of the target on them and describe every selected column and the
//! target.

use indexmap::IndexMap;

use crate::dataset::{Dataset, DatasetSource};
use crate::errors::{StatsError, StatsResult};
use crate::metadata::parse_metadata_line;
use crate::models::fit_ols;
use crate::selection::select_columns;
use crate::stats::{describe, round_to};
use crate::types::{ColumnStats, RegressionSummary, SummaryOptions, VariableSummary};

/// Load a dataset from `source` and summarize it.
///
/// # Errors
/// Any loading, configuration, metadata or fitting error is returned as is;
/// no partial summary is produced.
pub fn build_regression_summary<S>(
    source: &S,
    options: &SummaryOptions,
) -> StatsResult<RegressionSummary>
where
    S: DatasetSource + ?Sized,
{
    options.validate()?;
    let dataset = source.load()?;
    log::debug!(
        "loaded dataset: {} rows, {} features",
        dataset.n_samples(),
        dataset.n_features()
    );
    summarize_dataset(&dataset, options)
}

/// Summarize an already loaded dataset
pub fn summarize_dataset(
    dataset: &Dataset,
    options: &SummaryOptions,
) -> StatsResult<RegressionSummary> {
    options.validate()?;

    let selected = select_columns(dataset, &options.feature_indices)?;
    let fit = fit_ols(dataset.target(), &selected.columns)?;

    let mut indep_variables = IndexMap::with_capacity(selected.columns.len());
    for ((column, line), coef) in selected
        .columns
        .iter()
        .zip(&selected.metadata_lines)
        .zip(&fit.coefficients)
    {
        let summary = variable_summary(line, column, Some(*coef), options)?;
        if indep_variables.contains_key(&summary.name) {
            return Err(StatsError::DuplicateColumn(summary.name));
        }
        indep_variables.insert(summary.name.clone(), summary);
    }

    let dep_variable =
        variable_summary(&options.target_metadata, dataset.target(), None, options)?;

    log::info!(
        "fitted {} on {} features over {} rows (R2 = {:.4}, adj. R2 = {:.4}, RSE = {:.4})",
        dep_variable.name,
        fit.n_features,
        fit.n_observations,
        fit.r_squared,
        fit.adj_r_squared,
        fit.residual_std_error
    );

    Ok(RegressionSummary {
        intercept: round_to(fit.intercept, options.coef_decimals),
        indep_variables,
        dep_variable,
    })
}

/// Build the summary of one variable from its metadata line and values
fn variable_summary(
    metadata_line: &str,
    values: &[f64],
    coef: Option<f64>,
    options: &SummaryOptions,
) -> StatsResult<VariableSummary> {
    let meta = parse_metadata_line(metadata_line)?;
    let ColumnStats {
        min,
        max,
        mean,
        median,
        std,
        first,
        third,
    } = describe(values, options.quartiles, &meta.name)?.rounded(options.stat_decimals);

    Ok(VariableSummary {
        name: meta.name,
        desc: meta.desc,
        coef: coef.map(|c| round_to(c, options.coef_decimals)),
        min,
        max,
        mean,
        median,
        std,
        first,
        third,
        value: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::InMemorySource;
    use crate::types::QuartileConvention;

    const DESCR: &str = "\
Synthetic housing

:Attribute Information:
    - Rooms      rooms per dwelling
    - Age        age of the building
    - Distance   distance to the centre
";

    /// y = 1 + 2*rooms + 3*age, exactly
    fn exact_dataset() -> Dataset {
        let rooms = vec![0.0, 1.0, 0.0, 1.0];
        let age = vec![0.0, 0.0, 1.0, 1.0];
        let distance = vec![5.0, 3.0, 8.0, 1.0];
        let target = rooms
            .iter()
            .zip(&age)
            .map(|(r, a)| 1.0 + 2.0 * r + 3.0 * a)
            .collect();
        Dataset::new(vec![rooms, age, distance], target, DESCR.to_string(), 3).unwrap()
    }

    fn options(indices: &[usize]) -> SummaryOptions {
        SummaryOptions {
            feature_indices: indices.to_vec(),
            ..Default::default()
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_exact_fit_summary() {
        init_logger();
        let summary = summarize_dataset(&exact_dataset(), &options(&[0, 1])).unwrap();

        assert_eq!(summary.intercept, 1.0);
        assert_eq!(summary.indep_variables.len(), 2);

        let rooms = &summary.indep_variables["Rooms"];
        assert_eq!(rooms.coef, Some(2.0));
        assert_eq!(rooms.desc, "rooms per dwelling");
        assert_eq!(rooms.min, 0.0);
        assert_eq!(rooms.max, 1.0);
        assert_eq!(rooms.mean, 0.5);
        assert_eq!(rooms.median, 0.5);
        assert_eq!(rooms.std, 0.5);
        assert_eq!(rooms.value, 0);

        let age = &summary.indep_variables["Age"];
        assert_eq!(age.coef, Some(3.0));
    }

    #[test]
    fn test_dependent_variable_summary() {
        let summary = summarize_dataset(&exact_dataset(), &options(&[0, 1])).unwrap();
        let dep = &summary.dep_variable;

        // Target values are 1, 3, 4, 6
        assert_eq!(dep.name, "ActualValues:");
        assert_eq!(dep.desc, "the actual values of homes");
        assert_eq!(dep.coef, None);
        assert_eq!(dep.min, 1.0);
        assert_eq!(dep.max, 6.0);
        assert_eq!(dep.mean, 3.5);
        assert_eq!(dep.median, 3.5);
        assert_eq!(dep.std, 1.8);
    }

    #[test]
    fn test_legacy_quartiles() {
        let opts = SummaryOptions {
            stat_decimals: 4,
            ..options(&[0, 1])
        };
        let summary = summarize_dataset(&exact_dataset(), &opts).unwrap();

        // Ranks 3 * 0.0025 and 3 * 0.0075 over 1, 3, 4, 6
        assert_eq!(summary.dep_variable.first, 1.015);
        assert_eq!(summary.dep_variable.third, 1.045);
        assert_eq!(summary.dep_variable.std, 1.8028);
    }

    #[test]
    fn test_standard_quartiles() {
        let opts = SummaryOptions {
            quartiles: QuartileConvention::Standard,
            ..options(&[0, 1])
        };
        let summary = summarize_dataset(&exact_dataset(), &opts).unwrap();

        // Ranks 0.75 and 2.25 over 1, 3, 4, 6
        assert_eq!(summary.dep_variable.first, 2.5);
        assert_eq!(summary.dep_variable.third, 4.5);
    }

    #[test]
    fn test_keys_follow_selection_order() {
        let dataset = exact_dataset();
        let too_many = summarize_dataset(&dataset, &options(&[2, 0, 1]));
        // Three features on four rows leave no residual degree of freedom
        assert!(matches!(too_many, Err(StatsError::InsufficientData { .. })));

        let summary = summarize_dataset(&dataset, &options(&[1, 0])).unwrap();
        let keys: Vec<&str> = summary.indep_variables.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Age", "Rooms"]);
        assert_eq!(summary.indep_variables["Age"].coef, Some(3.0));
        assert_eq!(summary.indep_variables["Rooms"].coef, Some(2.0));
    }

    #[test]
    fn test_every_feature_has_coefficient() {
        let summary = summarize_dataset(&exact_dataset(), &options(&[2, 1])).unwrap();

        assert_eq!(summary.indep_variables.len(), 2);
        assert!(summary.indep_variables.values().all(|v| v.coef.is_some()));
        assert!(summary.dep_variable.coef.is_none());
    }

    #[test]
    fn test_summary_is_idempotent() {
        let source = InMemorySource::new(exact_dataset());
        let opts = options(&[2, 0]);

        let a = build_regression_summary(&source, &opts).unwrap();
        let b = build_regression_summary(&source, &opts).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_json_shape() {
        let summary = summarize_dataset(&exact_dataset(), &options(&[0, 1])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();

        assert_eq!(json["intercept"], 1.0);
        assert_eq!(json["indepVariables"]["Rooms"]["coef"], 2.0);
        assert_eq!(json["indepVariables"]["Age"]["name"], "Age");
        assert!(json["depVariable"]["coef"].is_null());
        assert_eq!(json["depVariable"]["value"], 0);
        assert!(json["depVariable"]["value"].is_u64());
        assert!(summary.to_json().unwrap().contains("\"value\":0}"));

        let text = summary.to_json_pretty().unwrap();
        assert!(text.find("\"Rooms\"").unwrap() < text.find("\"Age\"").unwrap());
    }

    #[test]
    fn test_out_of_range_selection() {
        let result = summarize_dataset(&exact_dataset(), &options(&[0, 9]));
        assert!(matches!(
            result,
            Err(StatsError::ColumnOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_malformed_target_metadata() {
        let opts = SummaryOptions {
            target_metadata: "- ".to_string(),
            ..options(&[0, 1])
        };
        let result = summarize_dataset(&exact_dataset(), &opts);
        assert!(matches!(result, Err(StatsError::MalformedMetadata(_))));
    }

    #[test]
    fn test_duplicate_feature_names() {
        let descr = "- Same  first\n- Same  second";
        let dataset = Dataset::new(
            vec![vec![0.0, 1.0, 0.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]],
            vec![1.0, 3.0, 4.0, 6.0],
            descr.to_string(),
            0,
        )
        .unwrap();
        let result = summarize_dataset(&dataset, &options(&[0, 1]));
        assert!(matches!(result, Err(StatsError::DuplicateColumn(name)) if name == "Same"));
    }

    #[test]
    fn test_collinear_selection_is_rejected() {
        // Distance is a multiple of Rooms
        let rooms = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let age = vec![9.0, 4.0, 7.0, 1.0, 3.0, 8.0];
        let distance: Vec<f64> = rooms.iter().map(|r| 2.5 * r).collect();
        let target = vec![2.0, 3.5, 3.1, 6.2, 5.9, 7.4];
        let dataset =
            Dataset::new(vec![rooms, age, distance], target, DESCR.to_string(), 3).unwrap();

        let result = summarize_dataset(&dataset, &options(&[0, 2]));
        assert!(matches!(result, Err(StatsError::RegressError(_))));

        let summary = summarize_dataset(&dataset, &options(&[0, 1])).unwrap();
        assert!(summary
            .indep_variables
            .values()
            .all(|v| v.coef.is_some_and(f64::is_finite)));
    }

    #[test]
    fn test_default_selection_on_california_descr() {
        use crate::dataset::california::{ATTRIBUTE_LINE_OFFSET, DESCR};

        let t: Vec<f64> = (0..12).map(|i| (i as f64 - 5.5) / 5.5).collect();
        let mut features: Vec<Vec<f64>> = (1..=6)
            .map(|k| t.iter().map(|v| v.powi(k)).collect())
            .collect();
        features.push(t.iter().map(|v| 34.0 + v).collect());
        features.push(t.iter().map(|v| -120.0 - v).collect());
        let target = t
            .iter()
            .enumerate()
            .map(|(i, v)| 2.0 + v + 0.1 * (i as f64).cos())
            .collect();
        let dataset =
            Dataset::new(features, target, DESCR.to_string(), ATTRIBUTE_LINE_OFFSET).unwrap();

        let summary = summarize_dataset(&dataset, &SummaryOptions::default()).unwrap();

        let keys: Vec<&str> = summary.indep_variables.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["MedInc", "HouseAge", "AveRooms", "AveBedrms", "Population", "AveOccup"]
        );
        assert!(summary
            .indep_variables
            .values()
            .all(|v| v.coef.is_some_and(f64::is_finite)));
        assert!(summary.intercept.is_finite());
        assert_eq!(summary.dep_variable.name, "ActualValues:");
    }

    struct Unavailable;

    impl DatasetSource for Unavailable {
        fn load(&self) -> StatsResult<Dataset> {
            Err(StatsError::DatasetUnavailable("offline".into()))
        }
    }

    #[test]
    fn test_unavailable_source_propagates() {
        let result = build_regression_summary(&Unavailable, &SummaryOptions::default());
        assert!(matches!(result, Err(StatsError::DatasetUnavailable(_))));
    }

    #[test]
    fn test_dyn_source() {
        let source: Box<dyn DatasetSource> = Box::new(InMemorySource::new(exact_dataset()));
        let summary = build_regression_summary(source.as_ref(), &options(&[0, 1])).unwrap();
        assert_eq!(summary.indep_variables.len(), 2);
    }
}
