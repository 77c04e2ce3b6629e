use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{StatsError, StatsResult};

/// Result of an OLS fit
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Regression coefficients (excluding intercept), in feature order
    pub coefficients: Vec<f64>,
    /// Intercept term
    pub intercept: f64,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
    /// Adjusted R-squared
    pub adj_r_squared: f64,
    /// Residual standard error
    pub residual_std_error: f64,
    /// Number of observations used
    pub n_observations: usize,
    /// Number of features (excluding intercept)
    pub n_features: usize,
}

/// Unrounded descriptive statistics of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divides by n)
    pub std: f64,
    /// Lower quartile, as defined by the [`QuartileConvention`] in use
    pub first: f64,
    /// Upper quartile, as defined by the [`QuartileConvention`] in use
    pub third: f64,
}

/// Summary of one variable: metadata, optional coefficient and rounded statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSummary {
    pub name: String,
    pub desc: String,
    /// Regression coefficient; `None` for the dependent variable
    pub coef: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub first: f64,
    pub third: f64,
    /// Placeholder for a consumer-provided value, always zero here
    pub value: u8,
}

/// Regression model summary: intercept, independent variables and the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionSummary {
    pub intercept: f64,
    /// Independent variables keyed by name, in selection order
    pub indep_variables: IndexMap<String, VariableSummary>,
    pub dep_variable: VariableSummary,
}

impl RegressionSummary {
    /// Compact JSON rendering
    pub fn to_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON rendering
    pub fn to_json_pretty(&self) -> StatsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Which percentiles are reported as the first and third quartile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuartileConvention {
    /// Percentiles 0.25 and 0.75 (i.e. fractions 0.0025 and 0.0075).
    /// Matches the numbers historically published by this summary.
    #[default]
    Legacy,
    /// Percentiles 25 and 75
    Standard,
}

impl QuartileConvention {
    /// Percentile ranks in `[0, 100]` used for the (first, third) fields
    pub fn percentiles(self) -> (f64, f64) {
        match self {
            QuartileConvention::Legacy => (0.25, 0.75),
            QuartileConvention::Standard => (25.0, 75.0),
        }
    }
}

/// Metadata line used for the dependent variable
pub const DEFAULT_TARGET_METADATA: &str = "- ActualValues: the actual values of homes";

/// Default feature selection: MedInc, HouseAge, AveRooms, AveBedrms, Population, AveOccup
pub const DEFAULT_FEATURE_INDICES: [usize; 6] = [0, 1, 2, 3, 4, 5];

/// Largest precision accepted for rounding
pub const MAX_DECIMALS: u32 = 15;

/// Options for building a regression summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Ordered feature column indices to regress on
    pub feature_indices: Vec<usize>,
    /// Percentiles reported as quartiles
    pub quartiles: QuartileConvention,
    /// Decimal places for descriptive statistics
    pub stat_decimals: u32,
    /// Decimal places for coefficients and intercept
    pub coef_decimals: u32,
    /// Metadata line (`"- NAME description"`) describing the target
    pub target_metadata: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            feature_indices: DEFAULT_FEATURE_INDICES.to_vec(),
            quartiles: QuartileConvention::Legacy,
            stat_decimals: 2,
            coef_decimals: 3,
            target_metadata: DEFAULT_TARGET_METADATA.to_string(),
        }
    }
}

impl SummaryOptions {
    /// Parse options from TOML; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> StatsResult<Self> {
        let options: SummaryOptions = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a TOML file
    pub fn from_path(path: &Path) -> StatsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> StatsResult<()> {
        if self.feature_indices.is_empty() {
            return Err(StatsError::EmptyInput {
                field: "feature_indices",
            });
        }
        if self.stat_decimals > MAX_DECIMALS {
            return Err(StatsError::InvalidConfig(format!(
                "stat_decimals = {} (must be <= {MAX_DECIMALS})",
                self.stat_decimals
            )));
        }
        if self.coef_decimals > MAX_DECIMALS {
            return Err(StatsError::InvalidConfig(format!(
                "coef_decimals = {} (must be <= {MAX_DECIMALS})",
                self.coef_decimals
            )));
        }
        Ok(())
    }
}
