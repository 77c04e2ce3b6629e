//! Ordinary Least Squares (OLS) regression wrapper

use crate::errors::{StatsError, StatsResult};
use crate::types::OlsFit;
use faer::{Col, Mat};
use regress_rs::prelude::*;

/// Fit an OLS regression model with intercept
///
/// # Arguments
/// * `y` - Response variable (n observations)
/// * `x` - Feature matrix (p features, each with n observations)
///
/// # Returns
/// * `OlsFit` containing intercept, coefficients and fit quality
pub fn fit_ols(y: &[f64], x: &[Vec<f64>]) -> StatsResult<OlsFit> {
    // Validate inputs
    if y.is_empty() {
        return Err(StatsError::EmptyInput { field: "y" });
    }
    if x.is_empty() {
        return Err(StatsError::EmptyInput { field: "x" });
    }

    let n_obs = y.len();
    let n_features = x.len();

    // Check all feature vectors have same length as y
    for col in x.iter() {
        if col.len() != n_obs {
            return Err(StatsError::DimensionMismatch {
                y_len: n_obs,
                x_rows: col.len(),
            });
        }
    }

    // Intercept plus one coefficient per feature, with at least one residual dof
    if n_obs <= n_features + 1 {
        return Err(StatsError::InsufficientData {
            rows: n_obs,
            cols: n_features,
        });
    }

    // Every row must take part in the fit
    if let Some(row) = y.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::NonFiniteValue {
            field: "y".into(),
            row,
        });
    }
    for (j, col) in x.iter().enumerate() {
        if let Some(row) = col.iter().position(|v| !v.is_finite()) {
            return Err(StatsError::NonFiniteValue {
                field: format!("x[{j}]"),
                row,
            });
        }
    }

    // Convert to faer types
    let y_col = Col::from_fn(n_obs, |i| y[i]);
    let x_mat = Mat::from_fn(n_obs, n_features, |i, j| x[j][i]);

    let fitted = OlsRegressor::builder()
        .with_intercept(true)
        .build()
        .fit(&x_mat, &y_col)
        .map_err(|e| StatsError::RegressError(format!("{:?}", e)))?;

    let result = fitted.result();

    let coefficients: Vec<f64> = result.coefficients.iter().copied().collect();
    let intercept = result
        .intercept
        .ok_or_else(|| StatsError::RegressError("solver returned no intercept".into()))?;

    // Aliased (collinear) columns come back as NaN
    if let Some(j) = coefficients.iter().position(|c| !c.is_finite()) {
        return Err(StatsError::RegressError(format!(
            "feature x[{j}] is collinear with the other regressors"
        )));
    }
    if !intercept.is_finite() {
        return Err(StatsError::RegressError("intercept is not finite".into()));
    }

    log::debug!(
        "OLS fit: n={}, p={}, r2={:.4}",
        n_obs,
        n_features,
        result.r_squared
    );

    Ok(OlsFit {
        coefficients,
        intercept,
        r_squared: result.r_squared,
        adj_r_squared: result.adj_r_squared,
        residual_std_error: result.rmse,
        n_observations: n_obs,
        n_features,
    })
}
