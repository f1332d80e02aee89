//! ## Numerical Transformation Transformers
//!
//! This module provides [`Log1pTransformer`], which stabilizes right-skewed measurements by
//! adding a `<column>_log` feature holding `ln(1 + x)` next to each transformed column.
//!
//! The columns can be given explicitly, or picked at fit time by skewness: every numeric
//! column whose sample skewness exceeds the threshold (0.75 by default) is selected. The
//! selection is frozen when `fit` runs so that training and inference data get the same
//! features.
//!
//! Errors are returned as [`FeatureError`], and results are wrapped in [`FeatureResult`].

use crate::exceptions::{FeatureError, FeatureResult};
use crate::impl_transformer;
use crate::transformers::{float, validate_columns, with_features};
use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use datafusion::arrow::datatypes::DataType;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::dataframe::DataFrame;
use datafusion_expr::{ident, lit, Expr};
use datafusion_functions::math;
use rayon::prelude::*;
use tracing::debug;

/// Default skewness above which a column is log-transformed.
pub const DEFAULT_SKEW_THRESHOLD: f64 = 0.75;

/// Wrapper function wrapping math's natural logarithm UDF.
fn ln_expr(e: Expr) -> Expr {
    math::ln().call(vec![e])
}

/// Adjusted Fisher-Pearson sample skewness (the bias-corrected estimator).
/// Returns `None` for fewer than three values; a constant sample has skewness 0.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let n_f = n as f64;
    let mean = values.iter().sum::<f64>() / n_f;
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), v| {
        let d = v - mean;
        (m2 + d * d, m3 + d * d * d)
    });
    let m2 = m2 / n_f;
    let m3 = m3 / n_f;
    if m2 <= (f64::EPSILON * mean).powi(2) {
        return Some(0.0);
    }
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (n_f * (n_f - 1.0)).sqrt() / (n_f - 2.0))
}

/// Gathers the non-null values of a column across all batches as f64.
fn column_values(batches: &[RecordBatch], col_name: &str) -> FeatureResult<Vec<f64>> {
    let mut values = Vec::new();
    for batch in batches {
        let column = batch.column_by_name(col_name).ok_or_else(|| {
            FeatureError::MissingColumns {
                stage: Log1pTransformer::STAGE,
                columns: vec![col_name.to_string()],
            }
        })?;
        let array = cast(column, &DataType::Float64)?;
        let array = array
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| {
                FeatureError::InvalidParameter(format!(
                    "Expected Float64 array for column {}",
                    col_name
                ))
            })?;
        values.extend(array.iter().flatten());
    }
    Ok(values)
}

/// Adds `<column>_log = ln(1 + x)` for each selected column.
///
/// With explicit columns the transformer is stateless. Without columns (see [`Log1pTransformer::auto`])
/// it selects the numeric columns whose skewness exceeds `threshold` during `fit`.
pub struct Log1pTransformer {
    pub columns: Vec<String>,
    pub threshold: f64,
    /// Columns chosen by skewness at fit time (auto mode only).
    pub selected: Option<Vec<String>>,
}

impl Log1pTransformer {
    const STAGE: &'static str = "Log1p";

    /// Creates a transformer for the given columns. An empty list selects columns by skewness.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            threshold: DEFAULT_SKEW_THRESHOLD,
            selected: None,
        }
    }

    /// Creates a transformer that picks skewed columns at fit time.
    pub fn auto() -> Self {
        Self::new(Vec::new())
    }

    /// Sets the skewness threshold used in auto mode.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    fn is_auto(&self) -> bool {
        self.columns.is_empty()
    }

    /// The columns `transform` will use, or `FitNotCalled` in auto mode before fitting.
    fn target_columns(&self) -> FeatureResult<&[String]> {
        if self.is_auto() {
            self.selected.as_deref().ok_or(FeatureError::FitNotCalled)
        } else {
            Ok(&self.columns)
        }
    }

    /// In auto mode, computes the skewness of each numeric column and keeps those above the threshold.
    /// With explicit columns, only checks that they exist.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        if !self.is_auto() {
            return validate_columns(df, Self::STAGE, &self.columns);
        }
        if !self.threshold.is_finite() {
            return Err(FeatureError::InvalidParameter(format!(
                "Skewness threshold {} must be finite",
                self.threshold
            )));
        }

        let numeric_cols: Vec<String> = df
            .schema()
            .fields()
            .iter()
            .filter(|f| f.data_type().is_numeric())
            .map(|f| f.name().to_string())
            .collect();
        if numeric_cols.is_empty() {
            self.selected = Some(Vec::new());
            return Ok(());
        }

        let exprs: Vec<Expr> = numeric_cols.iter().map(|c| ident(c)).collect();
        let batches = df.clone().select(exprs)?.collect().await?;
        let skews = numeric_cols
            .par_iter()
            .map(|c| column_values(&batches, c).map(|values| skewness(&values)))
            .collect::<FeatureResult<Vec<Option<f64>>>>()?;

        let selected: Vec<String> = numeric_cols
            .into_iter()
            .zip(skews)
            .filter_map(|(c, skew)| match skew {
                Some(s) if s > self.threshold => Some(c),
                _ => None,
            })
            .collect();
        debug!(threshold = self.threshold, columns = ?selected, "skewed columns selected");
        self.selected = Some(selected);
        Ok(())
    }

    /// Adds the `<column>_log` features to the DataFrame.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        let columns = self.target_columns()?;
        validate_columns(&df, Self::STAGE, columns)?;
        let features = columns
            .iter()
            .map(|c| (format!("{}_log", c), ln_expr(float(c) + lit(1.0_f64))))
            .collect();
        with_features(df, features)
    }

    fn inherent_is_stateful(&self) -> bool {
        self.is_auto()
    }
}

impl_transformer!(Log1pTransformer);
