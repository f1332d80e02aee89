//! # Transformer Implementations
//!
//! The submodules contain the transformer implementations for the housing feature catalog.
//! This module also holds the column helpers the transformers share.

pub mod binary_encoding;
pub mod categorical_encoding;
pub mod datetime_features;
pub mod feature_creation;
pub mod feature_selection;
pub mod imputation;
pub mod numerical;

use crate::exceptions::{FeatureError, FeatureResult};
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::{cast, ident, Expr};
use datafusion::prelude::DataFrame;

/// Returns the columns of `required` that are not present in the DataFrame.
/// The result keeps the order of `required` and contains no duplicates.
pub(crate) fn missing_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Vec<String> {
    let schema = df.schema();
    let mut missing: Vec<String> = Vec::new();
    for name in required {
        let name = name.as_ref();
        if schema.field_with_name(None, name).is_err() && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    missing
}

/// Validates that every column in `required` exists in the DataFrame.
/// Returns a `MissingColumns` error tagged with `stage` naming the absent columns.
pub(crate) fn validate_columns<S: AsRef<str>>(
    df: &DataFrame,
    stage: &'static str,
    required: &[S],
) -> FeatureResult<()> {
    let missing = missing_columns(df, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FeatureError::MissingColumns {
            stage,
            columns: missing,
        })
    }
}

/// A column reference cast to Float64, so that arithmetic never falls back to integer division.
pub(crate) fn float(name: &str) -> Expr {
    cast(ident(name), DataType::Float64)
}

/// Adds the given named expressions to the DataFrame.
/// A feature whose name already exists replaces that column in place; the others are appended.
pub(crate) fn with_features(
    df: DataFrame,
    features: Vec<(String, Expr)>,
) -> FeatureResult<DataFrame> {
    let mut pending = features;
    let mut exprs: Vec<Expr> = Vec::new();
    for field in df.schema().fields() {
        let name = field.name();
        match pending.iter().position(|(feature, _)| feature == name) {
            Some(idx) => {
                let (feature, expr) = pending.remove(idx);
                exprs.push(expr.alias(feature));
            }
            None => exprs.push(ident(name)),
        }
    }
    exprs.extend(pending.into_iter().map(|(feature, expr)| expr.alias(feature)));
    df.select(exprs).map_err(FeatureError::from)
}
