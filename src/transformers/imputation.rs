//! ## Transformers for imputing missing values
//!
//! In the housing data a missing value usually means the feature is absent (no garage, no
//! basement, no street frontage). These imputers fill such gaps with the domain constant
//! registered in [`crate::encodings::IMPUTE_VALUES`] (for example `0` square feet, or `2100`
//! as the build year of a garage that does not exist).
//!
//! Currently, the following transformers are implemented:
//!
//! - **SimpleImputer**: Imputes the given columns, each with its registered constant.
//! - **FixedImputer**: Imputes every column of the constant table.
//!
//! Errors are returned as `FeatureError` and results are wrapped in `FeatureResult`.

use crate::encodings::{impute_value, ImputeValue, IMPUTE_VALUES};
use crate::exceptions::{FeatureError, FeatureResult};
use crate::impl_transformer;
use crate::transformers::validate_columns;
use datafusion::logical_expr::{ident, lit, not, Case as DFCase, Expr};
use datafusion::prelude::*;

const STAGE: &str = "Imputer";

/// Constructs an expression equivalent to SQL COALESCE(col, fallback).
/// This is implemented as a CASE expression: if `col` is not null then return it, otherwise return `fallback`.
fn coalesce_expr_for(name: &str, fallback: Expr) -> Expr {
    Expr::Case(DFCase {
        expr: None,
        when_then_expr: vec![(Box::new(not(ident(name).is_null())), Box::new(ident(name)))],
        else_expr: Some(Box::new(fallback)),
    })
}

fn impute_lit(value: ImputeValue) -> Expr {
    match value {
        ImputeValue::Number(n) => lit(n),
        ImputeValue::Text(s) => lit(s),
    }
}

/// Fills nulls of the target columns with their constants; other columns are retained as they are.
fn apply_imputation(df: DataFrame, targets: &[(String, ImputeValue)]) -> FeatureResult<DataFrame> {
    let exprs: Vec<Expr> = df
        .schema()
        .fields()
        .iter()
        .map(|field| {
            let name = field.name();
            match targets.iter().find(|(target, _)| target == name) {
                Some((_, value)) => coalesce_expr_for(name, impute_lit(*value)).alias(name),
                None => ident(name),
            }
        })
        .collect();
    df.select(exprs).map_err(FeatureError::from)
}

/// Replaces missing values of the given columns with their registered constants.
pub struct SimpleImputer {
    pub columns: Vec<String>,
}

impl SimpleImputer {
    /// Create a new imputer for the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Pairs each target column with its constant, failing for a column that has none.
    fn targets(&self) -> FeatureResult<Vec<(String, ImputeValue)>> {
        self.columns
            .iter()
            .map(|name| {
                impute_value(name)
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| {
                        FeatureError::InvalidParameter(format!(
                            "No imputation constant defined for column '{}'",
                            name
                        ))
                    })
            })
            .collect()
    }

    /// This transformer is stateless, so fit only checks the configuration.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        self.targets()?;
        validate_columns(df, STAGE, &self.columns)
    }

    /// Returns a new DataFrame where missing values of each target column are filled.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        let targets = self.targets()?;
        validate_columns(&df, STAGE, &self.columns)?;
        apply_imputation(df, &targets)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// Replaces missing values in every column of the constant table.
pub struct FixedImputer;

impl Default for FixedImputer {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedImputer {
    pub fn new() -> Self {
        Self
    }

    fn targets() -> Vec<(String, ImputeValue)> {
        IMPUTE_VALUES
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn required() -> Vec<&'static str> {
        IMPUTE_VALUES.iter().map(|(name, _)| *name).collect()
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, STAGE, &Self::required())
    }

    /// Returns a new DataFrame where every column of the constant table is imputed.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        validate_columns(&df, STAGE, &Self::required())?;
        apply_imputation(df, &Self::targets())
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

impl_transformer!(SimpleImputer);
impl_transformer!(FixedImputer);
