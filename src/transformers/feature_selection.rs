//! ## Feature Selection Transformers
//!
//! This module provides the projection transformers that shape the final feature set.
//!
//! ### Available Transformers
//!
//! - [`FeatureSelector`]: Keeps exactly the given columns, in the given order.
//! - [`DropFeatures`]: Removes specific features from the dataset.
//!
//! Each transformer returns a new DataFrame with the selected features.
//! Errors are returned as [`FeatureError`], and results are wrapped in [`FeatureResult`].

use crate::exceptions::{FeatureError, FeatureResult};
use crate::impl_transformer;
use crate::transformers::validate_columns;
use datafusion::dataframe::DataFrame;
use datafusion::logical_expr::{ident, Expr};

/// Returns only the configured columns, in the configured order.
/// This is usually the last step of a pipeline.
pub struct FeatureSelector {
    pub columns: Vec<String>,
}

impl FeatureSelector {
    const STAGE: &'static str = "FeatureSelector";

    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &self.columns)
    }

    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        validate_columns(&df, Self::STAGE, &self.columns)?;
        if self.columns.is_empty() {
            return Err(FeatureError::InvalidParameter(
                "Selecting no features would result in an empty DataFrame.".to_string(),
            ));
        }
        let exprs: Vec<Expr> = self.columns.iter().map(|c| ident(c)).collect();
        df.select(exprs).map_err(FeatureError::from)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// Removes the specified columns from the DataFrame.
pub struct DropFeatures {
    pub features: Vec<String>,
}

impl DropFeatures {
    const STAGE: &'static str = "DropFeatures";

    pub fn new(features: Vec<String>) -> Self {
        Self { features }
    }

    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &self.features)
    }

    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        validate_columns(&df, Self::STAGE, &self.features)?;
        let available_exprs: Vec<Expr> = df
            .schema()
            .fields()
            .iter()
            .filter(|field| !self.features.contains(field.name()))
            .map(|field| ident(field.name()))
            .collect();

        if available_exprs.is_empty() {
            return Err(FeatureError::InvalidParameter(
                "Dropping these features would result in an empty DataFrame.".to_string(),
            ));
        }
        df.select(available_exprs).map_err(FeatureError::from)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

impl_transformer!(FeatureSelector);
impl_transformer!(DropFeatures);
