//! ## Transformers for extracting time-based features
//!
//! This module implements [`TimeBasedFeatures`], which derives features from the sale date
//! (`YrSold`, `MoSold`) and the construction dates (`YearBuilt`, `YearRemodAdd`, `GarageYrBlt`).
//!
//! Each sub-feature is switched on or off by a flag (all on by default):
//!
//! - `season`: `Winter` (Dec-Feb), `Spring` (Mar-May), `Summer` (Jun-Aug) or `Autumn` (Sep-Nov)
//!   from `MoSold`; any other month value gives null.
//! - `YrsSinceBuilt`: `YrSold - YearBuilt`.
//! - `YrsSinceRemod`: `YrSold - YearRemodAdd`.
//! - `GarageYrsSinceBuilt`: `YrSold - GarageYrBlt`.
//! - `isRemodeled`: 1 if `YearRemodAdd` is later than `YearBuilt`, 0 otherwise.
//!
//! Errors are returned as `FeatureError` and results are wrapped in `FeatureResult`.

use crate::encodings::SEASONS;
use crate::exceptions::FeatureResult;
use crate::impl_transformer;
use crate::transformers::feature_creation::{apply_derived, required_columns, DerivedFeature};
use crate::transformers::{float, validate_columns};
use datafusion_expr::{ident, lit, Case as DFCase, Expr};
use datafusion::prelude::*;
use datafusion::scalar::ScalarValue;

/// Builds the month-to-season CASE expression.
fn season_expr() -> Expr {
    let when_then_expr = SEASONS
        .iter()
        .map(|(season, months)| {
            let months = months.iter().map(|m| lit(*m)).collect();
            (
                Box::new(ident("MoSold").in_list(months, false)),
                Box::new(lit(*season)),
            )
        })
        .collect();
    Expr::Case(DFCase {
        expr: None,
        when_then_expr,
        else_expr: Some(Box::new(lit(ScalarValue::Utf8(None)))),
    })
}

/// Adds features based on time: `YrSold`, `MoSold`, `YearBuilt`, `GarageYrBlt`, `YearRemodAdd`.
#[derive(Debug, Clone, Copy)]
pub struct TimeBasedFeatures {
    pub season: bool,
    pub since_house_built: bool,
    pub since_house_remod: bool,
    pub since_garage_built: bool,
    pub is_remodeled: bool,
}

impl Default for TimeBasedFeatures {
    fn default() -> Self {
        Self {
            season: true,
            since_house_built: true,
            since_house_remod: true,
            since_garage_built: true,
            is_remodeled: true,
        }
    }
}

impl TimeBasedFeatures {
    const STAGE: &'static str = "TimeFeatures";

    pub fn new() -> Self {
        Self::default()
    }

    fn features(&self) -> Vec<DerivedFeature> {
        let mut features = Vec::new();
        if self.season {
            features.push(DerivedFeature::new("season", &["MoSold"], season_expr()));
        }
        if self.since_house_built {
            features.push(DerivedFeature::new(
                "YrsSinceBuilt",
                &["YrSold", "YearBuilt"],
                float("YrSold") - float("YearBuilt"),
            ));
        }
        if self.since_house_remod {
            features.push(DerivedFeature::new(
                "YrsSinceRemod",
                &["YrSold", "YearRemodAdd"],
                float("YrSold") - float("YearRemodAdd"),
            ));
        }
        if self.since_garage_built {
            features.push(DerivedFeature::new(
                "GarageYrsSinceBuilt",
                &["YrSold", "GarageYrBlt"],
                float("YrSold") - float("GarageYrBlt"),
            ));
        }
        if self.is_remodeled {
            // Remodeled means the remodel year comes after the build year.
            // The older `YearBuilt - YearRemodAdd > 0` form had the comparison reversed.
            let remodeled = Expr::Case(DFCase {
                expr: None,
                when_then_expr: vec![(
                    Box::new(float("YearRemodAdd").gt(float("YearBuilt"))),
                    Box::new(lit(1_i64)),
                )],
                else_expr: Some(Box::new(lit(0_i64))),
            });
            features.push(DerivedFeature::new(
                "isRemodeled",
                &["YearBuilt", "YearRemodAdd"],
                remodeled,
            ));
        }
        features
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &required_columns(&self.features()))
    }

    /// Adds the enabled time features to the DataFrame.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        apply_derived(df, Self::STAGE, self.features())
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

impl_transformer!(TimeBasedFeatures);
