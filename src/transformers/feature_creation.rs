//! ## Transformers for creating new features
//!
//! This module provides transformers that derive new housing features by applying arithmetic
//! on existing columns. Every sub-feature is switched on or off by a boolean flag (all on by
//! default) and only the columns of the enabled sub-features are required.
//!
//! Currently, the following transformers are implemented:
//!
//! - **ValueAddedFeatures:** Size (or count) times quality products for pool, kitchen, fireplaces,
//!   garage and basement.
//! - **QualityFeatures:** Sums and products of quality/condition ratings, plus a high-quality
//!   floor area share.
//! - **RoomsFeatures:** Bathroom totals and room/bedroom ratios.
//! - **SpaceBasedFeatures:** Basement, porch and lot area shares.
//!
//! The time-based features live in [`crate::transformers::datetime_features`].
//!
//! Ratios follow a zero-denominator guard: when the denominator is 0 the feature is 0, when it
//! is positive the ratio is computed, and otherwise (negative or null) the feature is null.
//! All arithmetic is done in Float64.
//! Errors are returned as `FeatureError` and results are wrapped in `FeatureResult`.

use crate::exceptions::FeatureResult;
use crate::impl_transformer;
use crate::transformers::{float, validate_columns, with_features};
use datafusion_expr::{lit, Case as DFCase, Expr};
use datafusion::prelude::*;

/// A derived feature: output name, the source columns it reads, and its expression.
pub(crate) struct DerivedFeature {
    pub(crate) name: &'static str,
    pub(crate) sources: &'static [&'static str],
    pub(crate) expr: Expr,
}

impl DerivedFeature {
    pub(crate) fn new(name: &'static str, sources: &'static [&'static str], expr: Expr) -> Self {
        Self {
            name,
            sources,
            expr,
        }
    }
}

/// Source columns needed by the given features, in first-use order.
pub(crate) fn required_columns(features: &[DerivedFeature]) -> Vec<&'static str> {
    let mut required: Vec<&'static str> = Vec::new();
    for source in features.iter().flat_map(|f| f.sources.iter()) {
        if !required.contains(source) {
            required.push(*source);
        }
    }
    required
}

/// Validates the sources of `features` and adds them to the DataFrame.
pub(crate) fn apply_derived(
    df: DataFrame,
    stage: &'static str,
    features: Vec<DerivedFeature>,
) -> FeatureResult<DataFrame> {
    validate_columns(&df, stage, &required_columns(&features))?;
    let exprs = features
        .into_iter()
        .map(|f| (f.name.to_string(), f.expr))
        .collect();
    with_features(df, exprs)
}

/// `numerator / denominator`, with 0 when the denominator is 0 and null when it is negative or null.
pub(crate) fn guarded_ratio(numerator: Expr, denominator: &str) -> Expr {
    Expr::Case(DFCase {
        expr: None,
        when_then_expr: vec![
            (
                Box::new(float(denominator).eq(lit(0.0_f64))),
                Box::new(lit(0.0_f64)),
            ),
            (
                Box::new(float(denominator).gt(lit(0.0_f64))),
                Box::new(numerator / float(denominator)),
            ),
        ],
        else_expr: None,
    })
}

/// Sum of the given columns as Float64.
fn sum_of(columns: &[&str]) -> Expr {
    columns
        .iter()
        .map(|c| float(c))
        .reduce(|acc, e| acc + e)
        .unwrap_or_else(|| lit(0.0_f64))
}

/// Adds value features computed as size (or count) times the quality rank.
/// The quality columns are expected to be numeric already (see the quality and ordinal encoders).
#[derive(Debug, Clone, Copy)]
pub struct ValueAddedFeatures {
    /// `PoolValue = PoolArea * PoolQC`
    pub pool: bool,
    /// `KitchenValue = KitchenAbvGr * KitchenQual`
    pub kitchen: bool,
    /// `GarageValue = GarageArea * GarageQual`
    pub garage: bool,
    /// `FireplacesValue = Fireplaces * FireplaceQu`
    pub fireplace: bool,
    /// `BsmtValue = BsmtFinType1 * BsmtFinSF1 + BsmtFinType2 * BsmtFinSF2`
    pub basement: bool,
    /// `BsmtValueAdv = BsmtValue * BsmtExposure`
    pub basement_adv: bool,
}

impl Default for ValueAddedFeatures {
    fn default() -> Self {
        Self {
            pool: true,
            kitchen: true,
            garage: true,
            fireplace: true,
            basement: true,
            basement_adv: true,
        }
    }
}

const BSMT_VALUE_SOURCES: &[&str] = &["BsmtFinType1", "BsmtFinSF1", "BsmtFinType2", "BsmtFinSF2"];

fn bsmt_value() -> Expr {
    float("BsmtFinType1") * float("BsmtFinSF1") + float("BsmtFinType2") * float("BsmtFinSF2")
}

impl ValueAddedFeatures {
    const STAGE: &'static str = "ValueFeatures";

    pub fn new() -> Self {
        Self::default()
    }

    fn features(&self) -> Vec<DerivedFeature> {
        let mut features = Vec::new();
        if self.pool {
            features.push(DerivedFeature::new(
                "PoolValue",
                &["PoolArea", "PoolQC"],
                float("PoolArea") * float("PoolQC"),
            ));
        }
        if self.kitchen {
            features.push(DerivedFeature::new(
                "KitchenValue",
                &["KitchenAbvGr", "KitchenQual"],
                float("KitchenAbvGr") * float("KitchenQual"),
            ));
        }
        if self.fireplace {
            features.push(DerivedFeature::new(
                "FireplacesValue",
                &["Fireplaces", "FireplaceQu"],
                float("Fireplaces") * float("FireplaceQu"),
            ));
        }
        if self.garage {
            features.push(DerivedFeature::new(
                "GarageValue",
                &["GarageArea", "GarageQual"],
                float("GarageArea") * float("GarageQual"),
            ));
        }
        if self.basement {
            features.push(DerivedFeature::new(
                "BsmtValue",
                BSMT_VALUE_SOURCES,
                bsmt_value(),
            ));
        }
        if self.basement_adv {
            features.push(DerivedFeature::new(
                "BsmtValueAdv",
                &[
                    "BsmtFinType1",
                    "BsmtFinSF1",
                    "BsmtFinType2",
                    "BsmtFinSF2",
                    "BsmtExposure",
                ],
                bsmt_value() * float("BsmtExposure"),
            ));
        }
        features
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &required_columns(&self.features()))
    }

    /// Adds the enabled value features to the DataFrame.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        apply_derived(df, Self::STAGE, self.features())
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// Adds features combining quality and condition ratings.
#[derive(Debug, Clone, Copy)]
pub struct QualityFeatures {
    /// `HighQualSF_percent = (1 - LowQualFinSF) / GrLivArea`
    pub high_quality_sf: bool,
    pub overall_mult: bool,
    pub overall_sum: bool,
    pub external_mult: bool,
    pub external_sum: bool,
    pub garage_mult: bool,
    pub garage_sum: bool,
    pub basement_mult: bool,
    pub basement_sum: bool,
}

impl Default for QualityFeatures {
    fn default() -> Self {
        Self {
            high_quality_sf: true,
            overall_mult: true,
            overall_sum: true,
            external_mult: true,
            external_sum: true,
            garage_mult: true,
            garage_sum: true,
            basement_mult: true,
            basement_sum: true,
        }
    }
}

impl QualityFeatures {
    const STAGE: &'static str = "QualFeature";

    pub fn new() -> Self {
        Self::default()
    }

    fn features(&self) -> Vec<DerivedFeature> {
        let mut features = Vec::new();
        if self.high_quality_sf {
            features.push(DerivedFeature::new(
                "HighQualSF_percent",
                &["LowQualFinSF", "GrLivArea"],
                guarded_ratio(lit(1.0_f64) - float("LowQualFinSF"), "GrLivArea"),
            ));
        }
        // (flag, output, [quality, condition], product or sum)
        let pairs: [(bool, &'static str, &'static [&'static str], bool); 8] = [
            (self.overall_mult, "OverallEval_mult", &["OverallQual", "OverallCond"], true),
            (self.overall_sum, "OverallEval_sum", &["OverallQual", "OverallCond"], false),
            (self.external_mult, "ExterEval_mult", &["ExterQual", "ExterCond"], true),
            (self.external_sum, "ExterEval_sum", &["ExterQual", "ExterCond"], false),
            (self.garage_mult, "GarageEval_mult", &["GarageQual", "GarageCond"], true),
            (self.garage_sum, "GarageEval_sum", &["GarageQual", "GarageCond"], false),
            (self.basement_mult, "BsmtEval_mult", &["BsmtQual", "BsmtCond"], true),
            (self.basement_sum, "BsmtEval_sum", &["BsmtQual", "BsmtCond"], false),
        ];
        for (enabled, name, sources, product) in pairs {
            if !enabled {
                continue;
            }
            let (qual, cond) = (float(sources[0]), float(sources[1]));
            let expr = if product { qual * cond } else { qual + cond };
            features.push(DerivedFeature::new(name, sources, expr));
        }
        features
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &required_columns(&self.features()))
    }

    /// Adds the enabled quality features to the DataFrame.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        apply_derived(df, Self::STAGE, self.features())
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// Adds features based on bathrooms, bedrooms and rooms.
#[derive(Debug, Clone, Copy)]
pub struct RoomsFeatures {
    /// `TotBath = FullBath + 0.5 * HalfBath + BsmtFullBath + 0.5 * BsmtHalfBath`
    pub tot_bath: bool,
    /// `Bath_vs_Bedrooms = TotBath / BedroomAbvGr`
    pub bath_vs_bedrooms: bool,
    /// `Bedrooms_vs_LivArea = BedroomAbvGr / GrLivArea`
    pub bedrooms_vs_area: bool,
    /// `Bedrooms_vs_Rooms = BedroomAbvGr / TotRmsAbvGrd`
    pub bedrooms_vs_rooms: bool,
    /// `Rooms_vs_LivArea = TotRmsAbvGrd / GrLivArea`
    pub rooms_vs_area: bool,
}

impl Default for RoomsFeatures {
    fn default() -> Self {
        Self {
            tot_bath: true,
            bath_vs_bedrooms: true,
            bedrooms_vs_area: true,
            bedrooms_vs_rooms: true,
            rooms_vs_area: true,
        }
    }
}

const BATH_SOURCES: &[&str] = &["FullBath", "HalfBath", "BsmtFullBath", "BsmtHalfBath"];

fn total_baths() -> Expr {
    float("FullBath")
        + lit(0.5_f64) * float("HalfBath")
        + float("BsmtFullBath")
        + lit(0.5_f64) * float("BsmtHalfBath")
}

impl RoomsFeatures {
    const STAGE: &'static str = "RoomsFeature";

    pub fn new() -> Self {
        Self::default()
    }

    fn features(&self) -> Vec<DerivedFeature> {
        let mut features = Vec::new();
        if self.tot_bath {
            features.push(DerivedFeature::new("TotBath", BATH_SOURCES, total_baths()));
        }
        if self.bath_vs_bedrooms {
            features.push(DerivedFeature::new(
                "Bath_vs_Bedrooms",
                &[
                    "FullBath",
                    "HalfBath",
                    "BsmtFullBath",
                    "BsmtHalfBath",
                    "BedroomAbvGr",
                ],
                guarded_ratio(total_baths(), "BedroomAbvGr"),
            ));
        }
        if self.bedrooms_vs_area {
            features.push(DerivedFeature::new(
                "Bedrooms_vs_LivArea",
                &["BedroomAbvGr", "GrLivArea"],
                guarded_ratio(float("BedroomAbvGr"), "GrLivArea"),
            ));
        }
        if self.bedrooms_vs_rooms {
            features.push(DerivedFeature::new(
                "Bedrooms_vs_Rooms",
                &["BedroomAbvGr", "TotRmsAbvGrd"],
                guarded_ratio(float("BedroomAbvGr"), "TotRmsAbvGrd"),
            ));
        }
        if self.rooms_vs_area {
            features.push(DerivedFeature::new(
                "Rooms_vs_LivArea",
                &["TotRmsAbvGrd", "GrLivArea"],
                guarded_ratio(float("TotRmsAbvGrd"), "GrLivArea"),
            ));
        }
        features
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &required_columns(&self.features()))
    }

    /// Adds the enabled room features to the DataFrame.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        apply_derived(df, Self::STAGE, self.features())
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// Adds features based on space / area in square feet.
#[derive(Debug, Clone, Copy)]
pub struct SpaceBasedFeatures {
    /// `BsmtFinPercent = (1 - BsmtUnfSF) / TotalBsmtSF`
    pub bsmt_finished_percent: bool,
    /// `Bsmt_vs_LivArea = TotalBsmtSF / GrLivArea`
    pub bsmt_vs_living: bool,
    /// `TotalPorch`, the sum of the five porch and deck areas
    pub porch: bool,
    /// `LotLeft_percent`, the share of the lot not taken by basement, garage, pool, deck and porches
    pub lot_left_percent: bool,
    /// `Bsmt_vs_Lot = TotalBsmtSF / LotArea`
    pub bsmt_vs_lot: bool,
}

impl Default for SpaceBasedFeatures {
    fn default() -> Self {
        Self {
            bsmt_finished_percent: true,
            bsmt_vs_living: true,
            porch: true,
            lot_left_percent: true,
            bsmt_vs_lot: true,
        }
    }
}

const PORCH_SOURCES: &[&str] = &[
    "WoodDeckSF",
    "OpenPorchSF",
    "EnclosedPorch",
    "3SsnPorch",
    "ScreenPorch",
];

impl SpaceBasedFeatures {
    const STAGE: &'static str = "SpaceFeatures";

    pub fn new() -> Self {
        Self::default()
    }

    fn features(&self) -> Vec<DerivedFeature> {
        let mut features = Vec::new();
        if self.bsmt_finished_percent {
            features.push(DerivedFeature::new(
                "BsmtFinPercent",
                &["BsmtUnfSF", "TotalBsmtSF"],
                guarded_ratio(lit(1.0_f64) - float("BsmtUnfSF"), "TotalBsmtSF"),
            ));
        }
        if self.bsmt_vs_living {
            features.push(DerivedFeature::new(
                "Bsmt_vs_LivArea",
                &["TotalBsmtSF", "GrLivArea"],
                guarded_ratio(float("TotalBsmtSF"), "GrLivArea"),
            ));
        }
        if self.porch {
            features.push(DerivedFeature::new(
                "TotalPorch",
                PORCH_SOURCES,
                sum_of(PORCH_SOURCES),
            ));
        }
        if self.lot_left_percent {
            // The deck area is counted both on its own and inside the porch total.
            let built = float("TotalBsmtSF")
                + float("GarageArea")
                + float("PoolArea")
                + float("WoodDeckSF")
                + sum_of(PORCH_SOURCES);
            features.push(DerivedFeature::new(
                "LotLeft_percent",
                &[
                    "LotArea",
                    "TotalBsmtSF",
                    "GarageArea",
                    "PoolArea",
                    "WoodDeckSF",
                    "OpenPorchSF",
                    "EnclosedPorch",
                    "3SsnPorch",
                    "ScreenPorch",
                ],
                guarded_ratio(float("LotArea") - built, "LotArea"),
            ));
        }
        if self.bsmt_vs_lot {
            features.push(DerivedFeature::new(
                "Bsmt_vs_Lot",
                &["TotalBsmtSF", "LotArea"],
                guarded_ratio(float("TotalBsmtSF"), "LotArea"),
            ));
        }
        features
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &required_columns(&self.features()))
    }

    /// Adds the enabled space features to the DataFrame.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        apply_derived(df, Self::STAGE, self.features())
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

impl_transformer!(ValueAddedFeatures);
impl_transformer!(QualityFeatures);
impl_transformer!(RoomsFeatures);
impl_transformer!(SpaceBasedFeatures);
