//! ## Static Encoding Tables
//!
//! Read-only lookup tables shared by the transformers. They describe domain knowledge about
//! the housing attributes and are not derived from data:
//!
//! - [`QUALITY_SCALE`]: the five-point quality code used by many attributes.
//! - [`ordinal_scale`]: the bespoke rank scale of each ordinal attribute.
//! - [`impute_value`]: the constant that stands for "feature absent" in each column.
//! - [`SEASONS`]: month-of-sale buckets.
//! - [`binary_rule`]: the presence/indicator rule registered for each column.

use crate::transformers::binary_encoding::{BinaryKind, BinaryRule};

/// Quality codes and their ranks. Any other value (including null) encodes as 0.
pub const QUALITY_SCALE: &[(&str, i64)] = &[("Ex", 5), ("Gd", 4), ("TA", 3), ("Fa", 2), ("Po", 1)];

const BSMT_EXPOSURE: &[(&str, f64)] = &[("Gd", 4.0), ("Av", 3.0), ("Mn", 2.0), ("No", 1.0)];

const BSMT_FIN_TYPE: &[(&str, f64)] = &[
    ("GLQ", 6.0),
    ("ALQ", 5.0),
    ("BLQ", 4.0),
    ("Rec", 3.0),
    ("LwQ", 2.0),
    ("Unf", 1.0),
];

const GARAGE_FINISH: &[(&str, f64)] = &[("Fin", 3.0), ("RFn", 2.0), ("Unf", 1.0)];

const LOT_SHAPE: &[(&str, f64)] = &[("Reg", 4.0), ("IR1", 3.0), ("IR2", 2.0), ("IR3", 1.0)];

// "P" (partial pavement) sits halfway between paved and dirt.
const PAVED_DRIVE: &[(&str, f64)] = &[("Y", 1.0), ("P", 0.5), ("N", 0.0)];

const ELECTRICAL: &[(&str, f64)] = &[
    ("SBrkr", 4.0),
    ("FuseA", 3.0),
    ("FuseF", 2.0),
    ("FuseP", 1.0),
    ("Mix", 2.5),
];

const FUNCTIONAL: &[(&str, f64)] = &[
    ("Typ", 8.0),
    ("Min1", 7.0),
    ("Min2", 6.0),
    ("Mod", 5.0),
    ("Maj1", 4.0),
    ("Maj2", 3.0),
    ("Sev", 2.0),
    ("Sal", 1.0),
];

const LAND_SLOPE: &[(&str, f64)] = &[("Gtl", 1.0), ("Mod", 2.0), ("Sev", 3.0)];

const HOUSE_STYLE: &[(&str, f64)] = &[
    ("1Story", 1.0),
    ("1.5Fin", 1.5),
    ("1.5Unf", 1.25),
    ("2Story", 2.0),
    ("2.5Fin", 2.5),
    ("2.5Unf", 2.25),
    ("SFoyer", 2.0),
    ("SLvl", 2.0),
];

/// Returns the rank scale of an ordinal attribute, or `None` if the column has no scale.
pub fn ordinal_scale(column: &str) -> Option<&'static [(&'static str, f64)]> {
    match column {
        "BsmtExposure" => Some(BSMT_EXPOSURE),
        "BsmtFinType1" | "BsmtFinType2" => Some(BSMT_FIN_TYPE),
        "GarageFinish" => Some(GARAGE_FINISH),
        "LotShape" => Some(LOT_SHAPE),
        "PavedDrive" => Some(PAVED_DRIVE),
        "Electrical" => Some(ELECTRICAL),
        "Functional" => Some(FUNCTIONAL),
        "LandSlope" => Some(LAND_SLOPE),
        "HouseStyle" => Some(HOUSE_STYLE),
        _ => None,
    }
}

/// A constant used to fill missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImputeValue {
    Number(f64),
    Text(&'static str),
}

/// Imputation constants; a missing value in these columns means the feature is absent.
pub const IMPUTE_VALUES: &[(&str, ImputeValue)] = &[
    ("LotFrontage", ImputeValue::Number(0.0)),
    ("GarageType", ImputeValue::Text("None")),
    // far-future sentinel for "no garage"
    ("GarageYrBlt", ImputeValue::Number(2100.0)),
    ("MasVnrArea", ImputeValue::Number(0.0)),
    ("BsmtFinSF1", ImputeValue::Number(0.0)),
    ("BsmtFinSF2", ImputeValue::Number(0.0)),
    ("BsmtUnfSF", ImputeValue::Number(0.0)),
    ("TotalBsmtSF", ImputeValue::Number(0.0)),
    ("BsmtFullBath", ImputeValue::Number(0.0)),
    ("BsmtHalfBath", ImputeValue::Number(0.0)),
    ("GarageCars", ImputeValue::Number(0.0)),
    ("GarageArea", ImputeValue::Number(0.0)),
];

/// Looks up the imputation constant of a column.
pub fn impute_value(column: &str) -> Option<ImputeValue> {
    IMPUTE_VALUES
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, value)| *value)
}

/// Season of sale for each month (`MoSold`).
pub const SEASONS: &[(&str, &[i64])] = &[
    ("Winter", &[12, 1, 2]),
    ("Spring", &[3, 4, 5]),
    ("Summer", &[6, 7, 8]),
    ("Autumn", &[9, 10, 11]),
];

/// Returns the binary rule registered for a source column, if any.
pub fn binary_rule(column: &str) -> Option<BinaryRule> {
    let (kind, output) = match column {
        "Alley" => (BinaryKind::NotNull, "hasAlley"),
        "BldgType" => (BinaryKind::NotEqual("1Fam".to_string()), "is1Fam"),
        "MiscFeature" => (BinaryKind::NotNull, "hasFeature"),
        "Fence" => (BinaryKind::NotNull, "hasFence"),
        "MasVnrType" => (
            BinaryKind::MemberOf(
                ["BrkCmn", "BrkFace", "CBlock", "Stone"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            "hasMasVnr",
        ),
        _ => return None,
    };
    Some(BinaryRule::new(column, kind, output))
}
