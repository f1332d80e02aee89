//! ## Binary Encoding Transformers
//!
//! This module provides [`BinaryEncoder`], which turns categorical or possibly-null columns
//! into 0/1 indicator columns and renames them to a feature name describing the indicator.
//!
//! Each column is handled by a [`BinaryRule`]; the rule kinds are:
//!
//! - [`BinaryKind::NotNull`]: 1 if a value is present, 0 if it is null.
//! - [`BinaryKind::NotEqual`]: 1 if the value differs from a reference category, 0 otherwise.
//!   A null is treated as different from the reference.
//! - [`BinaryKind::MemberOf`]: 1 if the value belongs to a category set, 0 otherwise (null included).
//! - [`BinaryKind::YesNo`]: `Y` becomes 1 and `N` becomes 0; any other value, null included, stays null.
//!
//! The recoded column replaces its source at the same position, under the rule's output name.
//! Errors are returned as [`FeatureError`], and results are wrapped in [`FeatureResult`].

use crate::encodings::binary_rule;
use crate::exceptions::{FeatureError, FeatureResult};
use crate::impl_transformer;
use crate::transformers::validate_columns;
use datafusion::dataframe::DataFrame;
use datafusion::logical_expr::{ident, lit, Case as DFCase, Expr};
use datafusion::scalar::ScalarValue;

const STAGE: &str = "BinaryEnc";

/// How a source column is turned into an indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryKind {
    NotNull,
    NotEqual(String),
    MemberOf(Vec<String>),
    YesNo,
}

/// A binary encoding rule: source column, rule kind, and the name of the produced column.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryRule {
    pub source: String,
    pub kind: BinaryKind,
    pub output: String,
}

impl BinaryRule {
    pub fn new(source: impl Into<String>, kind: BinaryKind, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
            output: output.into(),
        }
    }

    /// Builds the indicator expression for this rule (Int64).
    fn expr(&self) -> Expr {
        let source = ident(&self.source);
        let (when_then_expr, else_expr) = match &self.kind {
            BinaryKind::NotNull => (
                vec![(Box::new(source.is_not_null()), Box::new(lit(1_i64)))],
                lit(0_i64),
            ),
            BinaryKind::NotEqual(reference) => (
                vec![
                    (Box::new(source.clone().is_null()), Box::new(lit(1_i64))),
                    (
                        Box::new(source.eq(lit(reference.clone()))),
                        Box::new(lit(0_i64)),
                    ),
                ],
                lit(1_i64),
            ),
            BinaryKind::MemberOf(categories) => {
                let list = categories.iter().map(|c| lit(c.clone())).collect();
                (
                    vec![(Box::new(source.in_list(list, false)), Box::new(lit(1_i64)))],
                    lit(0_i64),
                )
            }
            BinaryKind::YesNo => (
                vec![
                    (
                        Box::new(source.clone().eq(lit("Y"))),
                        Box::new(lit(1_i64)),
                    ),
                    (Box::new(source.eq(lit("N"))), Box::new(lit(0_i64))),
                ],
                lit(ScalarValue::Int64(None)),
            ),
        };
        Expr::Case(DFCase {
            expr: None,
            when_then_expr,
            else_expr: Some(Box::new(else_expr)),
        })
    }
}

/// Recodes columns into 0/1 indicators and renames them.
pub struct BinaryEncoder {
    pub rules: Vec<BinaryRule>,
}

impl BinaryEncoder {
    /// Creates an encoder from explicit rules.
    pub fn new(rules: Vec<BinaryRule>) -> Self {
        Self { rules }
    }

    /// The fixed three-column encoder:
    /// `MiscFeature` -> `hasMiscFeature` (present), `CentralAir` -> `CentralAir` (Y/N),
    /// `MasVnrType` -> `MasVnrStone` (is `Stone`).
    pub fn fixed() -> Self {
        Self::new(vec![
            BinaryRule::new("MiscFeature", BinaryKind::NotNull, "hasMiscFeature"),
            BinaryRule::new("CentralAir", BinaryKind::YesNo, "CentralAir"),
            BinaryRule::new(
                "MasVnrType",
                BinaryKind::MemberOf(vec!["Stone".to_string()]),
                "MasVnrStone",
            ),
        ])
    }

    /// Creates an encoder for the given columns using the registered rule of each column
    /// (see [`crate::encodings::binary_rule`]).
    pub fn for_columns(columns: Vec<String>) -> FeatureResult<Self> {
        let rules = columns
            .iter()
            .map(|name| {
                binary_rule(name).ok_or_else(|| {
                    FeatureError::InvalidParameter(format!(
                        "No binary encoding rule for column '{}'",
                        name
                    ))
                })
            })
            .collect::<FeatureResult<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    fn sources(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.source.as_str()).collect()
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, STAGE, &self.sources())
    }

    /// Replaces each source column with its indicator, renamed to the rule's output name.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        validate_columns(&df, STAGE, &self.sources())?;
        let exprs: Vec<Expr> = df
            .schema()
            .fields()
            .iter()
            .map(|field| {
                let name = field.name();
                match self.rules.iter().find(|r| &r.source == name) {
                    Some(rule) => rule.expr().alias(&rule.output),
                    None => ident(name),
                }
            })
            .collect();
        df.select(exprs).map_err(FeatureError::from)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

impl_transformer!(BinaryEncoder);
