//! ## Categorical Encoding Transformers
//!
//! This module provides the transformers that turn the string-coded housing attributes into
//! numbers.
//!
//! The encoders include:
//! - **QualityEncoder:** Maps the five-point quality code (`Ex`, `Gd`, `TA`, `Fa`, `Po`) to `5..1`.
//! - **OrdinalEncoder:** Maps each ordinal attribute through its own rank scale.
//! - **DummyFeatures:** Expands every remaining string column into indicator columns,
//!   dropping the first category of each.
//!
//! The quality and ordinal encoders map any value outside their scale, null included, to 0,
//! since a missing rating in this dataset means the rated feature is absent.
//! Errors are returned as [`FeatureError`], and results are wrapped in [`FeatureResult`].

use crate::encodings::{ordinal_scale, QUALITY_SCALE};
use crate::exceptions::{FeatureError, FeatureResult};
use crate::impl_transformer;
use crate::transformers::validate_columns;
use arrow::array::{Array, StringArray};
use arrow::compute::cast;
use datafusion::arrow::datatypes::DataType;
use datafusion::dataframe::DataFrame;
use datafusion::logical_expr::{ident, lit, Case as DFCase, Expr, Literal};
use std::collections::BTreeSet;
use tracing::debug;

/// Helper to build a CASE WHEN expression given a mapping from category strings to values.
/// For each pair, the expression generated is:
/// `WHEN <col> = lit(<category>) THEN lit(<encoded_value>)`
/// and `default` is used as the ELSE branch.
fn build_case_expr<T: Literal + Copy>(col_name: &str, mapping: &[(&str, T)], default: T) -> Expr {
    let when_then_expr = mapping
        .iter()
        .map(|(cat, val)| {
            (
                Box::new(ident(col_name).eq(lit(*cat))),
                Box::new(lit(*val)),
            )
        })
        .collect();
    Expr::Case(DFCase {
        expr: None,
        when_then_expr,
        else_expr: Some(Box::new(lit(default))),
    })
}

/// Generic helper to apply a mapping to each target column in a DataFrame.
/// Columns listed in `target_cols` are replaced in place by the CASE expression built from
/// their mapping; all other columns are retained as they are.
fn apply_mapping<T: Literal + Copy + 'static>(
    df: DataFrame,
    target_cols: &[String],
    mapping_fn: impl Fn(&str) -> Option<&'static [(&'static str, T)]>,
    default: T,
) -> FeatureResult<DataFrame> {
    let exprs: Vec<Expr> = df
        .schema()
        .fields()
        .iter()
        .map(|field| {
            let name = field.name();
            match mapping_fn(name.as_str()) {
                Some(map) if target_cols.contains(name) => {
                    build_case_expr(name, map, default).alias(name)
                }
                _ => ident(name),
            }
        })
        .collect();
    df.select(exprs).map_err(FeatureError::from)
}

/// ------------------------- QualityEncoder -------------------------
///
/// QualityEncoder replaces the quality code of each target column with its rank
/// (`Ex`=5, `Gd`=4, `TA`=3, `Fa`=2, `Po`=1). Every other value, null included, becomes 0.
pub struct QualityEncoder {
    pub columns: Vec<String>,
}

impl QualityEncoder {
    const STAGE: &'static str = "QualEnc";

    /// Create a new QualityEncoder for the specified columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        validate_columns(df, Self::STAGE, &self.columns)
    }

    /// Transform the DataFrame by replacing each target column with its quality rank (Int64).
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        validate_columns(&df, Self::STAGE, &self.columns)?;
        apply_mapping(df, &self.columns, |_| Some(QUALITY_SCALE), 0_i64)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// ------------------------- OrdinalEncoder -------------------------
///
/// OrdinalEncoder replaces each category with its rank on the column's own scale
/// (see [`crate::encodings::ordinal_scale`]). Values outside the scale, null included, become 0.
pub struct OrdinalEncoder {
    pub columns: Vec<String>,
}

impl OrdinalEncoder {
    const STAGE: &'static str = "OrdEnc";

    /// Create a new OrdinalEncoder for the specified columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    fn validate(&self, df: &DataFrame) -> FeatureResult<()> {
        if let Some(unknown) = self.columns.iter().find(|c| ordinal_scale(c).is_none()) {
            return Err(FeatureError::InvalidParameter(format!(
                "No ordinal scale defined for column '{}'",
                unknown
            )));
        }
        validate_columns(df, Self::STAGE, &self.columns)
    }

    /// This transformer is stateless, so fit only checks the columns.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        self.validate(df)
    }

    /// Transform the DataFrame by replacing each target column with its ordinal rank (Float64).
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        self.validate(&df)?;
        apply_mapping(df, &self.columns, ordinal_scale, 0.0_f64)
    }

    fn inherent_is_stateful(&self) -> bool {
        false
    }
}

/// ------------------------- DummyFeatures -------------------------

fn is_string_type(dt: &DataType) -> bool {
    matches!(dt, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
}

/// Extract the sorted distinct non-null string values of a column.
async fn extract_distinct_values(df: &DataFrame, col_name: &str) -> FeatureResult<Vec<String>> {
    let distinct_df = df.clone().select(vec![ident(col_name)])?.distinct()?;
    let batches = distinct_df.collect().await?;
    let mut values = BTreeSet::new();
    for batch in batches {
        let array = cast(batch.column(0), &DataType::Utf8)?;
        let array = array
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                FeatureError::InvalidParameter(format!(
                    "Expected Utf8 array for column {}",
                    col_name
                ))
            })?;
        for i in 0..array.len() {
            if !array.is_null(i) {
                values.insert(array.value(i).to_string());
            }
        }
    }
    Ok(values.into_iter().collect())
}

/// DummyFeatures one-hot encodes every string column found at fit time.
///
/// For each such column the categories are sorted and the first one is dropped, so the
/// column expands into `n - 1` Int32 indicators named `<column>_<category>`. The source
/// columns are removed, the other columns keep their order, and the indicators are appended
/// at the end. A null value yields 0 in every indicator of its column.
pub struct DummyFeatures {
    /// Column name and the categories that get an indicator column (first category dropped).
    pub categories: Vec<(String, Vec<String>)>,
    fitted: bool,
}

impl Default for DummyFeatures {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyFeatures {
    const STAGE: &'static str = "Dummies";

    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            fitted: false,
        }
    }

    /// Learn the categories of every string column.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()> {
        let string_cols: Vec<String> = df
            .schema()
            .fields()
            .iter()
            .filter(|f| is_string_type(f.data_type()))
            .map(|f| f.name().to_string())
            .collect();
        let mut categories = Vec::with_capacity(string_cols.len());
        for col_name in string_cols {
            let mut values = extract_distinct_values(df, &col_name).await?;
            if !values.is_empty() {
                values.remove(0);
            }
            debug!(column = %col_name, indicators = values.len(), "dummy categories learned");
            categories.push((col_name, values));
        }
        self.categories = categories;
        self.fitted = true;
        Ok(())
    }

    /// Replace the fitted string columns with their indicator columns.
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        if !self.fitted {
            return Err(FeatureError::FitNotCalled);
        }
        let sources: Vec<&str> = self.categories.iter().map(|(c, _)| c.as_str()).collect();
        validate_columns(&df, Self::STAGE, &sources)?;

        let mut exprs: Vec<Expr> = df
            .schema()
            .fields()
            .iter()
            .filter(|field| !sources.contains(&field.name().as_str()))
            .map(|field| ident(field.name()))
            .collect();
        for (col_name, cats) in &self.categories {
            for cat in cats {
                let indicator = Expr::Case(DFCase {
                    expr: None,
                    when_then_expr: vec![(
                        Box::new(ident(col_name).eq(lit(cat.clone()))),
                        Box::new(lit(1_i32)),
                    )],
                    else_expr: Some(Box::new(lit(0_i32))),
                })
                .alias(format!("{}_{}", col_name, cat));
                exprs.push(indicator);
            }
        }
        if exprs.is_empty() {
            return Err(FeatureError::InvalidParameter(
                "Dummy encoding would result in an empty DataFrame.".to_string(),
            ));
        }
        df.select(exprs).map_err(FeatureError::from)
    }

    fn inherent_is_stateful(&self) -> bool {
        true
    }
}

impl_transformer!(QualityEncoder);
impl_transformer!(OrdinalEncoder);
impl_transformer!(DummyFeatures);
