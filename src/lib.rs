//! # Housing Features
//!
//! Feature engineering transformers for house-price regression on the Ames housing
//! attribute schema (`LotArea`, `YearBuilt`, `OverallQual`, ...), built on Apache DataFusion.
//!
//! Every transformer implements the [`pipeline::Transformer`] contract: an async `fit` that
//! learns whatever state the transformer needs (most need none) and a `transform` that
//! returns a new lazily planned [`datafusion::prelude::DataFrame`]. Transformers can be
//! chained with [`pipeline::Pipeline`] or the [`make_pipeline!`] macro.
//!
//! - [`transformers::binary_encoding`]: presence and yes/no indicators.
//! - [`transformers::categorical_encoding`]: quality, ordinal and dummy encodings.
//! - [`transformers::imputation`]: domain-constant imputers.
//! - [`transformers::numerical`]: `log(1 + x)` features, optionally picked by skewness.
//! - [`transformers::datetime_features`] and [`transformers::feature_creation`]: derived features.
//! - [`transformers::feature_selection`]: final projection and column dropping.
//!
//! Errors are reported as [`exceptions::FeatureError`].

pub mod encodings;
pub mod exceptions;
mod logging;
pub mod pipeline;
pub mod transformers;
