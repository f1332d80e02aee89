//! ## Housing Features Pipeline
//!
//! This module provides core abstractions for building, fitting, and transforming data using
//! composable pipelines of transformers.
//!
//! ### Overview
//!
//! - The [`Transformer`] trait defines the common fit/transform contract of every transformer,
//!   supporting both stateful (requiring fitting) and stateless transformations.
//! - The [`Pipeline`] struct chains multiple transformers in order. `fit` is meant for
//!   training data; the plain `transform` replays the fitted steps on any other data.
//! - Macros [`crate::impl_transformer`] and [`crate::make_pipeline`] simplify the creation and implementation
//!   of transformers and pipelines.

use crate::exceptions::{FeatureError, FeatureResult};
use async_trait::async_trait;
use datafusion::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Trait for components used in the data transformation pipeline.
///
/// Every transformer must provide a `fit` method (which may collect data to compute parameters)
/// and a `transform` method (which updates the DataFrame's logical plan without triggering execution).
#[async_trait]
pub trait Transformer {
    /// Fit the transformer given a DataFrame.
    ///
    /// # Arguments
    ///
    /// * `df` - The input DataFrame.
    ///
    /// # Returns
    ///
    /// * `FeatureResult<()>` - Returns Ok if successful, or an error otherwise.
    async fn fit(&mut self, df: &DataFrame) -> FeatureResult<()>;

    /// Transform the input DataFrame, returning a new DataFrame with the transformation applied.
    ///
    /// # Arguments
    ///
    /// * `df` - The input DataFrame.
    ///
    /// # Returns
    ///
    /// * `FeatureResult<DataFrame>` - The transformed DataFrame or an error if transformation fails.
    fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame>;

    /// Returns true if the transformer is stateful (i.e. requires a call to fit before transform can be called).
    fn is_stateful(&self) -> bool;
}

/// Macro to implement the [`Transformer`] trait for the housing feature transformers.
///
/// The type must already have inherent methods:
/// - `async fn fit(&mut self, &DataFrame) -> FeatureResult<()>`
/// - `fn transform(&self, DataFrame) -> FeatureResult<DataFrame>`
/// - **`fn inherent_is_stateful(&self) -> bool`**
///
/// # Example
///
/// ```rust,no_run
/// use housing_features::exceptions::FeatureResult;
/// use datafusion::prelude::DataFrame;
/// use housing_features::impl_transformer;
///
/// pub struct MyTransformer;
///
/// impl MyTransformer {
///     pub async fn fit(&mut self, _df: &DataFrame) -> FeatureResult<()> {
///         Ok(())
///     }
///
///     pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
///         Ok(df)
///     }
///
///     pub fn inherent_is_stateful(&self) -> bool {
///         false
///     }
/// }
///
/// impl_transformer!(MyTransformer);
/// ```
#[macro_export]
macro_rules! impl_transformer {
    ($ty:ty) => {
        #[async_trait::async_trait]
        impl $crate::pipeline::Transformer for $ty {
            async fn fit(
                &mut self,
                df: &datafusion::prelude::DataFrame,
            ) -> $crate::exceptions::FeatureResult<()> {
                <$ty>::fit(self, df).await
            }
            fn transform(
                &self,
                df: datafusion::prelude::DataFrame,
            ) -> $crate::exceptions::FeatureResult<datafusion::prelude::DataFrame> {
                <$ty>::transform(self, df)
            }
            fn is_stateful(&self) -> bool {
                <$ty>::inherent_is_stateful(self)
            }
        }
    };
}

/// A pipeline that chains a sequence of transformers.
///
/// Each transformer's output (a new logical plan) is passed as input to the next transformer.
/// Nothing is executed until a terminal action (like `collect`) is called, except for the
/// data a stateful transformer reads during `fit`.
pub struct Pipeline {
    steps: Vec<(String, Box<dyn Transformer + Send + Sync>)>,
    verbose: bool,
}

impl Pipeline {
    /// Creates a new pipeline.
    ///
    /// # Arguments
    ///
    /// * `steps` - A vector of (name, transformer) pairs (each transformer is already boxed).
    /// * `verbose` - If true, logs each step and its timing at `INFO` level.
    pub fn new(steps: Vec<(String, Box<dyn Transformer + Send + Sync>)>, verbose: bool) -> Self {
        Self { steps, verbose }
    }

    /// Names of the steps, in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn log_step(verbose: bool, message: &str, name: &str) {
        if verbose {
            info!(step = name, "{}", message);
        } else {
            debug!(step = name, "{}", message);
        }
    }

    fn step_error(name: &str, err: FeatureError) -> FeatureError {
        FeatureError::PipelineStep {
            step: name.to_string(),
            source: Box::new(err),
        }
    }

    /// Fits each transformer (sequentially) on the output of the previous steps and returns
    /// the fully transformed DataFrame.
    pub async fn fit(&mut self, df: &DataFrame) -> FeatureResult<DataFrame> {
        if self.steps.is_empty() {
            return Err(FeatureError::InvalidParameter(
                "Pipeline must have at least one transformer.".to_string(),
            ));
        }
        let verbose = self.verbose;
        let mut current_df = df.clone();
        for (name, step) in self.steps.iter_mut() {
            Self::log_step(verbose, "fitting step", name);
            let start = Instant::now();
            step.fit(&current_df)
                .await
                .map_err(|e| Self::step_error(name, e))?;
            current_df = step
                .transform(current_df)
                .map_err(|e| Self::step_error(name, e))?;
            Self::log_step(
                verbose,
                &format!("step completed in {:?}", start.elapsed()),
                name,
            );
        }
        Ok(current_df)
    }

    /// Applies the `transform` method of each transformer (without fitting).
    pub fn transform(&self, df: DataFrame) -> FeatureResult<DataFrame> {
        if self.steps.is_empty() {
            return Err(FeatureError::InvalidParameter(
                "Pipeline must have at least one transformer.".to_string(),
            ));
        }
        let mut current_df = df;
        for (name, step) in self.steps.iter() {
            Self::log_step(self.verbose, "applying transformer", name);
            current_df = step
                .transform(current_df)
                .map_err(|e| Self::step_error(name, e))?;
        }
        Ok(current_df)
    }

    /// Convenience method to call `fit` and then return the final transformed DataFrame.
    pub async fn fit_transform(&mut self, df: &DataFrame) -> FeatureResult<DataFrame> {
        self.fit(df).await
    }
}

/// Macro to simplify pipeline creation by automatically boxing transformers.
///
/// # Example
///
/// ```rust,no_run
/// use housing_features::make_pipeline;
/// use housing_features::transformers::imputation::FixedImputer;
///
/// // Create a pipeline with a single step.
/// let pipeline = make_pipeline!(false,
///     ("impute", FixedImputer::new()),
/// );
/// ```
#[macro_export]
macro_rules! make_pipeline {
    ($verbose:expr, $(($name:expr, $transformer:expr)),+ $(,)?) => {
        {
            let steps: Vec<(String, Box<dyn $crate::pipeline::Transformer + Send + Sync>)> = vec![
                $(
                    ($name.to_string(), Box::new($transformer)),
                )+
            ];
            $crate::pipeline::Pipeline::new(steps, $verbose)
        }
    };
}
