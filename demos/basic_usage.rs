// Run `cargo run --example basic_usage` to execute this example.
// Put the Kaggle `train.csv` under `tests/testdata` (with missing values left empty rather
// than written as "NA") to run it on the real data instead of the synthetic sample. Set `DEBUG_HOUSING_FEATURES=1` to see the step timings.

use std::error::Error;
use std::path::Path;

use housing_features::make_pipeline;
use housing_features::transformers::binary_encoding::BinaryEncoder;
use housing_features::transformers::categorical_encoding::{
    DummyFeatures, OrdinalEncoder, QualityEncoder,
};
use housing_features::transformers::datetime_features::TimeBasedFeatures;
use housing_features::transformers::feature_creation::{
    QualityFeatures, RoomsFeatures, SpaceBasedFeatures, ValueAddedFeatures,
};
use housing_features::transformers::feature_selection::FeatureSelector;
use housing_features::transformers::imputation::FixedImputer;
use housing_features::transformers::numerical::Log1pTransformer;

mod shared;

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}", shared::DATA_DIR, "train.csv");
    let input_df = if Path::new(&path).exists() {
        shared::load_data(&path).await?
    } else {
        shared::sample_houses(200).await?
    };

    let mut pipeline = make_pipeline!(
        true,
        ("impute", FixedImputer::new()),
        (
            "quality",
            QualityEncoder::new(names(&[
                "ExterQual",
                "ExterCond",
                "BsmtQual",
                "BsmtCond",
                "KitchenQual",
                "FireplaceQu",
                "GarageQual",
                "GarageCond",
                "PoolQC",
            ]))
        ),
        (
            "ordinal",
            OrdinalEncoder::new(names(&[
                "BsmtExposure",
                "BsmtFinType1",
                "BsmtFinType2",
                "PavedDrive",
            ]))
        ),
        ("binary", BinaryEncoder::fixed()),
        ("time", TimeBasedFeatures::new()),
        ("value", ValueAddedFeatures::new()),
        ("quality_features", QualityFeatures::new()),
        ("rooms", RoomsFeatures::new()),
        ("space", SpaceBasedFeatures::new()),
        (
            "log",
            Log1pTransformer::new(names(&["LotArea", "GrLivArea", "SalePrice"]))
        ),
        ("dummies", DummyFeatures::new()),
        (
            "select",
            FeatureSelector::new(names(&[
                "Id",
                "OverallEval_mult",
                "TotBath",
                "Bath_vs_Bedrooms",
                "LotLeft_percent",
                "YrsSinceRemod",
                "isRemodeled",
                "CentralAir",
                "SalePrice_log",
            ]))
        ),
    );

    let features = pipeline.fit(&input_df).await?;
    features.limit(0, Some(10))?.show().await?;

    Ok(())
}
