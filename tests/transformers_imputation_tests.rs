mod common;

use arrow::array::ArrayRef;
use common::*;
use housing_features::exceptions::FeatureError;
use housing_features::transformers::imputation::{FixedImputer, SimpleImputer};

/// All twelve columns of the constant table, with one missing value each in the second row.
fn fixed_columns() -> Vec<(&'static str, ArrayRef)> {
    vec![
        ("Id", ints(&[1, 2])),
        ("LotFrontage", floats(&[Some(65.0), None])),
        ("GarageType", strings(&[Some("Attchd"), None])),
        ("GarageYrBlt", floats(&[Some(2003.0), None])),
        ("MasVnrArea", floats(&[Some(196.0), None])),
        ("BsmtFinSF1", floats(&[Some(706.0), None])),
        ("BsmtFinSF2", floats(&[Some(0.0), None])),
        ("BsmtUnfSF", floats(&[Some(150.0), None])),
        ("TotalBsmtSF", floats(&[Some(856.0), None])),
        ("BsmtFullBath", floats(&[Some(1.0), None])),
        ("BsmtHalfBath", floats(&[Some(0.0), None])),
        ("GarageCars", floats(&[Some(2.0), None])),
        ("GarageArea", floats(&[Some(548.0), None])),
    ]
}

#[tokio::test]
async fn test_fixed_imputer_fills_domain_constants() {
    let df = create_dataframe(fixed_columns()).await;

    let mut imputer = FixedImputer::new();
    imputer.fit(&df).await.unwrap();
    let batch = collect_batch(imputer.transform(df).unwrap()).await;

    let expected_names: Vec<String> = fixed_columns()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    assert_eq!(column_names(&batch), expected_names);

    assert_eq!(
        string_values(&batch, "GarageType"),
        vec![Some("Attchd".to_string()), Some("None".to_string())]
    );
    assert_close(
        &f64_values(&batch, "GarageYrBlt"),
        &[Some(2003.0), Some(2100.0)],
    );
    for name in [
        "LotFrontage",
        "MasVnrArea",
        "BsmtFinSF1",
        "BsmtFinSF2",
        "BsmtUnfSF",
        "TotalBsmtSF",
        "BsmtFullBath",
        "BsmtHalfBath",
        "GarageCars",
        "GarageArea",
    ] {
        let values = f64_values(&batch, name);
        assert_eq!(values[1], Some(0.0), "column {} should be imputed with 0", name);
        assert!(values[0].is_some());
    }
}

#[tokio::test]
async fn test_fixed_imputer_reports_all_missing_columns() {
    let df = create_dataframe(vec![
        ("LotFrontage", floats(&[None])),
        ("GarageType", strings(&[None])),
    ])
    .await;

    let imputer = FixedImputer::new();
    let err = imputer.transform(df).unwrap_err();
    match err {
        FeatureError::MissingColumns { stage, columns } => {
            assert_eq!(stage, "Imputer");
            assert_eq!(
                columns,
                vec![
                    "GarageYrBlt",
                    "MasVnrArea",
                    "BsmtFinSF1",
                    "BsmtFinSF2",
                    "BsmtUnfSF",
                    "TotalBsmtSF",
                    "BsmtFullBath",
                    "BsmtHalfBath",
                    "GarageCars",
                    "GarageArea",
                ]
            );
        }
        other => panic!("Expected MissingColumns, got {:?}", other),
    }
}

#[tokio::test]
async fn test_simple_imputer_only_touches_its_columns() {
    let df = create_dataframe(vec![
        ("LotFrontage", floats(&[None, Some(80.0)])),
        ("MasVnrArea", floats(&[None, Some(10.0)])),
    ])
    .await;

    let mut imputer = SimpleImputer::new(vec!["LotFrontage".to_string()]);
    imputer.fit(&df).await.unwrap();
    let batch = collect_batch(imputer.transform(df).unwrap()).await;

    assert_eq!(
        f64_values(&batch, "LotFrontage"),
        vec![Some(0.0), Some(80.0)]
    );
    assert_eq!(f64_values(&batch, "MasVnrArea"), vec![None, Some(10.0)]);
}

#[tokio::test]
async fn test_simple_imputer_rejects_column_without_constant() {
    let df = create_dataframe(vec![("SalePrice", floats(&[None]))]).await;
    let mut imputer = SimpleImputer::new(vec!["SalePrice".to_string()]);
    let result = imputer.fit(&df).await;
    assert!(matches!(result, Err(FeatureError::InvalidParameter(_))));
}
