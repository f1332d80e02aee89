mod common;

use common::*;
use housing_features::exceptions::FeatureError;
use housing_features::transformers::binary_encoding::{BinaryEncoder, BinaryKind, BinaryRule};

#[tokio::test]
async fn test_fixed_binary_encoding() {
    let df = create_dataframe(vec![
        ("Id", ints(&[1, 2, 3])),
        ("MiscFeature", strings(&[Some("Shed"), None, None])),
        ("CentralAir", strings(&[Some("Y"), Some("N"), None])),
        ("MasVnrType", strings(&[Some("Stone"), Some("BrkFace"), None])),
    ])
    .await;

    let mut encoder = BinaryEncoder::fixed();
    encoder.fit(&df).await.unwrap();
    let batch = collect_batch(encoder.transform(df).unwrap()).await;

    assert_eq!(
        column_names(&batch),
        vec!["Id", "hasMiscFeature", "CentralAir", "MasVnrStone"]
    );
    assert_eq!(
        f64_values(&batch, "hasMiscFeature"),
        vec![Some(1.0), Some(0.0), Some(0.0)]
    );
    assert_eq!(
        f64_values(&batch, "CentralAir"),
        vec![Some(1.0), Some(0.0), None]
    );
    assert_eq!(
        f64_values(&batch, "MasVnrStone"),
        vec![Some(1.0), Some(0.0), Some(0.0)]
    );
}

#[tokio::test]
async fn test_registered_rules() {
    let df = create_dataframe(vec![
        ("Alley", strings(&[Some("Grvl"), None, Some("Pave")])),
        ("BldgType", strings(&[Some("1Fam"), Some("Duplex"), None])),
        ("Fence", strings(&[None, Some("MnPrv"), None])),
        ("MasVnrType", strings(&[Some("None"), Some("BrkCmn"), None])),
    ])
    .await;

    let encoder = BinaryEncoder::for_columns(vec![
        "Alley".to_string(),
        "BldgType".to_string(),
        "Fence".to_string(),
        "MasVnrType".to_string(),
    ])
    .unwrap();
    let batch = collect_batch(encoder.transform(df).unwrap()).await;

    assert_eq!(
        column_names(&batch),
        vec!["hasAlley", "is1Fam", "hasFence", "hasMasVnr"]
    );
    assert_eq!(
        f64_values(&batch, "hasAlley"),
        vec![Some(1.0), Some(0.0), Some(1.0)]
    );
    // A missing building type counts as "not a single-family house".
    assert_eq!(
        f64_values(&batch, "is1Fam"),
        vec![Some(0.0), Some(1.0), Some(1.0)]
    );
    assert_eq!(
        f64_values(&batch, "hasFence"),
        vec![Some(0.0), Some(1.0), Some(0.0)]
    );
    assert_eq!(
        f64_values(&batch, "hasMasVnr"),
        vec![Some(0.0), Some(1.0), Some(0.0)]
    );
}

#[tokio::test]
async fn test_unknown_column_has_no_rule() {
    let result = BinaryEncoder::for_columns(vec!["Street".to_string()]);
    assert!(matches!(result, Err(FeatureError::InvalidParameter(_))));
}

#[tokio::test]
async fn test_custom_rule() {
    let df = create_dataframe(vec![(
        "Street",
        strings(&[Some("Pave"), Some("Grvl"), Some("Y")]),
    )])
    .await;
    let encoder = BinaryEncoder::new(vec![BinaryRule::new(
        "Street",
        BinaryKind::MemberOf(vec!["Pave".to_string()]),
        "isPaved",
    )]);
    let batch = collect_batch(encoder.transform(df).unwrap()).await;
    assert_eq!(column_names(&batch), vec!["isPaved"]);
    assert_eq!(
        f64_values(&batch, "isPaved"),
        vec![Some(1.0), Some(0.0), Some(0.0)]
    );
}

#[tokio::test]
async fn test_missing_columns_are_reported() {
    let df = create_dataframe(vec![("MiscFeature", strings(&[None, Some("Gar2")]))]).await;

    let mut encoder = BinaryEncoder::fixed();
    let err = encoder.fit(&df).await.unwrap_err();
    match &err {
        FeatureError::MissingColumns { stage, columns } => {
            assert_eq!(*stage, "BinaryEnc");
            assert_eq!(columns, &vec!["CentralAir".to_string(), "MasVnrType".to_string()]);
        }
        other => panic!("Expected MissingColumns, got {:?}", other),
    }

    let err = encoder.transform(df).unwrap_err();
    assert_eq!(
        err.missing_columns(),
        Some(&["CentralAir".to_string(), "MasVnrType".to_string()][..])
    );
}
