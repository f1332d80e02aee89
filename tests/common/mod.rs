#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::{cast, concat_batches};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::{DataFrame, SessionContext};

/// Float64 column from optional values.
pub fn floats(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

/// Int64 column from plain values.
pub fn ints(values: &[i64]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

/// Utf8 column from optional values.
pub fn strings(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

/// Registers the given columns as an in-memory table and returns it as a DataFrame.
pub async fn create_dataframe(columns: Vec<(&str, ArrayRef)>) -> DataFrame {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

    let mem_table = MemTable::try_new(schema, vec![vec![batch]]).unwrap();
    let ctx = SessionContext::new();
    ctx.register_table("t", Arc::new(mem_table)).unwrap();
    ctx.table("t").await.unwrap()
}

/// Executes the plan and returns all rows as a single batch.
pub async fn collect_batch(df: DataFrame) -> RecordBatch {
    let batches = df.collect().await.unwrap();
    let batch = batches.first().expect("Expected at least one batch");
    concat_batches(&batch.schema(), &batches).unwrap()
}

/// Column names of a batch, in order.
pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect()
}

/// Values of a numeric column, cast to f64.
pub fn f64_values(batch: &RecordBatch, name: &str) -> Vec<Option<f64>> {
    let index = batch
        .schema()
        .index_of(name)
        .unwrap_or_else(|_| panic!("column {} not found", name));
    let array = cast(batch.column(index), &DataType::Float64).unwrap();
    array
        .as_any()
        .downcast_ref::<Float64Array>()
        .expect("Expected Float64Array")
        .iter()
        .collect()
}

/// Values of a string column.
pub fn string_values(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let index = batch
        .schema()
        .index_of(name)
        .unwrap_or_else(|_| panic!("column {} not found", name));
    let array = cast(batch.column(index), &DataType::Utf8).unwrap();
    let array = array
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("Expected StringArray");
    (0..array.len())
        .map(|i| {
            if array.is_null(i) {
                None
            } else {
                Some(array.value(i).to_string())
            }
        })
        .collect()
}

/// Asserts that two optional float sequences match within a small tolerance.
pub fn assert_close(actual: &[Option<f64>], expected: &[Option<f64>]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        match (a, e) {
            (Some(a), Some(e)) => approx::assert_abs_diff_eq!(*a, *e, epsilon = 1e-9),
            (None, None) => {}
            _ => panic!("Row {}: expected {:?}, got {:?}", i, e, a),
        }
    }
}

/// Three houses with every column the housing transformers read, shaped like the raw data:
/// ratings are still strings and absent features are null.
pub fn housing_columns() -> Vec<(&'static str, ArrayRef)> {
    vec![
        ("Id", ints(&[1, 2, 3])),
        ("LotFrontage", floats(&[Some(65.0), None, Some(68.0)])),
        ("LotArea", ints(&[8450, 9600, 11250])),
        ("Street", strings(&[Some("Pave"), Some("Pave"), Some("Grvl")])),
        ("MasVnrType", strings(&[Some("BrkFace"), None, Some("Stone")])),
        ("MasVnrArea", floats(&[Some(196.0), None, Some(162.0)])),
        ("ExterQual", strings(&[Some("Gd"), Some("TA"), Some("Gd")])),
        ("ExterCond", strings(&[Some("TA"), Some("TA"), Some("TA")])),
        ("BsmtQual", strings(&[Some("Gd"), None, Some("Gd")])),
        ("BsmtCond", strings(&[Some("TA"), None, Some("TA")])),
        ("BsmtExposure", strings(&[Some("No"), None, Some("Mn")])),
        ("BsmtFinType1", strings(&[Some("GLQ"), None, Some("GLQ")])),
        ("BsmtFinSF1", floats(&[Some(706.0), None, Some(486.0)])),
        ("BsmtFinType2", strings(&[Some("Unf"), None, Some("Unf")])),
        ("BsmtFinSF2", floats(&[Some(0.0), None, Some(0.0)])),
        ("BsmtUnfSF", floats(&[Some(150.0), None, Some(434.0)])),
        ("TotalBsmtSF", floats(&[Some(856.0), None, Some(920.0)])),
        ("CentralAir", strings(&[Some("Y"), Some("N"), Some("Y")])),
        ("LowQualFinSF", ints(&[0, 0, 0])),
        ("GrLivArea", ints(&[1710, 1262, 1786])),
        ("BsmtFullBath", floats(&[Some(1.0), None, Some(1.0)])),
        ("BsmtHalfBath", floats(&[Some(0.0), None, Some(0.0)])),
        ("FullBath", ints(&[2, 2, 2])),
        ("HalfBath", ints(&[1, 0, 1])),
        ("BedroomAbvGr", ints(&[3, 0, 3])),
        ("KitchenAbvGr", ints(&[1, 1, 1])),
        ("KitchenQual", strings(&[Some("Gd"), Some("TA"), Some("Gd")])),
        ("TotRmsAbvGrd", ints(&[8, 6, 6])),
        ("Fireplaces", ints(&[0, 1, 1])),
        ("FireplaceQu", strings(&[None, Some("TA"), Some("TA")])),
        ("GarageType", strings(&[Some("Attchd"), None, Some("Attchd")])),
        ("GarageYrBlt", floats(&[Some(2003.0), None, Some(2001.0)])),
        ("GarageCars", floats(&[Some(2.0), None, Some(2.0)])),
        ("GarageArea", floats(&[Some(548.0), None, Some(608.0)])),
        ("GarageQual", strings(&[Some("TA"), None, Some("TA")])),
        ("GarageCond", strings(&[Some("TA"), None, Some("TA")])),
        ("PavedDrive", strings(&[Some("Y"), Some("P"), Some("Y")])),
        ("WoodDeckSF", ints(&[0, 298, 0])),
        ("OpenPorchSF", ints(&[61, 0, 42])),
        ("EnclosedPorch", ints(&[0, 0, 0])),
        ("3SsnPorch", ints(&[0, 0, 0])),
        ("ScreenPorch", ints(&[0, 0, 0])),
        ("PoolArea", ints(&[0, 0, 0])),
        ("PoolQC", strings(&[None, None, None])),
        ("MiscFeature", strings(&[None, Some("Shed"), None])),
        ("OverallQual", ints(&[7, 6, 7])),
        ("OverallCond", ints(&[5, 8, 5])),
        ("YearBuilt", ints(&[2003, 1976, 2001])),
        ("YearRemodAdd", ints(&[2003, 1976, 2002])),
        ("MoSold", ints(&[2, 5, 9])),
        ("YrSold", ints(&[2008, 2007, 2008])),
        ("SalePrice", ints(&[208500, 181500, 223500])),
    ]
}

/// The housing fixture registered as a DataFrame.
pub async fn housing_dataframe() -> DataFrame {
    create_dataframe(housing_columns()).await
}
