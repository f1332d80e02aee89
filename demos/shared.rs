#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::dataframe::DataFrame;
use datafusion::datasource::MemTable;
use datafusion::error::DataFusionError;
use datafusion::prelude::{CsvReadOptions, SessionContext};

// Path to the directory containing the datasets
pub const DATA_DIR: &str = "tests/testdata";

/// Loads data from a given path and automatically detects the format (CSV or Parquet).
pub async fn load_data(path: &str) -> Result<DataFrame, DataFusionError> {
    let ctx = SessionContext::new();
    let extension = Path::new(path).extension().and_then(|ext| ext.to_str());

    match extension {
        Some("parquet") => ctx.read_parquet(path, Default::default()).await,
        Some("csv") => ctx.read_csv(path, CsvReadOptions::new()).await,
        _ => Err(DataFusionError::Execution(
            "Unsupported file format. Please provide a CSV or Parquet file.".to_string(),
        )),
    }
}

/// Deterministic value from a small palette, picked by row index.
fn pick<T: Copy>(palette: &[T], row: usize, salt: usize) -> T {
    palette[(row * 7 + salt * 3) % palette.len()]
}

fn int_column(rows: usize, salt: usize, palette: &[i64]) -> ArrayRef {
    Arc::new(Int64Array::from(
        (0..rows).map(|r| pick(palette, r, salt)).collect::<Vec<i64>>(),
    ))
}

fn float_column(rows: usize, salt: usize, palette: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(
        (0..rows)
            .map(|r| pick(palette, r, salt))
            .collect::<Vec<Option<f64>>>(),
    ))
}

fn string_column(rows: usize, salt: usize, palette: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(
        (0..rows)
            .map(|r| pick(palette, r, salt))
            .collect::<Vec<Option<&str>>>(),
    ))
}

const QUALITY: &[Option<&str>] = &[Some("Ex"), Some("Gd"), Some("TA"), Some("TA"), Some("Fa"), None];

/// Builds an in-memory table of synthetic houses with the raw housing columns.
pub async fn sample_houses(rows: usize) -> Result<DataFrame, DataFusionError> {
    let columns: Vec<(&str, ArrayRef)> = vec![
        ("Id", Arc::new(Int64Array::from((1..=rows as i64).collect::<Vec<_>>())) as ArrayRef),
        ("LotFrontage", float_column(rows, 1, &[Some(65.0), None, Some(80.0), Some(68.0)])),
        ("LotArea", int_column(rows, 2, &[8450, 9600, 11250, 14260, 215245, 7200])),
        ("Street", string_column(rows, 3, &[Some("Pave"), Some("Pave"), Some("Grvl")])),
        ("MasVnrType", string_column(rows, 4, &[Some("BrkFace"), None, Some("Stone"), Some("BrkCmn")])),
        ("MasVnrArea", float_column(rows, 5, &[Some(196.0), None, Some(162.0), Some(350.0)])),
        ("ExterQual", string_column(rows, 6, QUALITY)),
        ("ExterCond", string_column(rows, 7, QUALITY)),
        ("BsmtQual", string_column(rows, 8, QUALITY)),
        ("BsmtCond", string_column(rows, 9, QUALITY)),
        ("BsmtExposure", string_column(rows, 10, &[Some("No"), Some("Gd"), Some("Mn"), Some("Av"), None])),
        ("BsmtFinType1", string_column(rows, 11, &[Some("GLQ"), Some("ALQ"), Some("Unf"), None])),
        ("BsmtFinSF1", float_column(rows, 12, &[Some(706.0), Some(978.0), None, Some(216.0)])),
        ("BsmtFinType2", string_column(rows, 13, &[Some("Unf"), Some("BLQ"), None])),
        ("BsmtFinSF2", float_column(rows, 14, &[Some(0.0), Some(32.0), None])),
        ("BsmtUnfSF", float_column(rows, 15, &[Some(150.0), Some(284.0), None, Some(540.0)])),
        ("TotalBsmtSF", float_column(rows, 16, &[Some(856.0), Some(1262.0), None, Some(756.0)])),
        ("CentralAir", string_column(rows, 17, &[Some("Y"), Some("Y"), Some("N")])),
        ("LowQualFinSF", int_column(rows, 18, &[0, 0, 0, 360])),
        ("GrLivArea", int_column(rows, 19, &[1710, 1262, 1786, 1717, 2198])),
        ("BsmtFullBath", float_column(rows, 20, &[Some(1.0), Some(0.0), None])),
        ("BsmtHalfBath", float_column(rows, 21, &[Some(0.0), Some(1.0), None])),
        ("FullBath", int_column(rows, 22, &[1, 2, 2, 3])),
        ("HalfBath", int_column(rows, 23, &[0, 1, 0])),
        ("BedroomAbvGr", int_column(rows, 24, &[3, 3, 4, 2, 0])),
        ("KitchenAbvGr", int_column(rows, 25, &[1, 1, 2])),
        ("KitchenQual", string_column(rows, 26, QUALITY)),
        ("TotRmsAbvGrd", int_column(rows, 27, &[8, 6, 7, 9])),
        ("Fireplaces", int_column(rows, 28, &[0, 1, 1, 2])),
        ("FireplaceQu", string_column(rows, 29, QUALITY)),
        ("GarageType", string_column(rows, 30, &[Some("Attchd"), Some("Detchd"), None])),
        ("GarageYrBlt", float_column(rows, 31, &[Some(2003.0), Some(1976.0), None, Some(1998.0)])),
        ("GarageCars", float_column(rows, 32, &[Some(2.0), Some(3.0), None])),
        ("GarageArea", float_column(rows, 33, &[Some(548.0), Some(836.0), None, Some(642.0)])),
        ("GarageQual", string_column(rows, 34, QUALITY)),
        ("GarageCond", string_column(rows, 35, QUALITY)),
        ("PavedDrive", string_column(rows, 36, &[Some("Y"), Some("P"), Some("N")])),
        ("WoodDeckSF", int_column(rows, 37, &[0, 298, 192])),
        ("OpenPorchSF", int_column(rows, 38, &[61, 0, 42, 35])),
        ("EnclosedPorch", int_column(rows, 39, &[0, 0, 272])),
        ("3SsnPorch", int_column(rows, 40, &[0, 0, 0, 508])),
        ("ScreenPorch", int_column(rows, 41, &[0, 176, 0])),
        ("PoolArea", int_column(rows, 42, &[0, 0, 0, 0, 512])),
        ("PoolQC", string_column(rows, 43, &[None, None, None, Some("Ex")])),
        ("MiscFeature", string_column(rows, 44, &[None, None, Some("Shed")])),
        ("OverallQual", int_column(rows, 45, &[7, 6, 8, 5, 9])),
        ("OverallCond", int_column(rows, 46, &[5, 8, 5, 6])),
        ("YearBuilt", int_column(rows, 47, &[2003, 1976, 2001, 1915])),
        ("YearRemodAdd", int_column(rows, 48, &[2003, 1976, 2002, 1970])),
        ("MoSold", int_column(rows, 49, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])),
        ("YrSold", int_column(rows, 50, &[2006, 2007, 2008, 2009, 2010])),
        ("SalePrice", int_column(rows, 51, &[208500, 181500, 223500, 140000, 250000])),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let table = MemTable::try_new(schema, vec![vec![batch]])?;

    let ctx = SessionContext::new();
    ctx.register_table("houses", Arc::new(table))?;
    ctx.table("houses").await
}
