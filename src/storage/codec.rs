//! CSV and JSON encodings of a [`DataFrame`]

use eyre::{Context, Result};
use polars::prelude::*;
use std::io::Cursor;

/// Parse CSV text with a header row into a frame
///
/// Every row is used for schema inference, so a column is integer only if every
/// non-empty field is an integer, float if every one is a number, and text
/// otherwise. Empty fields are null.
///
/// # Example
/// ```
/// use polars::prelude::*;
/// use table_etl::storage::parse_csv;
///
/// let frame = parse_csv("id,name\n1,Alice\n2,\n").unwrap();
/// assert_eq!(frame.column("id").unwrap().get(0).unwrap(), AnyValue::Int64(1));
/// assert_eq!(frame.column("name").unwrap().null_count(), 1);
/// ```
pub fn parse_csv(text: &str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()
        .context("Failed to parse CSV")
}

/// Render a frame as CSV with a header row and no index column
///
/// Nulls are written as empty fields.
pub fn to_csv(frame: &DataFrame) -> Result<String> {
    let mut frame = frame.clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut frame)
        .context("Failed to write CSV")?;
    Ok(String::from_utf8(buffer)?)
}

/// Render a frame as a JSON array of records, keys in column order
///
/// # Example
/// ```
/// use polars::prelude::*;
/// use table_etl::storage::to_records_json;
///
/// let frame = df!("Year" => [2020i64], "Region" => ["North"]).unwrap();
/// assert_eq!(to_records_json(&frame).unwrap(), r#"[{"Year":2020,"Region":"North"}]"#);
/// ```
pub fn to_records_json(frame: &DataFrame) -> Result<String> {
    let mut frame = frame.clone();
    let mut buffer = Vec::new();
    JsonWriter::new(&mut buffer)
        .with_json_format(JsonFormat::Json)
        .finish(&mut frame)
        .context("Failed to serialize records to JSON")?;
    Ok(String::from_utf8(buffer)?)
}
