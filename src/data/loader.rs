use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::model::{CellValue, RawRecord};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a raw exposure table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "country": "Austria", "exposure_55_59": 18.2, ... }, ...]`
/// * `.csv`     – header row, one country per line
/// * `.parquet` – `country` string column plus numeric band columns
///
/// Individual rows or cells that do not parse are kept as-is (or skipped);
/// only a file that cannot be read as a whole is an error.
pub fn load_exposure_file(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_exposure_json(&text)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_exposure_csv(file)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Load the region names from a GeoJSON boundary file.
pub fn load_boundaries(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).context("reading GeoJSON file")?;
    parse_boundaries(&text)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented array, one object per country.
pub fn parse_exposure_json(text: &str) -> Result<Vec<RawRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            log::warn!("Row {i} is not a JSON object, skipped");
            continue;
        };
        records.push(
            obj.iter()
                .map(|(k, v)| (k.clone(), json_to_cell(v)))
                .collect(),
        );
    }
    Ok(records)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; every cell is type-guessed. Short rows are
/// accepted, their missing cells are simply absent.
pub fn parse_exposure_csv<R: Read>(input: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("CSV row {row_no}: {e}, skipped");
                continue;
            }
        };
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.clone(), guess_cell_type(v)))
                .collect(),
        );
    }
    Ok(records)
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(f) = s.parse::<f64>() {
        // "NaN" / "inf" spellings are not data.
        return if f.is_finite() {
            CellValue::Number(f)
        } else {
            CellValue::Null
        };
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet exposure table. Every column becomes a cell; string
/// columns become text, integer and float columns become numbers.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let record: RawRecord = schema
                .fields()
                .iter()
                .zip(batch.columns())
                .map(|(field, col)| (field.name().clone(), arrow_cell(col, row)))
                .collect();
            records.push(record);
        }
    }

    Ok(records)
}

fn arrow_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Number(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::Text(format!("{:?}", col.data_type())))
}

// ---------------------------------------------------------------------------
// GeoJSON boundaries
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, JsonValue>>,
}

/// Unique `properties.name` values of a FeatureCollection, sorted.
/// Geometry is not read.
pub fn parse_boundaries(text: &str) -> Result<Vec<String>> {
    let collection: FeatureCollection =
        serde_json::from_str(text).context("parsing GeoJSON FeatureCollection")?;

    let mut names = BTreeSet::new();
    for (i, feature) in collection.features.iter().enumerate() {
        match feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(JsonValue::as_str)
        {
            Some(name) => {
                names.insert(name.to_string());
            }
            None => log::debug!("Feature {i} has no name property"),
        }
    }
    Ok(names.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::ExposureDataStore;

    #[test]
    fn json_rows_become_cells() {
        let records = parse_exposure_json(
            r#"[{"country": "Germany", "exposure_55_59": 42, "exposure_60_64": null}, 7]"#,
        )
        .expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["country"], CellValue::Text("Germany".into()));
        assert_eq!(records[0]["exposure_55_59"], CellValue::Number(42.0));
        assert_eq!(records[0]["exposure_60_64"], CellValue::Null);
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_exposure_json(r#"{"country": "Germany"}"#).is_err());
        assert!(parse_exposure_json("not json").is_err());
    }

    #[test]
    fn csv_cells_are_type_guessed() {
        let data = "country,exposure_55_59,exposure_60_64,exposure_sum\n\
                    Austria,18.5,,30\n\
                    Belgium,bad\n";
        let records = parse_exposure_csv(data.as_bytes()).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["exposure_55_59"], CellValue::Number(18.5));
        assert_eq!(records[0]["exposure_60_64"], CellValue::Null);
        assert_eq!(records[1]["exposure_55_59"], CellValue::Text("bad".into()));
        assert!(!records[1].contains_key("exposure_sum"));

        let store = ExposureDataStore::from_records(records);
        assert_eq!(store.lookup("Belgium").and_then(|r| r.value("exposure_55_59")), None);
        assert_eq!(store.lookup("Austria").and_then(|r| r.total), Some(30.0));
    }

    #[test]
    fn boundary_names_are_unique_and_sorted() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Spain"}, "geometry": null},
                {"type": "Feature", "properties": {"name": "Austria"}, "geometry": null},
                {"type": "Feature", "properties": {"name": "Spain"}, "geometry": null},
                {"type": "Feature", "properties": {}, "geometry": null},
                {"type": "Feature", "geometry": null}
            ]
        }"#;
        assert_eq!(parse_boundaries(geojson).expect("parse"), vec!["Austria", "Spain"]);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_exposure_file(Path::new("table.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn loads_json_file_from_disk() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"[{{"country": "France", "exposure_greater_75": 2.5}}]"#).expect("write");

        let store = ExposureDataStore::from_records(load_exposure_file(file.path()).expect("load"));
        assert_eq!(
            store.lookup("France").and_then(|r| r.value("exposure_greater_75")),
            Some(2.5)
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_exposure_file(&dir.path().join("absent.csv")).is_err());
        assert!(load_boundaries(&dir.path().join("absent.geojson")).is_err());
    }

    #[test]
    fn csv_non_finite_spellings_are_null() {
        let data = "country,exposure_55_59,exposure_60_64,exposure_65_69\n\
                    Latvia,NaN,inf,-inf\n";
        let records = parse_exposure_csv(data.as_bytes()).expect("parse");
        assert_eq!(records[0]["exposure_55_59"], CellValue::Null);
        assert_eq!(records[0]["exposure_60_64"], CellValue::Null);
        assert_eq!(records[0]["exposure_65_69"], CellValue::Null);

        let store = ExposureDataStore::from_records(records);
        assert!(store.lookup("Latvia").expect("Latvia").values.is_empty());
    }

    #[test]
    fn loads_parquet_file_from_disk() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("country", DataType::Utf8, false),
            Field::new("exposure_55_59", DataType::Float64, true),
            Field::new("exposure_60_64", DataType::Int64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Germany", "France"])),
            Arc::new(Float64Array::from(vec![Some(42.0), None])),
            Arc::new(Int64Array::from(vec![7, 3])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("tempfile");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");

        let records = load_exposure_file(file.path()).expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["country"], CellValue::Text("Germany".into()));
        assert_eq!(records[1]["exposure_55_59"], CellValue::Null);

        let store = ExposureDataStore::from_records(records);
        let value = |c: &str, k: &str| store.lookup(c).and_then(|r| r.value(k));
        assert_eq!(value("Germany", "exposure_55_59"), Some(42.0));
        assert_eq!(value("Germany", "exposure_60_64"), Some(7.0));
        assert_eq!(value("France", "exposure_55_59"), None);
        assert_eq!(value("France", "exposure_60_64"), Some(3.0));
    }
}
