use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Map, Value as JsonValue};

const BAND_COLUMNS: [&str; 5] = [
    "exposure_55_59",
    "exposure_60_64",
    "exposure_65_69",
    "exposure_70_74",
    "exposure_greater_75",
];

/// Countries with exposure rows.
const COUNTRIES: [&str; 22] = [
    "Austria",
    "Belgium",
    "Bulgaria",
    "Croatia",
    "Czechia",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Netherlands",
    "Poland",
    "Portugal",
    "Romania",
    "Spain",
    "Sweden",
];

/// Only on the map, so the explorer has regions without data.
const MAP_ONLY: [&str; 3] = ["Norway", "Switzerland", "Iceland"];

/// FNV-1a; stable across runs so the sample is reproducible.
fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Percentages per band, falling with loudness. Some cells are left empty.
fn exposure_row(country: &str) -> [Option<f64>; 5] {
    let mut h = fnv1a(country);
    let mut share = 15.0 + (h % 300) as f64 / 10.0;
    let mut row = [None; 5];
    for (i, cell) in row.iter_mut().enumerate() {
        h = h.rotate_left(13) ^ (i as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        if h % 17 == 0 {
            continue;
        }
        *cell = Some((share * 10.0).round() / 10.0);
        share *= 0.35 + (h % 30) as f64 / 100.0;
    }
    row
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir).context("creating output directory")?;

    let rows: Vec<(&str, [Option<f64>; 5])> =
        COUNTRIES.iter().map(|c| (*c, exposure_row(c))).collect();

    write_json(&out_dir.join("noise_data.json"), &rows)?;
    write_csv(&out_dir.join("noise_data.csv"), &rows)?;
    let batch = write_parquet(&out_dir.join("noise_data.parquet"), &rows)?;
    write_geojson(&out_dir.join("europe.geojson"))?;

    println!("{}", pretty_format_batches(&[batch])?);
    println!("Sample data written to {}", out_dir.display());
    Ok(())
}

fn total(values: &[Option<f64>; 5]) -> f64 {
    let sum: f64 = values.iter().flatten().sum();
    (sum * 10.0).round() / 10.0
}

fn write_json(path: &Path, rows: &[(&str, [Option<f64>; 5])]) -> Result<()> {
    let records: Vec<JsonValue> = rows
        .iter()
        .map(|(country, values)| {
            let mut obj = Map::new();
            obj.insert("country".into(), json!(country));
            for (col, v) in BAND_COLUMNS.iter().zip(values) {
                if let Some(v) = v {
                    obj.insert((*col).into(), json!(v));
                }
            }
            obj.insert("exposure_sum".into(), json!(total(values)));
            JsonValue::Object(obj)
        })
        .collect();
    let text = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn write_csv(path: &Path, rows: &[(&str, [Option<f64>; 5])]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    let mut header = vec!["country"];
    header.extend(BAND_COLUMNS);
    header.push("exposure_sum");
    writer.write_record(&header)?;

    for (country, values) in rows {
        let mut record = vec![country.to_string()];
        record.extend(values.iter().map(|v| v.map(|v| v.to_string()).unwrap_or_default()));
        record.push(total(values).to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[(&str, [Option<f64>; 5])]) -> Result<RecordBatch> {
    let mut fields = vec![Field::new("country", DataType::Utf8, false)];
    fields.extend(
        BAND_COLUMNS
            .iter()
            .map(|c| Field::new(*c, DataType::Float64, true)),
    );
    fields.push(Field::new("exposure_sum", DataType::Float64, false));
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        rows.iter().map(|(c, _)| *c).collect::<Vec<_>>(),
    ))];
    for i in 0..BAND_COLUMNS.len() {
        columns.push(Arc::new(Float64Array::from(
            rows.iter().map(|(_, v)| v[i]).collect::<Vec<_>>(),
        )));
    }
    columns.push(Arc::new(Float64Array::from(
        rows.iter().map(|(_, v)| total(v)).collect::<Vec<_>>(),
    )));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(batch)
}

fn write_geojson(path: &Path) -> Result<()> {
    let features: Vec<JsonValue> = COUNTRIES
        .iter()
        .chain(MAP_ONLY.iter())
        .map(|name| {
            json!({
                "type": "Feature",
                "properties": { "name": name },
                "geometry": null,
            })
        })
        .collect();
    let collection = json!({ "type": "FeatureCollection", "features": features });
    std::fs::write(path, serde_json::to_string_pretty(&collection)?)
        .with_context(|| format!("writing {}", path.display()))
}
