use std::collections::BTreeMap;
use std::fmt;

use crate::engine::bands::BandCatalog;

/// Column naming the country a raw record belongs to.
pub const COUNTRY_COLUMN: &str = "country";
/// Optional column with the share exposed across all bands.
pub const TOTAL_COLUMN: &str = "exposure_sum";

// ---------------------------------------------------------------------------
// CellValue – one cell of the raw exposure table
// ---------------------------------------------------------------------------

/// A loosely-typed cell as it comes out of JSON, CSV or Parquet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s:?}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One row of the raw exposure table: column name → cell.
pub type RawRecord = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// ExposureRecord – per-country percentages
// ---------------------------------------------------------------------------

/// Share of a country's population exposed at each band, in percent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureRecord {
    /// BandKey → percentage. Bands missing from the source are absent.
    pub values: BTreeMap<String, f64>,
    /// `exposure_sum`, when the source provides it.
    pub total: Option<f64>,
}

impl ExposureRecord {
    pub fn value(&self, band_key: &str) -> Option<f64> {
        self.values.get(band_key).copied()
    }
}

// ---------------------------------------------------------------------------
// ExposureDataStore – read-only lookup after load
// ---------------------------------------------------------------------------

/// Parsed exposure table keyed by country name.
///
/// Empty until [`ExposureDataStore::load`] runs, so every lookup made before
/// the dataset arrives is a miss rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ExposureDataStore {
    records: BTreeMap<String, ExposureRecord>,
}

impl ExposureDataStore {
    pub fn from_records(raw: Vec<RawRecord>) -> Self {
        let mut store = Self::default();
        store.load(raw);
        store
    }

    /// Replace the contents with `raw`. Returns the number of countries kept.
    ///
    /// Malformed rows never fail the load:
    /// * a row without a textual `country` is skipped
    /// * a band cell that is not a number is ignored, leaving that band
    ///   unavailable for the country
    /// * a repeated country keeps its first row
    pub fn load(&mut self, raw: Vec<RawRecord>) -> usize {
        let band_keys = BandCatalog.keys();
        let mut records: BTreeMap<String, ExposureRecord> = BTreeMap::new();

        for (row_no, row) in raw.into_iter().enumerate() {
            let Some(country) = row.get(COUNTRY_COLUMN).and_then(CellValue::as_text) else {
                log::warn!("Row {row_no}: no textual '{COUNTRY_COLUMN}' cell, skipped");
                continue;
            };
            if records.contains_key(country) {
                log::debug!("Row {row_no}: duplicate country {country:?}, keeping first");
                continue;
            }

            let mut record = ExposureRecord::default();
            for (col, cell) in &row {
                if col == COUNTRY_COLUMN {
                    continue;
                }
                let is_band = band_keys.iter().any(|k| k == col);
                if !is_band && col != TOTAL_COLUMN {
                    continue;
                }
                match cell.as_f64().filter(|v| v.is_finite()) {
                    Some(v) if is_band => {
                        record.values.insert(col.clone(), v);
                    }
                    Some(v) => record.total = Some(v),
                    None => log::debug!("Row {row_no} ({country}): ignoring {col} = {cell}"),
                }
            }
            records.insert(country.to_string(), record);
        }

        self.records = records;
        self.records.len()
    }

    pub fn lookup(&self, region: &str) -> Option<&ExposureRecord> {
        self.records.get(region)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> RawRecord {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn empty_store_misses_everything() {
        let store = ExposureDataStore::default();
        assert!(store.is_empty());
        assert!(store.lookup("Germany").is_none());
    }

    #[test]
    fn load_keeps_band_values_and_total() {
        let store = ExposureDataStore::from_records(vec![row(&[
            ("country", text("Germany")),
            ("exposure_55_59", CellValue::Number(42.0)),
            ("exposure_greater_75", CellValue::Number(1.5)),
            ("exposure_sum", CellValue::Number(61.2)),
        ])]);
        let rec = store.lookup("Germany").expect("Germany loaded");
        assert_eq!(rec.value("exposure_55_59"), Some(42.0));
        assert_eq!(rec.value("exposure_greater_75"), Some(1.5));
        assert_eq!(rec.value("exposure_60_64"), None);
        assert_eq!(rec.total, Some(61.2));
    }

    #[test]
    fn malformed_cells_leave_band_unavailable() {
        let store = ExposureDataStore::from_records(vec![row(&[
            ("country", text("Italy")),
            ("exposure_60_64", text("n/a")),
            ("exposure_65_69", CellValue::Null),
            ("exposure_70_74", CellValue::Number(7.0)),
        ])]);
        let rec = store.lookup("Italy").expect("Italy loaded");
        assert_eq!(rec.value("exposure_60_64"), None);
        assert_eq!(rec.value("exposure_65_69"), None);
        assert_eq!(rec.value("exposure_70_74"), Some(7.0));
    }

    #[test]
    fn non_finite_numbers_leave_band_unavailable() {
        let store = ExposureDataStore::from_records(vec![row(&[
            ("country", text("Cyprus")),
            ("exposure_55_59", CellValue::Number(f64::NAN)),
            ("exposure_60_64", CellValue::Number(f64::INFINITY)),
            ("exposure_sum", CellValue::Number(f64::NAN)),
        ])]);
        let rec = store.lookup("Cyprus").expect("Cyprus loaded");
        assert!(rec.values.is_empty());
        assert_eq!(rec.total, None);
    }

    #[test]
    fn unrelated_columns_are_not_stored() {
        let store = ExposureDataStore::from_records(vec![row(&[
            ("country", text("Malta")),
            ("population", CellValue::Number(500_000.0)),
        ])]);
        assert!(store.lookup("Malta").expect("Malta").values.is_empty());
    }

    #[test]
    fn rows_without_country_are_skipped() {
        let store = ExposureDataStore::from_records(vec![
            row(&[("exposure_55_59", CellValue::Number(3.0))]),
            row(&[("country", CellValue::Number(1.0))]),
            row(&[("country", text("Norway"))]),
        ]);
        assert_eq!(store.len(), 1);
        assert!(store.lookup("Norway").is_some());
    }

    #[test]
    fn first_duplicate_wins() {
        let store = ExposureDataStore::from_records(vec![
            row(&[("country", text("Spain")), ("exposure_55_59", CellValue::Number(10.0))]),
            row(&[("country", text("Spain")), ("exposure_55_59", CellValue::Number(99.0))]),
        ]);
        assert_eq!(store.lookup("Spain").and_then(|r| r.value("exposure_55_59")), Some(10.0));
    }

    #[test]
    fn reload_replaces_previous_contents() {
        let mut store = ExposureDataStore::from_records(vec![row(&[("country", text("Poland"))])]);
        let kept = store.load(vec![row(&[("country", text("Czechia"))])]);
        assert_eq!(kept, 1);
        assert!(store.lookup("Poland").is_none());
        assert!(store.lookup("Czechia").is_some());
    }
}
