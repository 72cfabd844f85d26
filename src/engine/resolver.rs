use super::bands::BandCatalog;
use crate::data::model::ExposureDataStore;

/// Look up the exposure percentage for a region and band.
///
/// `None` means unavailable: no region, a region missing from the store, a
/// threshold outside the catalog, or a record without that band. Values are
/// returned exactly as stored.
///
/// Every "is there data?" decision in the UI goes through this function.
pub fn resolve(region: Option<&str>, band: u32, store: &ExposureDataStore) -> Option<f64> {
    let band = BandCatalog.band(band)?;
    let record = store.lookup(region?)?;
    record.value(&band.key())
}

/// `exposure_sum` for a region, if both the record and the cell exist.
pub fn resolve_total(region: Option<&str>, store: &ExposureDataStore) -> Option<f64> {
    store.lookup(region?)?.total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RawRecord};

    fn store() -> ExposureDataStore {
        let mut row = RawRecord::new();
        row.insert("country".into(), CellValue::Text("Germany".into()));
        row.insert("exposure_55_59".into(), CellValue::Number(42.0));
        row.insert("exposure_greater_75".into(), CellValue::Number(0.37));
        row.insert("exposure_sum".into(), CellValue::Number(55.5));
        ExposureDataStore::from_records(vec![row])
    }

    #[test]
    fn defined_value_is_returned_unchanged() {
        let s = store();
        assert_eq!(resolve(Some("Germany"), 55, &s), Some(42.0));
        assert_eq!(resolve(Some("Germany"), 75, &s), Some(0.37));
    }

    #[test]
    fn no_region_is_unavailable() {
        assert_eq!(resolve(None, 55, &store()), None);
    }

    #[test]
    fn absent_region_is_unavailable_for_every_band() {
        let s = store();
        for band in BandCatalog.bands() {
            assert_eq!(resolve(Some("France"), band.threshold, &s), None);
        }
    }

    #[test]
    fn missing_band_cell_is_unavailable() {
        assert_eq!(resolve(Some("Germany"), 60, &store()), None);
    }

    #[test]
    fn out_of_catalog_threshold_is_unavailable() {
        assert_eq!(resolve(Some("Germany"), 57, &store()), None);
    }

    #[test]
    fn empty_store_is_unavailable() {
        assert_eq!(resolve(Some("Germany"), 55, &ExposureDataStore::default()), None);
    }

    #[test]
    fn total_follows_record() {
        let s = store();
        assert_eq!(resolve_total(Some("Germany"), &s), Some(55.5));
        assert_eq!(resolve_total(Some("France"), &s), None);
        assert_eq!(resolve_total(None, &s), None);
    }
}
