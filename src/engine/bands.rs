use palette::Srgb;

// ---------------------------------------------------------------------------
// Band table
// ---------------------------------------------------------------------------

/// Threshold of the single unbounded band (≥ 75 dB).
pub const TOP_THRESHOLD: u32 = 75;

/// A noise-intensity bucket, keyed by its lower bound in dB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub threshold: u32,
    /// Display descriptor, e.g. `"60–64 dB"`.
    pub label: &'static str,
    /// Everyday sound of roughly this loudness.
    pub example: &'static str,
    rgb: (u8, u8, u8),
}

impl Band {
    /// Exposure-table column holding this band's percentages.
    pub fn key(&self) -> String {
        BandCatalog::key_for(self.threshold)
    }

    pub fn color(&self) -> Srgb<u8> {
        let (r, g, b) = self.rgb;
        Srgb::new(r, g, b)
    }
}

static BANDS: [Band; 5] = [
    Band {
        threshold: 55,
        label: "55–59 dB",
        example: "Quiet office, light daytime traffic",
        rgb: (0x4c, 0xaf, 0x50),
    },
    Band {
        threshold: 60,
        label: "60–64 dB",
        example: "Normal conversation, washing machine",
        rgb: (0xcd, 0xdc, 0x39),
    },
    Band {
        threshold: 65,
        label: "65–69 dB",
        example: "Busy restaurant, steady city traffic",
        rgb: (0xff, 0xc1, 0x07),
    },
    Band {
        threshold: 70,
        label: "70–74 dB",
        example: "Vacuum cleaner, main road at rush hour",
        rgb: (0xff, 0x98, 0x00),
    },
    Band {
        threshold: TOP_THRESHOLD,
        label: "≥ 75 dB",
        example: "Heavy lorry passing, pneumatic drill nearby",
        rgb: (0xf4, 0x43, 0x36),
    },
];

/// Descriptor returned for thresholds outside the catalog.
pub const FALLBACK_LABEL: &str = "Unknown band";
pub const FALLBACK_EXAMPLE: &str = "No example available";
const FALLBACK_RGB: (u8, u8, u8) = (0x9e, 0x9e, 0x9e);

// ---------------------------------------------------------------------------
// BandCatalog
// ---------------------------------------------------------------------------

/// Text shown next to the band selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandDescriptor {
    pub label: &'static str,
    pub example: &'static str,
}

/// The fixed, ordered set of noise bands. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandCatalog;

impl BandCatalog {
    /// All bands, quietest first.
    pub fn bands(&self) -> &'static [Band] {
        &BANDS
    }

    /// The quietest band; the default selection.
    pub fn lowest(&self) -> &'static Band {
        &BANDS[0]
    }

    pub fn band(&self, threshold: u32) -> Option<&'static Band> {
        BANDS.iter().find(|b| b.threshold == threshold)
    }

    /// `exposure_{t}_{t+4}` below the top band, `exposure_greater_75` from it on.
    pub fn key_for(threshold: u32) -> String {
        if threshold >= TOP_THRESHOLD {
            format!("exposure_greater_{TOP_THRESHOLD}")
        } else {
            format!("exposure_{}_{}", threshold, threshold + 4)
        }
    }

    /// Every column name that belongs to a catalog band.
    pub fn keys(&self) -> Vec<String> {
        BANDS.iter().map(Band::key).collect()
    }

    pub fn describe(&self, threshold: u32) -> BandDescriptor {
        match self.band(threshold) {
            Some(b) => BandDescriptor {
                label: b.label,
                example: b.example,
            },
            None => BandDescriptor {
                label: FALLBACK_LABEL,
                example: FALLBACK_EXAMPLE,
            },
        }
    }

    /// Chart colour for a threshold; grey when unrecognised.
    pub fn color_for(&self, threshold: u32) -> Srgb<u8> {
        let (r, g, b) = self.band(threshold).map(|b| b.rgb).unwrap_or(FALLBACK_RGB);
        Srgb::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_derivation_follows_threshold_rule() {
        assert_eq!(BandCatalog::key_for(55), "exposure_55_59");
        assert_eq!(BandCatalog::key_for(60), "exposure_60_64");
        assert_eq!(BandCatalog::key_for(70), "exposure_70_74");
        assert_eq!(BandCatalog::key_for(75), "exposure_greater_75");
    }

    #[test]
    fn bands_are_ordered_and_lowest_is_55() {
        let catalog = BandCatalog;
        let thresholds: Vec<u32> = catalog.bands().iter().map(|b| b.threshold).collect();
        assert_eq!(thresholds, vec![55, 60, 65, 70, 75]);
        assert_eq!(catalog.lowest().threshold, 55);
    }

    #[test]
    fn keys_cover_every_band() {
        assert_eq!(
            BandCatalog.keys(),
            vec![
                "exposure_55_59",
                "exposure_60_64",
                "exposure_65_69",
                "exposure_70_74",
                "exposure_greater_75",
            ]
        );
    }

    #[test]
    fn describe_known_band() {
        let d = BandCatalog.describe(60);
        assert_eq!(d.label, "60–64 dB");
        assert!(!d.example.is_empty());
    }

    #[test]
    fn unknown_threshold_gets_fallback_descriptor_and_grey() {
        let catalog = BandCatalog;
        let d = catalog.describe(57);
        assert_eq!(d.label, FALLBACK_LABEL);
        assert_eq!(d.example, FALLBACK_EXAMPLE);
        assert_eq!(catalog.color_for(57), Srgb::new(0x9e, 0x9e, 0x9e));
        assert!(catalog.band(57).is_none());
    }

    #[test]
    fn band_colors_are_distinct() {
        let catalog = BandCatalog;
        for (i, a) in catalog.bands().iter().enumerate() {
            for b in &catalog.bands()[i + 1..] {
                assert_ne!(a.color(), b.color(), "{} vs {}", a.label, b.label);
            }
        }
    }
}
