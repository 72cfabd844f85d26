use eframe::egui::Color32;
use palette::{Desaturate, Hsl, IntoColor, Lighten, Srgb};

// ---------------------------------------------------------------------------
// palette ↔ egui
// ---------------------------------------------------------------------------

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

fn from_hsl(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    to_color32(rgb.into_format())
}

// ---------------------------------------------------------------------------
// Derived shades
// ---------------------------------------------------------------------------

/// Pale, washed-out variant of a band colour for the unexposed chart segment.
pub fn remainder_shade(band: Srgb<u8>) -> Color32 {
    let hsl: Hsl = band.into_format::<f32>().into_color();
    from_hsl(hsl.desaturate(0.6).lighten(0.55))
}

/// Fill used by the map layer for the highlighted region.
pub fn highlight_fill(band: Srgb<u8>) -> Color32 {
    let hsl: Hsl = band.into_format::<f32>().into_color();
    from_hsl(hsl.lighten(0.35))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_keeps_channels() {
        assert_eq!(
            to_color32(Srgb::new(0xf4, 0x43, 0x36)),
            Color32::from_rgb(0xf4, 0x43, 0x36)
        );
    }

    #[test]
    fn remainder_is_lighter_than_band() {
        let band = Srgb::new(0xf4u8, 0x43, 0x36);
        let shade = remainder_shade(band);
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(shade) > sum(to_color32(band)));
        assert!(sum(highlight_fill(band)) > sum(to_color32(band)));
    }
}
