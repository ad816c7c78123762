//! Colors shared by the window and PNG chart backends.

/// Plain RGB triple, converted to each backend's color type at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Bar and histogram fill.
pub const BAR_COLOR: Rgb = Rgb(31, 119, 180); // Blue
pub const DENSITY_COLOR: Rgb = Rgb(31, 119, 180);
pub const TEXT_DARK: Rgb = Rgb(38, 38, 38);
pub const TEXT_LIGHT: Rgb = Rgb(255, 255, 255);

const YL_GN_BU: [Rgb; 9] = [
    Rgb(255, 255, 217),
    Rgb(237, 248, 177),
    Rgb(199, 233, 180),
    Rgb(127, 205, 187),
    Rgb(65, 182, 196),
    Rgb(29, 145, 192),
    Rgb(34, 94, 168),
    Rgb(37, 52, 148),
    Rgb(8, 29, 88),
];

const OR_RD: [Rgb; 9] = [
    Rgb(255, 247, 236),
    Rgb(254, 232, 200),
    Rgb(253, 212, 158),
    Rgb(253, 187, 132),
    Rgb(252, 141, 89),
    Rgb(239, 101, 72),
    Rgb(215, 48, 31),
    Rgb(179, 0, 0),
    Rgb(127, 0, 0),
];

/// Sequential colormaps used for the cross-tabulation heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    YlGnBu,
    OrRd,
}

impl Colormap {
    fn stops(self) -> &'static [Rgb; 9] {
        match self {
            Colormap::YlGnBu => &YL_GN_BU,
            Colormap::OrRd => &OR_RD,
        }
    }

    /// Color at `t` in `[0, 1]`; values outside are clamped.
    pub fn color_at(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let pos = t * (stops.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = pos - lower as f64;

        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[lower], stops[upper]);
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    /// Color for `value` normalised between `min` and `max`.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> Rgb {
        if max > min {
            self.color_at((value - min) / (max - min))
        } else {
            self.color_at(0.0)
        }
    }
}

/// Annotation color readable on `background`.
pub fn text_color_for(background: Rgb) -> Rgb {
    let channel = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    let luminance =
        0.2126 * channel(background.0) + 0.7152 * channel(background.1) + 0.0722 * channel(background.2);
    if luminance > 0.408 {
        TEXT_DARK
    } else {
        TEXT_LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(Colormap::YlGnBu.color_at(0.0), YL_GN_BU[0]);
        assert_eq!(Colormap::YlGnBu.color_at(1.0), YL_GN_BU[8]);
        assert_eq!(Colormap::OrRd.color_at(2.0), OR_RD[8]);
        assert_eq!(Colormap::OrRd.color_at(f64::NAN), OR_RD[0]);
    }

    #[test]
    fn test_flat_range_uses_lowest_color() {
        assert_eq!(Colormap::OrRd.color_for(5.0, 5.0, 5.0), OR_RD[0]);
    }

    #[test]
    fn test_text_color_contrasts_background() {
        assert_eq!(text_color_for(YL_GN_BU[0]), TEXT_DARK);
        assert_eq!(text_color_for(YL_GN_BU[8]), TEXT_LIGHT);
    }
}
