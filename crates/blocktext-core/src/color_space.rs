//! Color space conversions
//!
//! Pure numeric transforms between RGB, HSV, HSV with the hue in radians,
//! and hex strings. Nothing here validates input: a malformed hex string
//! yields NaN channels, callers are expected to check tokens first
//! (see [`crate::palette`]).

use std::f64::consts::PI;

/// RGB color with channels in `0.0..=255.0`
///
/// Channels are kept as floats so HSV round trips stay exact; use
/// [`Rgb::to_bytes`] when an escape sequence or hex string is needed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Round each channel to the nearest integer and clamp into a byte
    pub fn to_bytes(self) -> (u8, u8, u8) {
        let byte = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        (byte(self.r), byte(self.g), byte(self.b))
    }
}

/// HSV color: hue in degrees `[0, 360)`, saturation and value in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// HSV color with the hue expressed in radians `[0, 2π)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvRad {
    pub theta: f64,
    pub s: f64,
    pub v: f64,
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert RGB to HSV.
///
/// Achromatic colors (`max == min`) get a hue of 0. When red is the
/// maximum the branch depends on whether green is at least blue.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r / 255.0;
    let g = rgb.g / 255.0;
    let b = rgb.b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let s = if max == 0.0 { 0.0 } else { diff / max };

    let h = if max == min {
        0.0
    } else if max == r && g >= b {
        60.0 * ((g - b) / diff)
    } else if max == r {
        60.0 * ((g - b) / diff) + 360.0
    } else if max == g {
        60.0 * ((b - r) / diff) + 120.0
    } else {
        60.0 * ((r - g) / diff) + 240.0
    };

    Hsv {
        h,
        s: s * 100.0,
        v: max * 100.0,
    }
}

/// Convert HSV to RGB using the six 60° sectors
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = hsv.h / 60.0;
    let s = hsv.s / 100.0;
    let v = hsv.v / 100.0;

    let sector = (h.floor() as i64).rem_euclid(6);
    let f = h - h.floor();
    let p = 255.0 * v * (1.0 - s);
    let q = 255.0 * v * (1.0 - s * f);
    let t = 255.0 * v * (1.0 - s * (1.0 - f));
    let v = v * 255.0;

    match sector {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

/// Parse a hex color (case-insensitive, leading `#` optional).
///
/// 8 and 4 digit forms lose their alpha suffix; 3 digit forms are expanded
/// by doubling each nibble. Non-hex input produces NaN channels.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let mut digits: String = hex.trim_start_matches('#').chars().take(6).collect();
    if digits.chars().count() == 4 {
        digits = digits.chars().take(3).collect();
    }
    if digits.chars().count() == 3 {
        digits = digits.chars().flat_map(|c| [c, c]).collect();
    }

    match u32::from_str_radix(&digits, 16) {
        Ok(num) => Rgb::new(
            f64::from((num >> 16) & 0xff),
            f64::from((num >> 8) & 0xff),
            f64::from(num & 0xff),
        ),
        Err(_) => Rgb::new(f64::NAN, f64::NAN, f64::NAN),
    }
}

/// Format as a lower-case `#rrggbb` string
pub fn rgb_to_hex(rgb: Rgb) -> String {
    let (r, g, b) = rgb.to_bytes();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

pub fn hsv_to_hsv_rad(hsv: Hsv) -> HsvRad {
    HsvRad {
        theta: deg_to_rad(hsv.h),
        s: hsv.s,
        v: hsv.v,
    }
}

pub fn hsv_rad_to_hsv(hsv: HsvRad) -> Hsv {
    Hsv {
        h: rad_to_deg(hsv.theta),
        s: hsv.s,
        v: hsv.v,
    }
}

pub fn hex_to_hsv(hex: &str) -> Hsv {
    rgb_to_hsv(hex_to_rgb(hex))
}

pub fn hsv_to_hex(hsv: Hsv) -> String {
    rgb_to_hex(hsv_to_rgb(hsv))
}

/// Normalize any accepted hex spelling to `#rrggbb`
pub fn normalize_hex(hex: &str) -> String {
    rgb_to_hex(hex_to_rgb(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_eq!(rgb_to_hsv(Rgb::new(255.0, 0.0, 0.0)), Hsv { h: 0.0, s: 100.0, v: 100.0 });
        assert_eq!(rgb_to_hsv(Rgb::new(0.0, 255.0, 0.0)).h, 120.0);
        assert_eq!(rgb_to_hsv(Rgb::new(0.0, 0.0, 255.0)).h, 240.0);
    }

    #[test]
    fn test_red_max_tie_break() {
        // g >= b keeps the hue in the first sector
        let warm = rgb_to_hsv(Rgb::new(255.0, 136.0, 0.0));
        assert!(close(warm.h, 32.0));
        // g < b wraps around through 360
        let pink = rgb_to_hsv(Rgb::new(255.0, 0.0, 51.0));
        assert!(close(pink.h, 348.0));
    }

    #[test]
    fn test_achromatic_hue_is_zero() {
        let gray = rgb_to_hsv(Rgb::new(128.0, 128.0, 128.0));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        let black = rgb_to_hsv(Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(black, Hsv::default());
    }

    #[test]
    fn test_rgb_hsv_round_trip() {
        for hex in ["#ff8800", "#8899dd", "#123456", "#fedcba", "#00ff7f", "#7f00ff"] {
            let rgb = hex_to_rgb(hex);
            let back = hsv_to_rgb(rgb_to_hsv(rgb));
            assert!(close(rgb.r, back.r), "{hex}");
            assert!(close(rgb.g, back.g), "{hex}");
            assert!(close(rgb.b, back.b), "{hex}");
        }
    }

    #[test]
    fn test_hsv_rgb_round_trip() {
        for hsv in [
            Hsv { h: 10.0, s: 50.0, v: 75.0 },
            Hsv { h: 200.5, s: 12.0, v: 99.0 },
            Hsv { h: 359.0, s: 100.0, v: 100.0 },
        ] {
            let back = rgb_to_hsv(hsv_to_rgb(hsv));
            assert!(close(hsv.h, back.h));
            assert!(close(hsv.s, back.s));
            assert!(close(hsv.v, back.v));
        }
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_rgb("#FF8800"), Rgb::new(255.0, 136.0, 0.0));
        assert_eq!(hex_to_rgb("f80"), Rgb::new(255.0, 136.0, 0.0));
        assert_eq!(hex_to_rgb("#f80a"), Rgb::new(255.0, 136.0, 0.0));
        assert_eq!(hex_to_rgb("#ff8800cc"), Rgb::new(255.0, 136.0, 0.0));
        assert!(hex_to_rgb("#zzzzzz").r.is_nan());
    }

    #[test]
    fn test_non_ascii_hex_is_nan() {
        assert!(hex_to_rgb("#a\u{e9}\u{e9}\u{e9}\u{e9}").r.is_nan());
        assert!(hex_to_rgb("#\u{e9}\u{e9}\u{e9}\u{e9}").g.is_nan());
        assert_eq!(normalize_hex("#\u{e9}\u{e9}\u{e9}"), "#000000");
        assert_eq!(crate::gradient::gradient("#\u{e9}bc", "#000000", 3).len(), 3);
    }

    #[test]
    fn test_hex_output_is_lowercase() {
        assert_eq!(rgb_to_hex(Rgb::new(255.0, 136.0, 0.0)), "#ff8800");
        assert_eq!(normalize_hex("#ABC"), "#aabbcc");
        assert_eq!(hsv_to_hex(hex_to_hsv("#8899DD")), "#8899dd");
    }

    #[test]
    fn test_radian_helpers() {
        assert!(close(deg_to_rad(180.0), PI));
        assert!(close(rad_to_deg(PI / 2.0), 90.0));
        let hsv = Hsv { h: 90.0, s: 20.0, v: 30.0 };
        let back = hsv_rad_to_hsv(hsv_to_hsv_rad(hsv));
        assert!(close(back.h, 90.0));
    }
}
