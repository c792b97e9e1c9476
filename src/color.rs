// Colour synthesis: phase to hue, normalized magnitude to saturation and
// value, then the six-sector hsv conversion down to 8-bit rgb.

use std::f64::consts::PI;

use image::{Rgb, RgbImage};

use crate::grid::ComplexField;
use crate::normalize::NormalizedField;

pub fn colorize(
    values : &ComplexField,
    magnitudes : &NormalizedField,
    use_normalization : bool,
) -> RgbImage {
    let mut img = RgbImage::new(values.width() as u32, values.height() as u32);
    for r in 0..values.height() {
        for c in 0..values.width() {
            let v = values.at(r, c);
            let m = magnitudes.at(r, c);
            let hue = v.arg().rem_euclid(2.0 * PI) / (2.0 * PI);
            let (sat, val) = if use_normalization {
                (1.0 - m.powi(10) * 0.75, (0.2 + m.powf(0.3) * 0.8) * 256.0)
            } else {
                (1.0 - m * 0.7, (0.15 + m * 0.85) * 256.0)
            };
            img.put_pixel(c as u32, r as u32, hsv_to_rgb(hue, sat, val));
        }
    }
    img
}

/// Six-sector hsv conversion. h and s run 0..1, v runs 0..256.
///
/// The sector index is clipped rather than wrapped, so a nan hue (which
/// casts to 0) lands in sector 0; the final u8 casts saturate, taking nan
/// channels to 0 and +inf channels to 255. Degenerate inputs therefore
/// always produce some fixed colour instead of a crash.
pub fn hsv_to_rgb(h : f64, s : f64, v : f64) -> Rgb<u8> {
    let raw = (h * 6.0) as i64;
    let f = h * 6.0 - raw as f64;
    let sector = raw.clamp(0, 5);
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb([r as u8, g as u8, b as u8])
}
