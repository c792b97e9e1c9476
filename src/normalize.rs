// Reduce complex magnitudes to a 0..1 scalar field.
//
// With normalization on, magnitudes fold into periodic bands ("height
// lines") every band_distance units, optionally after log compression.
// With it off, the magnitude is clamped into a fixed window instead.
//
// A zero magnitude under log gives ln 0 = -inf; the Euclidean remainder
// then turns that into nan. Neither is special-cased here - the colour
// stage resolves non-finite values to a fixed pixel.

use crate::grid::ComplexField;

pub struct NormalizedField {
    width : usize,
    height : usize,
    values : Vec<f64>,
}

impl NormalizedField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn at(&self, row : usize, col : usize) -> f64 {
        self.values[row * self.width + col]
    }
}

pub fn normalize(
    field : &ComplexField,
    use_log : bool,
    use_normalization : bool,
    band_distance : f64,
) -> NormalizedField {
    let values = field
        .values()
        .iter()
        .map(|v| {
            if use_normalization {
                banded(v.norm(), use_log, band_distance)
            } else {
                clamped(v.norm(), use_log)
            }
        })
        .collect();
    NormalizedField {
        width: field.width(),
        height: field.height(),
        values,
    }
}

// (mag mod band)/band folded around its midpoint: 0 at the middle of a
// band, 1 at its edges. rem_euclid keeps negative log-magnitudes on the
// same 0..band wheel instead of mirroring them below zero.
fn banded(mag : f64, use_log : bool, band_distance : f64) -> f64 {
    let mag = if use_log { mag.ln() } else { mag };
    let folded = mag.rem_euclid(band_distance) / band_distance;
    (folded - 0.5).abs() * 2.0
}

fn clamped(mag : f64, use_log : bool) -> f64 {
    if use_log {
        1.0 - mag.ln().clamp(0.01, 2.0) * 0.5
    } else {
        1.0 - mag.clamp(0.0, 1.0)
    }
}
