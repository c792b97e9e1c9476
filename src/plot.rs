// Per-render plot configuration.
//
// A clone of a PlotSpec is the immutable snapshot a render worker computes
// from, so the caller keeps panning, zooming and toggling its own copy
// without racing an in-flight render. Size and scale problems are fatal at
// construction; nothing downstream re-validates them.

use json::JsonValue;

use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    expression : String,
    width : usize,
    height : usize,
    scale : f64,
    band_distance : f64,
    offset_x : f64,
    offset_y : f64,
    use_log : bool,
    use_normalization : bool,
}

impl PlotSpec {
    /// New spec with the stock viewport: scale 80 pixels per unit, band
    /// distance 1, centred on the origin, log compression on.
    pub fn new(expression : &str, width : usize, height : usize) -> PlotResult<PlotSpec> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidSpec(format!(
                "image size {}x{} must be positive",
                width, height
            )));
        }
        Ok(PlotSpec {
            expression: expression.to_string(),
            width,
            height,
            scale: 80.0,
            band_distance: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            use_log: true,
            use_normalization: true,
        })
    }

    pub fn from_json(input : &JsonValue) -> PlotResult<PlotSpec> {
        let expression = input["expression"]
            .as_str()
            .ok_or_else(|| PlotError::InvalidSpec("missing expression".to_string()))?;
        let width = input["width"].as_usize().unwrap_or(800);
        let height = input["height"].as_usize().unwrap_or(600);
        Ok(PlotSpec::new(expression, width, height)?
            .with_scale(input["scale"].as_f64().unwrap_or(80.0))?
            .with_band_distance(input["band_distance"].as_f64().unwrap_or(1.0))?
            .with_offset(
                input["offset_x"].as_f64().unwrap_or(0.0),
                input["offset_y"].as_f64().unwrap_or(0.0),
            )
            .with_use_log(input["use_log"].as_bool().unwrap_or(true))
            .with_use_normalization(input["use_normalization"].as_bool().unwrap_or(true)))
    }

    pub fn with_scale(mut self, scale : f64) -> PlotResult<PlotSpec> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PlotError::InvalidSpec(format!("scale {} must be positive", scale)));
        }
        self.scale = scale;
        Ok(self)
    }

    pub fn with_band_distance(mut self, band_distance : f64) -> PlotResult<PlotSpec> {
        if !band_distance.is_finite() || band_distance <= 0.0 {
            return Err(PlotError::InvalidSpec(format!(
                "band distance {} must be positive",
                band_distance
            )));
        }
        self.band_distance = band_distance;
        Ok(self)
    }

    pub fn with_offset(mut self, offset_x : f64, offset_y : f64) -> PlotSpec {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_use_log(mut self, use_log : bool) -> PlotSpec {
        self.use_log = use_log;
        self
    }

    pub fn with_use_normalization(mut self, use_normalization : bool) -> PlotSpec {
        self.use_normalization = use_normalization;
        self
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn band_distance(&self) -> f64 {
        self.band_distance
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn use_log(&self) -> bool {
        self.use_log
    }

    pub fn use_normalization(&self) -> bool {
        self.use_normalization
    }

    pub fn set_expression(&mut self, expression : &str) {
        self.expression = expression.to_string();
    }

    /// Shift the viewport by a pixel delta, accumulated in world units.
    pub fn pan(&mut self, pixel_dx : f64, pixel_dy : f64) {
        self.offset_x += pixel_dx / self.scale;
        self.offset_y += pixel_dy / self.scale;
    }

    /// Multiply the scale by a caller-supplied factor. The factor must keep
    /// the scale positive and finite.
    pub fn zoom(&mut self, factor : f64) -> PlotResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidSpec(format!(
                "zoom factor {} must be positive",
                factor
            )));
        }
        self.scale *= factor;
        Ok(())
    }

    pub fn toggle_log(&mut self) {
        self.use_log = !self.use_log;
    }

    pub fn toggle_normalization(&mut self) {
        self.use_normalization = !self.use_normalization;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_viewport() {
        let spec = PlotSpec::new("sin(z)", 800, 600).unwrap();
        assert_eq!(spec.scale(), 80.0);
        assert_eq!(spec.band_distance(), 1.0);
        assert_eq!(spec.offset_x(), 0.0);
        assert_eq!(spec.offset_y(), 0.0);
        assert!(spec.use_log());
        assert!(spec.use_normalization());
    }

    #[test]
    fn rejects_degenerate_dimensions_and_scale() {
        assert!(PlotSpec::new("z", 0, 100).is_err());
        assert!(PlotSpec::new("z", 100, 0).is_err());
        assert!(PlotSpec::new("z", 100, 100).unwrap().with_scale(0.0).is_err());
        assert!(PlotSpec::new("z", 100, 100).unwrap().with_scale(-3.0).is_err());
        assert!(PlotSpec::new("z", 100, 100)
            .unwrap()
            .with_band_distance(0.0)
            .is_err());
    }

    #[test]
    fn pan_accumulates_in_world_units() {
        let mut spec = PlotSpec::new("z", 100, 100).unwrap().with_scale(50.0).unwrap();
        spec.pan(25.0, -10.0);
        assert_eq!(spec.offset_x(), 0.5);
        assert_eq!(spec.offset_y(), -0.2);
    }

    #[test]
    fn pan_round_trip_restores_offset_exactly() {
        let mut spec = PlotSpec::new("z", 100, 100).unwrap();
        spec.pan(137.0, 0.0);
        spec.pan(-137.0, 0.0);
        assert_eq!(spec.offset_x(), 0.0);
    }

    #[test]
    fn zoom_scales_multiplicatively() {
        let mut spec = PlotSpec::new("z", 100, 100).unwrap();
        spec.zoom(2.0).unwrap();
        assert_eq!(spec.scale(), 160.0);
        assert!(spec.zoom(0.0).is_err());
        assert!(spec.zoom(-1.5).is_err());
        assert!(spec.zoom(f64::NAN).is_err());
        // A failed zoom leaves the scale alone
        assert_eq!(spec.scale(), 160.0);
    }

    #[test]
    fn toggles_flip_their_flags() {
        let mut spec = PlotSpec::new("z", 100, 100).unwrap();
        spec.toggle_log();
        assert!(!spec.use_log());
        spec.toggle_normalization();
        assert!(!spec.use_normalization());
        spec.toggle_log();
        assert!(spec.use_log());
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut spec = PlotSpec::new("z", 100, 100).unwrap();
        let snapshot = spec.clone();
        spec.pan(40.0, 40.0);
        spec.set_expression("z^2");
        assert_eq!(snapshot.offset_x(), 0.0);
        assert_eq!(snapshot.expression(), "z");
    }

    #[test]
    fn from_json_reads_fields_and_defaults() {
        let input = json::parse(
            r#"{ "expression": "gamma(z)", "width": 320, "height": 200,
                 "scale": 40.0, "use_log": false }"#,
        )
        .unwrap();
        let spec = PlotSpec::from_json(&input).unwrap();
        assert_eq!(spec.expression(), "gamma(z)");
        assert_eq!(spec.width(), 320);
        assert_eq!(spec.height(), 200);
        assert_eq!(spec.scale(), 40.0);
        assert!(!spec.use_log());
        assert!(spec.use_normalization());
        assert_eq!(spec.band_distance(), 1.0);
    }

    #[test]
    fn from_json_requires_an_expression() {
        let input = json::parse(r#"{ "width": 100 }"#).unwrap();
        assert!(PlotSpec::from_json(&input).is_err());
    }
}
