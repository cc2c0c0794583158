use geo::{Coord, MultiPolygon};

/// A district boundary with its display label and reference center.
/// Geometry is planar (meters), like the grid cells.
#[derive(Debug, Clone)]
pub struct District {
    label: String,
    boundary: MultiPolygon<f64>,
    center: Coord<f64>,
}

impl District {
    pub fn new(label: impl Into<String>, boundary: impl Into<MultiPolygon<f64>>, center: Coord<f64>) -> Self {
        Self { label: label.into(), boundary: boundary.into(), center }
    }

    #[inline] pub fn label(&self) -> &str { &self.label }

    #[inline] pub fn boundary(&self) -> &MultiPolygon<f64> { &self.boundary }

    /// Reference center used by the front end to frame the map.
    #[inline] pub fn center(&self) -> Coord<f64> { self.center }
}
