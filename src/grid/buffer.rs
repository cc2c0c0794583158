use geo::{Buffer, MultiPolygon};

use crate::error::{Result, ZoneError};
use crate::grid::{GridCell, GridDataset};

/// Reject negative or non-finite radii.
pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(ZoneError::invalid_parameter("radius", radius, "must be a finite, non-negative distance in meters"));
    }
    Ok(())
}

/// Expand `shape` outward by `radius` meters.
/// A zero radius yields the shape itself.
pub fn buffer_shape(label: &str, shape: &MultiPolygon<f64>, radius: f64) -> Result<MultiPolygon<f64>> {
    check_radius(radius)?;
    if radius == 0.0 { return Ok(shape.clone()) }

    let buffered = shape.buffer(radius);
    if buffered.0.is_empty() {
        return Err(ZoneError::InvalidGeometry {
            cell: label.to_string(),
            reason: format!("buffer at {radius} m is empty"),
        });
    }
    Ok(buffered)
}

/// Every cell of a dataset paired with its buffer at a fixed radius.
///
/// This is a derived view: building one for a new radius never touches the
/// dataset, so views for different radii can coexist.
#[derive(Debug, Clone)]
pub struct BufferedCells<'a> {
    dataset: &'a GridDataset,
    radius: f64,
    buffers: Vec<MultiPolygon<f64>>,
}

impl<'a> BufferedCells<'a> {
    pub(crate) fn new(dataset: &'a GridDataset, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        let buffers = dataset.cells().iter()
            .map(|cell| buffer_shape(cell.id().as_str(), cell.geometry(), radius))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { dataset, radius, buffers })
    }

    #[inline] pub fn radius(&self) -> f64 { self.radius }

    #[inline] pub fn len(&self) -> usize { self.buffers.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.buffers.is_empty() }

    /// Buffer of the cell at position `idx`.
    #[inline] pub fn buffer(&self, idx: usize) -> &MultiPolygon<f64> { &self.buffers[idx] }

    /// Buffer of the cell with id `id`.
    pub fn buffer_of(&self, id: &str) -> Option<&MultiPolygon<f64>> {
        self.dataset.position(id).map(|i| &self.buffers[i])
    }

    /// Iterate over (cell, buffer) pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a GridCell, &MultiPolygon<f64>)> + '_ {
        self.dataset.cells().iter().zip(&self.buffers)
    }
}
