use ahash::AHashMap;
use geo::{BoundingRect, Coord, Intersects, MultiPolygon, Rect, Validation};

use crate::district::District;
use crate::error::{Result, ZoneError};
use crate::grid::{BufferedCells, CellId, EnvelopeIndex, GridCell};

/// Reject empty or invalid (e.g. self-intersecting) polygons.
pub(crate) fn validate_geometry(label: &str, shape: &MultiPolygon<f64>) -> Result<()> {
    if shape.0.is_empty() || shape.bounding_rect().is_none() {
        return Err(ZoneError::InvalidGeometry { cell: label.to_string(), reason: "geometry is empty".to_string() });
    }
    if !shape.is_valid() {
        return Err(ZoneError::InvalidGeometry {
            cell: label.to_string(),
            reason: "polygon is self-intersecting or otherwise invalid".to_string(),
        });
    }
    Ok(())
}

/// The hex-grid dataset: one record per cell, with an R-tree over cell bounds.
///
/// Cells are read-only once loaded. All cells carry the same indicator keys.
#[derive(Debug, Clone)]
pub struct GridDataset {
    cells: Vec<GridCell>,
    index: AHashMap<CellId, usize>, // Map between cell ids and positions in `cells`.
    spatial: EnvelopeIndex,
    indicator_names: Vec<String>,
}

impl GridDataset {
    /// Build a dataset, validating ids, indicator keys, values and geometry.
    pub fn new(cells: Vec<GridCell>) -> Result<Self> {
        let Some(first) = cells.first() else {
            return Err(ZoneError::invalid_parameter("cells", 0, "dataset must contain at least one cell"));
        };
        let indicator_names = first.indicators().keys().cloned().collect::<Vec<_>>();

        let mut index = AHashMap::with_capacity(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            if index.insert(cell.id().clone(), i).is_some() {
                return Err(ZoneError::DuplicateCell(cell.id().to_string()));
            }

            for name in &indicator_names {
                if !cell.indicators().contains_key(name) {
                    return Err(ZoneError::MissingIndicator { item: cell.id().to_string(), indicator: name.clone() });
                }
            }
            for (name, &value) in cell.indicators() {
                if !first.indicators().contains_key(name) {
                    return Err(ZoneError::MissingIndicator { item: first.id().to_string(), indicator: name.clone() });
                }
                if !value.is_finite() {
                    return Err(ZoneError::NonFiniteIndicator {
                        item: cell.id().to_string(),
                        indicator: name.clone(),
                        value,
                    });
                }
            }

            validate_geometry(cell.id().as_str(), cell.geometry())?;
        }

        Ok(Self {
            spatial: EnvelopeIndex::build(cells.iter().map(GridCell::geometry)),
            cells,
            index,
            indicator_names,
        })
    }

    /// Get the number of cells.
    #[inline] pub fn len(&self) -> usize { self.cells.len() }

    /// Datasets are never empty; kept for API symmetry.
    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// Get a reference to the list of cells.
    #[inline] pub fn cells(&self) -> &[GridCell] { &self.cells }

    /// Get the cell at position `idx`.
    #[inline] pub fn cell(&self, idx: usize) -> &GridCell { &self.cells[idx] }

    /// Indicator names shared by every cell, sorted.
    #[inline] pub fn indicator_names(&self) -> &[String] { &self.indicator_names }

    /// Check whether every cell carries indicator `name`.
    #[inline] pub fn has_indicator(&self, name: &str) -> bool { self.indicator_names.iter().any(|n| n == name) }

    /// Position of the cell with id `id`.
    #[inline] pub fn position(&self, id: &str) -> Option<usize> { self.index.get(id).copied() }

    /// Look up a cell by id.
    #[inline] pub fn get(&self, id: &str) -> Option<&GridCell> { self.position(id).map(|i| &self.cells[i]) }

    /// Observed (min, max) of indicator `name`, if the dataset carries it.
    pub fn indicator_range(&self, name: &str) -> Option<(f64, f64)> {
        self.cells.iter()
            .map(|cell| cell.indicators().get(name).copied())
            .try_fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                value.map(|v| (min.min(v), max.max(v)))
            })
    }

    /// Bounding rectangle of all cells.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.cells.iter()
            .filter_map(|cell| cell.geometry().bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }

    /// Positions of cells whose geometry intersects `shape`, ascending.
    /// Touching boundaries count as intersecting.
    pub fn intersecting(&self, shape: &MultiPolygon<f64>) -> Vec<usize> {
        let mut hits = self.spatial.candidates(shape)
            .into_iter()
            .filter(|&i| self.cells[i].geometry().intersects(shape))
            .collect::<Vec<_>>();
        hits.sort_unstable();
        hits
    }

    /// Derive every cell's buffer at `radius` meters. Cells are not modified.
    pub fn buffered(&self, radius: f64) -> Result<BufferedCells<'_>> {
        BufferedCells::new(self, radius)
    }

    /// Sub-dataset of cells intersecting the district boundary.
    pub fn within(&self, district: &District) -> Result<GridDataset> {
        validate_geometry(district.label(), district.boundary())?;
        let cells = self.intersecting(district.boundary())
            .into_iter()
            .map(|i| self.cells[i].clone())
            .collect::<Vec<_>>();
        if cells.is_empty() {
            return Err(ZoneError::EmptyInput { group: district.label().to_string() });
        }
        GridDataset::new(cells)
    }

    /// Resolve ids back to dataset cells, in id order. Ids not in the dataset are skipped.
    pub fn cells_for<'a>(&self, ids: impl IntoIterator<Item = &'a CellId>) -> Vec<&GridCell> {
        ids.into_iter()
            .filter_map(|id| self.get(id.as_str()))
            .collect()
    }
}
