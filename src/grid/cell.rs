use std::{borrow::Borrow, collections::BTreeMap, fmt, sync::Arc};

use geo::MultiPolygon;

use crate::indicator::Indicators;

/// Stable key of a hex cell: the grid library's textual id.
/// Shared as `Arc<str>` to avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(Arc<str>);

impl CellId {
    pub fn new(id: impl AsRef<str>) -> Self { Self(Arc::from(id.as_ref())) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for CellId {
    fn from(id: &str) -> Self { Self::new(id) }
}

impl From<String> for CellId {
    fn from(id: String) -> Self { Self(Arc::from(id)) }
}

impl Borrow<str> for CellId {
    fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One record of the hex-grid dataset: id, planar geometry (meters) and indicators.
///
/// Geometry is immutable once built; buffers are derived separately
/// (see `BufferedCells`) and never stored on the cell.
#[derive(Debug, Clone)]
pub struct GridCell {
    id: CellId,
    geometry: MultiPolygon<f64>,
    indicators: BTreeMap<String, f64>,
}

impl GridCell {
    pub fn new<K: Into<String>>(
        id: impl Into<CellId>,
        geometry: impl Into<MultiPolygon<f64>>,
        indicators: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            indicators: indicators.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    #[inline] pub fn id(&self) -> &CellId { &self.id }

    #[inline] pub fn geometry(&self) -> &MultiPolygon<f64> { &self.geometry }

    #[inline] pub fn indicators(&self) -> &BTreeMap<String, f64> { &self.indicators }
}

impl Indicators for GridCell {
    #[inline] fn label(&self) -> &str { self.id.as_str() }

    #[inline] fn indicator(&self, name: &str) -> Option<f64> { self.indicators.get(name).copied() }
}
