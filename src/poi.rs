use std::collections::BTreeMap;

use geo::{Geometry, Intersects};
use log::debug;

use crate::grid::CellId;
use crate::indicator::Indicators;
use crate::select::ZoneCandidate;

/// A candidate site (e.g. a green area) compared across sampling strategies.
#[derive(Debug, Clone)]
pub struct PointOfInterest {
    id: String,
    name: String,
    geometry: Geometry<f64>,
    zone: Option<CellId>,
    indicators: BTreeMap<String, f64>,
}

impl PointOfInterest {
    pub fn new<K: Into<String>>(
        id: impl Into<String>,
        name: impl Into<String>,
        geometry: impl Into<Geometry<f64>>,
        indicators: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry: geometry.into(),
            zone: None,
            indicators: indicators.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    #[inline] pub fn id(&self) -> &str { &self.id }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn geometry(&self) -> &Geometry<f64> { &self.geometry }

    /// Zone this point was assigned to by `assign_zones`.
    #[inline] pub fn zone(&self) -> Option<&CellId> { self.zone.as_ref() }

    #[inline] pub fn indicators(&self) -> &BTreeMap<String, f64> { &self.indicators }
}

impl Indicators for PointOfInterest {
    #[inline] fn label(&self) -> &str { &self.id }

    #[inline] fn indicator(&self, name: &str) -> Option<f64> { self.indicators.get(name).copied() }
}

/// Tag each point with the best-ranked zone whose buffer it intersects.
/// Points outside every zone are dropped; input points are left untouched.
pub fn assign_zones(pois: &[PointOfInterest], candidates: &[ZoneCandidate]) -> Vec<PointOfInterest> {
    let assigned = pois.iter()
        .filter_map(|poi| {
            let zone = candidates.iter().find(|zone| poi.geometry().intersects(zone.buffer()))?;
            let mut poi = poi.clone();
            poi.zone = Some(zone.cell().clone());
            Some(poi)
        })
        .collect::<Vec<_>>();
    debug!("assigned {} of {} point(s) to {} zone(s)", assigned.len(), pois.len(), candidates.len());
    assigned
}
