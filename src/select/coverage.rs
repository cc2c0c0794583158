use std::collections::BTreeSet;

use hexring::RingTopology;

use crate::error::Result;
use crate::grid::CellId;
use crate::select::ZoneCandidate;

/// Cells covered by the selected zones' neighborhoods, deduplicated and sorted by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageSet {
    cells: BTreeSet<CellId>,
}

impl CoverageSet {
    #[inline] pub fn len(&self) -> usize { self.cells.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    #[inline] pub fn contains(&self, id: &str) -> bool { self.cells.contains(id) }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &CellId> { self.cells.iter() }
}

impl<'a> IntoIterator for &'a CoverageSet {
    type Item = &'a CellId;
    type IntoIter = std::collections::btree_set::Iter<'a, CellId>;

    fn into_iter(self) -> Self::IntoIter { self.cells.iter() }
}

/// Union of the cells at ring distances `1..=horizon` around each origin.
/// Origins are not included unless they fall in another origin's neighborhood.
pub fn expand_cells<'a>(
    origins: impl IntoIterator<Item = &'a CellId>,
    horizon: u32,
    topology: &impl RingTopology,
) -> Result<CoverageSet> {
    let mut cells = BTreeSet::new();
    for origin in origins {
        cells.extend(topology.neighbors_within(origin.as_str(), horizon)?.into_iter().map(CellId::from));
    }
    Ok(CoverageSet { cells })
}

/// Covered neighborhood of the selected zones at ring distance `horizon`.
pub fn expand_coverage(selected: &[ZoneCandidate], horizon: u32, topology: &impl RingTopology) -> Result<CoverageSet> {
    expand_cells(selected.iter().map(ZoneCandidate::cell), horizon, topology)
}
