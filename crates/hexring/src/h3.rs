use std::str::FromStr;

use h3o::{CellIndex, Resolution};

use crate::error::RingError;
use crate::topology::{check_ring_distance, RingTopology};

/// Ring topology backed by the H3 hierarchical grid, at a single resolution.
///
/// Cell ids are H3 indexes in their canonical hexadecimal form
/// (e.g. `"898e6283a3bffff"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct H3Rings {
    resolution: Resolution,
}

impl H3Rings {
    pub fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }

    /// Build from a numeric resolution level (0..=15).
    pub fn from_level(level: u8) -> Result<Self, RingError> {
        let resolution = Resolution::try_from(level)
            .map_err(|_| RingError::InvalidResolution(level))?;
        Ok(Self::new(resolution))
    }

    #[inline] pub fn resolution(&self) -> Resolution { self.resolution }

    /// Parse a cell id and check it lives at this topology's resolution.
    pub fn parse(&self, cell: &str) -> Result<CellIndex, RingError> {
        let index = CellIndex::from_str(cell)
            .map_err(|e| RingError::InvalidCell { cell: cell.to_string(), reason: e.to_string() })?;

        if index.resolution() != self.resolution {
            return Err(RingError::ResolutionMismatch {
                cell: cell.to_string(),
                found: u8::from(index.resolution()),
                expected: u8::from(self.resolution),
            });
        }
        Ok(index)
    }
}

impl RingTopology for H3Rings {
    fn disk_distances(&self, cell: &str, k: u32) -> Result<Vec<(String, u32)>, RingError> {
        check_ring_distance(k)?;
        let index = self.parse(cell)?;
        Ok(index.grid_disk_distances::<Vec<_>>(k)
            .into_iter()
            .map(|(neighbor, distance)| (neighbor.to_string(), distance))
            .collect())
    }

    /// Adjacent H3 centers sit `sqrt(3)` edge lengths apart.
    fn center_spacing_m(&self) -> f64 {
        self.resolution.edge_length_m() * 3f64.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use h3o::LatLng;

    use super::*;

    fn lima_cell(resolution: Resolution) -> String {
        LatLng::new(-12.0630149, -77.0296179)
            .expect("valid coordinates")
            .to_cell(resolution)
            .to_string()
    }

    #[test]
    fn from_level_rejects_out_of_range() {
        assert_eq!(H3Rings::from_level(16), Err(RingError::InvalidResolution(16)));
        assert!(H3Rings::from_level(9).is_ok());
    }

    #[test]
    fn disk_of_two_rings_has_nineteen_cells() {
        let rings = H3Rings::new(Resolution::Nine);
        let disk = rings.disk_distances(&lima_cell(Resolution::Nine), 2).unwrap();
        assert_eq!(disk.len(), 19);
        assert_eq!(disk.iter().filter(|&&(_, d)| d == 0).count(), 1);
        assert_eq!(disk.iter().filter(|&&(_, d)| d == 1).count(), 6);
        assert_eq!(disk.iter().filter(|&&(_, d)| d == 2).count(), 12);
    }

    #[test]
    fn neighbors_exclude_origin() {
        let rings = H3Rings::new(Resolution::Nine);
        let origin = lima_cell(Resolution::Nine);
        let neighbors = rings.neighbors_within(&origin, 1).unwrap();
        assert_eq!(neighbors.len(), 6);
        assert!(!neighbors.contains(&origin));
    }

    #[test]
    fn wrong_resolution_is_rejected() {
        let rings = H3Rings::new(Resolution::Nine);
        let err = rings.disk_distances(&lima_cell(Resolution::Eight), 1).unwrap_err();
        assert!(matches!(err, RingError::ResolutionMismatch { found: 8, expected: 9, .. }));
    }

    #[test]
    fn garbage_id_is_rejected() {
        let rings = H3Rings::new(Resolution::Nine);
        assert!(matches!(rings.disk_distances("not-a-cell", 1), Err(RingError::InvalidCell { .. })));
    }

    #[test]
    fn spacing_shrinks_with_finer_resolution() {
        let coarse = H3Rings::new(Resolution::Seven).center_spacing_m();
        let fine = H3Rings::new(Resolution::Nine).center_spacing_m();
        assert!(fine < coarse);
        assert!(fine > 100.0 && fine < 1000.0);
    }
}
