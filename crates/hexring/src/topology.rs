use crate::error::RingError;

/// Largest ring distance any topology will enumerate.
/// A disk of radius k holds 3k(k+1)+1 cells, so this caps a query at ~12k cells.
pub const MAX_RING_DISTANCE: u32 = 64;

/// Ring-distance queries over a hexagonal tessellation.
///
/// Cells are addressed by their textual id, which is what grid datasets carry
/// around. Implementations must return results in a deterministic order.
pub trait RingTopology {
    /// All cells within `k` rings of `cell`, paired with their ring distance.
    /// The origin itself is included at distance 0.
    fn disk_distances(&self, cell: &str, k: u32) -> Result<Vec<(String, u32)>, RingError>;

    /// Distance in meters between the centers of two adjacent cells.
    fn center_spacing_m(&self) -> f64;

    /// Cells at ring distances `1..=k` around `cell` (the origin is excluded).
    fn neighbors_within(&self, cell: &str, k: u32) -> Result<Vec<String>, RingError> {
        Ok(self.disk_distances(cell, k)?
            .into_iter()
            .filter(|&(_, distance)| distance > 0)
            .map(|(id, _)| id)
            .collect())
    }
}

/// Reject ring distances larger than `MAX_RING_DISTANCE`.
#[inline]
pub(crate) fn check_ring_distance(k: u32) -> Result<(), RingError> {
    if k > MAX_RING_DISTANCE { return Err(RingError::RingTooLarge { k, max: MAX_RING_DISTANCE }); }
    Ok(())
}
