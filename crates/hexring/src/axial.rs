use std::{fmt, str::FromStr};

use geo::{Coord, LineString, Polygon};

use crate::error::RingError;
use crate::topology::{check_ring_distance, RingTopology, MAX_RING_DISTANCE};

/// Axial neighbor offsets, in ring-walk order.
const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// A cell of a planar hex lattice in axial coordinates `(q, r)`.
///
/// The textual id is `"q,r"`, e.g. `"-2,5"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxialCell {
    pub q: i32,
    pub r: i32,
}

impl AxialCell {
    pub const fn new(q: i32, r: i32) -> Self { Self { q, r } }

    /// Neighbor in direction `dir` (0..6), scaled by `k` steps.
    /// `None` when the result leaves the `i32` coordinate range.
    #[inline]
    fn step(self, dir: usize, k: i32) -> Option<Self> {
        let (dq, dr) = DIRECTIONS[dir % 6];
        Some(Self::new(
            self.q.checked_add(dq.checked_mul(k)?)?,
            self.r.checked_add(dr.checked_mul(k)?)?,
        ))
    }

    /// Grid distance (number of rings) between two cells, saturating at `u32::MAX`.
    pub fn distance(self, other: Self) -> u32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        u32::try_from((dq.abs() + dr.abs() + (dq + dr).abs()) / 2).unwrap_or(u32::MAX)
    }

    /// Cells at exactly ring distance `k`, walking counter-clockwise.
    ///
    /// Fails with `InvalidCell` if the ring leaves the `i32` coordinate range.
    pub fn ring(self, k: u32) -> Result<Vec<Self>, RingError> {
        if k == 0 { return Ok(vec![self]); }

        let out_of_range = || RingError::InvalidCell {
            cell: self.to_string(),
            reason: format!("ring {k} leaves the i32 coordinate range"),
        };
        let steps = i32::try_from(k).map_err(|_| out_of_range())?;
        let mut cells = Vec::with_capacity(6 * k.min(MAX_RING_DISTANCE) as usize);
        let mut cell = self.step(4, steps).ok_or_else(out_of_range)?;
        for dir in 0..6 {
            for _ in 0..k {
                cells.push(cell);
                cell = cell.step(dir, 1).ok_or_else(out_of_range)?;
            }
        }
        Ok(cells)
    }
}

impl fmt::Display for AxialCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl FromStr for AxialCell {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| RingError::InvalidCell { cell: s.to_string(), reason: reason.to_string() };
        let (q, r) = s.split_once(',').ok_or_else(|| invalid("expected 'q,r'"))?;
        let q = q.trim().parse::<i32>().map_err(|e| invalid(&e.to_string()))?;
        let r = r.trim().parse::<i32>().map_err(|e| invalid(&e.to_string()))?;
        Ok(Self::new(q, r))
    }
}

/// A pointy-top hexagonal lattice laid out in a planar (meter) projection.
///
/// `size` is the hexagon circumradius, which equals its edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialLattice {
    size: f64,
    origin: Coord<f64>,
}

impl AxialLattice {
    pub fn new(size: f64, origin: Coord<f64>) -> Result<Self, RingError> {
        if !(size.is_finite() && size > 0.0) { return Err(RingError::InvalidSize(size)); }
        Ok(Self { size, origin })
    }

    #[inline] pub fn size(&self) -> f64 { self.size }

    #[inline] pub fn origin(&self) -> Coord<f64> { self.origin }

    /// Horizontal distance between adjacent centers in the same row.
    #[inline] fn width(&self) -> f64 { 3f64.sqrt() * self.size }

    /// Planar center of `cell`.
    pub fn center(&self, cell: AxialCell) -> Coord<f64> {
        Coord {
            x: self.origin.x + self.width() * (cell.q as f64 + cell.r as f64 / 2.0),
            y: self.origin.y + 1.5 * self.size * cell.r as f64,
        }
    }

    /// Closed hexagon outline of `cell`.
    /// Corners are exact half-width offsets so neighbors share edges bit-for-bit.
    pub fn polygon(&self, cell: AxialCell) -> Polygon<f64> {
        let center = self.center(cell);
        let (half_w, half_s) = (self.width() / 2.0, self.size / 2.0);
        let offsets = [
            (half_w, -half_s), (half_w, half_s), (0.0, self.size),
            (-half_w, half_s), (-half_w, -half_s), (0.0, -self.size),
        ];
        let mut ring = offsets.iter()
            .map(|&(dx, dy)| Coord { x: center.x + dx, y: center.y + dy })
            .collect::<Vec<_>>();
        ring.push(ring[0]);
        Polygon::new(LineString::from(ring), vec![])
    }

    /// Cell containing the planar point `point` (cube rounding).
    pub fn cell_at(&self, point: Coord<f64>) -> AxialCell {
        let x = (point.x - self.origin.x) / self.size;
        let y = (point.y - self.origin.y) / self.size;
        let q = 3f64.sqrt() / 3.0 * x - y / 3.0;
        let r = 2.0 / 3.0 * y;
        let s = -q - r;

        let (mut rq, mut rr, rs) = (q.round(), r.round(), s.round());
        let (dq, dr, ds) = ((rq - q).abs(), (rr - r).abs(), (rs - s).abs());
        if dq > dr && dq > ds {
            rq = -rr - rs;
        } else if dr > ds {
            rr = -rq - rs;
        }
        AxialCell::new(rq as i32, rr as i32)
    }
}

impl RingTopology for AxialLattice {
    fn disk_distances(&self, cell: &str, k: u32) -> Result<Vec<(String, u32)>, RingError> {
        check_ring_distance(k)?;
        let origin = cell.parse::<AxialCell>()?;
        let mut disk = Vec::with_capacity(3 * (k as usize) * (k as usize + 1) + 1);
        for distance in 0..=k {
            disk.extend(origin.ring(distance)?.into_iter().map(|c| (c.to_string(), distance)));
        }
        Ok(disk)
    }

    fn center_spacing_m(&self) -> f64 { self.width() }
}
