#![allow(dead_code)]

use geo::{Coord, Point};
use hexzones::hexring::{AxialCell, AxialLattice};
use hexzones::{GridCell, GridDataset, PointOfInterest};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 100 m hexagons centered on the planar origin.
pub fn lattice() -> AxialLattice {
    AxialLattice::new(100.0, Coord { x: 0.0, y: 0.0 }).unwrap()
}

/// Cell `(q, r)` carrying `Ai` and `population_2020`.
pub fn cell(lattice: &AxialLattice, q: i32, r: i32, ai: f64, population: f64) -> GridCell {
    let hex = AxialCell::new(q, r);
    GridCell::new(hex.to_string(), lattice.polygon(hex), [("Ai", ai), ("population_2020", population)])
}

/// Cells along row 0, ten columns apart, one per `Ai` value.
pub fn spread_row(ai: &[f64]) -> GridDataset {
    let lattice = lattice();
    GridDataset::new(ai.iter().enumerate()
        .map(|(i, &ai)| cell(&lattice, 10 * i as i32, 0, ai, 1_000.0))
        .collect()
    ).unwrap()
}

/// Every cell within ring distance `radius` of the origin, with scrambled values.
pub fn patch(radius: u32) -> GridDataset {
    let lattice = lattice();
    let origin = AxialCell::new(0, 0);
    GridDataset::new((0..=radius)
        .flat_map(|k| origin.ring(k).unwrap())
        .map(|hex| {
            let ai = (hex.q * 7 + hex.r * 13).rem_euclid(10) as f64 / 10.0;
            let population = (hex.q * 3 - hex.r).rem_euclid(17) as f64 * 100.0;
            cell(&lattice, hex.q, hex.r, ai, population)
        })
        .collect()
    ).unwrap()
}

/// Point of interest at `offset` from the center of `hex`.
pub fn poi_at(lattice: &AxialLattice, id: &str, hex: AxialCell, offset: (f64, f64), area_m2: f64, visitors: f64) -> PointOfInterest {
    let center = lattice.center(hex);
    PointOfInterest::new(id, format!("Parque {id}"), Point::new(center.x + offset.0, center.y + offset.1),
        [("area_m2", area_m2), ("visitors", visitors)])
}
