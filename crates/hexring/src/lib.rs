pub mod axial;
pub mod error;
pub mod h3;
pub mod topology;

pub use axial::{AxialCell, AxialLattice};
pub use error::RingError;
pub use h3::H3Rings;
pub use topology::{RingTopology, MAX_RING_DISTANCE};
