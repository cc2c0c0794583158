use thiserror::Error;

/// Errors raised by ring-distance queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RingError {
    /// The cell id could not be parsed by the grid backend.
    #[error("invalid cell id '{cell}': {reason}")]
    InvalidCell { cell: String, reason: String },

    /// The cell belongs to a different resolution than the topology.
    #[error("cell '{cell}' has resolution {found}, expected {expected}")]
    ResolutionMismatch { cell: String, found: u8, expected: u8 },

    /// Unsupported grid resolution.
    #[error("invalid resolution {0}")]
    InvalidResolution(u8),

    /// Ring distance beyond what the topology will enumerate.
    #[error("ring distance {k} exceeds the maximum of {max}")]
    RingTooLarge { k: u32, max: u32 },

    /// Lattice spacing must be a positive, finite number of meters.
    #[error("invalid lattice size {0}")]
    InvalidSize(f64),
}
