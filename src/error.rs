use hexring::RingError;
use thiserror::Error;

/// Errors raised by zone selection, coverage expansion and indicator comparison.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZoneError {
    /// A parameter is out of range (negative radius, non-finite threshold, ...).
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter { name: &'static str, value: String, reason: String },

    /// A comparison group (or the reference population) has no members.
    #[error("group '{group}' is empty")]
    EmptyInput { group: String },

    /// An indicator is constant across the reference population.
    #[error("indicator '{indicator}' has no variance in the reference population")]
    DegenerateIndicator { indicator: String },

    /// A cell or region geometry is empty or not a valid polygon.
    #[error("invalid geometry for '{cell}': {reason}")]
    InvalidGeometry { cell: String, reason: String },

    /// An item does not carry a required indicator.
    #[error("'{item}' has no indicator '{indicator}'")]
    MissingIndicator { item: String, indicator: String },

    /// An indicator value is NaN or infinite.
    #[error("'{item}' has non-finite value {value} for indicator '{indicator}'")]
    NonFiniteIndicator { item: String, indicator: String, value: f64 },

    /// Two cells share the same id.
    #[error("duplicate cell id '{0}'")]
    DuplicateCell(String),

    /// The hex-grid backend rejected a ring query.
    #[error(transparent)]
    Topology(#[from] RingError),

    /// Selection was cancelled between iterations.
    #[error("selection cancelled after {selected} zone(s)")]
    Cancelled { selected: usize },
}

impl ZoneError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, value: value.to_string(), reason: reason.into() }
    }

    /// Failures that signal sparse data rather than a broken call.
    /// Callers should show a "not enough data" state for these.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::EmptyInput { .. } | Self::DegenerateIndicator { .. })
    }
}

/// Result type alias for zone operations.
pub type Result<T> = std::result::Result<T, ZoneError>;
