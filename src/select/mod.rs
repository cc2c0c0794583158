mod cancel;
mod coverage;
mod horizon;
mod threshold;
mod zones;

pub use cancel::CancelFlag;
pub use coverage::{expand_cells, expand_coverage, CoverageSet};
pub use horizon::{select_horizon, HorizonPolicy};
pub use threshold::ThresholdRule;
pub use zones::{exclusion_conflicts, select_zones, select_zones_with_cancel, SelectionParams, ZoneCandidate};
