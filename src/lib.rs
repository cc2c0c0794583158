#![doc = "Greedy zone-of-interest selection and indicator comparison over hexagonal city grids"]
mod config;
mod district;
mod error;
mod grid;
mod indicator;
mod poi;
mod sample;
mod select;
mod study;

#[doc(inline)]
pub use config::StudyConfig;

#[doc(inline)]
pub use district::District;

#[doc(inline)]
pub use error::{Result, ZoneError};

#[doc(inline)]
pub use grid::{buffer_shape, BufferedCells, CellId, GridCell, GridDataset};

#[doc(inline)]
pub use indicator::{build_radar_table, ComparisonGroup, IndicatorSpec, Indicators, RadarRow, RadarTable, SortDirection};

#[doc(inline)]
pub use poi::{assign_zones, PointOfInterest};

#[doc(inline)]
pub use sample::{sample_per_group, sample_per_group_seeded, top_per_group};

#[doc(inline)]
pub use select::{
    exclusion_conflicts, expand_cells, expand_coverage, select_horizon, select_zones, select_zones_with_cancel,
    CancelFlag, CoverageSet, HorizonPolicy, SelectionParams, ThresholdRule, ZoneCandidate,
};

#[doc(inline)]
pub use study::{RadarState, StudyOutcome, ZoneStudy, RANDOM_GROUP, TOP_GROUP};

pub use hexring;
