use std::borrow::Cow;

use geo::MultiPolygon;
use hexring::RingTopology;
use log::{info, warn};

use crate::config::StudyConfig;
use crate::district::District;
use crate::error::{Result, ZoneError};
use crate::grid::{GridCell, GridDataset};
use crate::indicator::{build_radar_table, ComparisonGroup, RadarTable};
use crate::poi::{assign_zones, PointOfInterest};
use crate::sample::{sample_per_group_seeded, top_per_group};
use crate::select::{
    expand_coverage, select_horizon, select_zones_with_cancel, CancelFlag, CoverageSet, ZoneCandidate,
};

/// Label of the top-ranked comparison group.
pub const TOP_GROUP: &str = "Top-N";

/// Label of the random-sample comparison group.
pub const RANDOM_GROUP: &str = "Random";

/// Radar comparison result, or why it could not be drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum RadarState {
    Ready(RadarTable),
    /// Sparse data (empty group, constant indicator); show a message instead of a chart.
    NotEnoughData(String),
}

impl RadarState {
    #[inline] pub fn is_ready(&self) -> bool { matches!(self, Self::Ready(_)) }

    #[inline]
    pub fn table(&self) -> Option<&RadarTable> {
        match self {
            Self::Ready(table) => Some(table),
            Self::NotEnoughData(_) => None,
        }
    }
}

/// Everything the rendering layer needs after one parameter change.
#[derive(Clone, Debug)]
pub struct StudyOutcome {
    /// Selected zones, in selection order.
    pub candidates: Vec<ZoneCandidate>,
    /// Ring distance used for coverage.
    pub horizon: u32,
    pub coverage: CoverageSet,
    /// Coverage cells present in the (district-scoped) dataset.
    pub coverage_cells: Vec<GridCell>,
    pub random_group: Vec<PointOfInterest>,
    pub top_group: Vec<PointOfInterest>,
    pub radar: RadarState,
}

/// One end-to-end run: select zones, expand coverage, compare points of interest.
pub struct ZoneStudy<'a, G> {
    config: &'a StudyConfig,
    topology: &'a G,
}

impl<'a, G: RingTopology> ZoneStudy<'a, G> {
    pub fn new(config: &'a StudyConfig, topology: &'a G) -> Self {
        Self { config, topology }
    }

    #[inline] pub fn config(&self) -> &StudyConfig { self.config }

    pub fn run(&self, dataset: &GridDataset, district: Option<&District>, pois: &[PointOfInterest]) -> Result<StudyOutcome> {
        self.run_with_cancel(dataset, district, pois, &CancelFlag::new())
    }

    /// Run the study, optionally scoped to `district`.
    ///
    /// Parameter, geometry, topology and cancellation errors abort the run.
    /// Sparse comparison data only degrades `radar` to `NotEnoughData`.
    pub fn run_with_cancel(
        &self,
        dataset: &GridDataset,
        district: Option<&District>,
        pois: &[PointOfInterest],
        cancel: &CancelFlag,
    ) -> Result<StudyOutcome> {
        let config = self.config;
        config.validate()?;

        let scoped = match district {
            Some(district) => Cow::Owned(dataset.within(district)?),
            None => Cow::Borrowed(dataset),
        };
        let region = match district {
            Some(district) => district.boundary().clone(),
            None => scoped.bounds()
                .map(|rect| MultiPolygon::from(rect.to_polygon()))
                .ok_or_else(|| ZoneError::InvalidGeometry { cell: "dataset".to_string(), reason: "no bounds".to_string() })?,
        };

        let horizon = select_horizon(&region, self.topology, &config.horizon)?;
        let candidates = select_zones_with_cancel(&scoped, &config.selection(), cancel)?;
        let coverage = expand_coverage(&candidates, horizon, self.topology)?;
        let coverage_cells = scoped.cells_for(&coverage).into_iter().cloned().collect::<Vec<_>>();

        // Group points by the rank of the zone they fall in.
        let assigned = assign_zones(pois, &candidates);
        let zone_rank = |poi: &PointOfInterest| poi.zone()
            .and_then(|zone| candidates.iter().position(|c| c.cell() == zone));

        let random_group = sample_per_group_seeded(&assigned, zone_rank, config.sample_size, config.seed);
        let top_group = top_per_group(&assigned, zone_rank, config.top_per_zone, &config.poi_ranking)?;

        let groups = [
            ComparisonGroup::new(TOP_GROUP, top_group.clone()),
            ComparisonGroup::new(RANDOM_GROUP, random_group.clone()),
        ];
        let radar = match build_radar_table(config.radar_indicators.as_slice(), &groups, pois) {
            Ok(table) => RadarState::Ready(table),
            Err(err) if err.is_insufficient_data() => {
                warn!("radar comparison skipped: {err}");
                RadarState::NotEnoughData(err.to_string())
            }
            Err(err) => return Err(err),
        };

        info!("study '{}': {} zone(s), horizon {}, {} covered cell(s), {} point(s) in zones",
            district.map_or("all", District::label), candidates.len(), horizon, coverage.len(), assigned.len());

        Ok(StudyOutcome { candidates, horizon, coverage, coverage_cells, random_group, top_group, radar })
    }
}
