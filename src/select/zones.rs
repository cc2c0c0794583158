use geo::{Intersects, MultiPolygon};
use log::{debug, info};

use crate::error::{Result, ZoneError};
use crate::grid::{buffer_shape, CellId, GridDataset};
use crate::indicator::{IndicatorSpec, Indicators};
use crate::select::{CancelFlag, ThresholdRule};

/// Parameters of one greedy selection pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionParams {
    /// Maximum number of zones to select.
    pub n_candidates: usize,
    /// Exclusion radius around each selected cell, in meters.
    pub radius_m: f64,
    /// Selection stops once the best remaining primary value fails `rule`.
    pub threshold: f64,
    pub rule: ThresholdRule,
    /// Dominant ranking key.
    pub primary: IndicatorSpec,
    /// Tie-break ranking key.
    pub secondary: IndicatorSpec,
}

impl SelectionParams {
    /// Parameters whose threshold rule follows the primary direction.
    pub fn new(
        n_candidates: usize,
        radius_m: f64,
        threshold: f64,
        primary: IndicatorSpec,
        secondary: IndicatorSpec,
    ) -> Self {
        let rule = ThresholdRule::for_direction(primary.direction());
        Self { n_candidates, radius_m, threshold, rule, primary, secondary }
    }

    /// Override the threshold rule.
    pub fn with_rule(mut self, rule: ThresholdRule) -> Self {
        self.rule = rule;
        self
    }

    /// Fail fast on parameters that make the run meaningless.
    pub fn validate(&self, dataset: &GridDataset) -> Result<()> {
        crate::grid::check_radius(self.radius_m)?;
        if !self.threshold.is_finite() {
            return Err(ZoneError::invalid_parameter("threshold", self.threshold, "must be finite"));
        }
        for spec in [&self.primary, &self.secondary] {
            if !dataset.has_indicator(spec.name()) {
                return Err(ZoneError::MissingIndicator { item: "dataset".to_string(), indicator: spec.name().to_string() });
            }
        }
        Ok(())
    }
}

/// A selected zone center: its cell, its exclusion buffer and the values it was ranked by.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneCandidate {
    cell: CellId,
    buffer: MultiPolygon<f64>,
    rank: usize,
    primary_value: f64,
    secondary_value: f64,
}

impl ZoneCandidate {
    #[inline] pub fn cell(&self) -> &CellId { &self.cell }

    /// Buffer captured at selection time.
    #[inline] pub fn buffer(&self) -> &MultiPolygon<f64> { &self.buffer }

    /// Zero-based selection order.
    #[inline] pub fn rank(&self) -> usize { self.rank }

    #[inline] pub fn primary_value(&self) -> f64 { self.primary_value }

    #[inline] pub fn secondary_value(&self) -> f64 { self.secondary_value }
}

/// Greedy zone selection; see `select_zones_with_cancel`.
pub fn select_zones(dataset: &GridDataset, params: &SelectionParams) -> Result<Vec<ZoneCandidate>> {
    select_zones_with_cancel(dataset, params, &CancelFlag::new())
}

/// Pick up to `n_candidates` zone centers, best-ranked first.
///
/// Cells are ranked by `(primary, secondary)` in their declared directions,
/// ties broken by cell id. Each round takes the best remaining cell, buffers it
/// by `radius_m`, and drops every remaining cell whose geometry intersects that
/// buffer. Dropped cells never come back. The loop ends when enough zones are
/// picked, the working set is empty, or the best remaining primary value fails
/// the threshold rule. `cancel` is checked at the top of every round.
pub fn select_zones_with_cancel(
    dataset: &GridDataset,
    params: &SelectionParams,
    cancel: &CancelFlag,
) -> Result<Vec<ZoneCandidate>> {
    params.validate(dataset)?;
    if params.n_candidates == 0 {
        debug!("no zones requested");
        return Ok(Vec::new())
    }

    let keys = dataset.cells().iter()
        .map(|cell| Ok((cell.require(params.primary.name())?, cell.require(params.secondary.name())?)))
        .collect::<Result<Vec<(f64, f64)>>>()?;

    // Removal keeps the relative order of the remaining cells, so rank once.
    let mut ranking = (0..dataset.len()).collect::<Vec<_>>();
    ranking.sort_by(|&a, &b| {
        params.primary.compare(keys[a].0, keys[b].0)
            .then_with(|| params.secondary.compare(keys[a].1, keys[b].1))
            .then_with(|| dataset.cell(a).id().cmp(dataset.cell(b).id()))
    });

    let mut removed = vec![false; dataset.len()];
    let mut cursor = 0;
    let mut selected = Vec::with_capacity(params.n_candidates.min(dataset.len()));

    while selected.len() < params.n_candidates {
        if cancel.is_cancelled() {
            return Err(ZoneError::Cancelled { selected: selected.len() });
        }

        while cursor < ranking.len() && removed[ranking[cursor]] { cursor += 1 }
        let Some(&best) = ranking.get(cursor) else {
            debug!("working set exhausted after {} zone(s)", selected.len());
            break
        };

        let (primary_value, secondary_value) = keys[best];
        if !params.rule.accepts(primary_value, params.threshold) {
            debug!("stopping: {} = {primary_value} fails {:?} {}", params.primary.name(), params.rule, params.threshold);
            break
        }

        let cell = dataset.cell(best);
        let buffer = buffer_shape(cell.id().as_str(), cell.geometry(), params.radius_m)?;

        removed[best] = true;
        let excluded = dataset.intersecting(&buffer);
        for &i in &excluded { removed[i] = true }

        debug!("zone #{} = {} ({} = {primary_value}), excluded {} cell(s)",
            selected.len(), cell.id(), params.primary.name(), excluded.len());

        selected.push(ZoneCandidate {
            cell: cell.id().clone(),
            buffer,
            rank: selected.len(),
            primary_value,
            secondary_value,
        });
    }

    info!("selected {} of {} requested zone(s) from {} cell(s)", selected.len(), params.n_candidates, dataset.len());
    Ok(selected)
}

/// Pairs `(i, j)` with `i < j` where zone `j`'s cell intersects zone `i`'s buffer.
/// Empty for any output of `select_zones` on the same dataset.
pub fn exclusion_conflicts(dataset: &GridDataset, candidates: &[ZoneCandidate]) -> Vec<(usize, usize)> {
    let mut conflicts = Vec::new();
    for (i, earlier) in candidates.iter().enumerate() {
        for (j, later) in candidates.iter().enumerate().skip(i + 1) {
            let Some(cell) = dataset.get(later.cell().as_str()) else { continue };
            if cell.geometry().intersects(earlier.buffer()) {
                conflicts.push((i, j));
            }
        }
    }
    conflicts
}
