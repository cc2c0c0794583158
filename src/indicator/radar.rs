use anyhow::Context;
use polars::prelude::{Column, DataFrame};

use crate::error::{Result, ZoneError};
use crate::indicator::Indicators;

/// A labelled set of items compared against other groups (e.g. "Top-N" vs "Random").
#[derive(Clone, Debug)]
pub struct ComparisonGroup<T> {
    label: String,
    items: Vec<T>,
}

impl<T> ComparisonGroup<T> {
    pub fn new(label: impl Into<String>, items: Vec<T>) -> Self {
        Self { label: label.into(), items }
    }

    #[inline] pub fn label(&self) -> &str { &self.label }

    #[inline] pub fn items(&self) -> &[T] { &self.items }

    #[inline] pub fn len(&self) -> usize { self.items.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// One (group, indicator) point of a radar profile.
#[derive(Clone, Debug, PartialEq)]
pub struct RadarRow {
    pub group: String,
    pub indicator: String,
    /// Mean of the indicator over the group's items.
    pub raw_value: f64,
    /// `raw_value` rescaled onto [0, 1] using the population's min/max.
    pub normalized_value: f64,
}

/// Radar table ready for a polar chart: rows ordered by indicator, then group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadarTable {
    rows: Vec<RadarRow>,
}

impl RadarTable {
    #[inline] pub fn rows(&self) -> &[RadarRow] { &self.rows }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Rows belonging to `group`, in indicator order.
    pub fn rows_for<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a RadarRow> + 'a {
        self.rows.iter().filter(move |row| row.group == group)
    }

    /// Export as a DataFrame with columns `group, indicator, raw_value, normalized_value`.
    pub fn to_dataframe(&self) -> anyhow::Result<DataFrame> {
        let groups = self.rows.iter().map(|row| row.group.as_str()).collect::<Vec<_>>();
        let indicators = self.rows.iter().map(|row| row.indicator.as_str()).collect::<Vec<_>>();
        let raw = self.rows.iter().map(|row| row.raw_value).collect::<Vec<_>>();
        let normalized = self.rows.iter().map(|row| row.normalized_value).collect::<Vec<_>>();

        DataFrame::new(vec![
            Column::new("group".into(), groups),
            Column::new("indicator".into(), indicators),
            Column::new("raw_value".into(), raw),
            Column::new("normalized_value".into(), normalized),
        ]).context("Failed to build radar DataFrame")
    }
}

/// Value of `indicator` on `item`; NaN or infinite values are rejected.
fn finite_value<T: Indicators>(indicator: &str, item: &T) -> Result<f64> {
    let value = item.require(indicator)?;
    if !value.is_finite() {
        return Err(ZoneError::NonFiniteIndicator {
            item: item.label().to_string(),
            indicator: indicator.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Observed (min, max) of `indicator` over `population`.
fn population_range<T: Indicators>(indicator: &str, population: &[T]) -> Result<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for item in population {
        let value = finite_value(indicator, item)?;
        min = min.min(value);
        max = max.max(value);
    }
    Ok((min, max))
}

/// Mean of `indicator` over `items` (non-empty).
fn group_mean<T: Indicators>(indicator: &str, items: &[T]) -> Result<f64> {
    let mut sum = 0.0;
    for item in items {
        sum += finite_value(indicator, item)?;
    }
    Ok(sum / items.len() as f64)
}

/// Build normalized radar profiles for each comparison group.
///
/// Each group's mean is rescaled with the indicator's min/max across the full
/// `population`, so profiles stay comparable to the overall distribution.
/// Fails with `EmptyInput` if any group (or the population) is empty, and with
/// `DegenerateIndicator` if an indicator is constant across the population.
pub fn build_radar_table<T: Indicators>(
    indicator_names: &[impl AsRef<str>],
    groups: &[ComparisonGroup<T>],
    population: &[T],
) -> Result<RadarTable> {
    if let Some(group) = groups.iter().find(|group| group.is_empty()) {
        return Err(ZoneError::EmptyInput { group: group.label().to_string() });
    }
    if population.is_empty() {
        return Err(ZoneError::EmptyInput { group: "population".to_string() });
    }

    let mut rows = Vec::with_capacity(indicator_names.len() * groups.len());
    for indicator in indicator_names.iter().map(AsRef::as_ref) {
        let (min, max) = population_range(indicator, population)?;
        let span = max - min;
        if !(span > 0.0) {
            return Err(ZoneError::DegenerateIndicator { indicator: indicator.to_string() });
        }

        for group in groups {
            let raw_value = group_mean(indicator, group.items())?;
            // Groups drawn from outside the population may fall off the scale.
            let normalized_value = ((raw_value - min) / span).clamp(0.0, 1.0);
            rows.push(RadarRow {
                group: group.label().to_string(),
                indicator: indicator.to_string(),
                raw_value,
                normalized_value,
            });
        }
    }

    Ok(RadarTable { rows })
}
