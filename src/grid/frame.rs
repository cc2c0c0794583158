use anyhow::{anyhow, Context, Result};
use geo::MultiPolygon;
use polars::prelude::{DataFrame, DataType};

use crate::grid::{GridCell, GridDataset};

impl GridDataset {
    /// Build a dataset from a table of indicator columns plus a geometry lookup.
    ///
    /// `id_column` holds the hex-cell ids; each of `indicator_columns` must be
    /// numeric and non-null. `geometry_of` returns the planar geometry of an id.
    pub fn from_dataframe(
        df: &DataFrame,
        id_column: &str,
        indicator_columns: &[&str],
        geometry_of: impl Fn(&str) -> Option<MultiPolygon<f64>>,
    ) -> Result<Self> {
        let ids = df.column(id_column)
            .with_context(|| format!("Missing id column '{id_column}'"))?
            .as_materialized_series()
            .cast(&DataType::String)?;
        let ids = ids.str()?;

        let mut columns = Vec::with_capacity(indicator_columns.len());
        for &name in indicator_columns {
            let series = df.column(name)
                .with_context(|| format!("Missing indicator column '{name}'"))?
                .as_materialized_series()
                .cast(&DataType::Float64)
                .with_context(|| format!("Indicator column '{name}' is not numeric"))?;
            columns.push((name, series));
        }

        let mut cells = Vec::with_capacity(df.height());
        for (row, id) in ids.into_iter().enumerate() {
            let id = id.ok_or_else(|| anyhow!("Null cell id at row {row}"))?;
            let geometry = geometry_of(id).ok_or_else(|| anyhow!("No geometry for cell '{id}'"))?;

            let mut indicators = Vec::with_capacity(columns.len());
            for (name, series) in &columns {
                let value = series.f64()?
                    .get(row)
                    .ok_or_else(|| anyhow!("Null value for '{name}' in cell '{id}'"))?;
                indicators.push((*name, value));
            }
            cells.push(GridCell::new(id, geometry, indicators));
        }

        GridDataset::new(cells).context("Invalid grid dataset")
    }
}
