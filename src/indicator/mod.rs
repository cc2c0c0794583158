mod radar;
mod spec;

pub use radar::{build_radar_table, ComparisonGroup, RadarRow, RadarTable};
pub use spec::{IndicatorSpec, SortDirection};

use crate::error::{Result, ZoneError};

/// Anything that carries named numeric indicators (grid cells, points of interest).
pub trait Indicators {
    /// Human-readable identifier used in error messages.
    fn label(&self) -> &str;

    /// Value of indicator `name`, if present.
    fn indicator(&self, name: &str) -> Option<f64>;

    /// Value of indicator `name`, failing with `MissingIndicator` when absent.
    fn require(&self, name: &str) -> Result<f64> {
        self.indicator(name).ok_or_else(|| ZoneError::MissingIndicator {
            item: self.label().to_string(),
            indicator: name.to_string(),
        })
    }
}

impl<T: Indicators + ?Sized> Indicators for &T {
    #[inline] fn label(&self) -> &str { (**self).label() }

    #[inline] fn indicator(&self, name: &str) -> Option<f64> { (**self).indicator(name) }
}
