use serde::{Deserialize, Serialize};

use crate::indicator::SortDirection;

/// When a candidate's primary value is still on the acceptable side of the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdRule {
    /// `value < threshold`
    #[default]
    Below,
    /// `value <= threshold`
    AtMost,
    /// `value > threshold`
    Above,
    /// `value >= threshold`
    AtLeast,
}

impl ThresholdRule {
    /// Strict rule matching a ranking direction: ascending searches stop once
    /// values reach the threshold, descending searches once they drop to it.
    pub fn for_direction(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Self::Below,
            SortDirection::Descending => Self::Above,
        }
    }

    #[inline]
    pub fn accepts(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Below => value < threshold,
            Self::AtMost => value <= threshold,
            Self::Above => value > threshold,
            Self::AtLeast => value >= threshold,
        }
    }
}
