use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// Which end of an indicator's range is preferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smaller values rank first.
    Ascending,
    /// Larger values rank first.
    Descending,
}

/// An indicator name paired with its preferred sort direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    name: String,
    direction: SortDirection,
}

impl IndicatorSpec {
    pub fn new(name: impl Into<String>, direction: SortDirection) -> Self {
        Self { name: name.into(), direction }
    }

    pub fn ascending(name: impl Into<String>) -> Self { Self::new(name, SortDirection::Ascending) }

    pub fn descending(name: impl Into<String>) -> Self { Self::new(name, SortDirection::Descending) }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn direction(&self) -> SortDirection { self.direction }

    /// Sort key for `value`: smaller keys rank first regardless of direction.
    #[inline]
    pub fn key(&self, value: f64) -> f64 {
        match self.direction {
            SortDirection::Ascending => value,
            SortDirection::Descending => -value,
        }
    }

    /// Compare two values so that the preferred one orders first.
    #[inline]
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        self.key(a).total_cmp(&self.key(b))
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{} ({})", self.name, arrow)
    }
}
