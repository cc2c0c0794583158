use std::collections::BTreeMap;

use crate::error::Result;
use crate::indicator::{IndicatorSpec, Indicators};

/// The `k` best items of each group under `spec`, groups in key order.
///
/// Ties keep input order. Items missing the indicator reject the call.
pub fn top_per_group<T, K>(items: &[T], group_key: impl Fn(&T) -> K, k: usize, spec: &IndicatorSpec) -> Result<Vec<T>>
where
    T: Indicators + Clone,
    K: Ord,
{
    let mut groups: BTreeMap<K, Vec<(f64, &T)>> = BTreeMap::new();
    for item in items {
        let value = item.require(spec.name())?;
        groups.entry(group_key(item)).or_default().push((value, item));
    }

    let mut top = Vec::new();
    for members in groups.values_mut() {
        // Stable sort keeps input order among equal values.
        members.sort_by(|a, b| spec.compare(a.0, b.0));
        top.extend(members.iter().take(k).map(|&(_, item)| item.clone()));
    }
    Ok(top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZoneError;

    #[derive(Clone, Debug, PartialEq)]
    struct Park {
        name: &'static str,
        zone: u8,
        area: Option<f64>,
    }

    impl Indicators for Park {
        fn label(&self) -> &str { self.name }

        fn indicator(&self, name: &str) -> Option<f64> {
            if name == "area_m2" { self.area } else { None }
        }
    }

    fn park(name: &'static str, zone: u8, area: f64) -> Park {
        Park { name, zone, area: Some(area) }
    }

    fn names(parks: &[Park]) -> Vec<&str> {
        parks.iter().map(|p| p.name).collect()
    }

    #[test]
    fn picks_best_per_zone() {
        let parks = vec![park("a", 2, 10.0), park("b", 1, 50.0), park("c", 1, 70.0), park("d", 2, 30.0), park("e", 1, 5.0)];
        let top = top_per_group(&parks, |p| p.zone, 2, &IndicatorSpec::descending("area_m2")).unwrap();
        assert_eq!(names(&top), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let parks = vec![park("x", 0, 1.0), park("y", 0, 1.0), park("z", 0, 1.0)];
        let top = top_per_group(&parks, |p| p.zone, 2, &IndicatorSpec::ascending("area_m2")).unwrap();
        assert_eq!(names(&top), vec!["x", "y"]);
    }

    #[test]
    fn missing_indicator_rejects() {
        let parks = vec![park("a", 0, 1.0), Park { name: "b", zone: 0, area: None }];
        let err = top_per_group(&parks, |p| p.zone, 1, &IndicatorSpec::ascending("area_m2")).unwrap_err();
        assert_eq!(err, ZoneError::MissingIndicator { item: "b".to_string(), indicator: "area_m2".to_string() });
    }
}
