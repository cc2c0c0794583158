// Integration tests for the end-to-end study: selection, coverage, sampling and radar comparison.

mod common;

use approx::assert_relative_eq;
use geo::{polygon, Coord};
use hexzones::hexring::AxialCell;
use hexzones::{
    CancelFlag, District, GridDataset, IndicatorSpec, PointOfInterest, RadarState, StudyConfig, ZoneError, ZoneStudy,
    RANDOM_GROUP, TOP_GROUP,
};

use common::{cell, init_logging, lattice, poi_at};

/// Zones "0,0" and "10,0" are picked; "1,0" touches "0,0" and is excluded.
fn dataset() -> GridDataset {
    let lattice = lattice();
    GridDataset::new(vec![
        cell(&lattice, 0, 0, 0.1, 500.0),
        cell(&lattice, 1, 0, 0.95, 500.0),
        cell(&lattice, 10, 0, 0.2, 500.0),
        cell(&lattice, 20, 0, 0.9, 500.0),
    ]).unwrap()
}

fn pois() -> Vec<PointOfInterest> {
    let lattice = lattice();
    vec![
        poi_at(&lattice, "p1", AxialCell::new(0, 0), (0.0, 0.0), 100.0, 10.0),
        poi_at(&lattice, "p2", AxialCell::new(0, 0), (20.0, 20.0), 300.0, 20.0),
        poi_at(&lattice, "p3", AxialCell::new(10, 0), (0.0, 0.0), 200.0, 30.0),
        poi_at(&lattice, "p4", AxialCell::new(10, 0), (-30.0, 10.0), 50.0, 40.0),
        poi_at(&lattice, "p5", AxialCell::new(20, 0), (0.0, 0.0), 1_000.0, 50.0),
    ]
}

fn config() -> StudyConfig {
    StudyConfig {
        n_candidates: 2,
        radius_m: 100.0,
        threshold: 1.0,
        sample_size: 2,
        top_per_zone: 1,
        poi_ranking: IndicatorSpec::descending("area_m2"),
        radar_indicators: vec!["area_m2".to_string(), "visitors".to_string()],
        seed: Some(7),
        ..StudyConfig::default()
    }
}

fn ids(pois: &[PointOfInterest]) -> Vec<&str> {
    let mut ids = pois.iter().map(PointOfInterest::id).collect::<Vec<_>>();
    ids.sort_unstable();
    ids
}

#[test]
fn full_run_compares_top_and_random_groups() {
    init_logging();
    let (config, lattice) = (config(), lattice());
    let outcome = ZoneStudy::new(&config, &lattice).run(&dataset(), None, &pois()).unwrap();

    let zones = outcome.candidates.iter().map(|z| z.cell().as_str()).collect::<Vec<_>>();
    assert_eq!(zones, vec!["0,0", "10,0"]);
    assert_eq!(outcome.horizon, 1);
    assert_eq!(outcome.coverage.len(), 12);
    assert_eq!(outcome.coverage_cells.iter().map(|c| c.id().as_str()).collect::<Vec<_>>(), vec!["1,0"]);

    assert_eq!(ids(&outcome.top_group), vec!["p2", "p3"]);
    assert_eq!(ids(&outcome.random_group), vec!["p1", "p2", "p3", "p4"]);

    let table = outcome.radar.table().unwrap();
    assert_eq!(table.len(), 4);
    let top_area = table.rows_for(TOP_GROUP).find(|row| row.indicator == "area_m2").unwrap();
    assert_relative_eq!(top_area.raw_value, 250.0);
    assert_relative_eq!(top_area.normalized_value, 200.0 / 950.0);
    let random_area = table.rows_for(RANDOM_GROUP).find(|row| row.indicator == "area_m2").unwrap();
    assert_relative_eq!(random_area.raw_value, 162.5);
    let random_visitors = table.rows_for(RANDOM_GROUP).find(|row| row.indicator == "visitors").unwrap();
    assert_relative_eq!(random_visitors.normalized_value, 0.375);
}

#[test]
fn seeded_runs_repeat() {
    let config = StudyConfig { sample_size: 1, ..config() };
    let lattice = lattice();
    let study = ZoneStudy::new(&config, &lattice);
    let a = study.run(&dataset(), None, &pois()).unwrap();
    let b = study.run(&dataset(), None, &pois()).unwrap();
    assert_eq!(ids(&a.random_group), ids(&b.random_group));
    assert_eq!(a.random_group.len(), 2);
}

#[test]
fn empty_sample_degrades_radar_only() {
    let config = StudyConfig { sample_size: 0, ..config() };
    let lattice = lattice();
    let outcome = ZoneStudy::new(&config, &lattice).run(&dataset(), None, &pois()).unwrap();
    assert_eq!(outcome.candidates.len(), 2);
    assert!(outcome.random_group.is_empty());
    assert!(matches!(outcome.radar, RadarState::NotEnoughData(_)));
    assert!(!outcome.radar.is_ready());
}

#[test]
fn constant_indicator_degrades_radar_only() {
    let lattice = lattice();
    let pois = pois().into_iter()
        .map(|p| PointOfInterest::new(p.id(), p.name(), p.geometry().clone(), [("area_m2", 1.0), ("visitors", 5.0)]))
        .collect::<Vec<_>>();
    let outcome = ZoneStudy::new(&config(), &lattice).run(&dataset(), None, &pois).unwrap();
    assert!(matches!(outcome.radar, RadarState::NotEnoughData(_)));
}

#[test]
fn district_scopes_the_run() {
    let lattice = lattice();
    let boundary = polygon![
        (x: 1_500.0, y: -200.0), (x: 2_000.0, y: -200.0), (x: 2_000.0, y: 200.0), (x: 1_500.0, y: 200.0), (x: 1_500.0, y: -200.0),
    ];
    let district = District::new("Lince", boundary, Coord { x: 1_750.0, y: 0.0 });

    let outcome = ZoneStudy::new(&config(), &lattice).run(&dataset(), Some(&district), &pois()).unwrap();
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].cell().as_str(), "10,0");
    assert!(outcome.coverage_cells.is_empty());
    assert_eq!(ids(&outcome.top_group), vec!["p3"]);
    assert_eq!(ids(&outcome.random_group), vec!["p3", "p4"]);
}

#[test]
fn district_without_cells_is_empty_input() {
    let lattice = lattice();
    let boundary = polygon![
        (x: 50_000.0, y: 0.0), (x: 51_000.0, y: 0.0), (x: 51_000.0, y: 1_000.0), (x: 50_000.0, y: 0.0),
    ];
    let district = District::new("Nowhere", boundary, Coord { x: 50_500.0, y: 300.0 });
    let err = ZoneStudy::new(&config(), &lattice).run(&dataset(), Some(&district), &pois()).unwrap_err();
    assert!(matches!(err, ZoneError::EmptyInput { .. }));
}

#[test]
fn unknown_ranking_indicator_aborts() {
    let config = StudyConfig { primary: IndicatorSpec::ascending("income_pc"), ..config() };
    let lattice = lattice();
    let err = ZoneStudy::new(&config, &lattice).run(&dataset(), None, &pois()).unwrap_err();
    assert!(matches!(err, ZoneError::MissingIndicator { .. }));
}

#[test]
fn cancelled_run_aborts() {
    let (config, lattice) = (config(), lattice());
    let cancel = CancelFlag::new();
    cancel.cancel();
    let err = ZoneStudy::new(&config, &lattice).run_with_cancel(&dataset(), None, &pois(), &cancel).unwrap_err();
    assert_eq!(err, ZoneError::Cancelled { selected: 0 });
}

#[test]
fn non_finite_poi_indicator_aborts() {
    let lattice = lattice();
    let mut pois = pois();
    pois[1] = poi_at(&lattice, "p2", AxialCell::new(0, 0), (20.0, 20.0), f64::NAN, 20.0);
    let err = ZoneStudy::new(&config(), &lattice).run(&dataset(), None, &pois).unwrap_err();
    assert!(matches!(err, ZoneError::NonFiniteIndicator { ref item, .. } if item == "p2"));
}
