#![allow(unused)]

/// unit tests for the month-stratified sampler
/// run with "cargo test --test test_sample -- --nocapture"

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};

use sentinel_scenes::{footprint_from_lon_lat, Scene};
use sentinel_scenes::errors::SentinelScenesError;
use sentinel_scenes::sample::{month_allotments, stratified_sample};

fn test_scene (id: &str, month: u32, day: u32) -> Scene {
    Scene {
        native_id: id.to_string(),
        acquisition_date: Utc.with_ymd_and_hms( 2021, month, day, 4, 13, 38).unwrap(),
        size_mb: 214.16,
        footprint: footprint_from_lon_lat( &[(-10.0,60.0),(-8.0,60.0),(-8.0,62.0),(-10.0,62.0),(-10.0,60.0)]),
        thumbnail_url: "https://example.org/thumb.jpg".to_string(),
        browse_url: "https://example.org/browse.jpg".to_string(),
    }
}

/// scenes with the given per-month population sizes
fn scenes_with_populations (pops: &[(u32,usize)]) -> Vec<Scene> {
    let mut scenes: Vec<Scene> = Vec::new();
    for (month,n) in pops {
        for i in 0..*n {
            scenes.push( test_scene( &format!("S1A_{month:02}_{i:03}"), *month, 1 + (i as u32 % 27)));
        }
    }
    scenes
}

fn month_count (sample: &[Scene], month: u32) -> usize {
    sample.iter().filter( |s| s.month() == month).count()
}

#[test]
fn test_allotments_sum_to_n () {
    for (n, m) in [(60,12), (7,3), (6,3), (12,12), (1,1), (100,7)] {
        let allotments = month_allotments( n, m);
        println!("n={n} months={m} -> {allotments:?}");
        assert_eq!( allotments.len(), m);
        assert_eq!( allotments.iter().sum::<usize>(), n);
    }
}

#[test]
fn test_remainder_goes_to_first_months () {
    assert_eq!( month_allotments( 7, 3), vec![3,2,2]);
    assert_eq!( month_allotments( 14, 12), vec![2,2,1,1,1,1,1,1,1,1,1,1]);
}

#[test]
fn test_one_scene_per_month () {
    let scenes = scenes_with_populations( &(1..=12).map(|m| (m,1)).collect::<Vec<_>>());
    let mut rng = StdRng::seed_from_u64(42);

    let sample = stratified_sample( &scenes, 12, &mut rng).unwrap();
    assert_eq!( sample.len(), 12);
    for month in 1..=12 {
        assert_eq!( month_count( &sample, month), 1);
    }
}

#[test]
fn test_proportional_draw () {
    let scenes = scenes_with_populations( &[(1,5),(2,3),(3,2)]);
    let mut rng = StdRng::seed_from_u64(42);

    let sample = stratified_sample( &scenes, 6, &mut rng).unwrap();
    assert_eq!( sample.len(), 6);
    assert_eq!( month_count( &sample, 1), 2);
    assert_eq!( month_count( &sample, 2), 2);
    assert_eq!( month_count( &sample, 3), 2);
}

#[test]
fn test_insufficient_population () {
    // remainder lands on the earliest month, which only has 2 scenes
    let scenes = scenes_with_populations( &[(1,2),(2,3),(3,5)]);
    let mut rng = StdRng::seed_from_u64(42);

    match stratified_sample( &scenes, 7, &mut rng) {
        Err(SentinelScenesError::InsufficientPopulation{month,want,have}) => {
            println!("got expected error: month={month} want={want} have={have}");
            assert_eq!( month, 1);
            assert_eq!( want, 3);
            assert_eq!( have, 2);
        }
        other => panic!("expected InsufficientPopulation, got {other:?}")
    }

    // same populations the other way around - now the extra draw falls on the month with 5
    let scenes = scenes_with_populations( &[(1,5),(2,3),(3,2)]);
    let sample = stratified_sample( &scenes, 7, &mut rng).unwrap();
    assert_eq!( sample.len(), 7);
    assert_eq!( month_count( &sample, 1), 3);
    assert_eq!( month_count( &sample, 3), 2);
}

#[test]
fn test_sample_is_subset_without_duplicates () {
    let scenes = scenes_with_populations( &[(1,20),(4,15),(7,9),(11,30)]);
    let input_ids: HashSet<&str> = scenes.iter().map( |s| s.native_id.as_str()).collect();
    let mut rng = StdRng::seed_from_u64(4711);

    let sample = stratified_sample( &scenes, 16, &mut rng).unwrap();
    assert_eq!( sample.len(), 16);

    let mut seen: HashSet<&str> = HashSet::new();
    for s in &sample {
        assert!( input_ids.contains( s.native_id.as_str()), "sampled scene not in input: {}", s.native_id);
        assert!( seen.insert( s.native_id.as_str()), "duplicate scene in sample: {}", s.native_id);
    }
}

#[test]
fn test_seeded_reproducibility () {
    let scenes = scenes_with_populations( &[(2,10),(5,10),(9,10)]);

    let ids = |seed: u64| -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        stratified_sample( &scenes, 9, &mut rng).unwrap().iter().map( |s| s.native_id.clone()).collect()
    };

    assert_eq!( ids(7), ids(7));
}

#[test]
fn test_degenerate_inputs () {
    let mut rng = StdRng::seed_from_u64(42);

    assert!( stratified_sample( &[], 10, &mut rng).is_err());

    let scenes = scenes_with_populations( &[(1,3)]);
    assert!( stratified_sample( &scenes, 0, &mut rng).is_err());
}
