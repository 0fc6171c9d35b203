/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “sentinel_scenes” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! stratified sampling of scenes by acquisition month.
//!
//! Months are enumerated in ascending order so allotments, draw order and the resulting
//! sample are deterministic for a fixed RNG seed

#![allow(unused)]

use std::collections::BTreeMap;
use rand::Rng;
use rand::seq::index;

use crate::Scene;
use crate::errors::{op_failed, Result, SentinelScenesError};

/// per-month sample sizes for a total of `n` over `n_months` strata: `n div n_months` each,
/// with the remainder going to the first months in ascending month order
pub fn month_allotments (n: usize, n_months: usize) -> Vec<usize> {
    let base = n / n_months;
    let remainder = n % n_months;
    (0..n_months).map( |i| if i < remainder { base + 1 } else { base }).collect()
}

/// draw a stratified sample of `n` scenes: partition by acquisition month, allot
/// proportionally (see [`month_allotments`]) and draw without replacement from each
/// month's partition.
///
/// Fails with [`SentinelScenesError::InsufficientPopulation`] if any month's allotment
/// exceeds its population - allotments are checked for all months before the first draw,
/// so no partial sample is ever produced. The sample is never clamped.
///
/// The output is ordered by month, not chronologically (the report sorts by date anyway).
/// Reproducibility is up to the caller via the provided RNG
pub fn stratified_sample<R: Rng + ?Sized> (scenes: &[Scene], n: usize, rng: &mut R) -> Result<Vec<Scene>> {
    if scenes.is_empty() {
        return Err( op_failed!("no scenes to sample from"))
    }
    if n == 0 {
        return Err( op_failed!("sample size must be positive"))
    }

    // partition scene indices by month - BTreeMap keys give us the sorted distinct months
    let mut partitions: BTreeMap<u32,Vec<usize>> = BTreeMap::new();
    for (i,scene) in scenes.iter().enumerate() {
        partitions.entry( scene.month()).or_default().push(i);
    }

    let allotments = month_allotments( n, partitions.len());

    for ((month, population), want) in partitions.iter().zip( &allotments) {
        if *want > population.len() {
            return Err( SentinelScenesError::InsufficientPopulation {
                month: *month, want: *want, have: population.len()
            })
        }
    }

    let mut sample: Vec<Scene> = Vec::with_capacity(n);
    for ((_month, population), want) in partitions.iter().zip( &allotments) {
        for i in index::sample( rng, population.len(), *want) {
            sample.push( scenes[population[i]].clone());
        }
    }

    Ok(sample)
}
