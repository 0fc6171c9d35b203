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
#![allow(unused)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentinel_scenes::{load_config, SceneSelectConfig};
use sentinel_scenes::cmr::CmrClient;
use sentinel_scenes::map::{render_map, MAP_FILENAME};
use sentinel_scenes::report::{open_in_browser, write_report};
use sentinel_scenes::sample::stratified_sample;

/// select a stratified monthly sample of Sentinel-1 scenes and report them as a static HTML page
#[derive(Parser)]
struct Args {
    /// RON config with catalog endpoints, search filters and credentials
    #[arg(long)]
    config: Option<PathBuf>,

    /// number of scenes to sample (overrides the config)
    #[arg(short)]
    n: Option<usize>,

    /// RNG seed for a reproducible sample
    #[arg(long)]
    seed: Option<u64>,

    /// directory the map image and HTML report are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// do not open the report in a browser
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config( path)?,
        None => SceneSelectConfig::default()
    };
    if let Some(n) = args.n { config.n_samples = n }
    let n_samples = config.n_samples;

    let mut client = CmrClient::new( config);
    info!("searching granule catalog..");
    let scenes = client.search_granules().await?;

    let seed = args.seed.unwrap_or_else( rand::random);
    info!("drawing {n_samples} of {} scenes stratified by month (seed {seed})", scenes.len());
    let mut rng = StdRng::seed_from_u64( seed);
    let sample = stratified_sample( &scenes, n_samples, &mut rng)?;

    let map_path = args.output_dir.join( MAP_FILENAME);
    let skipped = render_map( &sample, &map_path)?;
    if skipped > 0 {
        info!("skipped {skipped} scenes with bad footprints on the map");
    }
    info!("wrote {}", map_path.display());

    let report_path = write_report( &sample, &args.output_dir, MAP_FILENAME)?;
    info!("wrote {}", report_path.display());

    if !args.no_browser {
        open_in_browser( &report_path);
    }

    Ok(())
}
