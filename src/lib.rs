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

#![doc = include_str!("../doc/sentinel_scenes.md")]

use std::{fmt, fs, path::Path};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

pub mod errors;
use errors::{config_error, Result, SentinelScenesError};

pub mod cmr;
pub mod sample;
pub mod map;
pub mod report;

/* #region scene records ******************************************************************************/

/// one Sentinel-1 granule metadata record as consumed by the sampler, map and report stages.
/// This is parsed from CMR UMM-JSON right after the catalog query (see [`cmr::parse_granule`]) so
/// that missing catalog fields surface there and not deep inside rendering or report code
#[derive(Debug,Clone)]
pub struct Scene {
    pub native_id: String,
    pub acquisition_date: DateTime<Utc>,  // end of the acquisition range
    pub size_mb: f64,
    pub footprint: Polygon<f64>,          // closed lon/lat ring on the WGS84 surface
    pub thumbnail_url: String,
    pub browse_url: String,
}

impl Scene {
    /// acquisition month (1-12), the stratification key of [`sample::stratified_sample`]
    pub fn month (&self)->u32 {
        self.acquisition_date.month()
    }
}

impl fmt::Display for Scene {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.native_id, self.acquisition_date.to_rfc3339())
    }
}

/// build a footprint polygon from (lon,lat) vertices as reported by the catalog
pub fn footprint_from_lon_lat (vertices: &[(f64,f64)]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = vertices.iter().map( |(lon,lat)| Coord{ x: *lon, y: *lat }).collect();
    Polygon::new( LineString::from(coords), Vec::new())
}

pub const MONTH_ABBR: [&str; 12] = ["Jan","Feb","Mar","Apr","May","Jun","Jul","Aug","Sep","Oct","Nov","Dec"];

/// three letter abbreviation for a 1-based month, None if outside 1..=12
pub fn month_abbr (month: u32) -> Option<&'static str> {
    if (1..=12).contains( &month) { Some( MONTH_ABBR[(month-1) as usize]) } else { None }
}

/* #endregion scene records */

/* #region config *************************************************************************************/

/// Earthdata Login credentials, either set in the config or picked up from ~/.netrc
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct EarthdataCredentials {
    pub username: String,
    pub password: String,
}

/// run configuration: catalog endpoints, search filters and sample size.
/// Deserialized from a RON file, with the defaults reproducing the Arctic
/// EW GRD medium resolution run used for the denoising pilot
#[derive(Serialize,Deserialize,Debug,Clone)]
#[serde(default)]
pub struct SceneSelectConfig {
    pub search_url: String,                            // CMR base URL
    pub token_url: String,                             // Earthdata Login base URL
    pub credentials: Option<EarthdataCredentials>,

    pub concept_id: String,                            // collection identifier
    pub start_date: String,                            // inclusive, "YYYY-MM-DD"
    pub end_date: String,
    pub region: Vec<(f64,f64)>,                        // closed (lon,lat) ring
    pub platform: String,

    pub n_samples: usize,
    pub page_size: usize,                              // granules per CMR result page
}

impl Default for SceneSelectConfig {
    fn default() -> Self {
        SceneSelectConfig {
            search_url: "https://cmr.earthdata.nasa.gov".to_string(),
            token_url: "https://urs.earthdata.nasa.gov".to_string(),
            credentials: None,

            concept_id: "C1214471521-ASF".to_string(), // SENTINEL-1A_DUAL_POL_GRD_MEDIUM_RES
            start_date: "2021-01-01".to_string(),
            end_date: "2021-12-31".to_string(),
            region: vec![
                (-79.7548, 54.5223),
                (-8.8315, 53.9323),
                (62.6918, 67.2121),
                (-153.5766, 68.2373),
                (-79.7548, 54.5223),
            ],
            platform: "SENTINEL-1A".to_string(),

            n_samples: 60,
            page_size: 2000,
        }
    }
}

impl SceneSelectConfig {
    /// check the search preconditions before anything goes over the wire
    pub fn validate (&self) -> Result<()> {
        if self.region.len() < 4 {
            return Err( config_error!("search region must have at least 4 vertices, got {}", self.region.len()))
        }
        if self.region.first() != self.region.last() {
            return Err( config_error!("search region ring is not closed"))
        }
        let start = parse_date( &self.start_date)?;
        let end = parse_date( &self.end_date)?;
        if start > end {
            return Err( config_error!("start date {} after end date {}", self.start_date, self.end_date))
        }
        if self.n_samples == 0 {
            return Err( config_error!("sample size must be positive"))
        }
        if self.page_size == 0 || self.page_size > 2000 {
            return Err( config_error!("page size {} outside 1..=2000", self.page_size))
        }
        Ok(())
    }
}

pub fn parse_date (ds: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str( ds, "%Y-%m-%d").map_err( |e| config_error!("invalid date {:?}: {e}", ds))
}

/// load a SceneSelectConfig from a RON file
pub fn load_config (path: impl AsRef<Path>) -> Result<SceneSelectConfig> {
    let data = fs::read( path.as_ref())?;
    ron::de::from_bytes( data.as_slice()).map_err( |e| config_error!("failed to read config {}: {e}", path.as_ref().display()))
}

/* #endregion config */
