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

//! granule metadata search against NASA's Common Metadata Repository (CMR).
//! This authenticates against Earthdata Login, pages through the matching granules of
//! a collection and parses each UMM-JSON item into a typed [`Scene`] record

#![allow(unused)]

use std::{env, fs, path::PathBuf, sync::LazyLock};
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{footprint_from_lon_lat, EarthdataCredentials, Scene, SceneSelectConfig};
use crate::errors::{auth_error, search_error, Result, SentinelScenesError};

/// response/request header used by CMR to page through large result sets
pub const SEARCH_AFTER_HEADER: &str = "CMR-Search-After";

/// regex to extract the Earthdata Login entry from a ~/.netrc, e.g.
/// `machine urs.earthdata.nasa.gov login jdoe password secret`
static NETRC_RE: LazyLock<Regex> = LazyLock::new(||
    Regex::new( r"machine\s+urs\.earthdata\.nasa\.gov(?:\s*\n)?\s+login\s+(\S+)(?:\s*\n)?\s+password\s+(\S+)").unwrap()
);

/// one element of the Earthdata Login token list/creation responses. We only need the
/// token value itself, the expiration is handled by re-running the tool
#[derive(Deserialize,Debug)]
struct TokenEntry {
    access_token: String,
}

/// one page of a `granules.umm_json` response
#[derive(Deserialize,Debug)]
pub struct GranulePage {
    pub hits: usize,
    pub items: Vec<GranuleItem>,
}

/// a single granule result. The UMM record is kept as a generic JSON value since we
/// only consume a handful of its (deeply nested) fields - see [`parse_granule`]
#[derive(Deserialize,Debug)]
pub struct GranuleItem {
    pub meta: Value,
    pub umm: Value,
}

/// the CMR search client. One instance per run - the bearer token is obtained on the
/// first query and kept for the process lifetime
pub struct CmrClient {
    config: SceneSelectConfig,
    client: Client,
    token: Option<String>,
}

impl CmrClient {
    pub fn new (config: SceneSelectConfig) -> Self {
        CmrClient { config, client: Client::new(), token: None }
    }

    /// resolve Earthdata credentials and obtain a bearer token. Resolution order is the
    /// `EARTHDATA_TOKEN` environment variable, explicit config credentials, ~/.netrc.
    /// If none of these produce a token this is a fatal AuthError - no query is issued
    pub async fn authenticate (&mut self) -> Result<()> {
        if self.token.is_some() { return Ok(()) }

        if let Ok(token) = env::var("EARTHDATA_TOKEN") {
            self.token = Some(token);
            return Ok(())
        }

        let credentials = match &self.config.credentials {
            Some(credentials) => credentials.clone(),
            None => read_netrc_credentials()?
        };

        let token = self.fetch_token( &credentials).await?;
        self.token = Some(token);
        Ok(())
    }

    /// get an existing Earthdata Login bearer token, or create one if the account has none
    async fn fetch_token (&self, credentials: &EarthdataCredentials) -> Result<String> {
        let url = format!("{}/api/users/tokens", self.config.token_url);
        let response = self.client
            .get( &url)
            .basic_auth( &credentials.username, Some( &credentials.password))
            .send()
            .await.map_err( |e| auth_error!("Earthdata Login request failed: {e}"))?;

        if !response.status().is_success() {
            return Err( auth_error!("Earthdata Login rejected credentials: {}", response.status()))
        }

        let tokens: Vec<TokenEntry> = response.json()
            .await.map_err( |e| auth_error!("invalid Earthdata Login token response: {e}"))?;
        if let Some(entry) = tokens.into_iter().next() {
            return Ok( entry.access_token)
        }

        let url = format!("{}/api/users/token", self.config.token_url);
        let response = self.client
            .post( &url)
            .basic_auth( &credentials.username, Some( &credentials.password))
            .send()
            .await.map_err( |e| auth_error!("Earthdata Login token creation failed: {e}"))?;

        if !response.status().is_success() {
            return Err( auth_error!("Earthdata Login token creation rejected: {}", response.status()))
        }

        let entry: TokenEntry = response.json()
            .await.map_err( |e| auth_error!("invalid Earthdata Login token response: {e}"))?;
        Ok( entry.access_token)
    }

    /// return the full list of granules matching the configured filters, in catalog order.
    /// This follows the CMR-Search-After header until the result set is exhausted. Any
    /// upstream failure (auth, network, service error, zero results) is fatal - one
    /// attempt per page, no retry
    pub async fn search_granules (&mut self) -> Result<Vec<Scene>> {
        self.config.validate()?;
        self.authenticate().await?;

        let token = self.token.as_ref().ok_or( auth_error!("no Earthdata token"))?.clone();
        let url = format!("{}/search/granules.umm_json", self.config.search_url);
        let query = build_query( &self.config);

        let mut scenes: Vec<Scene> = Vec::new();
        let mut search_after: Option<String> = None;

        loop {
            let mut request = self.client.get( &url).query( &query).bearer_auth( &token);
            if let Some(sa) = &search_after {
                request = request.header( SEARCH_AFTER_HEADER, sa);
            }

            let response = request.send()
                .await.map_err( |e| search_error!("granule query failed: {e}"))?;
            if !response.status().is_success() {
                return Err( search_error!("granule query returned {}", response.status()))
            }

            search_after = response.headers().get( SEARCH_AFTER_HEADER)
                .and_then( |v| v.to_str().ok())
                .map( |v| v.to_string());

            let page: GranulePage = response.json()
                .await.map_err( |e| search_error!("invalid granule response: {e}"))?;
            debug!("got page with {} of {} granules", page.items.len(), page.hits);

            let n_items = page.items.len();
            for item in &page.items {
                scenes.push( parse_granule( item)?);
            }

            if n_items < self.config.page_size || search_after.is_none() { break }
        }

        if scenes.is_empty() {
            return Err( search_error!("no granules matching filters for collection {}", self.config.concept_id))
        }

        info!("retrieved {} matching granules", scenes.len());
        Ok(scenes)
    }
}

/// the fixed granule search parameters: collection, inclusive temporal range, closed
/// search polygon and platform
fn build_query (config: &SceneSelectConfig) -> Vec<(String,String)> {
    let temporal = format!("{}T00:00:00Z,{}T23:59:59Z", config.start_date, config.end_date);
    let polygon = config.region.iter()
        .map( |(lon,lat)| format!("{lon},{lat}"))
        .collect::<Vec<String>>()
        .join(",");

    vec![
        ("concept_id".to_string(), config.concept_id.clone()),
        ("temporal".to_string(), temporal),
        ("polygon".to_string(), polygon),
        ("platform[]".to_string(), config.platform.clone()),
        ("page_size".to_string(), config.page_size.to_string()),
    ]
}

/* #region UMM-JSON parsing ***************************************************************************/

/// parse a UMM-JSON granule item into a Scene, failing fast with the offending granule
/// and field if anything we consume is missing
pub fn parse_granule (item: &GranuleItem) -> Result<Scene> {
    let native_id = item.meta.get("native-id")
        .and_then( Value::as_str)
        .ok_or( search_error!("granule without meta.native-id"))?
        .to_string();

    let acquisition_date = granule_end_date( &native_id, &item.umm)?;
    let size_mb = granule_size_mb( &native_id, &item.umm)?;
    let footprint = granule_footprint( &native_id, &item.umm)?;
    let thumbnail_url = granule_thumbnail( &native_id, &item.umm)?;
    let browse_url = granule_browse_url( &native_id, &item.umm)?;

    Ok( Scene { native_id, acquisition_date, size_mb, footprint, thumbnail_url, browse_url })
}

/// descend into nested JSON objects/arrays (array steps are decimal strings)
fn json_path<'a> (v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut v = v;
    for step in path {
        v = match step.parse::<usize>() {
            Ok(idx) => v.get(idx)?,
            Err(_) => v.get(step)?
        };
    }
    Some(v)
}

fn missing_field (native_id: &str, path: &[&str]) -> SentinelScenesError {
    search_error!("granule {} missing field {}", native_id, path.join("."))
}

/// acquisition timestamp. Note this is the *end* of the acquisition range, which is what
/// the sampler stratifies on
fn granule_end_date (native_id: &str, umm: &Value) -> Result<DateTime<Utc>> {
    let path = ["TemporalExtent","RangeDateTime","EndingDateTime"];
    let ds = json_path( umm, &path)
        .and_then( Value::as_str)
        .ok_or_else( || missing_field( native_id, &path))?;

    DateTime::parse_from_rfc3339( ds)
        .map( |dt| dt.with_timezone( &Utc))
        .map_err( |e| search_error!("granule {} has invalid acquisition date {:?}: {e}", native_id, ds))
}

fn granule_size_mb (native_id: &str, umm: &Value) -> Result<f64> {
    let path = ["DataGranule","ArchiveAndDistributionInformation","0","Size"];
    json_path( umm, &path)
        .and_then( Value::as_f64)
        .ok_or_else( || missing_field( native_id, &path))
}

fn granule_footprint (native_id: &str, umm: &Value) -> Result<geo::Polygon<f64>> {
    let path = ["SpatialExtent","HorizontalSpatialDomain","Geometry","GPolygons","0","Boundary","Points"];
    let points = json_path( umm, &path)
        .and_then( Value::as_array)
        .ok_or_else( || missing_field( native_id, &path))?;

    let mut vertices: Vec<(f64,f64)> = Vec::with_capacity( points.len());
    for p in points {
        let lon = p.get("Longitude").and_then( Value::as_f64);
        let lat = p.get("Latitude").and_then( Value::as_f64);
        match (lon, lat) {
            (Some(lon), Some(lat)) => vertices.push( (lon, lat)),
            _ => return Err( search_error!("granule {} has malformed boundary point {}", native_id, p))
        }
    }
    if vertices.len() < 4 {
        return Err( search_error!("granule {} boundary has only {} points", native_id, vertices.len()))
    }

    Ok( footprint_from_lon_lat( &vertices))
}

fn granule_thumbnail (native_id: &str, umm: &Value) -> Result<String> {
    let attrs = umm.get("AdditionalAttributes")
        .and_then( Value::as_array)
        .ok_or( search_error!("granule {} missing field AdditionalAttributes", native_id))?;

    for attr in attrs {
        if attr.get("Name").and_then( Value::as_str) == Some("THUMBNAIL_URL") {
            if let Some(url) = json_path( attr, &["Values","0"]).and_then( Value::as_str) {
                return Ok( url.to_string())
            }
        }
    }
    Err( search_error!("granule {} has no THUMBNAIL_URL attribute", native_id))
}

fn granule_browse_url (native_id: &str, umm: &Value) -> Result<String> {
    let urls = umm.get("RelatedUrls")
        .and_then( Value::as_array)
        .ok_or( search_error!("granule {} missing field RelatedUrls", native_id))?;

    for related in urls {
        if related.get("Type").and_then( Value::as_str) == Some("GET RELATED VISUALIZATION") {
            if let Some(url) = related.get("URL").and_then( Value::as_str) {
                return Ok( url.to_string())
            }
        }
    }
    Err( search_error!("granule {} has no visualization URL", native_id))
}

/* #endregion UMM-JSON parsing */

/// read Earthdata Login credentials from ~/.netrc
fn read_netrc_credentials () -> Result<EarthdataCredentials> {
    let no_credentials = || auth_error!(
        "no Earthdata credentials (set EARTHDATA_TOKEN, add credentials to the config, or add a urs.earthdata.nasa.gov entry to ~/.netrc)");

    let home = env::var("HOME").map_err( |_| no_credentials())?;
    let text = fs::read_to_string( PathBuf::from(home).join(".netrc")).map_err( |_| no_credentials())?;

    parse_netrc_credentials( &text).ok_or_else( no_credentials)
}

/// extract the urs.earthdata.nasa.gov login/password pair from netrc contents
pub fn parse_netrc_credentials (text: &str) -> Option<EarthdataCredentials> {
    NETRC_RE.captures( text).map( |cap| EarthdataCredentials {
        username: cap[1].to_string(),
        password: cap[2].to_string(),
    })
}
