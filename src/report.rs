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

//! static HTML report for the selected scenes: the footprint map plus a table of
//! per-scene metadata with thumbnails linking to the full browse images

#![allow(unused)]

use std::{fs, path::{Path,PathBuf}, process::Command};
use tracing::warn;

use crate::Scene;
use crate::errors::{op_failed, Result, SentinelScenesError};

pub const REPORT_FILENAME: &str = "index.html";

pub const TABLE_COLUMNS: [&str; 4] = ["Native-ID", "Acquisition Date", "Size\nMB", "Thumbnail"];

const HTML_FOOTER: &str = "</body>\n</html>\n";

fn html_header (map_filename: &str) -> String {
    format!( r#"<!-- index.html -->

<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Sentinel-1 Scenes</title>
    <style>
        body {{
            background-color: rgb(20, 40, 60);
            color: rgb(240, 248, 255);
            font-family: "Helvetica", "Arial", sans-serif;
            font-size: 1.3em;
        }}

        a {{
            color: rgb(255, 111, 111);
        }}

        th,
        td {{
            border: 1px solid black;
            font-size: .75em;
            padding: 15px;
        }}
        td:nth-child(4) {{
            padding: 0px
        }}
    </style>
</head>

<body>
<h1>Sentinel-1 C-band SAR Scenes for Denoising Experiment</h1>
<p>A listing of C-band SAR image files from Sentinel-1A.  The spatial distribution of
scenes are shown below color coded by month of acquisition.</p>

<img src="{map_filename}" alt="Selected Sentinel-1 Scenes">

<h2>Selected Scenes</h2>
<p>Click on "Thumbnail" to see larger image.</p>
"#)
}

/// the scene table, rows sorted ascending by acquisition date regardless of input order
pub fn build_table (scenes: &[Scene]) -> String {
    let mut rows: Vec<&Scene> = scenes.iter().collect();
    rows.sort_by_key( |s| s.acquisition_date);

    let head = format!( "<thead>\n<tr><th>{}</th></tr>\n</thead>", TABLE_COLUMNS.join("</th><th>"));

    let mut body = String::from( "\n<tbody>\n");
    for scene in rows {
        let thumbnail_cell = format!(
            r#"<img align="center" src="{}" style="max-width: 500px; max-height: 375px;" >"#,
            scene.thumbnail_url);
        let thumbnail_link = format!(
            r#"<a href={} target="_blank" rel="noopener noreferrer">{}</a>"#,
            scene.browse_url, thumbnail_cell);

        body.push_str( &format!(
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>\n",
            scene.native_id, scene.acquisition_date.to_rfc3339(), scene.size_mb, thumbnail_link));
    }
    body.push_str( "</tbody>\n");

    format!( "<table>\n{head}{body}</table>")
}

/// the full HTML document. Fails if there are no scenes to report - we never produce an
/// empty page
pub fn build_report (scenes: &[Scene], map_filename: &str) -> Result<String> {
    if scenes.is_empty() {
        return Err( op_failed!("no scenes to report"))
    }
    Ok( format!( "{}{}{}", html_header(map_filename), build_table(scenes), HTML_FOOTER))
}

/// write the report to `dir`, overwriting any previous one, and return its path.
/// Write failures are fatal
pub fn write_report (scenes: &[Scene], dir: impl AsRef<Path>, map_filename: &str) -> Result<PathBuf> {
    let html = build_report( scenes, map_filename)?;
    let path = dir.as_ref().join( REPORT_FILENAME);
    fs::write( &path, html)?;
    Ok(path)
}

/// open the report in the default browser via its file:// URL. Best effort - a missing or
/// failing opener is logged and ignored, the run still counts as successful
pub fn open_in_browser (path: &Path) {
    let abs = path.canonicalize().unwrap_or_else( |_| path.to_path_buf());
    let url = format!("file://{}", abs.display());

    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg( &url).spawn();

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args( ["/C", "start", &url]).spawn();

    #[cfg(all(unix, not(target_os = "macos")))]
    let result = Command::new("xdg-open").arg( &url).spawn();

    if let Err(e) = result {
        warn!("could not open {url} in a browser: {e}");
    }
}
