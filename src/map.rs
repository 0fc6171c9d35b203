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

//! north polar stereographic scene footprint map.
//!
//! Footprints are projected from geographic coordinates onto the polar plane and drawn
//! filled+outlined with a fixed per-month palette. Scenes whose footprints are degenerate
//! or self intersecting are skipped with a warning - the render continues

#![allow(unused)]

use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::path::Path;

use geo::Validation;
use plotters::prelude::*;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::{cartesian::Cartesian2d, types::RangedCoordf64};
use tracing::warn;

use crate::{month_abbr, Scene};
use crate::errors::{geometry_error, render_error, Result, SentinelScenesError};

pub const MAP_FILENAME: &str = "selected_scenes.png";

/// southern extent of the map in degrees latitude
const MIN_LATITUDE: f64 = 50.0;

const IMAGE_SIZE: u32 = 900;

// fill/outline pairs indexed by month-1, mirroring the light/dark pairing of the pilot study plots
const FACE_COLORS: [RGBColor; 12] = [
    RGBColor(240,128,128), RGBColor(255,160,122), RGBColor(255,218,185), RGBColor(255,228,196),
    RGBColor(255,248,220), RGBColor(173,255, 47), RGBColor(  0,255,  0), RGBColor(224,255,255),
    RGBColor(135,206,250), RGBColor(230,230,250), RGBColor(216,191,216), RGBColor(255,192,203),
];
const EDGE_COLORS: [RGBColor; 12] = [
    RGBColor(139,  0,  0), RGBColor(255, 69,  0), RGBColor(139, 69, 19), RGBColor(255,140,  0),
    RGBColor(255,215,  0), RGBColor(107,142, 35), RGBColor( 46,139, 87), RGBColor(  0,255,255),
    RGBColor( 70,130,180), RGBColor( 25, 25,112), RGBColor(148,  0,211), RGBColor(220, 20, 60),
];

/// the (fill,outline) color pair for a 1-based month. Months outside 1..=12 are rejected,
/// they are never silently indexed
pub fn month_colors (month: u32) -> Result<(RGBColor,RGBColor)> {
    if (1..=12).contains( &month) {
        let i = (month-1) as usize;
        Ok( (FACE_COLORS[i], EDGE_COLORS[i]))
    } else {
        Err( render_error!("month {} outside 1..=12", month))
    }
}

/// forward spherical north polar stereographic projection (unit sphere, pole at the origin,
/// Greenwich meridian pointing down)
pub fn project (lon_deg: f64, lat_deg: f64) -> (f64,f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let rho = 2.0 * (PI/4.0 - lat/2.0).tan();
    (rho * lon.sin(), -rho * lon.cos())
}

/// projected plane radius of a latitude circle
pub fn latitude_radius (lat_deg: f64) -> f64 {
    2.0 * (PI/4.0 - lat_deg.to_radians()/2.0).tan()
}

/// project a scene footprint, rejecting degenerate or self intersecting rings
fn projected_ring (scene: &Scene) -> Result<Vec<(f64,f64)>> {
    let ring = scene.footprint.exterior();
    if ring.0.len() < 4 {
        return Err( geometry_error!("degenerate footprint of {} ({} vertices)", scene.native_id, ring.0.len()))
    }
    if !scene.footprint.is_valid() {
        return Err( geometry_error!("invalid footprint of {}", scene.native_id))
    }

    Ok( ring.coords().map( |c| project( c.x, c.y)).collect())
}

/// render the scene footprints onto a polar map saved as PNG at `path` (overwriting any
/// previous image) and return the number of scenes skipped due to bad geometry
pub fn render_map (scenes: &[Scene], path: impl AsRef<Path>) -> Result<usize> {
    if scenes.is_empty() {
        return Err( render_error!("no scenes to render"))
    }

    let extent = latitude_radius( MIN_LATITUDE);
    let root = BitMapBackend::new( path.as_ref(), (IMAGE_SIZE, IMAGE_SIZE)).into_drawing_area();
    root.fill( &WHITE).map_err( |e| render_error!("map render failed: {e}"))?;

    let mut chart = ChartBuilder::on( &root)
        .caption( "Selected Sentinel-1 scenes by acquisition month", ("sans-serif", 24))
        .margin( 10)
        .build_cartesian_2d( -extent..extent, -extent..extent)
        .map_err( |e| render_error!("map render failed: {e}"))?;

    draw_graticule( &mut chart)?;

    let mut skipped = 0;
    let mut months_present: BTreeSet<u32> = BTreeSet::new();

    for scene in scenes {
        let (fc, ec) = month_colors( scene.month())?;
        match projected_ring( scene) {
            Ok(ring) => {
                chart.draw_series( std::iter::once( Polygon::new( ring.clone(), fc.mix(0.5).filled())))
                    .map_err( |e| render_error!("map render failed: {e}"))?;
                chart.draw_series( std::iter::once( PathElement::new( ring, ec.stroke_width(1))))
                    .map_err( |e| render_error!("map render failed: {e}"))?;
                months_present.insert( scene.month());
            }
            Err(e) => {
                warn!("skipping scene on map: {e}");
                skipped += 1;
            }
        }
    }

    if months_present.is_empty() {
        return Err( render_error!("no renderable footprints among {} scenes", scenes.len()))
    }

    // legend entries only for the months that made it onto the map
    for month in &months_present {
        let (fc, ec) = month_colors( *month)?;
        let label = month_abbr( *month).ok_or( render_error!("month {} outside 1..=12", month))?;
        chart.draw_series( std::iter::empty::<Rectangle<(f64,f64)>>())
            .map_err( |e| render_error!("map render failed: {e}"))?
            .label( label)
            .legend( move |(x,y)| Rectangle::new( [(x, y-6), (x+12, y+6)], fc.filled()));
    }

    chart.configure_series_labels()
        .position( SeriesLabelPosition::UpperRight)
        .background_style( &WHITE.mix(0.8))
        .border_style( &BLACK)
        .draw()
        .map_err( |e| render_error!("map render failed: {e}"))?;

    root.present().map_err( |e| render_error!("could not write map image: {e}"))?;
    Ok(skipped)
}

/// latitude circles every 10 degrees and meridians every 30 degrees, clipped at the map extent
fn draw_graticule<'a,'b> (chart: &mut ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64,RangedCoordf64>>) -> Result<()> {
    let style = BLACK.mix(0.2);

    for lat in [50.0, 60.0, 70.0, 80.0] {
        let circle = (0..=360).map( move |lon| project( lon as f64, lat));
        chart.draw_series( LineSeries::new( circle, &style))
            .map_err( |e| render_error!("map render failed: {e}"))?;
    }

    for lon in (0..360).step_by(30) {
        let meridian = (0..=40).map( move |i| project( lon as f64, MIN_LATITUDE + i as f64));
        chart.draw_series( LineSeries::new( meridian, &style))
            .map_err( |e| render_error!("map render failed: {e}"))?;
    }

    Ok(())
}
