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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SentinelScenesError>;

#[derive(Error,Debug)]
pub enum SentinelScenesError {

   #[error("authentication error {0}")]
   AuthError( String ),

   #[error("catalog search error {0}")]
   SearchError( String ),

   #[error("month {month} only has {have} scenes but {want} were requested")]
   InsufficientPopulation { month: u32, want: usize, have: usize },

   #[error("geometry error {0}")]
   GeometryError( String ),

   #[error("render error {0}")]
   RenderError( String ),

   #[error("config error {0}")]
   ConfigError( String ),

   #[error("IO error {0}")]
   IOError( #[from] std::io::Error),

   #[error("http error {0}")]
   HttpError( #[from] reqwest::Error),

   #[error("JSON error {0}")]
   JsonError( #[from] serde_json::Error),

   #[error("operation failed {0}")]
   OpFailedError( String ),
}

macro_rules! auth_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        SentinelScenesError::AuthError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use auth_error;

macro_rules! search_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        SentinelScenesError::SearchError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use search_error;

macro_rules! geometry_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        SentinelScenesError::GeometryError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use geometry_error;

macro_rules! render_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        SentinelScenesError::RenderError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use render_error;

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        SentinelScenesError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        SentinelScenesError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
