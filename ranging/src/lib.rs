// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Location estimation engine.
//!
//! Converts per-band RSSI observations into range circles around known
//! access points with a log-distance path loss model, then trilaterates
//! each sample-set and aggregates the per-sample estimates.
//!
//! The pipeline runs strictly forward:
//!
//!   signals -> [`classifier`] -> [`distance`] -> [`sample`] -> [`aggregate`]
//!
//! and [`engine::LocationEngine`] drives it for a whole request.

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod distance;
pub mod engine;
pub mod geometry;
pub mod sample;

pub use aggregate::{aggregate, FinalEstimate};
pub use config::{BandCombination, ConfigError, RangingConfig};
pub use engine::{AccessPointRange, LocationEngine, LocationReport, SampleReport};
pub use sample::{Confidence, Estimate};
