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

use serde::{Deserialize, Serialize};

use crate::signal::Signal;

/// Per-device path-loss exponents, one per {LOS, NLOS} x {2.4 GHz, 5 GHz}.
///
/// The wire names keep the spelling the scanner firmware ships with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PropagationConstants {
    #[serde(rename = "LOSPropogationConstant2", alias = "LOSPropagationConstant2")]
    pub los_low: f64,
    #[serde(rename = "LOSPropogationConstant5", alias = "LOSPropagationConstant5")]
    pub los_high: f64,
    #[serde(rename = "NLOSPropogationConstant2", alias = "NLOSPropagationConstant2")]
    pub nlos_low: f64,
    #[serde(rename = "NLOSPropogationConstant5", alias = "NLOSPropagationConstant5")]
    pub nlos_high: f64,
}

/// A location request from a scanning device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    #[serde(rename = "MacAddress")]
    pub mac_address: String,
    #[serde(flatten)]
    pub propagation: PropagationConstants,
    /// Ordered sample-sets; each is the set of beacons seen at one moment.
    #[serde(rename = "SignalSamples", default)]
    pub signal_samples: Vec<Vec<Signal>>,
}
