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

/// Thresholds and constants for the ranging engine.
use serde::{Deserialize, Serialize};
use std::fmt;

/// (dB) Largest low/high band path loss still treated as line-of-sight.
pub const LOS_PATH_LOSS_THRESHOLD: f64 = 7.5;
/// (dB) Largest path loss that can still be modelled (non-line-of-sight).
pub const NLOS_PATH_LOSS_THRESHOLD: f64 = 16.0;
/// (MHz) Boundary between the 2.4 GHz and 5 GHz bands.
pub const LOW_FREQUENCY_THRESHOLD: u32 = 4000;
/// (dBm) RSSI measured one meter away from an access point.
pub const ONE_METER_RSSI: f64 = -30.0;
pub const FEET_PER_METER: f64 = 3.281;
/// (dBm) Low band signals stronger than this imply line-of-sight.
pub const CLOSE_RSSI_THRESHOLD: f64 = -45.0;
/// (dBm) High band signals at or below this are near the noise floor.
pub const FAR_RSSI_THRESHOLD: f64 = -80.0;
pub const MIN_VISIBLE_ACCESS_POINTS: usize = 3;

/// How the two per-band distances of an access point become one range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BandCombination {
    /// The behaviour of the deployed service: the high band distance is
    /// averaged with the low band slot left at its unset value (-1). The
    /// low band distance is computed and reported but does not move the
    /// range.
    #[default]
    Legacy,
    /// Arithmetic mean of the low and high band distances.
    Mean,
}

/// Immutable configuration injected into [`crate::LocationEngine`].
///
/// Every field has a default so a config file may override any subset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RangingConfig {
    pub los_path_loss_threshold: f64,
    pub nlos_path_loss_threshold: f64,
    pub low_frequency_threshold: u32,
    pub one_meter_rssi: f64,
    pub feet_per_meter: f64,
    pub close_rssi_threshold: f64,
    pub far_rssi_threshold: f64,
    pub min_visible_access_points: usize,
    pub band_combination: BandCombination,
}

impl Default for RangingConfig {
    fn default() -> Self {
        Self {
            los_path_loss_threshold: LOS_PATH_LOSS_THRESHOLD,
            nlos_path_loss_threshold: NLOS_PATH_LOSS_THRESHOLD,
            low_frequency_threshold: LOW_FREQUENCY_THRESHOLD,
            one_meter_rssi: ONE_METER_RSSI,
            feet_per_meter: FEET_PER_METER,
            close_rssi_threshold: CLOSE_RSSI_THRESHOLD,
            far_rssi_threshold: FAR_RSSI_THRESHOLD,
            min_visible_access_points: MIN_VISIBLE_ACCESS_POINTS,
            band_combination: BandCombination::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The LOS ceiling is above the NLOS ceiling.
    PathLossThresholds { los: f64, nlos: f64 },
    FeetPerMeter(f64),
    /// Trilateration needs at least two circles.
    MinVisibleAccessPoints(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PathLossThresholds { los, nlos } => {
                write!(f, "los_path_loss_threshold {} exceeds nlos_path_loss_threshold {}", los, nlos)
            }
            ConfigError::FeetPerMeter(v) => write!(f, "feet_per_meter must be positive, got {}", v),
            ConfigError::MinVisibleAccessPoints(n) => {
                write!(f, "min_visible_access_points must be at least 2, got {}", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl RangingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.los_path_loss_threshold > self.nlos_path_loss_threshold {
            return Err(ConfigError::PathLossThresholds {
                los: self.los_path_loss_threshold,
                nlos: self.nlos_path_loss_threshold,
            });
        }
        if self.feet_per_meter.is_nan() || self.feet_per_meter <= 0.0 {
            return Err(ConfigError::FeetPerMeter(self.feet_per_meter));
        }
        if self.min_visible_access_points < 2 {
            return Err(ConfigError::MinVisibleAccessPoints(self.min_visible_access_points));
        }
        Ok(())
    }
}
