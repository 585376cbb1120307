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

//! RSSI to range conversion.
//!
//! The log-distance path loss model is used:
//!
//!   d = 10 ^ ((RSSI@1m - RSSI) / (10 * n)) meters
//!
//! where the exponent `n` is calibrated per device for each combination of
//! band and propagation environment. The environment is inferred from the
//! difference between the 2.4 GHz and 5 GHz strengths, since the higher
//! band attenuates faster through obstacles.

use log::trace;
use serde::Serialize;
use wifiloc_model::{Band, PropagationConstants};

use crate::classifier::BandSignals;
use crate::config::{BandCombination, RangingConfig};

/// Value of a band distance that was never filled in.
const UNSET_DISTANCE: f64 = -1.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    LineOfSight,
    NonLineOfSight,
}

/// Mean strength, beacon count and derived distance of one band.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BandReading {
    pub rssi: f64,
    pub count: usize,
    pub distance: f64,
}

/// The range to one access point for one sample-set.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RangeEstimate {
    pub low: BandReading,
    pub high: BandReading,
    /// Path loss after the environment overrides.
    pub path_loss: f64,
    pub environment: Environment,
    /// Combined range in feet.
    pub distance: f64,
}

pub struct DistanceEstimator<'a> {
    config: &'a RangingConfig,
    constants: &'a PropagationConstants,
}

impl<'a> DistanceEstimator<'a> {
    pub fn new(config: &'a RangingConfig, constants: &'a PropagationConstants) -> Self {
        DistanceEstimator { config, constants }
    }

    /// Path loss between the bands with the noise and proximity overrides
    /// applied.
    pub fn path_loss(&self, low_rssi: f64, high_rssi: f64) -> f64 {
        let mut path_loss = low_rssi - high_rssi;
        // A weak 5 GHz signal with little apparent loss is an obstructed
        // path masked by noise.
        if high_rssi <= self.config.far_rssi_threshold
            && path_loss < self.config.los_path_loss_threshold
        {
            path_loss = self.config.nlos_path_loss_threshold;
        }
        if low_rssi > self.config.close_rssi_threshold {
            path_loss = 0.0;
        }
        path_loss
    }

    /// `None` when the path is too obstructed to model.
    pub fn environment(&self, path_loss: f64) -> Option<Environment> {
        if path_loss <= self.config.los_path_loss_threshold {
            Some(Environment::LineOfSight)
        } else if path_loss <= self.config.nlos_path_loss_threshold {
            Some(Environment::NonLineOfSight)
        } else {
            None
        }
    }

    pub fn exponent(&self, environment: Environment, band: Band) -> f64 {
        match (environment, band) {
            (Environment::LineOfSight, Band::Low) => self.constants.los_low,
            (Environment::LineOfSight, Band::High) => self.constants.los_high,
            (Environment::NonLineOfSight, Band::Low) => self.constants.nlos_low,
            (Environment::NonLineOfSight, Band::High) => self.constants.nlos_high,
        }
    }

    /// Range in feet for a mean RSSI, truncated to whole dBm first.
    pub fn distance(&self, rssi: f64, exponent: f64) -> f64 {
        let rssi = rssi.trunc();
        10f64.powf((self.config.one_meter_rssi - rssi) / (10.0 * exponent))
            * self.config.feet_per_meter
    }

    /// Estimates the range to an access point, or `None` when its beacons
    /// cannot be modelled this round.
    pub fn estimate(&self, bands: &BandSignals) -> Option<RangeEstimate> {
        let low_rssi = bands.low_rssi()?;
        let high_rssi = bands.high_rssi()?;
        let path_loss = self.path_loss(low_rssi, high_rssi);
        let Some(environment) = self.environment(path_loss) else {
            trace!("path loss {path_loss:.1} dB exceeds the NLOS ceiling");
            return None;
        };

        let low_distance = self.distance(low_rssi, self.exponent(environment, Band::Low));
        let high_distance = self.distance(high_rssi, self.exponent(environment, Band::High));
        let distance = match self.config.band_combination {
            BandCombination::Legacy => (high_distance + UNSET_DISTANCE) / 2.0,
            BandCombination::Mean => (low_distance + high_distance) / 2.0,
        };
        if !distance.is_finite() || distance < 0.0 {
            trace!("unusable range {distance} ft (low {low_distance}, high {high_distance})");
            return None;
        }

        Some(RangeEstimate {
            low: BandReading { rssi: low_rssi, count: bands.low.len(), distance: low_distance },
            high: BandReading { rssi: high_rssi, count: bands.high.len(), distance: high_distance },
            path_loss,
            environment,
            distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifiloc_model::{Bssid, Signal};

    const CONSTANTS: PropagationConstants =
        PropagationConstants { los_low: 2.0, los_high: 2.5, nlos_low: 3.0, nlos_high: 4.0 };

    fn signals(strengths: &[i32], frequency: u32) -> Vec<Signal> {
        strengths.iter().map(|s| Signal::new(Bssid::new([0; 5], 1), *s, frequency)).collect()
    }

    fn bands<'a>(low: &'a [Signal], high: &'a [Signal]) -> BandSignals<'a> {
        BandSignals { low: low.iter().collect(), high: high.iter().collect() }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_distance_formula() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        // 20 dB below the one meter reference with n = 2 is ten meters.
        assert_close(estimator.distance(-50.0, 2.0), 32.81);
        assert_close(estimator.distance(-30.0, 2.0), 3.281);
        // fractional dBm are truncated toward zero
        assert_close(estimator.distance(-50.75, 2.0), 32.81);
    }

    #[test]
    fn test_distance_shrinks_as_signal_strengthens() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        let mut previous = f64::INFINITY;
        for rssi in (-95..=-20).step_by(5) {
            let distance = estimator.distance(rssi as f64, 2.7);
            assert!(distance < previous, "{rssi} dBm -> {distance} ft");
            previous = distance;
        }
    }

    #[test]
    fn test_close_low_band_forces_line_of_sight() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        for high_rssi in [-40.0, -60.0, -85.0, -99.0] {
            assert_eq!(estimator.path_loss(-40.0, high_rssi), 0.0);
            assert_eq!(estimator.environment(0.0), Some(Environment::LineOfSight));
        }
    }

    #[test]
    fn test_far_high_band_forces_nlos() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        assert_eq!(estimator.path_loss(-78.0, -82.0), 16.0);
        assert_eq!(estimator.environment(16.0), Some(Environment::NonLineOfSight));
        // a large apparent loss is left alone
        assert_eq!(estimator.path_loss(-70.0, -82.0), 12.0);
    }

    #[test]
    fn test_environment_boundaries() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        assert_eq!(estimator.environment(7.5), Some(Environment::LineOfSight));
        assert_eq!(estimator.environment(7.6), Some(Environment::NonLineOfSight));
        assert_eq!(estimator.environment(16.0), Some(Environment::NonLineOfSight));
        assert_eq!(estimator.environment(16.1), None);
    }

    #[test]
    fn test_exponent_selection() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        assert_eq!(estimator.exponent(Environment::LineOfSight, Band::Low), 2.0);
        assert_eq!(estimator.exponent(Environment::LineOfSight, Band::High), 2.5);
        assert_eq!(estimator.exponent(Environment::NonLineOfSight, Band::Low), 3.0);
        assert_eq!(estimator.exponent(Environment::NonLineOfSight, Band::High), 4.0);
    }

    #[test]
    fn test_estimate_is_pinned_to_legacy_combination() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        let low = signals(&[-48, -48], 2412);
        let high = signals(&[-55], 5180);
        let estimate = estimator.estimate(&bands(&low, &high)).unwrap();
        assert_eq!(estimate.path_loss, 7.0);
        assert_eq!(estimate.environment, Environment::LineOfSight);
        // -55 dBm at n = 2.5: 10 ^ (25 / 25) meters
        assert_close(estimate.high.distance, 32.81);
        assert_close(estimate.low.distance, 10f64.powf(18.0 / 20.0) * 3.281);
        // only the high band moves the range
        assert_close(estimate.distance, (32.81 - 1.0) / 2.0);
        assert_eq!(estimate.low.count, 2);
        assert_eq!(estimate.high.count, 1);

        let other_low = signals(&[-50], 2412);
        let other = estimator.estimate(&bands(&other_low, &high)).unwrap();
        assert_close(other.distance, estimate.distance);
    }

    #[test]
    fn test_estimate_mean_combination() {
        let config = RangingConfig { band_combination: BandCombination::Mean, ..Default::default() };
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        let low = signals(&[-50], 2412);
        let high = signals(&[-55], 5180);
        let estimate = estimator.estimate(&bands(&low, &high)).unwrap();
        assert_close(estimate.distance, (32.81 + 32.81) / 2.0);
    }

    #[test]
    fn test_estimate_rejects_heavy_path_loss() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        let low = signals(&[-50], 2412);
        let high = signals(&[-70], 5180);
        assert_eq!(estimator.estimate(&bands(&low, &high)), None);
    }

    #[test]
    fn test_estimate_requires_both_bands() {
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        let low = signals(&[-50], 2412);
        assert_eq!(estimator.estimate(&bands(&low, &[])), None);
    }

    #[test]
    fn test_estimate_rejects_negative_range() {
        // A very strong high band signal leaves a range under one foot,
        // which the legacy combination turns negative.
        let config = RangingConfig::default();
        let estimator = DistanceEstimator::new(&config, &CONSTANTS);
        let low = signals(&[-10], 2412);
        let high = signals(&[-10], 5180);
        assert_eq!(estimator.estimate(&bands(&low, &high)), None);
    }
}
