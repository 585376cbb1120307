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

use log::{debug, info};
use serde::Serialize;
use wifiloc_model::{AccessPoint, DeviceInfo, Signal};

use crate::aggregate::{aggregate, FinalEstimate};
use crate::classifier::classify;
use crate::config::RangingConfig;
use crate::distance::{DistanceEstimator, RangeEstimate};
use crate::geometry::RangeCircle;
use crate::sample::{estimate_sample, Estimate};

/// A usable range to one access point.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccessPointRange {
    pub access_point: AccessPoint,
    pub range: RangeEstimate,
}

impl AccessPointRange {
    pub fn circle(&self) -> RangeCircle {
        RangeCircle::new(self.access_point.position, self.range.distance)
    }
}

/// What one sample-set yielded.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub ranges: Vec<AccessPointRange>,
    /// `None` when the sample-set held too little usable data.
    pub estimate: Option<Estimate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LocationReport {
    pub samples: Vec<SampleReport>,
    pub final_estimate: Option<FinalEstimate>,
}

impl LocationReport {
    pub fn estimates(&self) -> impl Iterator<Item = &Estimate> {
        self.samples.iter().filter_map(|s| s.estimate.as_ref())
    }
}

/// Runs the ranging pipeline for one device.
///
/// The engine holds only immutable configuration and can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct LocationEngine {
    config: RangingConfig,
}

impl LocationEngine {
    pub fn new(config: RangingConfig) -> Self {
        LocationEngine { config }
    }

    /// Ranges to every access point heard on both bands in `sample`.
    pub fn ranges(
        &self,
        access_points: &[AccessPoint],
        device: &DeviceInfo,
        sample: &[Signal],
    ) -> Vec<AccessPointRange> {
        let estimator = DistanceEstimator::new(&self.config, &device.propagation);
        access_points
            .iter()
            .filter_map(|access_point| {
                let bands = classify(access_point, sample, self.config.low_frequency_threshold);
                if !bands.is_usable() {
                    return None;
                }
                let range = estimator.estimate(&bands)?;
                Some(AccessPointRange { access_point: access_point.clone(), range })
            })
            .collect()
    }

    pub fn locate_sample(
        &self,
        access_points: &[AccessPoint],
        device: &DeviceInfo,
        sample: &[Signal],
    ) -> SampleReport {
        let ranges = self.ranges(access_points, device, sample);
        let circles = ranges.iter().map(AccessPointRange::circle).collect();
        let estimate = estimate_sample(circles, self.config.min_visible_access_points);
        SampleReport { ranges, estimate }
    }

    /// Estimates each sample-set independently, then aggregates.
    pub fn locate(&self, access_points: &[AccessPoint], device: &DeviceInfo) -> LocationReport {
        let samples: Vec<SampleReport> = device
            .signal_samples
            .iter()
            .map(|sample| self.locate_sample(access_points, device, sample))
            .collect();
        let estimates: Vec<Estimate> = samples.iter().filter_map(|s| s.estimate).collect();
        debug!(
            "{}: {} of {} sample-sets yielded an estimate",
            device.mac_address,
            estimates.len(),
            samples.len()
        );
        let final_estimate = aggregate(&estimates);
        if let Some(estimate) = &final_estimate {
            info!(
                "{} located at {} (confidence {}, {} samples)",
                device.mac_address, estimate.location, estimate.confidence, estimate.supporting
            );
        }
        LocationReport { samples, final_estimate }
    }
}
