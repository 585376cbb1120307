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

//! Plain text rendering of a location response, the format scanner
//! operators read in their logs.

use std::fmt;
use wifiloc_ranging::{AccessPointRange, SampleReport};

use crate::locator::{LocateResponse, PersistenceOutcome};

fn floor(value: f64) -> i64 {
    value.floor() as i64
}

struct RangeLines<'a>(&'a AccessPointRange);

impl fmt::Display for RangeLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let AccessPointRange { access_point, range } = self.0;
        writeln!(
            f,
            "{} [{}, {}, {}]",
            access_point.position,
            floor(range.low.rssi),
            floor(range.high.rssi),
            floor(range.path_loss)
        )?;
        writeln!(
            f,
            "{:.2} ft ({}: {}, {}: {})",
            range.distance,
            range.low.count,
            floor(range.low.distance),
            range.high.count,
            floor(range.high.distance)
        )
    }
}

struct SampleLines<'a>(&'a SampleReport);

impl fmt::Display for SampleLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for range in &self.0.ranges {
            write!(f, "{}", RangeLines(range))?;
        }
        match &self.0.estimate {
            Some(estimate) => {
                writeln!(f, "Estimated location: {} [{}]", estimate.location, estimate.confidence)?
            }
            None => writeln!(f, "Not enough usable data to estimate location")?,
        }
        writeln!(f)
    }
}

impl fmt::Display for PersistenceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceOutcome::Updated { .. } => write!(f, "Device updated in database"),
            PersistenceOutcome::NotFound | PersistenceOutcome::Failed { .. } => {
                write!(f, "Couldn't update device in database")
            }
        }
    }
}

impl fmt::Display for LocateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device MAC: {}", self.device)?;
        writeln!(f)?;
        for sample in &self.report.samples {
            write!(f, "{}", SampleLines(sample))?;
        }
        match &self.report.final_estimate {
            Some(estimate) => {
                writeln!(
                    f,
                    "Final estimate: {} [{}, {}]",
                    estimate.location, estimate.confidence, estimate.supporting
                )?;
                if let Some(persistence) = &self.persistence {
                    write!(f, "{persistence}")?;
                }
                Ok(())
            }
            None => write!(f, "No estimates of location could be made"),
        }
    }
}
