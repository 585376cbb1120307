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

use serde::Serialize;
use wifiloc_model::Point;

use crate::sample::{Confidence, Estimate};

/// The location reported for a whole request.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalEstimate {
    pub location: Point,
    pub confidence: Confidence,
    /// Number of sample-set estimates at `confidence` that were averaged.
    pub supporting: usize,
}

/// Averages the sample-set estimates of the highest confidence seen.
///
/// Lower tier estimates are discarded entirely. `None` when no sample-set
/// produced an estimate.
pub fn aggregate(estimates: &[Estimate]) -> Option<FinalEstimate> {
    let confidence = estimates.iter().map(|e| e.confidence).max()?;
    let best: Vec<Point> =
        estimates.iter().filter(|e| e.confidence == confidence).map(|e| e.location).collect();
    let count = best.len() as f64;
    let (sum_x, sum_y) =
        best.iter().fold((0f64, 0f64), |(x, y), p| (x + p.x as f64, y + p.y as f64));
    Some(FinalEstimate {
        location: Point::truncated(sum_x / count, sum_y / count),
        confidence,
        supporting: best.len(),
    })
}
