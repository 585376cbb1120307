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

//! Trilateration of a single sample-set.
//!
//! The range circles visible in one sample-set are ordered by radius. The
//! nearest access point anchors the estimate and the rest are sorted into
//! ranges that cross it, ranges that contain it and disjoint ranges. The
//! most reliable relationship available decides the estimate:
//!
//! 1. a crossing range gives two candidate points; the third nearest range
//!    picks one ([`Confidence::Intersecting`]);
//! 2. a containing range puts the device on the anchor's rim facing the
//!    container's rim ([`Confidence::Contained`]);
//! 3. otherwise the device is placed between the two nearest centers,
//!    weighted by their ranges ([`Confidence::Disjoint`]).

use log::debug;
use serde::{Serialize, Serializer};
use std::fmt;
use wifiloc_model::Point;

use crate::geometry::{
    closer_to, contains, intersection_points, point_on_edge_facing_rim, ranges_intersect,
    weighted_center, RangeCircle,
};

/// How an estimate was obtained, from least to most reliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    Disjoint = 1,
    Contained = 2,
    Intersecting = 3,
}

impl Confidence {
    pub fn tier(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tier())
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.tier())
    }
}

/// The location estimate of one sample-set.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub location: Point,
    pub confidence: Confidence,
}

impl Estimate {
    pub fn new(location: Point, confidence: Confidence) -> Self {
        Estimate { location, confidence }
    }
}

/// The visible ranges of a sample-set sorted around the nearest one.
///
/// Every list keeps ascending radius order.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRelations {
    pub nearest: RangeCircle,
    /// All ranges but the nearest.
    pub remaining: Vec<RangeCircle>,
    pub intersectors: Vec<RangeCircle>,
    pub containers: Vec<RangeCircle>,
    pub disjoint: Vec<RangeCircle>,
}

impl RangeRelations {
    /// Sorts `circles` and relates them to the nearest one; `None` for an
    /// empty sample-set.
    pub fn classify(mut circles: Vec<RangeCircle>) -> Option<Self> {
        if circles.is_empty() {
            return None;
        }
        circles.sort_by(|a, b| a.radius.total_cmp(&b.radius));
        let nearest = circles.remove(0);
        let mut relations = RangeRelations {
            nearest,
            remaining: Vec::with_capacity(circles.len()),
            intersectors: Vec::new(),
            containers: Vec::new(),
            disjoint: Vec::new(),
        };
        for circle in circles {
            if ranges_intersect(&nearest, &circle) {
                relations.intersectors.push(circle);
            } else if contains(&circle, &nearest) {
                relations.containers.push(circle);
            } else {
                relations.disjoint.push(circle);
            }
            relations.remaining.push(circle);
        }
        Some(relations)
    }

    fn from_intersection(&self) -> Option<Point> {
        let candidates =
            self.remaining.iter().enumerate().filter(|(_, c)| ranges_intersect(&self.nearest, c));
        for (i, intersector) in candidates {
            let Some([first, second]) = intersection_points(&self.nearest, intersector) else {
                debug!("skipping co-located ranges at {}", intersector.center);
                continue;
            };
            // the nearest range left once the intersector is taken out
            let next = self.remaining.iter().enumerate().find(|(j, _)| *j != i);
            return Some(match next {
                Some((_, next)) => closer_to(first, second, next.center),
                None => first,
            });
        }
        None
    }

    fn from_container(&self) -> Option<Point> {
        self.containers
            .iter()
            .find_map(|container| point_on_edge_facing_rim(&self.nearest, container))
    }

    fn from_weighted_center(&self) -> Option<Point> {
        self.remaining.iter().find_map(|next| weighted_center(&self.nearest, next))
    }

    /// Applies the decision procedure; the first branch that yields a point
    /// wins.
    pub fn estimate(&self) -> Option<Estimate> {
        if let Some(location) = self.from_intersection() {
            return Some(Estimate::new(location, Confidence::Intersecting));
        }
        if let Some(location) = self.from_container() {
            return Some(Estimate::new(location, Confidence::Contained));
        }
        self.from_weighted_center().map(|location| Estimate::new(location, Confidence::Disjoint))
    }
}

/// Estimates the device location from the range circles visible in one
/// sample-set.
///
/// Returns `None` when fewer than `min_visible` ranges are visible, or when
/// every candidate pair is degenerate (co-located access points).
pub fn estimate_sample(circles: Vec<RangeCircle>, min_visible: usize) -> Option<Estimate> {
    if circles.len() < min_visible {
        debug!("{} visible access points, need {}", circles.len(), min_visible);
        return None;
    }
    RangeRelations::classify(circles)?.estimate()
}
