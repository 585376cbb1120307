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

//! Range circle geometry.
//!
//! Every function is pure. Results that land on the floor plan are
//! truncated toward zero onto the integer grid. Functions that would divide
//! by the distance between two centers return `None` when the centers
//! coincide instead of producing NaN coordinates.

use glam::DVec2;
use serde::Serialize;
use wifiloc_model::Point;

/// An access point position together with an estimated range (feet).
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RangeCircle {
    pub center: Point,
    pub radius: f64,
}

impl RangeCircle {
    pub fn new(center: Point, radius: f64) -> Self {
        RangeCircle { center, radius }
    }
}

// helper function for performing division with
// zero division check
fn checked_div(num: f64, den: f64) -> Option<f64> {
    (den != 0.).then_some(num / den)
}

fn to_vec(point: Point) -> DVec2 {
    DVec2::new(point.x as f64, point.y as f64)
}

fn to_point(v: DVec2) -> Point {
    Point::truncated(v.x, v.y)
}

/// Euclidean distance between two grid points.
pub fn distance(a: Point, b: Point) -> f64 {
    to_vec(a).distance(to_vec(b))
}

/// True when the two ranges cross at two distinct points.
///
/// Containment, tangency and disjoint ranges are all excluded.
pub fn ranges_intersect(c1: &RangeCircle, c2: &RangeCircle) -> bool {
    let d = distance(c1.center, c2.center);
    d > c1.radius && d > c2.radius && d < c1.radius + c2.radius
}

/// True when `inner` lies entirely within `outer`, internal tangency
/// included.
pub fn contains(outer: &RangeCircle, inner: &RangeCircle) -> bool {
    distance(inner.center, outer.center) <= outer.radius - inner.radius
}

/// The two crossing points of two intersecting ranges.
///
/// Only meaningful when [`ranges_intersect`] holds; `None` when the
/// centers coincide or the ranges do not actually cross.
pub fn intersection_points(c1: &RangeCircle, c2: &RangeCircle) -> Option<[Point; 2]> {
    let (p0, r0) = (to_vec(c1.center), c1.radius);
    let (p1, r1) = (to_vec(c2.center), c2.radius);
    let d = p0.distance(p1);
    // distance from p0 to the radical line, along the center line
    let a = checked_div(r0.powi(2) - r1.powi(2) + d.powi(2), 2. * d)?;
    let h_squared = r0.powi(2) - a.powi(2);
    if h_squared.is_nan() || h_squared < 0. {
        return None;
    }
    let h = h_squared.sqrt();
    let direction = (p1 - p0) / d;
    let midpoint = p0 + direction * a;
    let offset = direction.perp() * h;
    Some([to_point(midpoint - offset), to_point(midpoint + offset)])
}

/// The point on `circle`'s boundary in the direction of `target`.
pub fn point_on_edge_toward(circle: &RangeCircle, target: Point) -> Option<Point> {
    let center = to_vec(circle.center);
    let delta = to_vec(target) - center;
    let scale = checked_div(circle.radius, delta.length())?;
    Some(to_point(center + delta * scale))
}

/// The point on `circle`'s boundary facing away from `outer`'s center.
///
/// When `circle` lies inside `outer` this is the point of `circle` closest
/// to `outer`'s rim.
pub fn point_on_edge_facing_rim(circle: &RangeCircle, outer: &RangeCircle) -> Option<Point> {
    let center = to_vec(circle.center);
    let delta = center - to_vec(outer.center);
    let scale = checked_div(circle.radius, delta.length())?;
    Some(to_point(center + delta * scale))
}

/// A point between the two centers, `d * r1 / (r1 + r2)` away from `c1`,
/// so it sits closer to the center of the smaller range.
pub fn weighted_center(c1: &RangeCircle, c2: &RangeCircle) -> Option<Point> {
    let total = c1.radius + c2.radius;
    if total.is_nan() || total <= 0. {
        return None;
    }
    let offset = distance(c1.center, c2.center) * (c1.radius / total);
    point_on_edge_toward(&RangeCircle::new(c1.center, offset), c2.center)
}

/// Whichever of `a` and `b` is closer to `target`; `b` on a tie.
pub fn closer_to(a: Point, b: Point, target: Point) -> Point {
    if distance(a, target) < distance(b, target) {
        a
    } else {
        b
    }
}
