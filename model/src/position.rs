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
use std::fmt;

type Foot = i32;

// A 2D position on the floor plan grid, in feet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Foot,
    pub y: Foot,
}

impl Point {
    pub fn new(x: Foot, y: Foot) -> Point {
        Point { x, y }
    }

    /// Snaps a floating point coordinate onto the grid by truncating toward
    /// zero. Non-finite inputs saturate the way `as` casts do.
    pub fn truncated(x: f64, y: f64) -> Point {
        Point { x: x as Foot, y: y as Foot }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
