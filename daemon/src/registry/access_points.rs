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

use wifiloc_model::AccessPoint;

use super::AccessPointRegistry;
use crate::error::RegistryError;

/// Access points fixed at startup, typically from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticAccessPoints {
    access_points: Vec<AccessPoint>,
}

impl StaticAccessPoints {
    pub fn new(access_points: Vec<AccessPoint>) -> Self {
        StaticAccessPoints { access_points }
    }

    pub fn len(&self) -> usize {
        self.access_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.access_points.is_empty()
    }
}

impl AccessPointRegistry for StaticAccessPoints {
    fn get_all(&self) -> Result<Vec<AccessPoint>, RegistryError> {
        Ok(self.access_points.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifiloc_model::{MacAddress, Point};

    #[test]
    fn test_get_all_keeps_order() {
        let access_points = vec![
            AccessPoint::new(MacAddress::new([0, 1, 2, 3, 4, 0x10]), Point::new(5, 5)),
            AccessPoint::new(MacAddress::new([0, 1, 2, 3, 4, 0x00]), Point::new(0, 0)),
        ];
        let registry = StaticAccessPoints::new(access_points.clone());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get_all(), Ok(access_points));
        assert!(StaticAccessPoints::default().is_empty());
    }
}
