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

//! Collaborators of the locator: where access points come from and where
//! device locations are recorded.

pub mod access_points;
pub mod devices;
pub mod id_factory;

use chrono::{DateTime, Utc};
use wifiloc_model::{AccessPoint, DeviceInfo, Point};

use crate::error::RegistryError;

pub use access_points::StaticAccessPoints;
pub use devices::{DeviceRecord, InMemoryDevices};

pub type DeviceIdentifier = u32;

/// Read-only source of the known access points.
pub trait AccessPointRegistry: Send + Sync {
    fn get_all(&self) -> Result<Vec<AccessPoint>, RegistryError>;
}

/// The scanning devices known to the deployment.
pub trait DeviceRegistry: Send + Sync {
    /// The registered device that sent `device`, if any.
    fn find_by_fingerprint(
        &self,
        device: &DeviceInfo,
    ) -> Result<Option<DeviceIdentifier>, RegistryError>;

    fn update_location(
        &self,
        id: DeviceIdentifier,
        location: Point,
        timestamp: DateTime<Utc>,
    ) -> Result<(), RegistryError>;

    fn list(&self) -> Result<Vec<DeviceRecord>, RegistryError>;
}
