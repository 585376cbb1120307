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

// devices.rs
//
// In-memory device registry.
//
// Devices are registered at startup from the config file. A device is
// recognised by the MAC address it reports in its payload, and its last
// estimated location is kept together with the time of the estimate.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use wifiloc_common::util::time_display::TimeDisplay;
use wifiloc_model::{DeviceInfo, MacAddress, Point};

use super::id_factory::IdFactory;
use super::{DeviceIdentifier, DeviceRegistry};
use crate::error::RegistryError;

const INITIAL_DEVICE_ID: DeviceIdentifier = 1;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub id: DeviceIdentifier,
    pub mac: MacAddress,
    pub name: String,
    pub location: Option<Point>,
    pub last_updated: Option<DateTime<Utc>>,
}

struct Devices {
    // BTreeMap lists devices in order of identifiers.
    entries: BTreeMap<DeviceIdentifier, DeviceRecord>,
    by_mac: BTreeMap<MacAddress, DeviceIdentifier>,
    id_factory: IdFactory<DeviceIdentifier>,
}

pub struct InMemoryDevices {
    devices: RwLock<Devices>,
}

impl Default for InMemoryDevices {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDevices {
    pub fn new() -> Self {
        InMemoryDevices {
            devices: RwLock::new(Devices {
                entries: BTreeMap::new(),
                by_mac: BTreeMap::new(),
                id_factory: IdFactory::new(INITIAL_DEVICE_ID, 1),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Devices>, RegistryError> {
        self.devices.read().map_err(|_| RegistryError::Unavailable("device lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Devices>, RegistryError> {
        self.devices.write().map_err(|_| RegistryError::Unavailable("device lock poisoned".into()))
    }

    /// Adds a device, or renames it when the MAC is already registered.
    pub fn register(&self, mac: MacAddress, name: &str) -> Result<DeviceIdentifier, RegistryError> {
        let mut devices = self.write()?;
        if let Some(id) = devices.by_mac.get(&mac).copied() {
            if let Some(record) = devices.entries.get_mut(&id) {
                record.name = name.to_string();
            }
            return Ok(id);
        }
        let id = devices.id_factory.next_id();
        devices.entries.insert(
            id,
            DeviceRecord { id, mac, name: name.to_string(), location: None, last_updated: None },
        );
        devices.by_mac.insert(mac, id);
        info!("registered device {id} ({mac}) as {name}");
        Ok(id)
    }

    pub fn get(&self, id: DeviceIdentifier) -> Option<DeviceRecord> {
        self.read().ok()?.entries.get(&id).cloned()
    }
}

impl DeviceRegistry for InMemoryDevices {
    fn find_by_fingerprint(
        &self,
        device: &DeviceInfo,
    ) -> Result<Option<DeviceIdentifier>, RegistryError> {
        let mac: MacAddress = match device.mac_address.parse() {
            Ok(mac) => mac,
            Err(err) => {
                warn!("device reported unusable MAC '{}': {err}", device.mac_address);
                return Ok(None);
            }
        };
        Ok(self.read()?.by_mac.get(&mac).copied())
    }

    fn update_location(
        &self,
        id: DeviceIdentifier,
        location: Point,
        timestamp: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        let mut devices = self.write()?;
        let record = devices.entries.get_mut(&id).ok_or(RegistryError::UnknownDevice(id))?;
        record.location = Some(location);
        record.last_updated = Some(timestamp);
        debug!(
            "device {id} at {location} as of {}",
            TimeDisplay::from_datetime(timestamp).utc_display()
        );
        Ok(())
    }

    fn list(&self) -> Result<Vec<DeviceRecord>, RegistryError> {
        Ok(self.read()?.entries.values().cloned().collect())
    }
}
