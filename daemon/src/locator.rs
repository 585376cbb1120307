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

//! Serves one location request end to end: parse the payload, run the
//! engine against the registered access points and record the final
//! estimate for the device.

use chrono::Utc;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use wifiloc_model::DeviceInfo;
use wifiloc_ranging::{FinalEstimate, LocationEngine, LocationReport};

use crate::error::LocateError;
use crate::registry::{AccessPointRegistry, DeviceIdentifier, DeviceRegistry};

/// What happened when the final estimate was stored.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceOutcome {
    Updated { device_id: DeviceIdentifier },
    /// The payload's device is not registered.
    NotFound,
    Failed { reason: String },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LocateResponse {
    pub device: String,
    pub report: LocationReport,
    /// `None` when nothing was stored: no final estimate, or a dry run.
    pub persistence: Option<PersistenceOutcome>,
}

pub struct Locator {
    engine: LocationEngine,
    access_points: Arc<dyn AccessPointRegistry>,
    devices: Arc<dyn DeviceRegistry>,
}

impl Locator {
    pub fn new(
        engine: LocationEngine,
        access_points: Arc<dyn AccessPointRegistry>,
        devices: Arc<dyn DeviceRegistry>,
    ) -> Self {
        Locator { engine, access_points, devices }
    }

    pub fn devices(&self) -> &dyn DeviceRegistry {
        self.devices.as_ref()
    }

    /// Parses a JSON device payload.
    pub fn parse_payload(body: &[u8]) -> Result<DeviceInfo, LocateError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Runs the engine without touching the device registry.
    pub fn estimate(&self, device: &DeviceInfo) -> Result<LocateResponse, LocateError> {
        let access_points = self.access_points.get_all()?;
        let report = self.engine.locate(&access_points, device);
        Ok(LocateResponse { device: device.mac_address.clone(), report, persistence: None })
    }

    /// Runs the engine and stores the final estimate, if there is one.
    pub fn locate(&self, device: &DeviceInfo) -> Result<LocateResponse, LocateError> {
        let mut response = self.estimate(device)?;
        response.persistence =
            response.report.final_estimate.as_ref().map(|estimate| self.persist(device, estimate));
        Ok(response)
    }

    pub fn locate_payload(&self, body: &[u8]) -> Result<LocateResponse, LocateError> {
        self.locate(&Self::parse_payload(body)?)
    }

    fn persist(&self, device: &DeviceInfo, estimate: &FinalEstimate) -> PersistenceOutcome {
        let id = match self.devices.find_by_fingerprint(device) {
            Ok(Some(id)) => id,
            Ok(None) => {
                info!("{} is not a registered device", device.mac_address);
                return PersistenceOutcome::NotFound;
            }
            Err(err) => {
                warn!("failed to look up device {}: {err}", device.mac_address);
                return PersistenceOutcome::Failed { reason: err.to_string() };
            }
        };
        match self.devices.update_location(id, estimate.location, Utc::now()) {
            Ok(()) => PersistenceOutcome::Updated { device_id: id },
            Err(err) => {
                warn!("failed to store location of device {id}: {err}");
                PersistenceOutcome::Failed { reason: err.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::registry::{DeviceRecord, InMemoryDevices, StaticAccessPoints};
    use chrono::DateTime;
    use wifiloc_model::{AccessPoint, Bssid, MacAddress, Point, PropagationConstants, Signal};

    const DEVICE_MAC: MacAddress = MacAddress::new([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x01]);

    fn access_points() -> StaticAccessPoints {
        StaticAccessPoints::new(
            [(1, 0, 0), (2, 20, 0), (3, 10, 30)]
                .iter()
                .map(|(id, x, y)| {
                    AccessPoint::new(MacAddress::new([2, 0, 0, 0, *id, 0]), Point::new(*x, *y))
                })
                .collect(),
        )
    }

    fn device(visible: u8) -> DeviceInfo {
        let sample = (1..=visible)
            .flat_map(|id| {
                let bssid = Bssid::new([2, 0, 0, 0, id], 1);
                [Signal::new(bssid, -48, 2412), Signal::new(bssid, -50, 5745)]
            })
            .collect();
        DeviceInfo {
            mac_address: DEVICE_MAC.to_string(),
            propagation: PropagationConstants {
                los_low: 2.0,
                los_high: 2.0,
                nlos_low: 3.0,
                nlos_high: 3.0,
            },
            signal_samples: vec![sample],
        }
    }

    fn locator(devices: Arc<dyn DeviceRegistry>) -> Locator {
        Locator::new(LocationEngine::default(), Arc::new(access_points()), devices)
    }

    #[test]
    fn test_locate_updates_registered_device() {
        let devices = Arc::new(InMemoryDevices::new());
        let id = devices.register(DEVICE_MAC, "scanner").unwrap();
        let response = locator(devices.clone()).locate(&device(3)).unwrap();
        assert_eq!(response.persistence, Some(PersistenceOutcome::Updated { device_id: id }));
        assert_eq!(devices.get(id).unwrap().location, Some(Point::new(10, 12)));
    }

    #[test]
    fn test_locate_unknown_device() {
        let response = locator(Arc::new(InMemoryDevices::new())).locate(&device(3)).unwrap();
        assert_eq!(response.persistence, Some(PersistenceOutcome::NotFound));
        assert!(response.report.final_estimate.is_some());
    }

    #[test]
    fn test_nothing_stored_without_estimate() {
        let devices = Arc::new(InMemoryDevices::new());
        let id = devices.register(DEVICE_MAC, "scanner").unwrap();
        let response = locator(devices.clone()).locate(&device(2)).unwrap();
        assert_eq!(response.report.final_estimate, None);
        assert_eq!(response.persistence, None);
        assert_eq!(devices.get(id).unwrap().last_updated, None);
    }

    struct BrokenDevices {
        lookup_fails: bool,
    }

    impl DeviceRegistry for BrokenDevices {
        fn find_by_fingerprint(
            &self,
            _device: &DeviceInfo,
        ) -> Result<Option<DeviceIdentifier>, RegistryError> {
            if self.lookup_fails {
                return Err(RegistryError::Unavailable("device lock poisoned".into()));
            }
            Ok(Some(9))
        }

        fn update_location(
            &self,
            _id: DeviceIdentifier,
            _location: Point,
            _timestamp: DateTime<Utc>,
        ) -> Result<(), RegistryError> {
            Err(RegistryError::Unavailable("disk full".into()))
        }

        fn list(&self) -> Result<Vec<DeviceRecord>, RegistryError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_failed_update_keeps_estimate() {
        let devices = Arc::new(BrokenDevices { lookup_fails: false });
        let response = locator(devices).locate(&device(3)).unwrap();
        assert_eq!(
            response.persistence,
            Some(PersistenceOutcome::Failed { reason: "registry unavailable: disk full".into() })
        );
        assert_eq!(response.report.final_estimate.unwrap().location, Point::new(10, 12));
    }

    #[test]
    fn test_failed_lookup_is_not_reported_as_unknown() {
        let devices = Arc::new(BrokenDevices { lookup_fails: true });
        let response = locator(devices).locate(&device(3)).unwrap();
        assert_eq!(
            response.persistence,
            Some(PersistenceOutcome::Failed {
                reason: "registry unavailable: device lock poisoned".into()
            })
        );
        assert!(response.report.final_estimate.is_some());
    }

    #[test]
    fn test_malformed_payload() {
        let locator = locator(Arc::new(InMemoryDevices::new()));
        let err = locator.locate_payload(b"{\"MacAddress\": 12}").unwrap_err();
        assert!(matches!(err, LocateError::MalformedPayload(_)));
        let err = locator.locate_payload(b"").unwrap_err();
        assert!(matches!(err, LocateError::MalformedPayload(_)));
    }

    #[test]
    fn test_persistence_json() {
        let value = serde_json::to_value(PersistenceOutcome::Updated { device_id: 3 }).unwrap();
        assert_eq!(value, serde_json::json!({"status": "updated", "device_id": 3}));
        let value = serde_json::to_value(PersistenceOutcome::NotFound).unwrap();
        assert_eq!(value, serde_json::json!({"status": "not_found"}));
    }
}
