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

/// Configuration file for wifilocd.
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use wifiloc_model::{AccessPoint, MacAddress};
use wifiloc_ranging::RangingConfig;

pub const DEFAULT_HTTP_PORT: u16 = 7681;
const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// A scanning device allowed to have its location recorded.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeviceEntry {
    pub mac: MacAddress,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub http_port: u16,
    pub bind_address: IpAddr,
    pub ranging: RangingConfig,
    pub access_points: Vec<AccessPoint>,
    pub devices: Vec<DeviceEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http_port: DEFAULT_HTTP_PORT,
            bind_address: DEFAULT_BIND_ADDRESS,
            ranging: RangingConfig::default(),
            access_points: Vec::new(),
            devices: Vec::new(),
        }
    }
}

pub fn new_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, String> {
    let filename = filename.as_ref();
    let contents = fs::read_to_string(filename)
        .map_err(|e| format!("Failed to read config file {}: {}", filename.display(), e))?;
    from_str(&contents)
}

pub fn from_str(contents: &str) -> Result<Config, String> {
    let config: Config =
        serde_json::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))?;
    config.ranging.validate().map_err(|e| format!("Invalid ranging config: {}", e))?;
    validate_unique("access point", config.access_points.iter().map(|ap| ap.mac))?;
    validate_unique("device", config.devices.iter().map(|d| d.mac))?;
    Ok(config)
}

fn validate_unique(kind: &str, macs: impl Iterator<Item = MacAddress>) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for mac in macs {
        if !seen.insert(mac) {
            return Err(format!("Duplicate {} MAC {}", kind, mac));
        }
    }
    Ok(())
}
