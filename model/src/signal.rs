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

//! Beacon observations reported by a scanning device.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 64-bit beacon identifier reported by the scanner.
///
/// Little-endian layout: bytes 0-1 are unused, bytes 2-6 carry the first
/// five octets of the access point's MAC address and byte 7 is the
/// sub-channel (virtual BSS) index.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Bssid(pub i64);

impl Bssid {
    pub fn new(prefix: [u8; 5], sub_channel: u8) -> Self {
        Bssid(i64::from_le_bytes([
            0,
            0,
            prefix[0],
            prefix[1],
            prefix[2],
            prefix[3],
            prefix[4],
            sub_channel,
        ]))
    }

    pub fn prefix(&self) -> [u8; 5] {
        let bytes = self.0.to_le_bytes();
        [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6]]
    }

    pub fn sub_channel(&self) -> u8 {
        self.0.to_le_bytes()[7]
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.prefix();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}/{}",
            p[0],
            p[1],
            p[2],
            p[3],
            p[4],
            self.sub_channel()
        )
    }
}

/// One observed beacon.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    #[serde(rename = "BSSID", alias = "Bssid")]
    pub bssid: Bssid,
    /// dBm
    #[serde(rename = "SignalStrength")]
    pub signal_strength: i32,
    /// MHz
    #[serde(rename = "Frequency")]
    pub frequency: u32,
}

impl Signal {
    pub fn new(bssid: Bssid, signal_strength: i32, frequency: u32) -> Self {
        Signal { bssid, signal_strength, frequency }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// 2.4 GHz
    Low,
    /// 5 GHz
    High,
}

impl Band {
    /// Frequencies exactly at the threshold belong to neither band.
    pub fn from_frequency(frequency: u32, threshold: u32) -> Option<Band> {
        match frequency {
            f if f < threshold => Some(Band::Low),
            f if f > threshold => Some(Band::High),
            _ => None,
        }
    }
}
