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

//! Matches beacons to access points and splits them by band.

use wifiloc_model::{AccessPoint, Band, Signal};

/// Number of virtual BSS sub-channels an access point advertises above its
/// base MAC address.
const SUB_CHANNELS: u16 = 16;

/// True when `signal` was sent by `access_point`.
///
/// The beacon's MAC prefix must equal the first five octets of the access
/// point MAC, and its sub-channel byte must fall in
/// `[mac[5] + 1, mac[5] + 16]`.
pub fn is_signal_from(signal: &Signal, access_point: &AccessPoint) -> bool {
    let mac = access_point.mac.octets();
    if signal.bssid.prefix()[..] != mac[..5] {
        return false;
    }
    // widened so a base octet of 0xff does not wrap
    let base = mac[5] as u16;
    let sub_channel = signal.bssid.sub_channel() as u16;
    (base + 1..=base + SUB_CHANNELS).contains(&sub_channel)
}

/// The beacons of one access point within one sample-set, by band.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BandSignals<'a> {
    pub low: Vec<&'a Signal>,
    pub high: Vec<&'a Signal>,
}

impl BandSignals<'_> {
    /// Path loss can only be measured when both bands were heard.
    pub fn is_usable(&self) -> bool {
        !self.low.is_empty() && !self.high.is_empty()
    }

    /// Mean low band strength in dBm.
    pub fn low_rssi(&self) -> Option<f64> {
        mean_strength(&self.low)
    }

    /// Mean high band strength in dBm.
    pub fn high_rssi(&self) -> Option<f64> {
        mean_strength(&self.high)
    }
}

fn mean_strength(signals: &[&Signal]) -> Option<f64> {
    if signals.is_empty() {
        return None;
    }
    let total: f64 = signals.iter().map(|s| s.signal_strength as f64).sum();
    Some(total / signals.len() as f64)
}

/// Collects the beacons of `access_point` from one sample-set.
///
/// Beacons exactly on `low_frequency_threshold` belong to neither band and
/// are dropped.
pub fn classify<'a>(
    access_point: &AccessPoint,
    sample: &'a [Signal],
    low_frequency_threshold: u32,
) -> BandSignals<'a> {
    let mut bands = BandSignals::default();
    for signal in sample.iter().filter(|s| is_signal_from(s, access_point)) {
        match Band::from_frequency(signal.frequency, low_frequency_threshold) {
            Some(Band::Low) => bands.low.push(signal),
            Some(Band::High) => bands.high.push(signal),
            None => {}
        }
    }
    bands
}
