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
use std::str::FromStr;

use crate::position::Point;

/// A 48-bit IEEE 802 MAC address.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacAddressError {
    /// The address does not have exactly six octets.
    Length(usize),
    /// An octet is not a two digit hex number.
    Octet(String),
}

impl fmt::Display for MacAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacAddressError::Length(n) => write!(f, "expected 6 octets, found {}", n),
            MacAddressError::Octet(octet) => write!(f, "invalid octet '{}'", octet),
        }
    }
}

impl std::error::Error for MacAddressError {}

impl MacAddress {
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    /// Accepts `aa:bb:cc:dd:ee:ff` and `aa-bb-cc-dd-ee-ff`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(|c| c == ':' || c == '-').collect();
        if parts.len() != 6 {
            return Err(MacAddressError::Length(parts.len()));
        }
        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(MacAddressError::Octet(part.to_string()));
            }
            bytes[i] =
                u8::from_str_radix(part, 16).map_err(|_| MacAddressError::Octet(part.to_string()))?;
        }
        Ok(MacAddress(bytes))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = MacAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5],
        )
    }
}

/// A fixed access point on the floor plan.
///
/// The estimated range to a device is not part of the access point; it is
/// derived per sample-set and carried by a range circle instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub mac: MacAddress,
    #[serde(flatten)]
    pub position: Point,
}

impl AccessPoint {
    pub fn new(mac: MacAddress, position: Point) -> Self {
        AccessPoint { mac, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mac_address() {
        let mac: MacAddress = "00:0b:85:71:20:CE".parse().unwrap();
        assert_eq!(mac.octets(), [0x00, 0x0b, 0x85, 0x71, 0x20, 0xce]);
        assert_eq!(mac.to_string(), "00:0b:85:71:20:ce");
        let dashed: MacAddress = "00-0b-85-71-20-ce".parse().unwrap();
        assert_eq!(mac, dashed);
    }

    #[test]
    fn test_parse_mac_address_errors() {
        assert_eq!("00:0b:85:71:20".parse::<MacAddress>(), Err(MacAddressError::Length(5)));
        assert_eq!(
            "00:0b:85:71:20:ce:01".parse::<MacAddress>(),
            Err(MacAddressError::Length(7))
        );
        assert_eq!(
            "00:0b:85:71:20:zz".parse::<MacAddress>(),
            Err(MacAddressError::Octet("zz".to_string()))
        );
        assert_eq!(
            "00:0b:85:71:20:1ce".parse::<MacAddress>(),
            Err(MacAddressError::Octet("1ce".to_string()))
        );
    }

    #[test]
    fn test_access_point_json() {
        let ap: AccessPoint =
            serde_json::from_str(r#"{"mac":"00:11:22:33:44:50","x":10,"y":-4}"#).unwrap();
        assert_eq!(ap.mac, MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x50]));
        assert_eq!(ap.position, Point::new(10, -4));
        let s = serde_json::to_string(&ap).unwrap();
        assert_eq!(s, r#"{"mac":"00:11:22:33:44:50","x":10,"y":-4}"#);
    }

    #[test]
    fn test_access_point_json_rejects_short_mac() {
        let result = serde_json::from_str::<AccessPoint>(r#"{"mac":"00:11:22:33:44","x":0,"y":0}"#);
        assert!(result.is_err());
    }
}
