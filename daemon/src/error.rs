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

use std::fmt;

use crate::registry::DeviceIdentifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The backing store could not be read or written.
    Unavailable(String),
    UnknownDevice(DeviceIdentifier),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Unavailable(reason) => write!(f, "registry unavailable: {reason}"),
            RegistryError::UnknownDevice(id) => write!(f, "no device with id {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Failure of a location request as a whole.
///
/// Gaps in the data (too few access points, unusable signals) are not
/// errors; they show up as missing estimates in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The request body is not a valid device payload.
    MalformedPayload(String),
    Registry(RegistryError),
    Internal(String),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::MalformedPayload(reason) => write!(f, "malformed payload: {reason}"),
            LocateError::Registry(err) => write!(f, "{err}"),
            LocateError::Internal(reason) => write!(f, "internal error: {reason}"),
        }
    }
}

impl std::error::Error for LocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocateError::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LocateError {
    fn from(err: serde_json::Error) -> Self {
        LocateError::MalformedPayload(err.to_string())
    }
}

impl From<RegistryError> for LocateError {
    fn from(err: RegistryError) -> Self {
        LocateError::Registry(err)
    }
}

impl LocateError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            LocateError::MalformedPayload(_) => 400,
            LocateError::Registry(_) | LocateError::Internal(_) => 500,
        }
    }
}
