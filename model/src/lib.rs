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

//! Data model shared by the ranging engine and the daemon.

pub mod access_point;
pub mod device_info;
pub mod position;
pub mod signal;

pub use access_point::{AccessPoint, MacAddress, MacAddressError};
pub use device_info::{DeviceInfo, PropagationConstants};
pub use position::Point;
pub use signal::{Band, Bssid, Signal};
