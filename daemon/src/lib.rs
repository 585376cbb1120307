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

//! wifilocd: locates WiFi scanners from the signal strength of fixed
//! access points and records where they are.

pub mod args;
pub mod config_file;
pub mod error;
pub mod http_server;
pub mod locator;
pub mod registry;
mod report;
pub mod rust_main;
pub mod version;

pub use error::{LocateError, RegistryError};
pub use locator::{LocateResponse, Locator, PersistenceOutcome};
