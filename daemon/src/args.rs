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

use clap::Parser;
use std::path::PathBuf;

/// WiFi RSSI trilateration service.
#[derive(Debug, Parser)]
#[command(name = "wifilocd")]
pub struct WifilocdArgs {
    /// JSON config file with thresholds, access points and devices
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// HTTP port, overrides the config file
    #[arg(short, long, env = "WIFILOCD_PORT")]
    pub port: Option<u16>,

    /// Locate the device payload in this file, print the report and exit
    #[arg(long, value_name = "PAYLOAD")]
    pub locate: Option<PathBuf>,

    /// Print the report of --locate as JSON
    #[arg(long, requires = "locate")]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print version and exit
    #[arg(long)]
    pub version: bool,
}
