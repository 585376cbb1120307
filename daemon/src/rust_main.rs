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

use anyhow::{anyhow, Context};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use wifiloc_common::util::wifiloc_logger;
use wifiloc_ranging::LocationEngine;

use crate::args::WifilocdArgs;
use crate::config_file::{self, Config};
use crate::http_server::server::run_http_server;
use crate::locator::Locator;
use crate::registry::{InMemoryDevices, StaticAccessPoints};
use crate::version::get_version;

/// Entry point of the wifilocd binary.
pub fn rust_main(args: WifilocdArgs) -> anyhow::Result<()> {
    if args.version {
        println!("wifilocd Version: {}", get_version());
        return Ok(());
    }
    wifiloc_logger::init("wifilocd", args.verbose);
    info!("{:#?}", args);

    let config = load_config(&args)?;
    let locator = new_locator(&config)?;

    if let Some(payload) = &args.locate {
        return locate_once(&locator, payload, args.json);
    }

    let address = SocketAddr::new(config.bind_address, config.http_port);
    run_http_server(address, Arc::new(locator))
}

fn load_config(args: &WifilocdArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => config_file::new_from_file(path).map_err(|e| anyhow!(e))?,
        None => {
            warn!("no config file given, running without access points");
            Config::default()
        }
    };
    if let Some(port) = args.port {
        config.http_port = port;
    }
    Ok(config)
}

/// Builds the locator and its registries from the config file.
pub fn new_locator(config: &Config) -> anyhow::Result<Locator> {
    let devices = InMemoryDevices::new();
    for device in &config.devices {
        devices.register(device.mac, &device.name).context("Failed to register device")?;
    }
    let access_points = StaticAccessPoints::new(config.access_points.clone());
    info!("{} access points, {} devices", access_points.len(), config.devices.len());
    Ok(Locator::new(
        LocationEngine::new(config.ranging.clone()),
        Arc::new(access_points),
        Arc::new(devices),
    ))
}

fn locate_once(locator: &Locator, payload: &std::path::Path, json: bool) -> anyhow::Result<()> {
    let body = std::fs::read(payload)
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    let device = Locator::parse_payload(&body)?;
    let response = locator.estimate(&device)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{response}");
    }
    Ok(())
}
