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

use crate::http_server::http_handlers::handle_connection;
use crate::http_server::thread_pool::ThreadPool;
use crate::locator::Locator;

use anyhow::Context;
use log::{info, warn};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

const HTTP_WORKERS: usize = 4;

/// Serve connections from `listener` until it fails; each connection
/// carries one request.
pub fn serve(listener: TcpListener, locator: Arc<Locator>) {
    let pool = ThreadPool::new(HTTP_WORKERS);
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("failed to accept connection: {e}");
                continue;
            }
        };
        let locator = locator.clone();
        pool.execute(move || {
            handle_connection(stream, locator);
        });
    }
    info!("Shutting down http server.");
}

/// Start the HTTP Server and block serving requests.
pub fn run_http_server(address: SocketAddr, locator: Arc<Locator>) -> anyhow::Result<()> {
    let listener =
        TcpListener::bind(address).with_context(|| format!("Failed to bind http server to {address}"))?;
    info!("wifilocd http server is listening on http://{}", listener.local_addr()?);
    serve(listener, locator);
    Ok(())
}
