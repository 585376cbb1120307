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

use std::{
    any::Any,
    collections::HashMap,
    io::BufReader,
    net::TcpStream,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::Duration,
};

use http::{Request, Uri};
use log::{debug, error, warn};
use serde::Serialize;

use crate::{error::LocateError, locator::Locator, registry::DeviceRecord, version::VERSION};

use super::{
    http_request::parse_http_request,
    http_router::Router,
    server_response::{ResponseWritable, ServerResponseWritable, ServerResponseWriter},
};

/// Collect queries and output key and values into HashMap
pub fn collect_query(param: &str) -> Result<HashMap<&str, &str>, &str> {
    let mut result = HashMap::new();
    if param.is_empty() {
        return Ok(result);
    }
    for word in param.split('&') {
        if let Some(equal) = word.find('=') {
            if result.insert(&word[..equal], &word[equal + 1..]).is_some() {
                return Err("Query has duplicate keys");
            }
        }
    }
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

fn report_format(query: Option<&str>) -> Result<ReportFormat, String> {
    let queries = collect_query(query.unwrap_or(""))?;
    match queries.get("format").copied() {
        None | Some("text") => Ok(ReportFormat::Text),
        Some("json") => Ok(ReportFormat::Json),
        Some(other) => Err(format!("Unknown report format '{other}'")),
    }
}

fn put_json<T: Serialize>(writer: ResponseWritable, value: &T) {
    match serde_json::to_vec(value) {
        Ok(body) => writer.put_ok_with_vec("application/json", body),
        Err(err) => {
            warn!("json serialization failed: {err}");
            writer.put_error(500, "Failed to serialize response");
        }
    }
}

pub fn handle_location(
    locator: &Locator,
    request: &Request<Vec<u8>>,
    _param: &str,
    writer: ResponseWritable,
) {
    if *request.method() != http::Method::POST {
        writer.put_error(405, "Use POST with a device payload");
        return;
    }
    let format = match report_format(request.uri().query()) {
        Ok(format) => format,
        Err(err) => {
            writer.put_error(400, &err);
            return;
        }
    };
    match locator.locate_payload(request.body()) {
        Ok(response) => match format {
            ReportFormat::Text => writer.put_ok("text/plain", &response.to_string()),
            ReportFormat::Json => put_json(writer, &response),
        },
        Err(err) => {
            debug!("location request failed: {err}");
            writer.put_error(err.status_code(), &err.to_string());
        }
    }
}

#[derive(Serialize)]
struct ListDevicesResponse {
    devices: Vec<DeviceRecord>,
}

pub fn handle_devices(
    locator: &Locator,
    request: &Request<Vec<u8>>,
    _param: &str,
    writer: ResponseWritable,
) {
    if *request.method() != http::Method::GET {
        writer.put_error(405, "Use GET to list devices");
        return;
    }
    match locator.devices().list() {
        Ok(devices) => put_json(writer, &ListDevicesResponse { devices }),
        Err(err) => writer.put_error(500, &err.to_string()),
    }
}

fn handle_version(_request: &Request<Vec<u8>>, _param: &str, writer: ResponseWritable) {
    let body = serde_json::json!({ "version": VERSION }).to_string();
    writer.put_ok("application/json", body.as_str());
}

/// Routes for one connection.
pub fn new_router(locator: &Locator) -> Router<'_> {
    let mut router = Router::new();
    router.add_route(Uri::from_static("/version"), Box::new(handle_version));
    router.add_route(
        Uri::from_static("/api/location"),
        Box::new(move |request: &Request<Vec<u8>>, param: &str, writer: ResponseWritable| {
            handle_location(locator, request, param, writer)
        }),
    );
    router.add_route(
        Uri::from_static("/v1/devices"),
        Box::new(move |request: &Request<Vec<u8>>, param: &str, writer: ResponseWritable| {
            handle_devices(locator, request, param, writer)
        }),
    );
    router
}

/// How long a client may take to send its request.
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(10);

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "request handler panicked".to_string()
    }
}

/// Routes `request`, answering 500 when its handler panics.
fn dispatch(
    router: &Router<'_>,
    request: &Request<Vec<u8>>,
    writer: &mut ServerResponseWriter<'_>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| router.handle_request(request, writer)));
    if let Err(payload) = outcome {
        let err = LocateError::Internal(panic_message(payload.as_ref()));
        error!("{} {} failed: {err}", request.method(), request.uri());
        if !writer.has_response() {
            writer.put_error(err.status_code(), &err.to_string());
        }
    }
}

pub fn handle_connection(stream: TcpStream, locator: Arc<Locator>) {
    serve_connection(stream, &locator, REQUEST_READ_TIMEOUT);
}

fn serve_connection(mut stream: TcpStream, locator: &Locator, read_timeout: Duration) {
    if let Err(err) = stream.set_read_timeout(Some(read_timeout)) {
        warn!("failed to set read timeout: {err}");
    }
    let router = new_router(locator);
    let parsed = parse_http_request::<&TcpStream>(&mut BufReader::new(&stream));
    match parsed {
        Ok(request) => {
            debug!("{} {}", request.method(), request.uri());
            let mut response_writer = ServerResponseWriter::new(&mut stream);
            dispatch(&router, &request, &mut response_writer);
        }
        Err(err) => {
            warn!("bad request: {err}");
            let mut response_writer = ServerResponseWriter::new(&mut stream);
            response_writer.put_error(400, "400 bad request (wifilocd): parse header failed");
        }
    }
}
