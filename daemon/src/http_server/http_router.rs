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

//! Request router for micro HTTP server.
//!
//! This module implements a basic request router with matching of URI
//! fields. For example
//!
//!   router.add_route(Uri::from_static("/v1/devices/{id}"), handle_device);
//!
//! will register a handler that receives the device id.
//!
//! Routes are matched against the path only; the query string is left to
//! the handler.

use crate::http_server::server_response::ResponseWritable;

use http::{Request, Uri};

type RequestHandler<'a> = Box<dyn Fn(&Request<Vec<u8>>, &str, ResponseWritable) + 'a>;

#[derive(Default)]
pub struct Router<'a> {
    routes: Vec<(Uri, RequestHandler<'a>)>,
}

impl<'a> Router<'a> {
    pub fn new() -> Self {
        Router { routes: Vec::new() }
    }

    pub fn add_route(&mut self, route: Uri, handler: RequestHandler<'a>) {
        self.routes.push((route, handler));
    }

    pub fn handle_request(&self, request: &Request<Vec<u8>>, writer: ResponseWritable) {
        for (route, handler) in &self.routes {
            if let Some(param) = match_route(route.path(), request.uri().path()) {
                handler(request, param, writer);
                return;
            }
        }
        let body = format!("404 Not found (wifilocd): unknown uri {}", request.uri().path());
        writer.put_error(404, body.as_str());
    }
}

/// Match the uri against the route and return extracted parameter or
/// None.
///
/// Example:
///   pattern: "/users/{id}/info"
///   uri: "/users/33/info"
///   result: Some("33")
///
fn match_route<'u>(route: &str, uri: &'u str) -> Option<&'u str> {
    let (open, close) = match (route.find('{'), route.find('}')) {
        // literal routes with no parameter
        (None, None) => return (route == uri).then_some(""),
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return None,
    };

    let prefix = &route[0..open];
    let suffix = &route[close + 1..];
    if uri.len() >= prefix.len() + suffix.len() && uri.starts_with(prefix) && uri.ends_with(suffix)
    {
        Some(&uri[prefix.len()..(uri.len() - suffix.len())])
    } else {
        None
    }
}
