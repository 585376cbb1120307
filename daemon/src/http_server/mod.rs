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

//! Micro HTTP server for the location API.
//!
//!   POST /api/location[?format=json]  locate a device payload
//!   GET  /v1/devices                  registered devices and last locations
//!   GET  /version                     daemon version

pub mod http_handlers;
pub mod http_request;
pub mod http_router;
pub mod server;
pub mod server_response;
mod thread_pool;
