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

//! Server Response Writer module for micro HTTP server.
//!
//! Handlers write their response through [`ServerResponseWritable`] so
//! they can be tested against an in-memory buffer instead of a socket.

use std::io::Write;

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, Response, StatusCode};
use log::error;

pub type ResponseWritable<'a> = &'a mut dyn ServerResponseWritable;

pub trait ServerResponseWritable {
    fn put_ok(&mut self, mime_type: &'static str, body: &str);
    fn put_ok_with_vec(&mut self, mime_type: &'static str, body: Vec<u8>);
    fn put_error(&mut self, error_code: u16, error_message: &str);
}

// A response writer that can contain a TCP stream or other writable.
pub struct ServerResponseWriter<'a> {
    writer: &'a mut dyn Write,
    response: Option<Response<Vec<u8>>>,
}

impl ServerResponseWriter<'_> {
    pub fn new<W: Write>(writer: &mut W) -> ServerResponseWriter {
        ServerResponseWriter { writer, response: None }
    }

    pub fn put_response(&mut self, response: Response<Vec<u8>>) {
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown Reason");
        let mut buffer = format!("HTTP/1.1 {} {}\r\n", status.as_str(), reason).into_bytes();
        for (name, value) in response.headers() {
            buffer.extend_from_slice(name.as_str().as_bytes());
            buffer.extend_from_slice(b": ");
            buffer.extend_from_slice(value.as_bytes());
            buffer.extend_from_slice(b"\r\n");
        }
        buffer.extend_from_slice(b"\r\n");
        buffer.extend_from_slice(response.body());
        if let Err(e) = self.writer.write_all(&buffer).and_then(|_| self.writer.flush()) {
            error!("handle_connection error {e}");
        };
        self.response = Some(response);
    }

    /// True once a response has been written.
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    pub fn get_response(self) -> Option<Response<Vec<u8>>> {
        self.response
    }
}

impl ServerResponseWritable for ServerResponseWriter<'_> {
    fn put_ok(&mut self, mime_type: &'static str, body: &str) {
        self.put_response(new_response(StatusCode::OK, mime_type, body.into()));
    }

    fn put_ok_with_vec(&mut self, mime_type: &'static str, body: Vec<u8>) {
        self.put_response(new_response(StatusCode::OK, mime_type, body));
    }

    fn put_error(&mut self, error_code: u16, error_message: &str) {
        let status = StatusCode::from_u16(error_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.put_response(new_response(status, "text/plain", error_message.into()));
    }
}

fn new_response(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response<Vec<u8>> {
    let length = body.len();
    let mut response = Response::new(body);
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_put_error() {
        let mut stream = Cursor::new(Vec::new());
        let mut writer = ServerResponseWriter::new(&mut stream);
        writer.put_error(404, "Hello World");
        let written_bytes = stream.get_ref();
        let expected_bytes =
            b"HTTP/1.1 404 Not Found\r\ncontent-type: text/plain\r\ncontent-length: 11\r\n\r\nHello World";
        assert_eq!(written_bytes, expected_bytes);
    }

    #[test]
    fn test_put_method_not_allowed() {
        let mut stream = Cursor::new(Vec::new());
        let mut writer = ServerResponseWriter::new(&mut stream);
        writer.put_error(405, "POST only");
        let expected_bytes =
            b"HTTP/1.1 405 Method Not Allowed\r\ncontent-type: text/plain\r\ncontent-length: 9\r\n\r\nPOST only";
        assert_eq!(stream.get_ref(), expected_bytes);
    }

    #[test]
    fn test_put_ok() {
        let mut stream = Cursor::new(Vec::new());
        let mut writer = ServerResponseWriter::new(&mut stream);
        writer.put_ok("text/plain", "Hello World");
        let response = writer.get_response().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let written_bytes = stream.get_ref();
        let expected_bytes =
            b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 11\r\n\r\nHello World";
        assert_eq!(written_bytes, expected_bytes);
    }

    #[test]
    fn test_put_ok_with_vec() {
        let mut stream = Cursor::new(Vec::new());
        let mut writer = ServerResponseWriter::new(&mut stream);
        writer.put_ok_with_vec("application/json", b"{}".to_vec());
        let expected_bytes =
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\n\r\n{}";
        assert_eq!(stream.get_ref(), expected_bytes);
    }
}
