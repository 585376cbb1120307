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

//! Request parsing for the micro HTTP server.
//!
//! Implements the request line, single-line header fields and a body
//! delimited by `Content-Length` from RFC 9112. Chunked transfer coding,
//! folded header lines and keep-alive are not supported; every connection
//! carries exactly one request.

use http::Request;
use http::Version;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

/// Largest request body accepted. Scanner payloads are a few kilobytes.
pub const MAX_BODY_LENGTH: usize = 1 << 20;

#[allow(clippy::read_zero_byte_vec)]
pub fn parse_http_request<T: std::io::Read>(
    reader: &mut BufReader<T>,
) -> Result<Request<Vec<u8>>, String> {
    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| format!("Failed to read request line: {e}"))?;
    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or("Invalid request line, missing method")?;
    let uri = parts.next().ok_or("Invalid request line, missing uri")?;
    let version_str = parts.next().ok_or("Invalid request line, missing version")?;
    let version = match version_str {
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/1.1" => Version::HTTP_11,
        _ => return Err(format!("Unsupported HTTP version {version_str}")),
    };

    let mut headers = Vec::new();
    for line in reader.by_ref().lines() {
        let line = line.map_err(|e| format!("Failed to parse headers: {e}"))?;
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        } else if !line.trim().is_empty() {
            return Err(format!("Invalid header line: {line}"));
        } else {
            // empty line marks the end of headers
            break;
        }
    }

    let mut builder = Request::builder().method(method).uri(uri).version(version);
    let mut body_length: Option<usize> = None;
    for (key, value) in headers {
        if key.eq_ignore_ascii_case("Content-Length") {
            let length = value.parse().map_err(|e| format!("Invalid Content-Length: {e}"))?;
            if length > MAX_BODY_LENGTH {
                return Err(format!("Body of {length} bytes exceeds {MAX_BODY_LENGTH}"));
            }
            body_length = Some(length);
        }
        builder = builder.header(key, value);
    }
    let mut body = Vec::new();
    if let Some(len) = body_length {
        body.resize(len, 0);
        reader.read_exact(&mut body).map_err(|e| format!("Failed to read body: {e}"))?;
    }
    builder.body(body).map_err(|e| format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post() {
        let request = concat!(
            "POST /api/location?format=json HTTP/1.1\r\n",
            "Host: localhost\r\ncontent-length: 17\r\n\r\n",
            "{\"MacAddress\":\"\"}"
        );
        let mut reader = BufReader::new(request.as_bytes());
        let http_request = parse_http_request::<&[u8]>(&mut reader).unwrap();
        assert_eq!(http_request.method(), "POST");
        assert_eq!(http_request.uri().path(), "/api/location");
        assert_eq!(http_request.uri().query(), Some("format=json"));
        assert_eq!(http_request.version(), Version::HTTP_11);
        let mut headers = http::HeaderMap::new();
        headers.insert("Host", http::HeaderValue::from_static("localhost"));
        headers.insert("Content-Length", http::HeaderValue::from_static("17"));
        assert_eq!(http_request.headers().to_owned(), headers);
        assert_eq!(http_request.body().to_owned(), b"{\"MacAddress\":\"\"}".to_vec());
    }

    #[test]
    fn test_parse_without_content_length() {
        let request =
            concat!("GET /v1/devices HTTP/1.0\r\n", "Host: localhost\r\n\r\n", "ignored\r\n");
        let mut reader = BufReader::new(request.as_bytes());
        let http_request = parse_http_request::<&[u8]>(&mut reader).unwrap();
        assert_eq!(http_request.method(), "GET");
        assert_eq!(http_request.uri(), "/v1/devices");
        assert_eq!(http_request.version(), Version::HTTP_10);
        assert_eq!(http_request.body().to_owned(), Vec::<u8>::new());
    }

    #[test]
    fn test_parse_errors() {
        let parse = |request: &str| {
            let mut reader = BufReader::new(request.as_bytes());
            parse_http_request::<&[u8]>(&mut reader)
        };
        assert!(parse("GET\r\n\r\n").is_err());
        assert!(parse("GET / HTTP/2.0\r\n\r\n").is_err());
        assert!(parse("GET / HTTP/1.1\r\nno colon here\r\n\r\n").is_err());
        assert!(parse("POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n").is_err());
        // truncated body
        assert!(parse("POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nshort").is_err());
        let too_long = format!("POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n", MAX_BODY_LENGTH + 1);
        assert!(parse(&too_long).is_err());
    }
}
