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

use serde_json::json;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use wifiloc_model::Bssid;
use wifilocd::config_file;
use wifilocd::http_server::server::serve;
use wifilocd::rust_main::new_locator;

const CONFIG: &str = r#"{
  "access_points": [
    { "mac": "0a:00:00:00:10:40", "x": 0, "y": 0 },
    { "mac": "0a:00:00:00:20:40", "x": 20, "y": 0 },
    { "mac": "0a:00:00:00:30:40", "x": 10, "y": 30 }
  ],
  "devices": [ { "mac": "02:00:00:aa:bb:cc", "name": "scanner-1" } ]
}"#;

fn payload(octets: &[u8]) -> String {
    let sample: Vec<_> = octets
        .iter()
        .flat_map(|octet| {
            let bssid = Bssid::new([0x0a, 0, 0, 0, *octet], 0x41).0;
            [
                json!({"BSSID": bssid, "SignalStrength": -48, "Frequency": 2437}),
                json!({"BSSID": bssid, "SignalStrength": -50, "Frequency": 5180}),
            ]
        })
        .collect();
    json!({
        "MacAddress": "02:00:00:AA:BB:CC",
        "LOSPropogationConstant2": 2.0,
        "LOSPropogationConstant5": 2.0,
        "NLOSPropogationConstant2": 3.0,
        "NLOSPropogationConstant5": 3.5,
        "SignalSamples": [sample],
    })
    .to_string()
}

fn start_server() -> u16 {
    let config = config_file::from_str(CONFIG).unwrap();
    let locator = Arc::new(new_locator(&config).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || serve(listener, locator));
    port
}

fn send(port: u16, method: &str, uri: &str, body: &str) -> (String, String) {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    let request = format!(
        "{method} {uri} HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    (head.to_string(), body.to_string())
}

#[test]
fn test_locate_and_list_devices() {
    let port = start_server();

    let (head, body) = send(port, "POST", "/api/location", &payload(&[0x10, 0x20, 0x30]));
    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    assert!(body.starts_with("Device MAC: 02:00:00:AA:BB:CC\n\n(0, 0) [-48, -50, 2]\n"), "{body}");
    assert!(body.contains("Estimated location: (10, 12) [3]\n"), "{body}");
    assert!(body.ends_with("Final estimate: (10, 12) [3, 1]\nDevice updated in database"), "{body}");

    let (head, body) = send(port, "GET", "/v1/devices", "");
    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    let devices: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(devices["devices"][0]["name"], "scanner-1");
    assert_eq!(devices["devices"][0]["location"], json!({"x": 10, "y": 12}));
    assert!(devices["devices"][0]["last_updated"].is_string());
}

#[test]
fn test_insufficient_data_json() {
    let port = start_server();
    let (head, body) = send(port, "POST", "/api/location?format=json", &payload(&[0x10, 0x20]));
    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["report"]["samples"][0]["estimate"], serde_json::Value::Null);
    assert_eq!(response["report"]["final_estimate"], serde_json::Value::Null);
    assert_eq!(response["persistence"], serde_json::Value::Null);
}

#[test]
fn test_bad_requests() {
    let port = start_server();
    let (head, _) = send(port, "POST", "/api/location", "{\"MacAddress\":");
    assert!(head.starts_with("HTTP/1.1 400 Bad Request"), "{head}");
    let (head, _) = send(port, "PUT", "/api/location", "");
    assert!(head.starts_with("HTTP/1.1 405 Method Not Allowed"), "{head}");
    let (head, _) = send(port, "GET", "/unknown", "");
    assert!(head.starts_with("HTTP/1.1 404 Not Found"), "{head}");
}
