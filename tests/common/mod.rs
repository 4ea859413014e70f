// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory thermostat speaking the encrypted request format.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use wavetherm_lib::codec::{PayloadCodec, strip_padding};
use wavetherm_lib::protocol::{ConnectTarget, Transport, TransportEvent};
use wavetherm_lib::{Credentials, ProtocolError, TransportIdentity};

pub const SERIAL: &str = "458921440";
pub const ACCESS_CODE: &str = "AbCdEfGhIjKlMnOp";
pub const PASSWORD: &str = "hunter2";

pub fn credentials() -> Credentials {
    Credentials::new(SERIAL, ACCESS_CODE, PASSWORD).unwrap()
}

/// A request as the device decoded it.
#[derive(Debug, Clone, PartialEq)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub value: Option<Value>,
}

/// Observable device state and scripted behaviour.
#[derive(Debug)]
pub struct FakeDevice {
    pub mode: String,
    pub room_temperature: f64,
    pub manual_temperature: f64,
    pub override_temperature: f64,
    pub override_on: bool,

    /// Replaces the generated status snapshot.
    pub status_fixture: Option<Value>,
    /// Rejects the login.
    pub auth_fails: bool,
    /// Accepts requests but never answers.
    pub silent: bool,
    /// Paths whose writes are answered with 400.
    pub reject_paths: Vec<String>,

    pub sessions: usize,
    pub disconnects: usize,
    pub received: Vec<Received>,
    pub login: Option<(String, String)>,
    codec: PayloadCodec,
    peer: String,
}

impl FakeDevice {
    pub fn new(credentials: &Credentials) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            mode: "clock".to_string(),
            room_temperature: 19.5,
            manual_temperature: 20.0,
            override_temperature: 18.0,
            override_on: false,
            status_fixture: None,
            auth_fails: false,
            silent: false,
            reject_paths: Vec::new(),
            sessions: 0,
            disconnects: 0,
            received: Vec::new(),
            login: None,
            codec: PayloadCodec::new(credentials.session_key()),
            peer: credentials.identity().peer_address().to_string(),
        }))
    }

    /// Writes only, in arrival order.
    pub fn puts(&self) -> Vec<(String, Value)> {
        self.received
            .iter()
            .filter(|r| r.method == "PUT")
            .map(|r| (r.path.clone(), r.value.clone().unwrap_or(Value::Null)))
            .collect()
    }

    fn snapshot(&self) -> Value {
        if let Some(fixture) = &self.status_fixture {
            return fixture.clone();
        }
        let set_point = if self.mode == "manual" {
            self.manual_temperature
        } else if self.override_on {
            self.override_temperature
        } else {
            20.0
        };
        json!({
            "IHT": format!("{:.2}", self.room_temperature),
            "TSP": format!("{set_point:.1}"),
            "UMD": self.mode,
            "BAI": "CH",
            "DHW": "on",
            "TOR": if self.override_on { "on" } else { "off" },
            "MMT": format!("{:.1}", self.manual_temperature),
            "TOT": format!("{:.1}", self.override_temperature),
            "CTD": "2025-09-22T18:33:30+01:00 Mo",
        })
    }

    /// Decodes one request and returns the reply text.
    fn handle(&mut self, body: &str) -> String {
        let (head, payload) = match body.split_once("\n\n\n") {
            Some((head, payload)) => (head, Some(payload.trim())),
            None => (body, None),
        };
        let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
        let method = request_line.next().unwrap_or_default().to_string();
        let path = request_line
            .next()
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string();

        let value = payload.map(|payload| {
            let plain = strip_padding(&self.codec.decrypt(payload).unwrap());
            let document: Value = serde_json::from_slice(&plain).unwrap();
            document["value"].clone()
        });
        self.received.push(Received {
            method: method.clone(),
            path: path.clone(),
            value: value.clone(),
        });

        if method == "GET" {
            return format!(
                "HTTP/1.0 200 OK\nContent-Type: application/json\nConnection: close\n\n{}\n",
                self.codec.encrypt(&self.snapshot())
            );
        }

        if self.reject_paths.iter().any(|p| p == &path) {
            return "HTTP/1.0 400 Bad Request\nConnection: close\n\n".to_string();
        }

        let value = value.unwrap_or(Value::Null);
        match path.as_str() {
            "heatingCircuits/hc1/usermode" => {
                self.mode = value.as_str().unwrap_or_default().to_string();
            }
            "heatingCircuits/hc1/temperatureRoomManual" => {
                self.manual_temperature = value.as_f64().unwrap_or_default();
            }
            "heatingCircuits/hc1/manualTempOverride/temperature" => {
                self.override_temperature = value.as_f64().unwrap_or_default();
            }
            "heatingCircuits/hc1/manualTempOverride/status" => {
                self.override_on = value.as_str() == Some("on");
            }
            _ => return "HTTP/1.0 404 Not Found\n\n".to_string(),
        }
        "HTTP/1.0 204 No Content\nConnection: close\n\n".to_string()
    }
}

/// One connection to a [`FakeDevice`].
pub struct FakeTransport {
    device: Arc<Mutex<FakeDevice>>,
    tx: Option<mpsc::Sender<TransportEvent>>,
}

impl FakeTransport {
    pub fn new(device: &Arc<Mutex<FakeDevice>>) -> Self {
        Self {
            device: Arc::clone(device),
            tx: None,
        }
    }
}

impl Transport for FakeTransport {
    async fn connect(
        &mut self,
        target: &ConnectTarget,
        identity: &TransportIdentity,
    ) -> Result<mpsc::Receiver<TransportEvent>, ProtocolError> {
        assert!(!target.tls());
        let auth_fails = {
            let mut device = self.device.lock();
            device.sessions += 1;
            device.login = Some((
                identity.login_address().to_string(),
                identity.login_secret().to_string(),
            ));
            device.auth_fails
        };

        let (tx, rx) = mpsc::channel(8);
        tx.send(TransportEvent::Connected).await.unwrap();
        if auth_fails {
            tx.send(TransportEvent::AuthenticationFailed).await.unwrap();
        } else {
            tx.send(TransportEvent::SessionEstablished).await.unwrap();
        }
        self.tx = Some(tx);
        Ok(rx)
    }

    async fn announce_presence(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    async fn send_message(&mut self, to: &str, body: &str) -> Result<(), ProtocolError> {
        let (reply, from) = {
            let mut device = self.device.lock();
            assert_eq!(to, device.peer);
            let reply = device.handle(body);
            if device.silent {
                return Ok(());
            }
            (reply, format!("{}/RRC-RC", device.peer))
        };

        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| ProtocolError::SendFailed("not connected".to_string()))?;
        tx.send(TransportEvent::MessageReceived { from, body: reply })
            .await
            .map_err(|e| ProtocolError::SendFailed(e.to_string()))
    }

    async fn disconnect(&mut self) {
        if self.tx.take().is_some() {
            self.device.lock().disconnects += 1;
        }
    }
}
