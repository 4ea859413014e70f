// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the thermostat facade against an in-memory device.

mod common;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::json;
use wavetherm_lib::{
    BoilerActivity, DeviceError, Error, ProtocolError, Thermostat, ThermostatBuilder, UserMode,
    ValueError,
};

use common::{FakeDevice, FakeTransport, credentials};

type FakeFactory = Box<dyn Fn() -> FakeTransport>;

fn thermostat() -> (Thermostat<FakeFactory>, Arc<Mutex<FakeDevice>>) {
    let device = FakeDevice::new(&credentials());
    let handle = Arc::clone(&device);
    let factory: FakeFactory = Box::new(move || FakeTransport::new(&handle));
    (Thermostat::new(credentials(), factory), device)
}

// ============================================================================
// Status
// ============================================================================

mod status {
    use super::*;

    #[tokio::test]
    async fn fixture_maps_to_named_fields() {
        let (thermostat, device) = thermostat();
        device.lock().status_fixture =
            Some(json!({"IHT": "19.5", "TSP": "21.0", "UMD": "manual", "BAI": "CH"}));

        let status = thermostat.get_status().await.unwrap();

        assert_eq!(status.current_temperature, Some(19.5));
        assert_eq!(status.set_point, Some(21.0));
        assert_eq!(status.program_mode.as_deref(), Some("manual"));
        assert_eq!(status.boiler_activity, Some(BoilerActivity::CentralHeating));
        assert_eq!(status.is_boiler_on(), Some(true));
        assert_eq!(status.is_hot_water_enabled, None);
    }

    #[tokio::test]
    async fn session_uses_derived_identity() {
        let (thermostat, device) = thermostat();
        thermostat.get_status().await.unwrap();

        let device = device.lock();
        assert_eq!(device.sessions, 1);
        assert_eq!(device.disconnects, 1);
        assert_eq!(
            device.login,
            Some((
                "rrccontact_458921440@wa2-mz36-qrmzh6.bosch.de".to_string(),
                "Ct7ZR03b_AbCdEfGhIjKlMnOp".to_string()
            ))
        );
        assert_eq!(device.received[0].method, "GET");
        assert_eq!(device.received[0].path, "ecus/rrc/uiStatus");
    }

    #[tokio::test]
    async fn last_status_is_cached() {
        let (thermostat, device) = thermostat();
        assert!(thermostat.last_status().is_none());

        let status = thermostat.get_status().await.unwrap();
        assert_eq!(thermostat.last_status(), Some(status));
        assert_eq!(
            thermostat
                .last_status()
                .unwrap()
                .device_time
                .unwrap()
                .weekday_token(),
            Some("Mo")
        );

        device.lock().auth_fails = true;
        assert!(thermostat.get_status().await.is_err());
        assert!(thermostat.last_status().is_some());
    }

    #[tokio::test]
    async fn non_object_status_is_parse_error() {
        let (thermostat, device) = thermostat();
        device.lock().status_fixture = Some(json!("busy"));

        let err = thermostat.get_status().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}

// ============================================================================
// Temperature
// ============================================================================

mod temperature {
    use super::*;

    #[tokio::test]
    async fn manual_mode_writes_manual_set_point() {
        let (thermostat, device) = thermostat();
        device.lock().mode = "manual".to_string();

        thermostat.set_temperature(21.5).await.unwrap();

        let device = device.lock();
        assert_eq!(
            device.puts(),
            vec![(
                "heatingCircuits/hc1/temperatureRoomManual".to_string(),
                json!(21.5)
            )]
        );
        assert_eq!(device.manual_temperature, 21.5);
        assert_eq!(device.sessions, 2);
    }

    #[tokio::test]
    async fn clock_mode_writes_override_then_enables_it() {
        let (thermostat, device) = thermostat();

        thermostat.set_temperature(22.0).await.unwrap();

        let device = device.lock();
        assert_eq!(
            device.puts(),
            vec![
                (
                    "heatingCircuits/hc1/manualTempOverride/temperature".to_string(),
                    json!(22.0)
                ),
                (
                    "heatingCircuits/hc1/manualTempOverride/status".to_string(),
                    json!("on")
                ),
            ]
        );
        assert!(device.override_on);
        assert_eq!(device.override_temperature, 22.0);
        assert_eq!(device.sessions, 3);
        assert_eq!(device.disconnects, 3);
    }

    #[tokio::test]
    async fn rejected_override_skips_status_write() {
        let (thermostat, device) = thermostat();
        device
            .lock()
            .reject_paths
            .push("heatingCircuits/hc1/manualTempOverride/temperature".to_string());

        let err = thermostat.set_temperature(22.0).await.unwrap_err();

        assert!(matches!(err, Error::Device(DeviceError::CommandRejected(_))));
        let device = device.lock();
        assert_eq!(device.puts().len(), 1);
        assert!(!device.override_on);
    }

    #[tokio::test]
    async fn non_finite_temperature_opens_no_session() {
        let (thermostat, device) = thermostat();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = thermostat.set_temperature(bad).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::NonFiniteTemperature(_))
            ));
        }
        assert_eq!(device.lock().sessions, 0);
    }
}

// ============================================================================
// Mode and override
// ============================================================================

mod settings {
    use super::*;

    #[tokio::test]
    async fn set_mode_writes_device_token() {
        let (thermostat, device) = thermostat();

        thermostat.set_mode(UserMode::Manual).await.unwrap();

        let device = device.lock();
        assert_eq!(device.mode, "manual");
        assert_eq!(
            device.puts(),
            vec![("heatingCircuits/hc1/usermode".to_string(), json!("manual"))]
        );
    }

    #[tokio::test]
    async fn set_override_off() {
        let (thermostat, device) = thermostat();
        device.lock().override_on = true;

        thermostat.set_override(false).await.unwrap();

        let device = device.lock();
        assert!(!device.override_on);
        assert_eq!(device.sessions, 1);
        assert_eq!(device.puts()[0].1, json!("off"));
    }

    #[tokio::test]
    async fn mode_reported_after_change() {
        let (thermostat, _device) = thermostat();

        thermostat.set_mode(UserMode::Manual).await.unwrap();
        let status = thermostat.get_status().await.unwrap();

        assert_eq!(status.user_mode(), Some(UserMode::Manual));
        assert!(status.is_manual());
    }

    #[tokio::test]
    async fn rejected_mode_is_device_error() {
        let (thermostat, device) = thermostat();
        device
            .lock()
            .reject_paths
            .push("heatingCircuits/hc1/usermode".to_string());

        let err = thermostat.set_mode(UserMode::Clock).await.unwrap_err();
        match err {
            Error::Device(DeviceError::CommandRejected(status)) => {
                assert_eq!(status, "HTTP/1.0 400 Bad Request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn silent_device_times_out() {
        let (thermostat, device) = thermostat();
        device.lock().silent = true;

        let started = tokio::time::Instant::now();
        let err = thermostat.get_status().await.unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(15_000))));
        assert!(started.elapsed() >= Duration::from_secs(15));
        assert_eq!(device.lock().disconnects, 1);
        assert!(thermostat.last_status().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_timeout_applies() {
        let device = FakeDevice::new(&credentials());
        device.lock().silent = true;
        let handle = Arc::clone(&device);
        let thermostat = ThermostatBuilder::new(credentials())
            .with_timeout(Duration::from_secs(3))
            .build(move || FakeTransport::new(&handle));

        let err = thermostat.set_override(true).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(3_000))));
    }

    #[tokio::test]
    async fn authentication_failure_is_reported() {
        let (thermostat, device) = thermostat();
        device.lock().auth_fails = true;

        let err = thermostat.get_status().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationFailed)
        ));
        let device = device.lock();
        assert!(device.received.is_empty());
        assert_eq!(device.disconnects, 1);
    }

    #[tokio::test]
    async fn authentication_failure_stops_set_temperature() {
        let (thermostat, device) = thermostat();
        device.lock().auth_fails = true;

        assert!(thermostat.set_temperature(20.0).await.is_err());
        assert_eq!(device.lock().sessions, 1);
    }
}

// ============================================================================
// Blocking API
// ============================================================================

mod blocking {
    use tokio::sync::mpsc;
    use wavetherm_lib::credentials::TransportIdentity;
    use wavetherm_lib::protocol::{ConnectTarget, Transport, TransportEvent};

    use super::*;

    #[test]
    fn blocking_calls_drive_sessions() {
        let device = FakeDevice::new(&credentials());
        device.lock().mode = "manual".to_string();
        let handle = Arc::clone(&device);
        let thermostat = ThermostatBuilder::new(credentials())
            .build_blocking(move || FakeTransport::new(&handle))
            .unwrap();

        let status = thermostat.get_status().unwrap();
        assert_eq!(status.program_mode.as_deref(), Some("manual"));
        assert_eq!(thermostat.last_status(), Some(status));

        thermostat.set_temperature(19.0).unwrap();
        thermostat.set_mode(UserMode::Clock).unwrap();
        thermostat.set_override(true).unwrap();

        let device = device.lock();
        assert_eq!(device.manual_temperature, 19.0);
        assert_eq!(device.mode, "clock");
        assert!(device.override_on);
        assert_eq!(device.sessions, 5);
    }

    /// Opens a real socket before handing over to the in-memory device.
    struct SocketTransport {
        addr: std::net::SocketAddr,
        stream: Option<tokio::net::TcpStream>,
        inner: FakeTransport,
    }

    impl Transport for SocketTransport {
        async fn connect(
            &mut self,
            target: &ConnectTarget,
            identity: &TransportIdentity,
        ) -> Result<mpsc::Receiver<TransportEvent>, ProtocolError> {
            let stream = tokio::net::TcpStream::connect(self.addr)
                .await
                .map_err(|err| ProtocolError::ConnectionFailed(err.to_string()))?;
            self.stream = Some(stream);
            self.inner.connect(target, identity).await
        }

        async fn announce_presence(&mut self) -> Result<(), ProtocolError> {
            self.inner.announce_presence().await
        }

        async fn send_message(&mut self, to: &str, body: &str) -> Result<(), ProtocolError> {
            self.inner.send_message(to, body).await
        }

        async fn disconnect(&mut self) {
            self.stream = None;
            self.inner.disconnect().await;
        }
    }

    #[test]
    fn blocking_runtime_supports_socket_transports() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let device = FakeDevice::new(&credentials());
        let handle = Arc::clone(&device);
        let thermostat = ThermostatBuilder::new(credentials())
            .build_blocking(move || SocketTransport {
                addr,
                stream: None,
                inner: FakeTransport::new(&handle),
            })
            .unwrap();

        let status = thermostat.get_status().unwrap();
        assert!(status.set_point.is_some());
        assert_eq!(device.lock().sessions, 1);
        drop(listener);
    }
}
