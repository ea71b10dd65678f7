use std::time::Duration;

use mixosc_units::Param;
use mixosc_wire::{Argument, Message};
use tracing::debug;

use crate::address::AddressResolver;
use crate::engine::{Engine, EngineConfig};
use crate::error::{ClientError, Result};
use crate::kind::DeviceKind;

/// Identification query; the mixer answers with ip, name, model and firmware.
pub const XINFO: &str = "/xinfo";

/// Subscribes this client to unsolicited parameter updates for ~10 s.
pub const XREMOTE: &str = "/xremote";

/// Configuration for connecting a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Mixer host name or IP address.
    pub host: String,
    /// Mixer OSC port. Default: the device kind's port.
    pub port: Option<u16>,
    /// Mixer family.
    pub kind: DeviceKind,
    /// Transport engine tuning.
    pub engine: EngineConfig,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            host: host.into(),
            port: None,
            kind,
            engine: EngineConfig::default(),
        }
    }

    /// The port to use, falling back to the device kind's default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.kind.default_port())
    }
}

/// Identification reported by `/xinfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub ip: String,
    pub name: String,
    pub model: String,
    pub firmware: String,
}

impl DeviceInfo {
    /// Parse an `/xinfo` reply (`,ssss`).
    pub fn from_message(msg: &Message) -> Result<Self> {
        expect_address(XINFO, msg)?;
        Ok(Self {
            ip: msg.str_at(0)?.to_string(),
            name: msg.str_at(1)?.to_string(),
            model: msg.str_at(2)?.to_string(),
            firmware: msg.str_at(3)?.to_string(),
        })
    }
}

/// Request/response facade over a running [`Engine`].
///
/// Responses come back in arrival order with no correlation to requests.
/// Issue one request, drain its response, then issue the next; pipelining
/// requests may hand one request another request's answer.
#[derive(Debug)]
pub struct Client {
    engine: Engine,
}

impl Client {
    /// Connect to a mixer. `port` defaults to the kind's port.
    pub fn connect(host: &str, port: Option<u16>, kind: DeviceKind) -> Result<Self> {
        let mut config = ClientConfig::new(host, kind);
        config.port = port;
        Self::with_config(&config)
    }

    /// Connect with explicit configuration.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let engine = Engine::new(
            &config.host,
            config.port(),
            config.kind,
            config.engine.clone(),
        )?;
        engine.start()?;
        debug!(host = %config.host, port = config.port(), kind = %config.kind, "client connected");
        Ok(Self { engine })
    }

    /// Send one message. Never waits for a reply.
    pub fn send(&self, address: &str, args: &[Argument]) -> Result<()> {
        self.engine.send(address, args)
    }

    /// Wait up to `timeout` for the next response; `Ok(None)` if none came.
    pub fn receive(&self, timeout: Duration) -> Result<Option<Message>> {
        self.engine.receive(timeout)
    }

    pub fn device_kind(&self) -> DeviceKind {
        self.engine.kind()
    }

    pub fn resolver(&self) -> &AddressResolver {
        self.engine.resolver()
    }

    /// Send, then wait for the next response.
    pub fn request(
        &self,
        address: &str,
        args: &[Argument],
        timeout: Duration,
    ) -> Result<Option<Message>> {
        self.send(address, args)?;
        self.receive(timeout)
    }

    /// Read a parameter: send the bare address and wait for its value.
    pub fn query(&self, address: &str, timeout: Duration) -> Result<Option<Message>> {
        self.request(address, &[], timeout)
    }

    /// Ask the mixer to identify itself.
    pub fn info(&self, timeout: Duration) -> Result<Option<DeviceInfo>> {
        self.query(XINFO, timeout)?
            .map(|msg| DeviceInfo::from_message(&msg))
            .transpose()
    }

    /// Subscribe to unsolicited updates. Must be renewed every few seconds.
    pub fn remote(&self) -> Result<()> {
        self.send(XREMOTE, &[])
    }

    /// Query a continuous parameter and convert it to its human unit.
    pub fn get_param(&self, address: &str, param: Param, timeout: Duration) -> Result<Option<f64>> {
        let Some(msg) = self.query(address, timeout)? else {
            return Ok(None);
        };
        expect_address(address, &msg)?;
        Ok(Some(param.from_wire(msg.float_at(0)?)))
    }

    /// Convert a human value to its wire float and send it.
    pub fn set_param(&self, address: &str, param: Param, value: f64) -> Result<()> {
        self.send(address, &[Argument::Float(param.to_wire(value))])
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Stop the engine. Later calls fail with a shutdown error.
    pub fn close(&self) {
        self.engine.stop();
    }
}

fn expect_address(expected: &str, msg: &Message) -> Result<()> {
    if msg.address() != expected {
        return Err(ClientError::UnexpectedResponse {
            expected: expected.to_string(),
            got: msg.address().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::net::UdpSocket;
    use std::thread;

    use mixosc_transport::TransportError;
    use mixosc_wire::{decode_message, WireError};

    use super::*;

    /// Answers each request once via `reply`, then exits.
    fn one_shot_mixer<F>(reply: F) -> (u16, thread::JoinHandle<()>)
    where
        F: FnOnce(Message) -> Option<Message> + Send + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = socket.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let mut buf = [0u8; 1024];
            let (n, from) = socket.recv_from(&mut buf).unwrap();
            let request = decode_message(&buf[..n]).unwrap();
            if let Some(response) = reply(request) {
                socket
                    .send_to(&response.to_bytes().unwrap(), from)
                    .unwrap();
            }
        });
        (port, handle)
    }

    #[test]
    fn config_port_defaults_per_kind() {
        assert_eq!(ClientConfig::new("mixer", DeviceKind::XAir).port(), 10024);
        assert_eq!(ClientConfig::new("mixer", DeviceKind::X32).port(), 10023);
        let mut config = ClientConfig::new("mixer", DeviceKind::X32);
        config.port = Some(9000);
        assert_eq!(config.port(), 9000);
    }

    #[test]
    fn info_parses_xinfo_reply() {
        let (port, mixer) = one_shot_mixer(|req| {
            assert_eq!(req.address(), XINFO);
            Some(Message::new(
                XINFO,
                vec![
                    Argument::from("192.168.1.20"),
                    Argument::from("XR18-5E-91-7A"),
                    Argument::from("XR18"),
                    Argument::from("1.18"),
                ],
            ))
        });
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::XAir).unwrap();

        let info = client.info(Duration::from_secs(2)).unwrap().unwrap();
        assert_eq!(info.model, "XR18");
        assert_eq!(info.firmware, "1.18");
        mixer.join().unwrap();
    }

    #[test]
    fn info_without_reply_is_none() {
        let (port, mixer) = one_shot_mixer(|_| None);
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::XAir).unwrap();

        assert!(client.info(Duration::from_millis(100)).unwrap().is_none());
        mixer.join().unwrap();
    }

    #[test]
    fn get_param_converts_fader() {
        let (port, mixer) = one_shot_mixer(|req| {
            Some(Message::new(req.address(), vec![Argument::Float(0.75)]))
        });
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::XAir).unwrap();

        let address = client
            .resolver()
            .resolve_path(crate::Entity::Strip, 1, "mix/fader")
            .unwrap();
        let db = client
            .get_param(&address, Param::Fader, Duration::from_secs(2))
            .unwrap();
        assert_eq!(db, Some(0.0));
        mixer.join().unwrap();
    }

    #[test]
    fn get_param_rejects_wrong_type() {
        let (port, mixer) =
            one_shot_mixer(|req| Some(Message::new(req.address(), vec![Argument::Int(1)])));
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::XAir).unwrap();

        let err = client
            .get_param("/lr/mix/fader", Param::Fader, Duration::from_secs(2))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Wire(WireError::TypeMismatch {
                expected: 'f',
                found: 'i'
            })
        ));
        mixer.join().unwrap();
    }

    #[test]
    fn get_param_rejects_foreign_address() {
        let (port, mixer) =
            one_shot_mixer(|_| Some(Message::new("/bus/1/mix/fader", vec![Argument::Float(0.1)])));
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::XAir).unwrap();

        let err = client
            .get_param("/lr/mix/fader", Param::Fader, Duration::from_secs(2))
            .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedResponse { .. }));
        mixer.join().unwrap();
    }

    #[test]
    fn set_param_sends_normalized_float() {
        let (tx, rx) = std::sync::mpsc::channel();
        let (port, mixer) = one_shot_mixer(move |req| {
            tx.send(req).unwrap();
            None
        });
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::X32).unwrap();

        client
            .set_param("/ch/01/eq/1/g", Param::EqGain, 0.0)
            .unwrap();
        mixer.join().unwrap();

        let sent = rx.recv().unwrap();
        assert_eq!(sent.address(), "/ch/01/eq/1/g");
        assert_eq!(sent.float_at(0).unwrap(), 0.5);
    }

    #[test]
    fn closed_client_fails_cleanly() {
        let (port, mixer) = one_shot_mixer(|_| None);
        let client = Client::connect("127.0.0.1", Some(port), DeviceKind::XAir).unwrap();
        client.remote().unwrap();
        mixer.join().unwrap();

        client.close();
        assert!(matches!(
            client.send(XREMOTE, &[]),
            Err(ClientError::Transport(TransportError::Shutdown))
        ));
    }
}
