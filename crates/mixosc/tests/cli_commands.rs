#![cfg(feature = "cli")]

use std::net::UdpSocket;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use mixosc::wire::{decode_message, Argument, Message};

/// Loopback mixer that records every request and answers queries.
///
/// `/xinfo` gets an identification reply, bare queries on `/ch/..` get a
/// fader level, addresses under `/silent` are never answered.
struct FakeMixer {
    port: u16,
    received: Arc<Mutex<Vec<Message>>>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeMixer {
    fn start() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind fake mixer");
        socket
            .set_read_timeout(Some(Duration::from_millis(50)))
            .expect("set read timeout");
        let port = socket.local_addr().expect("local addr").port();
        let received = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let received = Arc::clone(&received);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut buf = [0u8; 1024];
                while !stop.load(Ordering::SeqCst) {
                    let Ok((n, from)) = socket.recv_from(&mut buf) else {
                        continue;
                    };
                    let Ok(request) = decode_message(&buf[..n]) else {
                        continue;
                    };
                    received.lock().expect("lock").push(request.clone());

                    let reply = match request.address() {
                        "/xinfo" => Some(Message::new(
                            "/xinfo",
                            vec![
                                Argument::from("192.168.1.20"),
                                Argument::from("XR18-5E-91-7A"),
                                Argument::from("XR18"),
                                Argument::from("1.18"),
                            ],
                        )),
                        addr if addr.starts_with("/silent") => None,
                        addr if request.args().is_empty() => {
                            Some(Message::new(addr, vec![Argument::Float(0.75)]))
                        }
                        _ => None,
                    };
                    if let Some(reply) = reply {
                        let bytes = reply.to_bytes().expect("encode reply");
                        let _ = socket.send_to(&bytes, from);
                    }
                }
            })
        };

        Self {
            port,
            received,
            stop,
            handle: Some(handle),
        }
    }

    fn received(&self) -> Vec<Message> {
        self.received.lock().expect("lock").clone()
    }
}

impl Drop for FakeMixer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn mixosc(mixer: &FakeMixer, timeout: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mixosc"));
    cmd.env_remove("MIXOSC_HOST")
        .env_remove("MIXOSC_PORT")
        .env_remove("MIXOSC_KIND")
        .env_remove("MIXOSC_TIMEOUT")
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg(mixer.port.to_string())
        .arg("--timeout")
        .arg(timeout);
    cmd
}

#[test]
fn info_prints_device_identification() {
    let mixer = FakeMixer::start();
    let output = mixosc(&mixer, "2s").arg("info").output().expect("info should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"model\":\"XR18\""));
    assert!(stdout.contains("\"kind\":\"xair\""));
}

#[test]
fn get_prints_reply_arguments() {
    let mixer = FakeMixer::start();
    let output = mixosc(&mixer, "2s")
        .args(["get", "/ch/01/mix/fader"])
        .output()
        .expect("get should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"address\":\"/ch/01/mix/fader\""));
    assert!(stdout.contains("\"type_tags\":\",f\""));
    assert!(stdout.contains("0.75"));
}

#[test]
fn fader_read_converts_to_db() {
    let mixer = FakeMixer::start();
    let output = mixosc(&mixer, "2s")
        .args(["fader", "strip", "1"])
        .output()
        .expect("fader should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"address\":\"/ch/01/mix/fader\""));
    assert!(stdout.contains("\"value\":0.0"));
}

#[test]
fn fader_set_sends_taper_level() {
    let mixer = FakeMixer::start();
    let output = mixosc(&mixer, "2s")
        .args(["--kind", "x32", "fader", "bus", "3", "--set", "-10"])
        .output()
        .expect("fader should run");
    assert!(output.status.success());

    thread::sleep(Duration::from_millis(100));
    let sent = mixer.received();
    let set = sent
        .iter()
        .find(|m| m.address() == "/bus/03/mix/fader")
        .expect("fader set should reach the mixer");
    assert_eq!(set.float_at(0).expect("float level"), 0.5);
}

#[test]
fn send_types_arguments() {
    let mixer = FakeMixer::start();
    let output = mixosc(&mixer, "2s")
        .args(["send", "/ch/02/config/name", "s:Vox", "3", "0.25"])
        .output()
        .expect("send should run");
    assert!(output.status.success());

    thread::sleep(Duration::from_millis(100));
    let sent = mixer.received();
    let msg = sent
        .iter()
        .find(|m| m.address() == "/ch/02/config/name")
        .expect("message should reach the mixer");
    assert_eq!(msg.type_tags(), ",sif");
}

#[test]
fn get_without_reply_returns_124() {
    let mixer = FakeMixer::start();
    let output = mixosc(&mixer, "200ms")
        .args(["get", "/silent"])
        .output()
        .expect("get should run");

    assert_eq!(output.status.code(), Some(124));
}

#[test]
fn missing_host_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_mixosc"))
        .env_remove("MIXOSC_HOST")
        .arg("info")
        .output()
        .expect("info should run");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_reports_name() {
    let output = Command::new(env!("CARGO_BIN_EXE_mixosc"))
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("mixosc "));
}

#[test]
fn extended_version_reports_only_known_provenance() {
    let output = Command::new(env!("CARGO_BIN_EXE_mixosc"))
        .args(["version", "--extended"])
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: mixosc"));
    assert!(stdout.contains("features: client=true"));
    assert!(!stdout.contains("unknown"), "{stdout}");
}
