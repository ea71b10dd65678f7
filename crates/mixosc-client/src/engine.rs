use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use mixosc_transport::{TransportError, UdpEndpoint, MAX_DATAGRAM_SIZE};
use mixosc_wire::{decode_message_partial, Argument, Decoded, Message};
use tracing::{debug, error, trace, warn};

use crate::address::AddressResolver;
use crate::error::{ClientError, Result};
use crate::kind::DeviceKind;
use crate::router::ResponseRouter;

/// Default read deadline of the receive worker.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default response queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Smallest receive buffer that holds any message the codec can decode:
/// a 10000-byte blob plus address, tags and length prefix.
pub const MIN_DATAGRAM_SIZE: usize = 16 * 1024;

/// Configuration for the transport engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Read deadline of the receive worker; bounds shutdown latency.
    pub poll_interval: Duration,
    /// Maximum queued responses before the oldest is displaced.
    pub queue_capacity: usize,
    /// Receive buffer size; longer datagrams are truncated by the OS.
    /// Values below [`MIN_DATAGRAM_SIZE`] are raised to it.
    pub max_datagram_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_datagram_size: MAX_DATAGRAM_SIZE,
        }
    }
}

/// Engine lifecycle. Transitions only move forward; there is no restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Constructed,
    Started,
    Stopped,
}

struct Lifecycle {
    state: EngineState,
    worker: Option<JoinHandle<()>>,
}

/// Owns the UDP endpoint and the background receive worker.
///
/// Sends run on the caller's thread. One worker thread reads the socket
/// with a short deadline, decodes each datagram and queues it on the
/// [`ResponseRouter`]. Malformed datagrams are logged and dropped; only a
/// socket error ends the worker.
pub struct Engine {
    kind: DeviceKind,
    resolver: AddressResolver,
    remote: SocketAddr,
    config: EngineConfig,
    endpoint: Mutex<Option<UdpEndpoint>>,
    router: Arc<ResponseRouter>,
    shutdown: Arc<AtomicBool>,
    lifecycle: Mutex<Lifecycle>,
}

impl Engine {
    /// Resolve the mixer, bind an ephemeral local socket and pick the
    /// address table for `kind`. Nothing is spawned until [`start`](Self::start).
    pub fn new(host: &str, port: u16, kind: DeviceKind, config: EngineConfig) -> Result<Self> {
        let endpoint = UdpEndpoint::bind(host, port)?;
        endpoint.set_read_timeout(Some(config.poll_interval.max(MIN_POLL_INTERVAL)))?;
        let remote = endpoint.remote_addr();

        debug!(%remote, %kind, "engine constructed");

        Ok(Self {
            kind,
            resolver: AddressResolver::new(kind),
            remote,
            router: Arc::new(ResponseRouter::new(config.queue_capacity)),
            config,
            endpoint: Mutex::new(Some(endpoint)),
            shutdown: Arc::new(AtomicBool::new(false)),
            lifecycle: Mutex::new(Lifecycle {
                state: EngineState::Constructed,
                worker: None,
            }),
        })
    }

    /// Spawn the receive worker.
    pub fn start(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle();
        match lifecycle.state {
            EngineState::Started => return Err(ClientError::AlreadyStarted),
            EngineState::Stopped => return Err(TransportError::Shutdown.into()),
            EngineState::Constructed => {}
        }

        let endpoint = match self.endpoint().as_ref() {
            Some(endpoint) => endpoint.try_clone()?,
            None => return Err(TransportError::Shutdown.into()),
        };
        let router = Arc::clone(&self.router);
        let shutdown = Arc::clone(&self.shutdown);
        let buf_len = self.config.max_datagram_size.max(MIN_DATAGRAM_SIZE);

        let worker = std::thread::Builder::new()
            .name("mixosc-recv".to_string())
            .spawn(move || receive_loop(endpoint, router, shutdown, buf_len))
            .map_err(ClientError::Spawn)?;

        lifecycle.worker = Some(worker);
        lifecycle.state = EngineState::Started;
        debug!(remote = %self.remote, "engine started");
        Ok(())
    }

    /// Encode and send one message. Does not wait for a response.
    pub fn send(&self, address: &str, args: &[Argument]) -> Result<()> {
        self.send_message(&Message::new(address, args.to_vec()))
    }

    /// Send a prepared message.
    pub fn send_message(&self, msg: &Message) -> Result<()> {
        self.ensure_started()?;
        let datagram = msg.to_bytes()?;

        match self.endpoint().as_ref() {
            Some(endpoint) => endpoint.send(&datagram)?,
            None => return Err(TransportError::Shutdown.into()),
        }
        debug!(address = msg.address(), tags = %msg.type_tags(), "sent");
        Ok(())
    }

    /// Wait up to `timeout` for the next queued response.
    ///
    /// `Ok(None)` means nothing arrived in time, which is normal for
    /// writes the mixer does not acknowledge.
    pub fn receive(&self, timeout: Duration) -> Result<Option<Message>> {
        self.ensure_started()?;
        self.router.pop_timeout(timeout)
    }

    /// Stop the worker and close the socket. Safe to call more than once.
    ///
    /// Callers blocked in [`receive`](Self::receive) are woken with a
    /// shutdown error; the worker exits within one poll interval.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state == EngineState::Stopped {
            return;
        }

        self.shutdown.store(true, Ordering::Release);
        self.router.close();
        self.endpoint().take();

        if let Some(worker) = lifecycle.worker.take() {
            if worker.join().is_err() {
                warn!("receive worker panicked");
            }
        }
        lifecycle.state = EngineState::Stopped;
        debug!(remote = %self.remote, "engine stopped");
    }

    pub fn state(&self) -> EngineState {
        self.lifecycle().state
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    /// Local ephemeral address; fails once stopped.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        match self.endpoint().as_ref() {
            Some(endpoint) => Ok(endpoint.local_addr()?),
            None => Err(TransportError::Shutdown.into()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of responses waiting in the router.
    pub fn pending(&self) -> usize {
        self.router.len()
    }

    /// Shared handle to the response router.
    pub fn router(&self) -> &Arc<ResponseRouter> {
        &self.router
    }

    fn ensure_started(&self) -> Result<()> {
        match self.lifecycle().state {
            EngineState::Started => Ok(()),
            EngineState::Constructed => Err(ClientError::NotStarted),
            EngineState::Stopped => Err(TransportError::Shutdown.into()),
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn endpoint(&self) -> MutexGuard<'_, Option<UdpEndpoint>> {
        self.endpoint.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("kind", &self.kind)
            .field("remote", &self.remote)
            .field("state", &self.state())
            .field("pending", &self.pending())
            .finish()
    }
}

fn receive_loop(
    endpoint: UdpEndpoint,
    router: Arc<ResponseRouter>,
    shutdown: Arc<AtomicBool>,
    buf_len: usize,
) {
    let mut buf = vec![0u8; buf_len];
    debug!("receive loop running");

    while !shutdown.load(Ordering::Acquire) {
        let (len, from) = match endpoint.recv(&mut buf) {
            Ok(Some(received)) => received,
            Ok(None) => continue,
            Err(err) => {
                if !shutdown.load(Ordering::Acquire) {
                    error!(%err, "receive loop exiting on socket error");
                }
                break;
            }
        };
        if len == buf.len() {
            warn!(%from, len, "datagram filled the receive buffer; it was probably cut off");
        }

        match decode_message_partial(&buf[..len]) {
            Ok(Decoded { message, halted }) => {
                if let Some(err) = halted {
                    debug!(%from, address = message.address(), %err, "argument decoding stopped early");
                }
                trace!(%from, %message, "queued response");
                if let Some(old) = router.push(message) {
                    warn!(
                        displaced = old.address(),
                        capacity = router.capacity(),
                        "response queue full; dropped oldest"
                    );
                }
            }
            Err(err) => debug!(%from, len, %err, "dropping malformed datagram"),
        }
    }

    router.close();
    debug!("receive loop stopped");
}
