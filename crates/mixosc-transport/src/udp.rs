use std::io::ErrorKind;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{Result, TransportError};

/// Receive buffer size: the largest UDP payload, so no decodable message
/// (blobs up to 9999 bytes) is ever cut off.
pub const MAX_DATAGRAM_SIZE: usize = 65536;

/// A bound UDP socket paired with the mixer it talks to.
///
/// The local side is always an ephemeral port on the unspecified address of
/// the same family as the remote. The socket is left unconnected so that
/// ICMP unreachable noise from an absent mixer never surfaces as a receive
/// error.
#[derive(Debug)]
pub struct UdpEndpoint {
    socket: UdpSocket,
    remote: SocketAddr,
}

impl UdpEndpoint {
    /// Resolve `host:port` and bind an ephemeral local socket for it.
    pub fn bind(host: &str, port: u16) -> Result<Self> {
        let target = format!("{host}:{port}");
        let remote = (host, port)
            .to_socket_addrs()
            .map_err(|e| TransportError::Resolve {
                target: target.clone(),
                source: e,
            })?
            .next()
            .ok_or_else(|| TransportError::Resolve {
                target: target.clone(),
                source: std::io::Error::new(ErrorKind::NotFound, "no addresses found"),
            })?;

        let local = match remote {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket =
            UdpSocket::bind(local).map_err(|e| TransportError::Bind { addr: local, source: e })?;

        debug!(%remote, local = ?socket.local_addr().ok(), "bound udp endpoint");

        Ok(Self { socket, remote })
    }

    /// Write one datagram to the remote endpoint.
    pub fn send(&self, datagram: &[u8]) -> Result<()> {
        let written = self.socket.send_to(datagram, self.remote)?;
        if written != datagram.len() {
            return Err(TransportError::ShortWrite {
                written,
                len: datagram.len(),
            });
        }
        trace!(remote = %self.remote, len = written, "sent datagram");
        Ok(())
    }

    /// Receive one datagram into `buf`.
    ///
    /// Returns `Ok(None)` when the read timeout elapses without data.
    pub fn recv(&self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>> {
        loop {
            match self.socket.recv_from(buf) {
                Ok((n, from)) => {
                    trace!(%from, len = n, "received datagram");
                    return Ok(Some((n, from)));
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                // Windows surfaces ICMP port-unreachable from an earlier send here.
                Err(err) if err.kind() == ErrorKind::ConnectionReset => continue,
                Err(err) if is_timeout(err.kind()) => return Ok(None),
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }

    /// Set the read deadline used by [`recv`](Self::recv).
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.socket.set_read_timeout(timeout).map_err(Into::into)
    }

    /// Try to clone this endpoint (creates a new file descriptor).
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            socket: self.socket.try_clone()?,
            remote: self.remote,
        })
    }

    /// The resolved mixer address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    /// The local ephemeral address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Into::into)
    }
}

/// Whether an I/O error kind is a read deadline expiring.
///
/// Unix reports `WouldBlock`, Windows reports `TimedOut`.
pub fn is_timeout(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
