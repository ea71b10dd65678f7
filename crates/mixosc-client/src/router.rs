use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossbeam_channel::{
    bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError,
};
use mixosc_transport::TransportError;
use mixosc_wire::Message;

use crate::error::Result;

/// Bounded FIFO of decoded responses between the receive worker and callers.
///
/// Delivery is strictly in arrival order and is not correlated with the
/// request that caused a response. A caller that keeps one request
/// outstanding and drains its answer before the next gets its own answer;
/// with several concurrent consumers, whoever waits gets the next arrival.
///
/// When full, the oldest queued message is displaced so the producer never
/// blocks. Closing drops the only sender, which disconnects the channel
/// and wakes every waiting receiver.
#[derive(Debug)]
pub struct ResponseRouter {
    tx: Mutex<Option<Sender<Message>>>,
    rx: Receiver<Message>,
    closed: AtomicBool,
    displaced: AtomicU64,
    capacity: usize,
}

impl ResponseRouter {
    /// Create a router holding at most `capacity` messages (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = bounded(capacity);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
            closed: AtomicBool::new(false),
            displaced: AtomicU64::new(0),
            capacity,
        }
    }

    /// Queue a message, returning the oldest one if it had to be displaced.
    ///
    /// Messages pushed after [`close`](Self::close) are dropped.
    pub fn push(&self, msg: Message) -> Option<Message> {
        let tx = self.sender();
        let tx = tx.as_ref()?;
        match tx.try_send(msg) {
            Ok(()) => None,
            Err(TrySendError::Full(msg)) => {
                // The sender lock serializes producers, so one slot frees up
                // unless a consumer already took the head.
                let oldest = self.rx.try_recv().ok();
                if oldest.is_some() {
                    self.displaced.fetch_add(1, Ordering::Relaxed);
                }
                let _ = tx.try_send(msg);
                oldest
            }
            Err(TrySendError::Disconnected(_)) => None,
        }
    }

    /// Wait up to `timeout` for the next message.
    ///
    /// Returns `Ok(None)` when the window elapses and
    /// `Err(TransportError::Shutdown)` once the router is closed.
    pub fn pop_timeout(&self, timeout: Duration) -> Result<Option<Message>> {
        self.ensure_open()?;
        match self.rx.recv_timeout(timeout) {
            Ok(msg) if !self.is_closed() => Ok(Some(msg)),
            Ok(_) | Err(RecvTimeoutError::Disconnected) => Err(TransportError::Shutdown.into()),
            Err(RecvTimeoutError::Timeout) => Ok(None),
        }
    }

    /// Take the next message without waiting.
    pub fn try_pop(&self) -> Result<Option<Message>> {
        self.ensure_open()?;
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::Shutdown.into()),
        }
    }

    /// Close the router and wake every waiting caller.
    ///
    /// Queued messages are abandoned, not drained.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.sender().take();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total messages displaced by a full queue.
    pub fn displaced(&self) -> u64 {
        self.displaced.load(Ordering::Relaxed)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(TransportError::Shutdown.into());
        }
        Ok(())
    }

    fn sender(&self) -> MutexGuard<'_, Option<Sender<Message>>> {
        self.tx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
