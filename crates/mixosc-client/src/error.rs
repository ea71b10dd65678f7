use crate::address::Entity;
use crate::kind::DeviceKind;

/// Errors that can occur in client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] mixosc_transport::TransportError),

    /// Wire-level error (encoding, or a response of the wrong shape).
    #[error("wire error: {0}")]
    Wire(#[from] mixosc_wire::WireError),

    /// Send or receive was called before the engine was started.
    #[error("engine not started")]
    NotStarted,

    /// The engine was started twice.
    #[error("engine already started")]
    AlreadyStarted,

    /// The receive worker could not be spawned.
    #[error("failed to spawn receive worker: {0}")]
    Spawn(std::io::Error),

    /// The entity has no address on this device kind.
    #[error("{entity} is not addressable on {kind}")]
    UnsupportedEntity { entity: Entity, kind: DeviceKind },

    /// The entity name is not known.
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// The device kind name is not known.
    #[error("unknown device kind '{0}' (expected xair or x32)")]
    UnknownDeviceKind(String),

    /// The response does not answer the request that was sent.
    #[error("unexpected response to {expected}: got {got}")]
    UnexpectedResponse { expected: String, got: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
