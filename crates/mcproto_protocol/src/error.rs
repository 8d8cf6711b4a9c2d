use thiserror::Error;

use crate::{PacketDirection, PacketState};

/// The error taxonomy surfaced by the codec and framing layers.
///
/// Every variant that can be tied to a concrete packet carries enough
/// context (protocol version, state, id, direction) to be logged
/// unambiguously; nothing in this crate swallows an error silently.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(
        "unknown packet id {id:#04x} (protocol {protocol}, state {state:?}, direction {direction:?})"
    )]
    UnknownPacketId {
        protocol: i32,
        state: PacketState,
        id: i32,
        direction: PacketDirection,
    },

    #[error(
        "duplicate packet id {id:#04x} (protocol {protocol}, state {state:?}, direction {direction:?})"
    )]
    DuplicatePacketId {
        protocol: i32,
        state: PacketState,
        id: i32,
        direction: PacketDirection,
    },

    #[error("value out of range for its declared bit width")]
    ValueOutOfRange,

    #[error("corrupt packet: {0}")]
    CorruptPacket(String),

    #[error("{operation} is not supported by {packet}")]
    OperationNotSupported {
        packet: &'static str,
        operation: &'static str,
    },

    #[error("transport error: {0}")]
    TransportError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
