#![doc = include_str!("../README.md")]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

mod bounded;
pub mod decode;
mod direction;
pub mod encode;
mod entity_metadata;
mod error;
mod impls;
mod modifier;
mod node;
pub mod packet_map;
pub mod packets;
mod particle;
mod pose;
mod position;
mod raw_bytes;
pub mod registry;
mod rotation;
mod slot;
mod text;
pub mod var_int;
mod var_long;
mod villager;

use std::io::Write;

use anyhow::Context;
pub use bounded::Bounded;
use derive_more::{From, Into};
pub use direction::Direction;
pub use encode::{PacketEncoder, WritePacket};
pub use entity_metadata::{EntityMetadata, EntityMetadataEntry, EntityMetadataValue};
pub use error::{ProtocolError, Result as ProtocolResult};
pub use modifier::{Modifier, ModifierOperation};
pub use node::{Node, NodeFlags};
pub use particle::Particle;
pub use pose::Pose;
pub use position::BlockPos;
pub use raw_bytes::RawBytes;
pub use recipe::Recipe;
pub use registry::Registry;
pub use rotation::Rotation;
pub use slot::Slot;
pub use text::Text;
pub use var_int::VarInt;
pub use var_long::VarLong;
pub use villager::VillagerData;

mod recipe;

pub use decode::PacketDecoder;

/// The maximum number of bytes in a single Minecraft packet.
pub const MAX_PACKET_SIZE: i32 = 2097152;

/// The Minecraft protocol version this library targets (1.18.1).
pub const PROTOCOL_VERSION: i32 = 757;

/// The canonical name the registry loader associates with [`PROTOCOL_VERSION`].
pub const PROTOCOL_NAME: &str = "v_1_18_1";

/// The stringified name of the Minecraft version this library targets.
pub const MINECRAFT_VERSION: &str = "1.18.1";

/// How large a packet should be before it is compressed by the packet encoder.
///
/// If the inner value is >= 0, then packets with encoded lengths >= to this
/// value will be compressed. If the value is negative, then compression is
/// disabled and no packets are compressed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From, Into)]
pub struct CompressionThreshold(pub i32);

impl CompressionThreshold {
    /// No compression.
    pub const DEFAULT: Self = Self(-1);
}

impl Default for CompressionThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Allows objects to be written to the Minecraft protocol. Inverse of
/// [`Decode`].
pub trait Encode {
    /// Writes this object to the provided writer.
    ///
    /// If this type also implements [`Decode`] then successful calls to this
    /// function returning `Ok(())` must always successfully [`decode`] using
    /// the data that was written to the writer. The exact number of bytes
    /// that were originally written must be consumed during the decoding.
    ///
    /// [`decode`]: Decode::decode
    fn encode(&self, w: impl Write) -> anyhow::Result<()>;

    /// Like [`Encode::encode`], except that a whole slice of values is
    /// encoded. The default implementation encodes every element of the
    /// slice in sequence with no leading length prefix.
    fn encode_slice(slice: &[Self], mut w: impl Write) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        for value in slice {
            value.encode(&mut w)?;
        }

        Ok(())
    }
}

/// Allows objects to be read from the Minecraft protocol. Inverse of
/// [`Encode`].
///
/// `Decode` is parameterized by a lifetime so decoded values can borrow from
/// the byte slice they were read from.
pub trait Decode<'a>: Sized {
    /// Reads this object from the provided byte slice.
    ///
    /// Implementations are expected to shrink the slice from the front as
    /// bytes are consumed.
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self>;
}

/// The direction a packet travels: client→server or server→client.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PacketDirection {
    /// Server -> Client
    Clientbound,
    /// Client -> Server
    Serverbound,
}

/// The connection state in which a packet is valid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PacketState {
    Handshaking,
    Status,
    Login,
    Play,
}

/// Types considered to be Minecraft packets.
///
/// In serialized form, a packet begins with a [`VarInt`] packet ID followed
/// by the body of the packet. Implementations of [`Encode`]/[`Decode`] on
/// `Self` encode/decode only the _body_, without the leading id.
pub trait Packet: std::fmt::Debug {
    /// The leading VarInt ID of this packet.
    const ID: i32;
    /// The name of this packet for debugging purposes.
    const NAME: &'static str;
    /// The direction this packet travels.
    const DIRECTION: PacketDirection;
    /// The state in which this packet is valid.
    const STATE: PacketState;

    /// Encodes this packet's VarInt ID first, followed by the packet's body.
    fn encode_with_id(&self, mut w: impl Write) -> anyhow::Result<()>
    where
        Self: Encode,
    {
        VarInt(Self::ID)
            .encode(&mut w)
            .context("failed to encode packet ID")?;

        self.encode(w)
    }
}

/// A packet whose [`Packet::DIRECTION`] requires it to be able to produce
/// its wire payload. A serverbound-only packet implements this only when
/// the library is driven from the server side to synthesize a request.
pub trait Encodable: Packet {
    fn pack(&self) -> ProtocolResult<Vec<u8>>;
}

impl<T: Packet + Encode> Encodable for T {
    fn pack(&self) -> ProtocolResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)
            .map_err(|e| ProtocolError::CorruptPacket(e.to_string()))?;
        Ok(buf)
    }
}

/// A packet whose [`Packet::DIRECTION`] requires it to be able to consume
/// its wire payload. A clientbound-only packet implements this only for
/// client-side decode or testing.
pub trait Decodable: Packet + Sized {
    fn unpack(buf: &[u8]) -> ProtocolResult<Self>;
}

impl<T: Packet + for<'a> Decode<'a>> Decodable for T {
    fn unpack(buf: &[u8]) -> ProtocolResult<Self> {
        let mut r = buf;
        let value = T::decode(&mut r).map_err(|e| ProtocolError::CorruptPacket(e.to_string()))?;
        Ok(value)
    }
}
