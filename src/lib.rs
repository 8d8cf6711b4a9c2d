#![doc = include_str!("../README.md")]

pub use mcproto_nbt as nbt;
#[cfg(feature = "net")]
pub use mcproto_net as net;
pub use mcproto_protocol as protocol;
pub use mcproto_protocol::{
    CompressionThreshold, Decode, Encode, Packet, PacketDirection, PacketState, MAX_PACKET_SIZE,
    PROTOCOL_VERSION,
};
