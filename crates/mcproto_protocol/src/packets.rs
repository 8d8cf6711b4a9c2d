//! A representative catalogue of packets for protocol 757 ("1.18.1"),
//! spanning the handshake, status, login, and play states.
//!
//! This is not the full per-version packet set (hundreds of record types);
//! it covers one packet per state/direction combination plus a handful of
//! play-state packets that exercise slot, entity-metadata, particle, node,
//! and position encoding.

use std::io::Write;

use anyhow::bail;
use uuid::Uuid;

use crate::entity_metadata::EntityMetadata;
use crate::node::Node;
use crate::particle::Particle;
use crate::position::BlockPos;
use crate::slot::Slot;
use crate::var_int::VarInt;
use crate::{Bounded, Decode, Encode, Packet, PacketDirection, PacketState};

/// `Handshake` (id `0x00`, serverbound, HANDSHAKING). The first packet on
/// any connection; its `next_state` field drives the HANDSHAKING → STATUS
/// or HANDSHAKING → LOGIN transition.
#[derive(Clone, Debug, PartialEq)]
pub struct HandshakeC2s<'a> {
    pub protocol_version: i32,
    pub server_address: Bounded<&'a str, 255>,
    pub server_port: u16,
    pub next_state: HandshakeNextState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeNextState {
    Status,
    Login,
}

impl Encode for HandshakeNextState {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        let n = match self {
            HandshakeNextState::Status => 1,
            HandshakeNextState::Login => 2,
        };
        VarInt(n).encode(w)
    }
}

impl Decode<'_> for HandshakeNextState {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            1 => HandshakeNextState::Status,
            2 => HandshakeNextState::Login,
            n => bail!("invalid handshake next_state {n}"),
        })
    }
}

impl Encode for HandshakeC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.protocol_version).encode(&mut w)?;
        self.server_address.encode(&mut w)?;
        self.server_port.encode(&mut w)?;
        self.next_state.encode(w)
    }
}

impl<'a> Decode<'a> for HandshakeC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            protocol_version: VarInt::decode(r)?.0,
            server_address: Bounded::decode(r)?,
            server_port: u16::decode(r)?,
            next_state: HandshakeNextState::decode(r)?,
        })
    }
}

impl Packet for HandshakeC2s<'_> {
    const ID: i32 = 0x00;
    const NAME: &'static str = "Handshake";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Handshaking;
}

/// `StatusRequest` (id `0x00`, serverbound, STATUS). Empty body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct StatusRequestC2s;

impl Encode for StatusRequestC2s {
    fn encode(&self, _w: impl Write) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Decode<'_> for StatusRequestC2s {
    fn decode(_r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self)
    }
}

impl Packet for StatusRequestC2s {
    const ID: i32 = 0x00;
    const NAME: &'static str = "StatusRequest";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Status;
}

/// `StatusResponse` (id `0x00`, clientbound, STATUS). Carries the raw
/// status JSON document verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusResponseS2c {
    pub json: String,
}

impl Encode for StatusResponseS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.json.encode(w)
    }
}

impl Decode<'_> for StatusResponseS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            json: String::decode(r)?,
        })
    }
}

impl Packet for StatusResponseS2c {
    const ID: i32 = 0x00;
    const NAME: &'static str = "StatusResponse";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Status;
}

/// `Ping` (id `0x01`, serverbound, STATUS).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PingRequestC2s {
    pub payload: i64,
}

impl Encode for PingRequestC2s {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.payload.encode(w)
    }
}

impl Decode<'_> for PingRequestC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            payload: i64::decode(r)?,
        })
    }
}

impl Packet for PingRequestC2s {
    const ID: i32 = 0x01;
    const NAME: &'static str = "Ping";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Status;
}

/// `Pong` (id `0x01`, clientbound, STATUS). Echoes [`PingRequestC2s::payload`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PingResponseS2c {
    pub payload: i64,
}

impl Encode for PingResponseS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.payload.encode(w)
    }
}

impl Decode<'_> for PingResponseS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            payload: i64::decode(r)?,
        })
    }
}

impl Packet for PingResponseS2c {
    const ID: i32 = 0x01;
    const NAME: &'static str = "Pong";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Status;
}

/// `LoginStart` (id `0x00`, serverbound, LOGIN).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginHelloC2s<'a> {
    pub username: Bounded<&'a str, 16>,
}

impl Encode for LoginHelloC2s<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.username.encode(w)
    }
}

impl<'a> Decode<'a> for LoginHelloC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            username: Bounded::decode(r)?,
        })
    }
}

impl Packet for LoginHelloC2s<'_> {
    const ID: i32 = 0x00;
    const NAME: &'static str = "LoginHello";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Login;
}

/// `EncryptionResponse` (id `0x01`, serverbound, LOGIN).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginKeyC2s<'a> {
    pub shared_secret: &'a [u8],
    pub verify_token: &'a [u8],
}

impl Encode for LoginKeyC2s<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.shared_secret.encode(&mut w)?;
        self.verify_token.encode(w)
    }
}

impl<'a> Decode<'a> for LoginKeyC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            shared_secret: <&[u8]>::decode(r)?,
            verify_token: <&[u8]>::decode(r)?,
        })
    }
}

impl Packet for LoginKeyC2s<'_> {
    const ID: i32 = 0x01;
    const NAME: &'static str = "EncryptionResponse";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Login;
}

/// `Disconnect` (id `0x00`, clientbound, LOGIN). Terminates the handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginDisconnectS2c {
    pub reason: String,
}

impl Encode for LoginDisconnectS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.reason.encode(w)
    }
}

impl Decode<'_> for LoginDisconnectS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            reason: String::decode(r)?,
        })
    }
}

impl Packet for LoginDisconnectS2c {
    const ID: i32 = 0x00;
    const NAME: &'static str = "LoginDisconnect";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Login;
}

/// `LoginSuccess` (id `0x02`, clientbound, LOGIN). Transitions the
/// connection to PLAY. The upstream packet also carries a property list for
/// signed skin/cape textures; that list lives outside this crate's scope
/// and is omitted here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSuccessS2c<'a> {
    pub uuid: Uuid,
    pub username: Bounded<&'a str, 16>,
}

impl Encode for LoginSuccessS2c<'_> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.uuid.encode(&mut w)?;
        self.username.encode(w)
    }
}

impl<'a> Decode<'a> for LoginSuccessS2c<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            uuid: Uuid::decode(r)?,
            username: Bounded::decode(r)?,
        })
    }
}

impl Packet for LoginSuccessS2c<'_> {
    const ID: i32 = 0x02;
    const NAME: &'static str = "LoginSuccess";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Login;
}

/// `SetCompression` (id `0x03`, clientbound, LOGIN). Mutates the endpoint's
/// compression threshold for all subsequent frames in both directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoginCompressionS2c {
    pub threshold: VarInt,
}

impl Encode for LoginCompressionS2c {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.threshold.encode(w)
    }
}

impl Decode<'_> for LoginCompressionS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            threshold: VarInt::decode(r)?,
        })
    }
}

impl Packet for LoginCompressionS2c {
    const ID: i32 = 0x03;
    const NAME: &'static str = "SetCompression";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Login;
}

/// `ChatMessage` (id `0x03`, serverbound, PLAY). 1.18.1 predates signed
/// chat, so the body is just the message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessageC2s<'a> {
    pub message: Bounded<&'a str, 256>,
}

impl Encode for ChatMessageC2s<'_> {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.message.encode(w)
    }
}

impl<'a> Decode<'a> for ChatMessageC2s<'a> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            message: Bounded::decode(r)?,
        })
    }
}

impl Packet for ChatMessageC2s<'_> {
    const ID: i32 = 0x03;
    const NAME: &'static str = "ChatMessage";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Play;
}

/// `QueryBlockNbt` (id `0x01`, serverbound, PLAY). Exercises [`BlockPos`]
/// wire packing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueryBlockNbtC2s {
    pub transaction_id: VarInt,
    pub position: BlockPos,
}

impl Encode for QueryBlockNbtC2s {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.transaction_id.encode(&mut w)?;
        self.position.encode(w)
    }
}

impl Decode<'_> for QueryBlockNbtC2s {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            transaction_id: VarInt::decode(r)?,
            position: BlockPos::decode(r)?,
        })
    }
}

impl Packet for QueryBlockNbtC2s {
    const ID: i32 = 0x01;
    const NAME: &'static str = "QueryBlockNbt";
    const DIRECTION: PacketDirection = PacketDirection::Serverbound;
    const STATE: PacketState = PacketState::Play;
}

/// `Particle` (id `0x22`, clientbound, PLAY). Exercises [`Particle`] wire
/// encoding, with the particle's id-dependent payload trailing the rest of
/// the packet's fixed fields rather than following its id directly.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleS2c {
    pub particle: Particle,
    pub long_distance: bool,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub max_speed: f32,
    pub count: i32,
}

impl Encode for ParticleS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.particle.id()).encode(&mut w)?;
        self.long_distance.encode(&mut w)?;
        self.x.encode(&mut w)?;
        self.y.encode(&mut w)?;
        self.z.encode(&mut w)?;
        self.offset_x.encode(&mut w)?;
        self.offset_y.encode(&mut w)?;
        self.offset_z.encode(&mut w)?;
        self.max_speed.encode(&mut w)?;
        VarInt(self.count).encode(&mut w)?;
        self.particle.encode_data(w)
    }
}

impl Decode<'_> for ParticleS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let id = VarInt::decode(r)?.0;
        let long_distance = bool::decode(r)?;
        let x = f64::decode(r)?;
        let y = f64::decode(r)?;
        let z = f64::decode(r)?;
        let offset_x = f32::decode(r)?;
        let offset_y = f32::decode(r)?;
        let offset_z = f32::decode(r)?;
        let max_speed = f32::decode(r)?;
        let count = VarInt::decode(r)?.0;
        let particle = Particle::decode_data(id, r)?;
        Ok(Self {
            particle,
            long_distance,
            x,
            y,
            z,
            offset_x,
            offset_y,
            offset_z,
            max_speed,
            count,
        })
    }
}

impl Packet for ParticleS2c {
    const ID: i32 = 0x22;
    const NAME: &'static str = "Particle";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Play;
}

/// `BlockUpdate` (id `0x0B`, clientbound, PLAY).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockUpdateS2c {
    pub position: BlockPos,
    pub block_state: VarInt,
}

impl Encode for BlockUpdateS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.position.encode(&mut w)?;
        self.block_state.encode(w)
    }
}

impl Decode<'_> for BlockUpdateS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            position: BlockPos::decode(r)?,
            block_state: VarInt::decode(r)?,
        })
    }
}

impl Packet for BlockUpdateS2c {
    const ID: i32 = 0x0B;
    const NAME: &'static str = "BlockUpdate";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Play;
}

/// `EntityTrackerUpdate` (id `0x4D`, clientbound, PLAY). Exercises
/// [`EntityMetadata`] wire encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityTrackerUpdateS2c {
    pub entity_id: VarInt,
    pub metadata: EntityMetadata,
}

impl Encode for EntityTrackerUpdateS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.entity_id.encode(&mut w)?;
        self.metadata.encode(w)
    }
}

impl Decode<'_> for EntityTrackerUpdateS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            entity_id: VarInt::decode(r)?,
            metadata: EntityMetadata::decode(r)?,
        })
    }
}

impl Packet for EntityTrackerUpdateS2c {
    const ID: i32 = 0x4D;
    const NAME: &'static str = "EntityTrackerUpdate";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Play;
}

/// `CommandTree` (id `0x12`, clientbound, PLAY). Exercises [`Node`] wire
/// encoding. `Node` has no `PartialEq` impl, so this packet type is
/// `Clone + Debug` only.
#[derive(Clone, Debug)]
pub struct CommandTreeS2c {
    pub commands: Vec<Node>,
    pub root_index: VarInt,
}

impl Encode for CommandTreeS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.commands.encode(&mut w)?;
        self.root_index.encode(w)
    }
}

impl Decode<'_> for CommandTreeS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            commands: Vec::decode(r)?,
            root_index: VarInt::decode(r)?,
        })
    }
}

impl Packet for CommandTreeS2c {
    const ID: i32 = 0x12;
    const NAME: &'static str = "CommandTree";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Play;
}

/// `SetSlot` (id `0x16`, clientbound, PLAY). Exercises [`Slot`] wire
/// encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct SetSlotS2c {
    pub window_id: i8,
    pub state_id: VarInt,
    pub slot_idx: i16,
    pub slot_data: Slot,
}

impl Encode for SetSlotS2c {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.window_id.encode(&mut w)?;
        self.state_id.encode(&mut w)?;
        self.slot_idx.encode(&mut w)?;
        self.slot_data.encode(w)
    }
}

impl Decode<'_> for SetSlotS2c {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            window_id: i8::decode(r)?,
            state_id: VarInt::decode(r)?,
            slot_idx: i16::decode(r)?,
            slot_data: Slot::decode(r)?,
        })
    }
}

impl Packet for SetSlotS2c {
    const ID: i32 = 0x16;
    const NAME: &'static str = "SetSlot";
    const DIRECTION: PacketDirection = PacketDirection::Clientbound;
    const STATE: PacketState = PacketState::Play;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decodable, Encodable};

    #[test]
    fn handshake_pack_unpack_round_trip() {
        let pkt = HandshakeC2s {
            protocol_version: 757,
            server_address: Bounded("localhost"),
            server_port: 25565,
            next_state: HandshakeNextState::Status,
        };
        let bytes = pkt.pack().unwrap();
        let decoded = HandshakeC2s::decode(&mut &bytes[..]).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn status_request_round_trip() {
        let pkt = StatusRequestC2s;
        let bytes = pkt.pack().unwrap();
        assert!(bytes.is_empty());
        StatusRequestC2s::unpack(&bytes).unwrap();
    }

    #[test]
    fn ping_pong_echo_payload() {
        let ping = PingRequestC2s {
            payload: 1234567890,
        };
        let bytes = ping.pack().unwrap();
        let decoded = PingRequestC2s::unpack(&bytes).unwrap();
        let pong = PingResponseS2c {
            payload: decoded.payload,
        };
        assert_eq!(pong.payload, ping.payload);
    }

    #[test]
    fn login_compression_round_trip() {
        let pkt = LoginCompressionS2c {
            threshold: VarInt(256),
        };
        let bytes = pkt.pack().unwrap();
        let decoded = LoginCompressionS2c::unpack(&bytes).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn query_block_nbt_round_trip() {
        let pkt = QueryBlockNbtC2s {
            transaction_id: VarInt(5),
            position: BlockPos::new(1, 2, 3),
        };
        let bytes = pkt.pack().unwrap();
        let decoded = QueryBlockNbtC2s::unpack(&bytes).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn particle_round_trip() {
        let pkt = ParticleS2c {
            particle: Particle::Plain { id: 1 },
            long_distance: false,
            x: 1.0,
            y: 2.0,
            z: 3.0,
            offset_x: 0.1,
            offset_y: 0.2,
            offset_z: 0.3,
            max_speed: 0.5,
            count: 10,
        };
        let bytes = pkt.pack().unwrap();
        let decoded = ParticleS2c::unpack(&bytes).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn set_slot_round_trip() {
        let pkt = SetSlotS2c {
            window_id: 0,
            state_id: VarInt(1),
            slot_idx: 36,
            slot_data: Slot::present(1, 1, Default::default()),
        };
        let bytes = pkt.pack().unwrap();
        let decoded = SetSlotS2c::unpack(&bytes).unwrap();
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn command_tree_round_trip() {
        let pkt = CommandTreeS2c {
            commands: vec![Node {
                children: vec![],
                data: crate::node::NodeData::Root,
                executable: false,
                redirect_node: None,
            }],
            root_index: VarInt(0),
        };
        let bytes = pkt.pack().unwrap();
        let decoded = CommandTreeS2c::unpack(&bytes).unwrap();
        assert_eq!(decoded.commands.len(), pkt.commands.len());
        assert_eq!(decoded.root_index, pkt.root_index);
    }
}
