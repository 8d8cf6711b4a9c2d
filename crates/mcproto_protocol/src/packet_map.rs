//! Registries mapping packet ids to packet names per connection state and
//! direction, used to validate a [`Packet`] impl's id against collisions
//! before it's wired into a server or client, and to name unknown ids in
//! error messages.

use std::collections::HashMap;

use thiserror::Error;

use crate::{Packet, PacketDirection, PacketState};

#[derive(Debug, Error)]
pub enum PacketMapError {
    #[error(
        "duplicate packet id {id} ({direction:?}, {state:?}): already registered as \"{existing}\""
    )]
    DuplicateId {
        state: PacketState,
        direction: PacketDirection,
        id: i32,
        existing: &'static str,
    },
}

/// The serverbound and clientbound packet ids registered for one connection
/// state.
#[derive(Debug, Default)]
pub struct StatePacketMap {
    state: Option<PacketState>,
    serverbound: HashMap<i32, &'static str>,
    clientbound: HashMap<i32, &'static str>,
}

impl StatePacketMap {
    pub fn new(state: PacketState) -> Self {
        Self {
            state: Some(state),
            serverbound: HashMap::new(),
            clientbound: HashMap::new(),
        }
    }

    /// Registers `P` in this state's id table, erroring if another packet
    /// with the same id and direction is already registered.
    pub fn register<P: Packet>(&mut self) -> Result<(), PacketMapError> {
        let state = self.state.expect("StatePacketMap::new was not called");
        assert_eq!(P::STATE, state, "packet \"{}\" belongs to a different state", P::NAME);

        let table = match P::DIRECTION {
            PacketDirection::Serverbound => &mut self.serverbound,
            PacketDirection::Clientbound => &mut self.clientbound,
        };

        if let Some(existing) = table.insert(P::ID, P::NAME) {
            if existing != P::NAME {
                return Err(PacketMapError::DuplicateId {
                    state,
                    direction: P::DIRECTION,
                    id: P::ID,
                    existing,
                });
            }
        }

        Ok(())
    }

    pub fn name_for(&self, direction: PacketDirection, id: i32) -> Option<&'static str> {
        match direction {
            PacketDirection::Serverbound => self.serverbound.get(&id).copied(),
            PacketDirection::Clientbound => self.clientbound.get(&id).copied(),
        }
    }
}

/// All four connection states' packet id tables for one protocol version.
#[derive(Debug)]
pub struct PacketMap {
    protocol_version: i32,
    states: HashMap<PacketState, StatePacketMap>,
}

impl PacketMap {
    pub fn new(protocol_version: i32) -> Self {
        let mut states = HashMap::new();
        for state in [
            PacketState::Handshaking,
            PacketState::Status,
            PacketState::Login,
            PacketState::Play,
        ] {
            states.insert(state, StatePacketMap::new(state));
        }
        Self {
            protocol_version,
            states,
        }
    }

    pub fn protocol_version(&self) -> i32 {
        self.protocol_version
    }

    pub fn register<P: Packet>(&mut self) -> Result<(), PacketMapError> {
        self.states
            .get_mut(&P::STATE)
            .expect("all states are pre-populated by PacketMap::new")
            .register::<P>()
    }

    pub fn name_for(&self, state: PacketState, direction: PacketDirection, id: i32) -> Option<&'static str> {
        self.states.get(&state)?.name_for(direction, id)
    }

    /// Looks up the packet name for `id`, raising
    /// [`ProtocolError::UnknownPacketId`] if nothing is registered for it in
    /// `state`/`direction`.
    pub fn resolve(
        &self,
        state: PacketState,
        direction: PacketDirection,
        id: i32,
    ) -> crate::ProtocolResult<&'static str> {
        self.name_for(state, direction, id)
            .ok_or(crate::ProtocolError::UnknownPacketId {
                protocol: self.protocol_version,
                state,
                id,
                direction,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::{HandshakeC2s, PingRequestC2s, StatusRequestC2s};

    #[test]
    fn registers_distinct_ids_without_conflict() {
        let mut map = PacketMap::new(757);
        map.register::<HandshakeC2s>().unwrap();
        map.register::<StatusRequestC2s>().unwrap();
        map.register::<PingRequestC2s>().unwrap();

        assert_eq!(
            map.name_for(PacketState::Status, PacketDirection::Serverbound, 0x01),
            Some("Ping")
        );
    }

    #[test]
    fn reregistering_the_same_packet_is_not_a_conflict() {
        let mut map = PacketMap::new(757);
        map.register::<StatusRequestC2s>().unwrap();
        map.register::<StatusRequestC2s>().unwrap();
    }

    #[test]
    fn conflicting_id_in_same_state_and_direction_errors() {
        struct ImposterPacket;

        impl std::fmt::Debug for ImposterPacket {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("ImposterPacket")
            }
        }

        impl crate::Packet for ImposterPacket {
            const ID: i32 = StatusRequestC2s::ID;
            const NAME: &'static str = "ImposterPacket";
            const DIRECTION: PacketDirection = PacketDirection::Serverbound;
            const STATE: PacketState = PacketState::Status;
        }

        let mut map = PacketMap::new(757);
        map.register::<StatusRequestC2s>().unwrap();
        assert!(map.register::<ImposterPacket>().is_err());
    }

    #[test]
    fn unknown_id_has_no_name() {
        let map = PacketMap::new(757);
        assert_eq!(
            map.name_for(PacketState::Play, PacketDirection::Clientbound, 0x999),
            None
        );
    }

    #[test]
    fn resolve_raises_unknown_packet_id() {
        let map = PacketMap::new(757);
        let err = map
            .resolve(PacketState::Play, PacketDirection::Serverbound, 0xFE)
            .unwrap_err();

        assert!(matches!(
            err,
            crate::ProtocolError::UnknownPacketId {
                protocol: 757,
                state: PacketState::Play,
                id: 0xFE,
                direction: PacketDirection::Serverbound,
            }
        ));
    }
}
