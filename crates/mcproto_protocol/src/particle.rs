use std::io::Write;

use crate::slot::Slot;
use crate::var_int::VarInt;
use crate::{Decode, Encode};

/// A particle effect: `varint id`, with extra payload carried only by a
/// handful of ids (block-state dust/crack particles, the dust-color
/// transition particle, and the falling-dust-with-item particle).
#[derive(Clone, PartialEq, Debug)]
pub enum Particle {
    /// Ids 3 (block) and 23 (falling dust) carry a block state id.
    BlockState { id: i32, block_state: i32 },
    /// Id 14 (dust color transition) carries four floats (from-rgb, to-rgb,
    /// scale collapsed into the fourth slot per the wire shape).
    DustColorTransition { id: i32, values: [f32; 4] },
    /// Id 32 (item) carries a slot.
    Item { id: i32, item: Slot },
    /// Every other id carries no extra payload.
    Plain { id: i32 },
}

impl Particle {
    pub fn id(&self) -> i32 {
        match self {
            Particle::BlockState { id, .. }
            | Particle::DustColorTransition { id, .. }
            | Particle::Item { id, .. }
            | Particle::Plain { id } => *id,
        }
    }

    /// Writes this particle's id-dependent payload, without the leading id.
    /// Used by packets (e.g. the particle spawn packet) that place other
    /// fields between the id and the payload on the wire.
    pub fn encode_data(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Particle::BlockState { block_state, .. } => VarInt(*block_state).encode(w),
            Particle::DustColorTransition { values, .. } => {
                for v in values {
                    v.encode(&mut w)?;
                }
                Ok(())
            }
            Particle::Item { item, .. } => item.encode(w),
            Particle::Plain { .. } => Ok(()),
        }
    }

    /// Reads this particle's id-dependent payload given an id already read
    /// from the wire.
    pub fn decode_data(id: i32, r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match id {
            3 | 23 => Particle::BlockState {
                id,
                block_state: VarInt::decode(r)?.0,
            },
            14 => Particle::DustColorTransition {
                id,
                values: [
                    f32::decode(r)?,
                    f32::decode(r)?,
                    f32::decode(r)?,
                    f32::decode(r)?,
                ],
            },
            32 => Particle::Item {
                id,
                item: Slot::decode(r)?,
            },
            id => Particle::Plain { id },
        })
    }
}

impl Encode for Particle {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.id()).encode(&mut w)?;
        self.encode_data(w)
    }
}

impl Decode<'_> for Particle {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let id = VarInt::decode(r)?.0;
        Self::decode_data(id, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_particle_round_trip() {
        let p = Particle::Plain { id: 1 };
        let mut buf = vec![];
        p.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Particle::decode(&mut r).unwrap(), p);
    }

    #[test]
    fn block_state_particle_round_trip() {
        let p = Particle::BlockState {
            id: 3,
            block_state: 55,
        };
        let mut buf = vec![];
        p.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Particle::decode(&mut r).unwrap(), p);
    }

    #[test]
    fn dust_color_transition_round_trip() {
        let p = Particle::DustColorTransition {
            id: 14,
            values: [1.0, 0.5, 0.25, 8.0],
        };
        let mut buf = vec![];
        p.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Particle::decode(&mut r).unwrap(), p);
    }

    #[test]
    fn item_particle_round_trip() {
        let p = Particle::Item {
            id: 32,
            item: Slot::EMPTY,
        };
        let mut buf = vec![];
        p.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Particle::decode(&mut r).unwrap(), p);
    }
}
