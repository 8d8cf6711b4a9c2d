use std::io::Write;

use anyhow::bail;
use mcproto_nbt::Compound;
use uuid::Uuid;

use crate::direction::Direction;
use crate::particle::Particle;
use crate::pose::Pose;
use crate::position::BlockPos;
use crate::rotation::Rotation;
use crate::slot::Slot;
use crate::text::Text;
use crate::var_int::VarInt;
use crate::villager::VillagerData;
use crate::{Decode, Encode};

/// One typed entry in an entity's metadata table: `u8 index, varint type`
/// selects the payload shape from a fixed 19-member dispatch table.
#[derive(Clone, PartialEq, Debug)]
pub struct EntityMetadataEntry {
    pub index: u8,
    pub value: EntityMetadataValue,
}

/// An entity's full metadata table: a sequence of entries terminated by the
/// sentinel index byte `0xFE`.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct EntityMetadata(pub Vec<EntityMetadataEntry>);

const TERMINATOR: u8 = 0xFE;

#[derive(Clone, PartialEq, Debug)]
pub enum EntityMetadataValue {
    Byte(i8),
    VarInt(i32),
    Float(f32),
    String(String),
    Chat(Text),
    OptChat(Option<Text>),
    Slot(Slot),
    Bool(bool),
    Rotation(Rotation),
    Position(BlockPos),
    OptPosition(Option<BlockPos>),
    Direction(Direction),
    OptUuid(Option<Uuid>),
    BlockState(i32),
    Nbt(Compound),
    Particle(Particle),
    Villager(VillagerData),
    OptVarInt(Option<i32>),
    Pose(Pose),
}

impl EntityMetadataValue {
    fn type_id(&self) -> i32 {
        match self {
            EntityMetadataValue::Byte(_) => 0,
            EntityMetadataValue::VarInt(_) => 1,
            EntityMetadataValue::Float(_) => 2,
            EntityMetadataValue::String(_) => 3,
            EntityMetadataValue::Chat(_) => 4,
            EntityMetadataValue::OptChat(_) => 5,
            EntityMetadataValue::Slot(_) => 6,
            EntityMetadataValue::Bool(_) => 7,
            EntityMetadataValue::Rotation(_) => 8,
            EntityMetadataValue::Position(_) => 9,
            EntityMetadataValue::OptPosition(_) => 10,
            EntityMetadataValue::Direction(_) => 11,
            EntityMetadataValue::OptUuid(_) => 12,
            EntityMetadataValue::BlockState(_) => 13,
            EntityMetadataValue::Nbt(_) => 14,
            EntityMetadataValue::Particle(_) => 15,
            EntityMetadataValue::Villager(_) => 16,
            EntityMetadataValue::OptVarInt(_) => 17,
            EntityMetadataValue::Pose(_) => 18,
        }
    }
}

impl Encode for EntityMetadataValue {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.type_id()).encode(&mut w)?;
        match self {
            EntityMetadataValue::Byte(v) => v.encode(w),
            EntityMetadataValue::VarInt(v) => VarInt(*v).encode(w),
            EntityMetadataValue::Float(v) => v.encode(w),
            EntityMetadataValue::String(v) => v.encode(w),
            EntityMetadataValue::Chat(v) => v.encode(w),
            EntityMetadataValue::OptChat(v) => v.encode(w),
            EntityMetadataValue::Slot(v) => v.encode(w),
            EntityMetadataValue::Bool(v) => v.encode(w),
            EntityMetadataValue::Rotation(v) => v.encode(w),
            EntityMetadataValue::Position(v) => v.encode(w),
            EntityMetadataValue::OptPosition(v) => v.encode(w),
            EntityMetadataValue::Direction(v) => v.encode(w),
            EntityMetadataValue::OptUuid(v) => v.encode(w),
            EntityMetadataValue::BlockState(v) => VarInt(*v).encode(w),
            EntityMetadataValue::Nbt(v) => v.encode(w),
            EntityMetadataValue::Particle(v) => v.encode(w),
            EntityMetadataValue::Villager(v) => v.encode(w),
            EntityMetadataValue::OptVarInt(v) => match v {
                Some(n) => VarInt(n + 1).encode(w),
                None => VarInt(0).encode(w),
            },
            EntityMetadataValue::Pose(v) => v.encode(w),
        }
    }
}

impl Decode<'_> for EntityMetadataValue {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let type_id = VarInt::decode(r)?.0;
        Ok(match type_id {
            0 => EntityMetadataValue::Byte(i8::decode(r)?),
            1 => EntityMetadataValue::VarInt(VarInt::decode(r)?.0),
            2 => EntityMetadataValue::Float(f32::decode(r)?),
            3 => EntityMetadataValue::String(String::decode(r)?),
            4 => EntityMetadataValue::Chat(Text::decode(r)?),
            5 => EntityMetadataValue::OptChat(Option::<Text>::decode(r)?),
            6 => EntityMetadataValue::Slot(Slot::decode(r)?),
            7 => EntityMetadataValue::Bool(bool::decode(r)?),
            8 => EntityMetadataValue::Rotation(Rotation::decode(r)?),
            9 => EntityMetadataValue::Position(BlockPos::decode(r)?),
            10 => EntityMetadataValue::OptPosition(Option::<BlockPos>::decode(r)?),
            11 => EntityMetadataValue::Direction(Direction::decode(r)?),
            12 => EntityMetadataValue::OptUuid(Option::<Uuid>::decode(r)?),
            13 => EntityMetadataValue::BlockState(VarInt::decode(r)?.0),
            14 => EntityMetadataValue::Nbt(Compound::decode(r)?),
            15 => EntityMetadataValue::Particle(Particle::decode(r)?),
            16 => EntityMetadataValue::Villager(VillagerData::decode(r)?),
            17 => {
                let n = VarInt::decode(r)?.0;
                EntityMetadataValue::OptVarInt(if n == 0 { None } else { Some(n - 1) })
            }
            18 => EntityMetadataValue::Pose(Pose::decode(r)?),
            n => bail!("unknown entity metadata type id: {n}"),
        })
    }
}

impl Encode for EntityMetadata {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        for entry in &self.0 {
            entry.index.encode(&mut w)?;
            entry.value.encode(&mut w)?;
        }
        TERMINATOR.encode(w)
    }
}

impl Decode<'_> for EntityMetadata {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        loop {
            let index = u8::decode(r)?;
            if index == TERMINATOR {
                break;
            }
            let value = EntityMetadataValue::decode(r)?;
            entries.push(EntityMetadataEntry { index, value });
        }
        Ok(EntityMetadata(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metadata_is_just_terminator() {
        let meta = EntityMetadata::default();
        let mut buf = vec![];
        meta.encode(&mut buf).unwrap();
        assert_eq!(buf, [TERMINATOR]);
        let mut r = buf.as_slice();
        assert_eq!(EntityMetadata::decode(&mut r).unwrap(), meta);
    }

    #[test]
    fn mixed_metadata_round_trip() {
        let meta = EntityMetadata(vec![
            EntityMetadataEntry {
                index: 0,
                value: EntityMetadataValue::Byte(-5),
            },
            EntityMetadataEntry {
                index: 6,
                value: EntityMetadataValue::Pose(Pose::Sleeping),
            },
            EntityMetadataEntry {
                index: 7,
                value: EntityMetadataValue::OptVarInt(Some(12)),
            },
            EntityMetadataEntry {
                index: 8,
                value: EntityMetadataValue::OptVarInt(None),
            },
        ]);
        let mut buf = vec![];
        meta.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(EntityMetadata::decode(&mut r).unwrap(), meta);
    }
}
