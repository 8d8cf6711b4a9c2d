use std::io::Write;

use crate::var_int::VarInt;
use crate::{Decode, Encode};

/// A villager's kind/profession/level triple, each a raw registry index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VillagerData {
    pub kind: i32,
    pub profession: i32,
    pub level: i32,
}

impl VillagerData {
    pub const fn new(kind: i32, profession: i32, level: i32) -> Self {
        Self {
            kind,
            profession,
            level,
        }
    }
}

impl Encode for VillagerData {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        VarInt(self.kind).encode(&mut w)?;
        VarInt(self.profession).encode(&mut w)?;
        VarInt(self.level).encode(w)
    }
}

impl Decode<'_> for VillagerData {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            kind: VarInt::decode(r)?.0,
            profession: VarInt::decode(r)?.0,
            level: VarInt::decode(r)?.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn villager_data_round_trip() {
        let data = VillagerData::new(1, 2, 3);
        let mut buf = vec![];
        data.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(VillagerData::decode(&mut r).unwrap(), data);
    }
}
