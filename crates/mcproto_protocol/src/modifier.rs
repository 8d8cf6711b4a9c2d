use std::io::Write;

use anyhow::bail;
use uuid::Uuid;

use crate::{Decode, Encode};

/// An attribute modifier: `uuid, f32 amount, i8 operation`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Modifier {
    pub uuid: Uuid,
    pub amount: f32,
    pub operation: ModifierOperation,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModifierOperation {
    Add,
    AddPercent,
    MultiplyPercent,
}

impl Encode for Modifier {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.uuid.encode(&mut w)?;
        self.amount.encode(&mut w)?;
        self.operation.encode(w)
    }
}

impl Decode<'_> for Modifier {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            uuid: Uuid::decode(r)?,
            amount: f32::decode(r)?,
            operation: ModifierOperation::decode(r)?,
        })
    }
}

impl Encode for ModifierOperation {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        let byte: i8 = match self {
            ModifierOperation::Add => 0,
            ModifierOperation::AddPercent => 1,
            ModifierOperation::MultiplyPercent => 2,
        };
        byte.encode(w)
    }
}

impl Decode<'_> for ModifierOperation {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match i8::decode(r)? {
            0 => ModifierOperation::Add,
            1 => ModifierOperation::AddPercent,
            2 => ModifierOperation::MultiplyPercent,
            n => bail!("invalid modifier operation byte: {n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_round_trip() {
        let m = Modifier {
            uuid: Uuid::from_u128(7),
            amount: 1.5,
            operation: ModifierOperation::MultiplyPercent,
        };
        let mut buf = vec![];
        m.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Modifier::decode(&mut r).unwrap(), m);
    }
}
