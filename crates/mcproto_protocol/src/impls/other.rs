use std::io::Write;

use mcproto_nbt::Compound;
use uuid::Uuid;

use crate::{Decode, Encode};

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Some(t) => {
                true.encode(&mut w)?;
                t.encode(w)
            }
            None => false.encode(w),
        }
    }
}

impl<'a, T: Decode<'a>> Decode<'a> for Option<T> {
    fn decode(r: &mut &'a [u8]) -> anyhow::Result<Self> {
        Ok(if bool::decode(r)? {
            Some(T::decode(r)?)
        } else {
            None
        })
    }
}

/// 16 raw bytes, matching `uuid`'s big-endian `u128` layout.
impl Encode for Uuid {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        self.as_u128().encode(w)
    }
}

impl Decode<'_> for Uuid {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        u128::decode(r).map(Uuid::from_u128)
    }
}

impl Encode for Compound {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        Ok(mcproto_nbt::to_binary(w, self, "")?)
    }
}

impl Decode<'_> for Compound {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        // A lone End tag (0x00) stands in for "no NBT" wherever a compound is
        // optional on the wire (e.g. an empty slot tag).
        if r.first() == Some(&0) {
            *r = &r[1..];
            return Ok(Compound::new());
        }

        let (value, _name) = mcproto_nbt::from_binary(r)?;
        value
            .into_compound()
            .ok_or_else(|| anyhow::anyhow!("root NBT value is not a compound"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_round_trip() {
        let id = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        let mut buf = vec![];
        id.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Uuid::decode(&mut r).unwrap(), id);
    }

    #[test]
    fn option_round_trip() {
        let mut buf = vec![];
        Some(42i32).encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Option::<i32>::decode(&mut r).unwrap(), Some(42));

        buf.clear();
        None::<i32>.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Option::<i32>::decode(&mut r).unwrap(), None);
    }
}
