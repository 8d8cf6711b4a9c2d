use std::io::Write;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{Decode, Encode};

impl Encode for bool {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_u8(*self as u8)?)
    }
}

impl Decode<'_> for bool {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let n = r.read_u8()?;
        anyhow::ensure!(n < 2, "boolean is not 0 or 1 (got {n})");
        Ok(n == 1)
    }
}

macro_rules! impl_primitive {
    ($t:ty, $write:ident, $read:ident) => {
        impl Encode for $t {
            fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
                Ok(w.$write::<BigEndian>(*self)?)
            }
        }

        impl Decode<'_> for $t {
            fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
                Ok(r.$read::<BigEndian>()?)
            }
        }
    };
}

impl_primitive!(u16, write_u16, read_u16);
impl_primitive!(i16, write_i16, read_i16);
impl_primitive!(u32, write_u32, read_u32);
impl_primitive!(i32, write_i32, read_i32);
impl_primitive!(u64, write_u64, read_u64);
impl_primitive!(i64, write_i64, read_i64);
impl_primitive!(u128, write_u128, read_u128);
impl_primitive!(i128, write_i128, read_i128);
impl_primitive!(f32, write_f32, read_f32);
impl_primitive!(f64, write_f64, read_f64);

impl Encode for u8 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_u8(*self)?)
    }
}

impl Decode<'_> for u8 {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(r.read_u8()?)
    }
}

impl Encode for i8 {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        Ok(w.write_i8(*self)?)
    }
}

impl Decode<'_> for i8 {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(r.read_i8()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_round_trip() {
        let mut buf = vec![];
        true.encode(&mut buf).unwrap();
        12u8.encode(&mut buf).unwrap();
        (-999i32).encode(&mut buf).unwrap();
        5.001f32.encode(&mut buf).unwrap();
        1e10f64.encode(&mut buf).unwrap();

        let mut r = buf.as_slice();
        assert_eq!(bool::decode(&mut r).unwrap(), true);
        assert_eq!(u8::decode(&mut r).unwrap(), 12);
        assert_eq!(i32::decode(&mut r).unwrap(), -999);
        assert_eq!(f32::decode(&mut r).unwrap(), 5.001);
        assert_eq!(f64::decode(&mut r).unwrap(), 1e10);
        assert!(r.is_empty());
    }

    #[test]
    fn bool_rejects_non_canonical_byte() {
        let buf = [2u8];
        assert!(bool::decode(&mut &buf[..]).is_err());
    }
}
