use std::io::{Read, Write};

use byteorder::ReadBytesExt;
use thiserror::Error;

use crate::{Decode, Encode, ProtocolError};

/// An `i32` encoded with variable length: 1-5 bytes, 7-bit groups
/// little-endian, with the high bit of each byte a continuation flag.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct VarInt(pub i32);

impl VarInt {
    /// The maximum number of bytes a VarInt could occupy when read from and
    /// written to the Minecraft protocol.
    pub const MAX_SIZE: usize = 5;

    /// Returns the exact number of bytes this varint will write when
    /// [`Encode::encode`] is called, assuming no error occurs.
    pub fn written_size(self) -> usize {
        match self.0 {
            0 => 1,
            n => (31 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    pub fn decode_partial(mut r: impl Read) -> Result<i32, VarIntDecodeError> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = r.read_u8().map_err(|_| VarIntDecodeError::Incomplete)?;
            val |= (byte as i32 & 0b01111111) << (i * 7);
            if byte & 0b10000000 == 0 {
                return Ok(val);
            }
        }

        Err(VarIntDecodeError::TooLarge)
    }

    /// The inclusive range of values representable in `max_bits` bits of
    /// two's-complement signed storage.
    fn range_for_bits(max_bits: u32) -> (i32, i32) {
        if max_bits >= 32 {
            (i32::MIN, i32::MAX)
        } else {
            (-(1 << (max_bits - 1)), (1 << (max_bits - 1)) - 1)
        }
    }

    /// Decodes a VarInt and checks that its value fits in `max_bits` bits,
    /// raising [`ProtocolError::ValueOutOfRange`] otherwise.
    pub fn decode_bounded(r: &mut &[u8], max_bits: u32) -> Result<Self, ProtocolError> {
        let v = Self::decode(r).map_err(|_| ProtocolError::CorruptPacket("bad varint".into()))?;
        let (min, max) = Self::range_for_bits(max_bits);
        if v.0 < min || v.0 > max {
            return Err(ProtocolError::ValueOutOfRange);
        }
        Ok(v)
    }

    /// Checks that this value fits in `max_bits` bits before encoding,
    /// raising [`ProtocolError::ValueOutOfRange`] otherwise.
    pub fn encode_bounded(self, w: impl Write, max_bits: u32) -> Result<(), ProtocolError> {
        let (min, max) = Self::range_for_bits(max_bits);
        if self.0 < min || self.0 > max {
            return Err(ProtocolError::ValueOutOfRange);
        }
        self.encode(w)
            .map_err(|e| ProtocolError::CorruptPacket(e.to_string()))
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum VarIntDecodeError {
    #[error("incomplete VarInt decode")]
    Incomplete,
    #[error("VarInt is too large")]
    TooLarge,
}

impl Encode for VarInt {
    // Adapted from Moulberry's encode
    // https://github.com/Moulberry/Graphite/blob/master/crates/graphite_binary/src/varint/encode.rs#L6
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        let x = self.0 as u32 as u64;
        let stage1 = (x & 0x0000_0000_0000_007f)
            | ((x & 0x0000_0000_0000_3f80) << 1)
            | ((x & 0x0000_0000_001f_c000) << 2)
            | ((x & 0x0000_0000_0fe0_0000) << 3)
            | ((x & 0x0000_0000_f000_0000) << 4);

        let leading = stage1.leading_zeros();

        let unused_bytes = (leading - 1) >> 3;
        let bytes_needed = 8 - unused_bytes;

        // set all but the last MSBs
        let msbs = 0x8080808080808080;
        let msbmask = 0xffffffffffffffff >> (((8 - bytes_needed + 1) << 3) - 1);

        let merged = stage1 | (msbs & msbmask);
        let bytes = merged.to_le_bytes();

        w.write_all(&bytes[..bytes_needed as usize])?;

        Ok(())
    }
}

impl Decode<'_> for VarInt {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = r.read_u8()?;
            val |= (byte as i32 & 0b01111111) << (i * 7);
            if byte & 0b10000000 == 0 {
                return Ok(VarInt(val));
            }
        }
        anyhow::bail!("VarInt is too large")
    }
}

impl From<i32> for VarInt {
    fn from(i: i32) -> Self {
        VarInt(i)
    }
}

impl From<VarInt> for i32 {
    fn from(i: VarInt) -> Self {
        i.0
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;

    #[test]
    fn varint_written_size() {
        let mut rng = thread_rng();
        let mut buf = vec![];

        for n in (0..100_000)
            .map(|_| rng.gen())
            .chain([0, i32::MIN, i32::MAX])
            .map(VarInt)
        {
            buf.clear();
            n.encode(&mut buf).unwrap();
            assert_eq!(buf.len(), n.written_size());
        }
    }

    #[test]
    fn varint_round_trip() {
        let mut rng = thread_rng();
        let mut buf = vec![];

        for n in (0..1_000_000)
            .map(|_| rng.gen())
            .chain([0, i32::MIN, i32::MAX])
        {
            VarInt(n).encode(&mut buf).unwrap();

            let mut slice = buf.as_slice();
            assert!(slice.len() <= VarInt::MAX_SIZE);

            assert_eq!(n, VarInt::decode(&mut slice).unwrap().0);

            assert!(slice.is_empty());
            buf.clear();
        }
    }

    #[test]
    fn boundary_encodings() {
        let mut buf = vec![];
        VarInt(2147483647).encode(&mut buf).unwrap();
        assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF, 0x07]);

        buf.clear();
        VarInt(-1).encode(&mut buf).unwrap();
        assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn decode_bounded_rejects_out_of_range() {
        let mut buf = vec![];
        VarInt(200).encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        let err = VarInt::decode_bounded(&mut r, 7).unwrap_err();
        assert!(matches!(err, ProtocolError::ValueOutOfRange));
    }

    #[test]
    fn decode_bounded_accepts_in_range() {
        let mut buf = vec![];
        VarInt(5).encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(VarInt::decode_bounded(&mut r, 5).unwrap().0, 5);
    }
}
