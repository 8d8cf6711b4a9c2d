//! Java edition's binary NBT format: a root tag, optionally gzip-wrapped.
//!
//! ```
//! use mcproto_nbt::{compound, Compound};
//!
//! let c = compound! { "int" => 0xdead_i32 };
//!
//! let mut buf = vec![];
//! mcproto_nbt::to_binary(&mut buf, &c, "").unwrap();
//!
//! let (value, root_name) = mcproto_nbt::from_binary(&mut buf.as_slice()).unwrap();
//! assert_eq!(value, c.into());
//! assert_eq!(root_name, "");
//! ```

mod decode;
mod encode;

pub use decode::from_binary;
pub use encode::to_binary;

use crate::{Compound, Result};

/// The two leading bytes of a gzip stream (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decodes a root compound tag that may or may not be gzip-compressed.
///
/// Minecraft embeds NBT in several places (chunk data on disk, some packet
/// payloads) where the bytes are transparently gzip-wrapped. This sniffs the
/// first two bytes for the gzip magic number and decompresses before parsing
/// if present, otherwise parses `buf` directly.
pub fn from_binary_gzip_aware(buf: &[u8]) -> Result<(Compound, String)> {
    if buf.len() >= 2 && buf[0..2] == GZIP_MAGIC {
        use std::io::Read;

        use flate2::read::GzDecoder;

        let mut decompressed = Vec::new();
        GzDecoder::new(buf).read_to_end(&mut decompressed)?;

        let (value, name) = from_binary(&mut decompressed.as_slice())?;
        Ok((into_compound(value)?, name))
    } else {
        let (value, name) = from_binary(&mut &*buf)?;
        Ok((into_compound(value)?, name))
    }
}

fn into_compound(value: crate::Value) -> Result<Compound> {
    value.into_compound().ok_or_else(|| {
        crate::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "root NBT tag is not a compound",
        ))
    })
}
