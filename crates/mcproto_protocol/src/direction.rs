use std::io::Write;

use crate::var_int::VarInt;
use crate::{Decode, Encode};

/// One of the six axis-aligned directions, wire-encoded as a [`VarInt`] in
/// the range 0-5.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl Encode for Direction {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(*self as i32).encode(w)
    }
}

impl Decode<'_> for Direction {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => Direction::Down,
            1 => Direction::Up,
            2 => Direction::North,
            3 => Direction::South,
            4 => Direction::West,
            5 => Direction::East,
            n => anyhow::bail!("invalid direction id {n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_round_trip() {
        for d in [
            Direction::Down,
            Direction::Up,
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ] {
            let mut buf = vec![];
            d.encode(&mut buf).unwrap();
            let mut r = buf.as_slice();
            assert_eq!(Direction::decode(&mut r).unwrap(), d);
            assert!(r.is_empty());
        }
    }
}
