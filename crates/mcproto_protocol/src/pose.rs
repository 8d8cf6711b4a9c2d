use std::io::Write;

use crate::var_int::VarInt;
use crate::{Decode, Encode};

/// An entity's pose, wire-encoded as a [`VarInt`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Pose {
    Standing,
    FallFlying,
    Sleeping,
    Swimming,
    SpinAttack,
    Sneaking,
    LongJumping,
    Dying,
    Croaking,
}

impl Encode for Pose {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        VarInt(*self as i32).encode(w)
    }
}

impl Decode<'_> for Pose {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => Pose::Standing,
            1 => Pose::FallFlying,
            2 => Pose::Sleeping,
            3 => Pose::Swimming,
            4 => Pose::SpinAttack,
            5 => Pose::Sneaking,
            6 => Pose::LongJumping,
            7 => Pose::Dying,
            8 => Pose::Croaking,
            n => anyhow::bail!("invalid pose id {n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_round_trip() {
        let mut buf = vec![];
        Pose::Sneaking.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Pose::decode(&mut r).unwrap(), Pose::Sneaking);
    }
}
