use std::io::Write;

use crate::{Decode, Encode};

/// A set of three Euler angles, used for entity head/body rotation.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Encode for Rotation {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        self.x.encode(&mut w)?;
        self.y.encode(&mut w)?;
        self.z.encode(&mut w)
    }
}

impl Decode<'_> for Rotation {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            x: f32::decode(r)?,
            y: f32::decode(r)?,
            z: f32::decode(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_round_trip() {
        let rot = Rotation {
            x: 1.5,
            y: -2.25,
            z: 90.0,
        };
        let mut buf = vec![];
        rot.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Rotation::decode(&mut r).unwrap(), rot);
    }
}
