use std::io::Write;

use anyhow::ensure;
use mcproto_nbt::Compound;

use crate::var_int::VarInt;
use crate::{Decode, Encode};

/// A single inventory/container slot: `bool present; if present: varint
/// item_id, i8 count, nbt tag`.
///
/// An absent slot is `present = false` with no further data. Registry item
/// identifiers are carried as a raw [`VarInt`] rather than a typed enum,
/// since the item registry itself lives outside this crate.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Slot {
    pub item: Option<SlotItem>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SlotItem {
    pub item_id: i32,
    count: i8,
    pub nbt: Compound,
}

impl SlotItem {
    pub const COUNT_MIN: i8 = 1;
    pub const COUNT_MAX: i8 = 127;

    #[must_use]
    pub fn new(item_id: i32, count: i8, nbt: Compound) -> Self {
        Self {
            item_id,
            count: count.clamp(Self::COUNT_MIN, Self::COUNT_MAX),
            nbt,
        }
    }

    pub fn count(&self) -> i8 {
        self.count
    }

    pub fn set_count(&mut self, count: i8) {
        self.count = count.clamp(Self::COUNT_MIN, Self::COUNT_MAX);
    }
}

impl Slot {
    pub const EMPTY: Slot = Slot { item: None };

    pub fn present(item_id: i32, count: i8, nbt: Compound) -> Self {
        Self {
            item: Some(SlotItem::new(item_id, count, nbt)),
        }
    }
}

impl Encode for Slot {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match &self.item {
            None => false.encode(w),
            Some(item) => {
                true.encode(&mut w)?;
                VarInt(item.item_id).encode(&mut w)?;
                item.count.encode(&mut w)?;
                item.nbt.encode(w)
            }
        }
    }
}

impl Decode<'_> for Slot {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        if !bool::decode(r)? {
            return Ok(Slot::EMPTY);
        }

        let item_id = VarInt::decode(r)?.0;
        let count = i8::decode(r)?;

        ensure!(
            (SlotItem::COUNT_MIN..=SlotItem::COUNT_MAX).contains(&count),
            "invalid slot item count (got {count}, expected {}..={})",
            SlotItem::COUNT_MIN,
            SlotItem::COUNT_MAX,
        );

        let nbt = Compound::decode(r)?;

        Ok(Slot::present(item_id, count, nbt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_round_trip() {
        let mut buf = vec![];
        Slot::EMPTY.encode(&mut buf).unwrap();
        assert_eq!(buf, [0]);
        let mut r = buf.as_slice();
        assert_eq!(Slot::decode(&mut r).unwrap(), Slot::EMPTY);
    }

    #[test]
    fn present_slot_round_trip() {
        let slot = Slot::present(42, 5, Compound::new());
        let mut buf = vec![];
        slot.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Slot::decode(&mut r).unwrap(), slot);
    }

    #[test]
    fn slot_item_clamps_count() {
        let mut item = SlotItem::new(1, -5, Compound::new());
        assert_eq!(item.count(), SlotItem::COUNT_MIN);
        item.set_count(127);
        assert_eq!(item.count(), SlotItem::COUNT_MAX);
    }
}
