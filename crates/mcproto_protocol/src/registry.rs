use std::collections::HashMap;
use std::hash::Hash;

use anyhow::{bail, Result};

/// A pair of mutually inverse `K ↔ V` mappings, used for data tables such
/// as item identifier ↔ numeric id that back slot and particle encoding.
#[derive(Clone, Debug)]
pub struct Registry<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> Registry<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    /// Builds a registry from an explicit key/value mapping.
    pub fn from_mapping(mapping: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();
        for (k, v) in mapping {
            forward.insert(k.clone(), v.clone());
            backward.insert(v, k);
        }
        Self { forward, backward }
    }

    pub fn encode(&self, key: &K) -> Result<V> {
        self.forward
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("key has no registered value"))
    }

    pub fn decode(&self, value: &V) -> Result<K> {
        self.backward
            .get(value)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("value has no registered key"))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<K> Registry<K, i32>
where
    K: Clone + Eq + Hash,
{
    /// Builds a registry from an indexed sequence, using each item's
    /// position as its numeric id.
    pub fn from_indexed_sequence(items: impl IntoIterator<Item = K>) -> Result<Self> {
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();
        for (idx, key) in items.into_iter().enumerate() {
            let id = i32::try_from(idx).map_err(|_| anyhow::anyhow!("registry too large"))?;
            if forward.insert(key.clone(), id).is_some() {
                bail!("duplicate key in indexed registry sequence");
            }
            backward.insert(id, key);
        }
        Ok(Self { forward, backward })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_round_trips_both_ways() {
        let reg: Registry<&str, i32> =
            Registry::from_mapping([("minecraft:stone", 1), ("minecraft:dirt", 2)]);
        assert_eq!(reg.encode(&"minecraft:stone").unwrap(), 1);
        assert_eq!(reg.decode(&2).unwrap(), "minecraft:dirt");
    }

    #[test]
    fn indexed_sequence_uses_position_as_id() {
        let reg = Registry::from_indexed_sequence(["a", "b", "c"]).unwrap();
        assert_eq!(reg.encode(&"b").unwrap(), 1);
        assert_eq!(reg.decode(&2).unwrap(), "c");
    }

    #[test]
    fn unknown_key_fails() {
        let reg: Registry<&str, i32> = Registry::from_mapping([("a", 1)]);
        assert!(reg.encode(&"z").is_err());
    }
}
