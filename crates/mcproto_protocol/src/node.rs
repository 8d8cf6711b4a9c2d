use std::io::Write;

use anyhow::bail;
use byteorder::WriteBytesExt;

use crate::var_int::VarInt;
use crate::{Decode, Encode};

/// One node in a command graph: a flags byte, a varint-length list of child
/// indices, an optional redirect index, and node-kind-dependent data.
#[derive(Clone, Debug)]
pub struct Node {
    pub children: Vec<VarInt>,
    pub data: NodeData,
    pub executable: bool,
    pub redirect_node: Option<VarInt>,
}

/// A command node's flags byte. The low two bits select [`NodeData`]'s
/// variant; the remaining bits are independent booleans.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const TYPE_LITERAL: NodeFlags = NodeFlags(0x01);
    pub const TYPE_ARGUMENT: NodeFlags = NodeFlags(0x02);
    pub const EXECUTABLE: NodeFlags = NodeFlags(0x04);
    pub const HAS_REDIRECT: NodeFlags = NodeFlags(0x08);
    pub const HAS_SUGGESTIONS_TYPE: NodeFlags = NodeFlags(0x10);

    pub const fn empty() -> Self {
        NodeFlags(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u8) -> Self {
        NodeFlags(bits)
    }

    pub const fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for NodeFlags {
    type Output = NodeFlags;

    fn bitor(self, rhs: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for NodeFlags {
    fn bitor_assign(&mut self, rhs: NodeFlags) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Debug)]
pub enum NodeData {
    Root,
    Literal { name: String },
    Argument {
        name: String,
        parser: Parser,
        suggestion: Option<Suggestion>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Suggestion {
    AskServer,
    AllRecipes,
    AvailableSounds,
    AvailableBiomes,
    SummonableEntities,
}

impl Suggestion {
    fn name(self) -> &'static str {
        match self {
            Suggestion::AskServer => "minecraft:ask_server",
            Suggestion::AllRecipes => "minecraft:all_recipes",
            Suggestion::AvailableSounds => "minecraft:available_sounds",
            Suggestion::AvailableBiomes => "minecraft:available_biomes",
            Suggestion::SummonableEntities => "minecraft:summonable_entities",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Parser {
    Bool,
    Float { min: Option<f32>, max: Option<f32> },
    Double { min: Option<f64>, max: Option<f64> },
    Integer { min: Option<i32>, max: Option<i32> },
    Long { min: Option<i64>, max: Option<i64> },
    String(StringArg),
    Entity { single: bool, only_players: bool },
    BlockPos,
    Vec3,
    BlockState,
    ItemStack,
    Component,
    Message,
    NbtCompoundTag,
    Particle,
    Rotation,
    ResourceLocation,
    Uuid,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StringArg {
    SingleWord,
    QuotablePhrase,
    GreedyPhrase,
}

impl Encode for StringArg {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        let byte: i32 = match self {
            StringArg::SingleWord => 0,
            StringArg::QuotablePhrase => 1,
            StringArg::GreedyPhrase => 2,
        };
        VarInt(byte).encode(w)
    }
}

impl Decode<'_> for StringArg {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => StringArg::SingleWord,
            1 => StringArg::QuotablePhrase,
            2 => StringArg::GreedyPhrase,
            n => bail!("unknown command string arg kind {n}"),
        })
    }
}

impl Encode for Node {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        let mut flags = match &self.data {
            NodeData::Root => NodeFlags::empty(),
            NodeData::Literal { .. } => NodeFlags::TYPE_LITERAL,
            NodeData::Argument { .. } => NodeFlags::TYPE_ARGUMENT,
        };
        if self.executable {
            flags |= NodeFlags::EXECUTABLE;
        }
        if self.redirect_node.is_some() {
            flags |= NodeFlags::HAS_REDIRECT;
        }
        if matches!(
            &self.data,
            NodeData::Argument {
                suggestion: Some(_),
                ..
            }
        ) {
            flags |= NodeFlags::HAS_SUGGESTIONS_TYPE;
        }

        w.write_u8(flags.bits())?;
        self.children.encode(&mut w)?;

        if let Some(redirect) = self.redirect_node {
            redirect.encode(&mut w)?;
        }

        match &self.data {
            NodeData::Root => {}
            NodeData::Literal { name } => name.encode(&mut w)?,
            NodeData::Argument {
                name,
                parser,
                suggestion,
            } => {
                name.encode(&mut w)?;
                parser.encode(&mut w)?;
                if let Some(suggestion) = suggestion {
                    suggestion.name().encode(&mut w)?;
                }
            }
        }

        Ok(())
    }
}

impl Decode<'_> for Node {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let flags = NodeFlags::from_bits_truncate(u8::decode(r)?);

        let children = Vec::decode(r)?;

        let redirect_node = if flags.contains(NodeFlags::HAS_REDIRECT) {
            Some(VarInt::decode(r)?)
        } else {
            None
        };

        let data = if flags.contains(NodeFlags::TYPE_LITERAL) {
            NodeData::Literal {
                name: String::decode(r)?,
            }
        } else if flags.contains(NodeFlags::TYPE_ARGUMENT) {
            let name = String::decode(r)?;
            let parser = Parser::decode(r)?;
            let suggestion = if flags.contains(NodeFlags::HAS_SUGGESTIONS_TYPE) {
                Some(match String::decode(r)?.as_str() {
                    "minecraft:ask_server" => Suggestion::AskServer,
                    "minecraft:all_recipes" => Suggestion::AllRecipes,
                    "minecraft:available_sounds" => Suggestion::AvailableSounds,
                    "minecraft:available_biomes" => Suggestion::AvailableBiomes,
                    "minecraft:summonable_entities" => Suggestion::SummonableEntities,
                    other => bail!("unknown command suggestion type of \"{other}\""),
                })
            } else {
                None
            };
            NodeData::Argument {
                name,
                parser,
                suggestion,
            }
        } else {
            NodeData::Root
        };

        Ok(Self {
            children,
            data,
            executable: flags.contains(NodeFlags::EXECUTABLE),
            redirect_node,
        })
    }
}

fn encode_min_max<T: Encode>(
    min: &Option<T>,
    max: &Option<T>,
    mut w: impl Write,
) -> anyhow::Result<()> {
    let flags: u8 = min.is_some() as u8 | ((max.is_some() as u8) * 0x2);
    flags.encode(&mut w)?;
    if let Some(min) = min {
        min.encode(&mut w)?;
    }
    if let Some(max) = max {
        max.encode(&mut w)?;
    }
    Ok(())
}

fn decode_min_max<'a, T: Decode<'a>>(r: &mut &'a [u8]) -> anyhow::Result<(Option<T>, Option<T>)> {
    let flags = u8::decode(r)?;
    let min = if flags & 0x1 != 0 {
        Some(T::decode(r)?)
    } else {
        None
    };
    let max = if flags & 0x2 != 0 {
        Some(T::decode(r)?)
    } else {
        None
    };
    Ok((min, max))
}

impl Encode for Parser {
    fn encode(&self, mut w: impl Write) -> anyhow::Result<()> {
        match self {
            Parser::Bool => VarInt(0).encode(&mut w)?,
            Parser::Float { min, max } => {
                VarInt(1).encode(&mut w)?;
                encode_min_max(min, max, w)?;
            }
            Parser::Double { min, max } => {
                VarInt(2).encode(&mut w)?;
                encode_min_max(min, max, w)?;
            }
            Parser::Integer { min, max } => {
                VarInt(3).encode(&mut w)?;
                encode_min_max(min, max, w)?;
            }
            Parser::Long { min, max } => {
                VarInt(4).encode(&mut w)?;
                encode_min_max(min, max, w)?;
            }
            Parser::String(arg) => {
                VarInt(5).encode(&mut w)?;
                arg.encode(w)?;
            }
            Parser::Entity {
                single,
                only_players,
            } => {
                VarInt(6).encode(&mut w)?;
                (*single as u8 | ((*only_players as u8) * 0x2)).encode(w)?;
            }
            Parser::BlockPos => VarInt(7).encode(&mut w)?,
            Parser::Vec3 => VarInt(8).encode(&mut w)?,
            Parser::BlockState => VarInt(9).encode(&mut w)?,
            Parser::ItemStack => VarInt(10).encode(&mut w)?,
            Parser::Component => VarInt(11).encode(&mut w)?,
            Parser::Message => VarInt(12).encode(&mut w)?,
            Parser::NbtCompoundTag => VarInt(13).encode(&mut w)?,
            Parser::Particle => VarInt(14).encode(&mut w)?,
            Parser::Rotation => VarInt(15).encode(&mut w)?,
            Parser::ResourceLocation => VarInt(16).encode(&mut w)?,
            Parser::Uuid => VarInt(17).encode(&mut w)?,
        }
        Ok(())
    }
}

impl Decode<'_> for Parser {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(match VarInt::decode(r)?.0 {
            0 => Parser::Bool,
            1 => {
                let (min, max) = decode_min_max(r)?;
                Parser::Float { min, max }
            }
            2 => {
                let (min, max) = decode_min_max(r)?;
                Parser::Double { min, max }
            }
            3 => {
                let (min, max) = decode_min_max(r)?;
                Parser::Integer { min, max }
            }
            4 => {
                let (min, max) = decode_min_max(r)?;
                Parser::Long { min, max }
            }
            5 => Parser::String(StringArg::decode(r)?),
            6 => {
                let flags = u8::decode(r)?;
                Parser::Entity {
                    single: flags & 0x1 != 0,
                    only_players: flags & 0x2 != 0,
                }
            }
            7 => Parser::BlockPos,
            8 => Parser::Vec3,
            9 => Parser::BlockState,
            10 => Parser::ItemStack,
            11 => Parser::Component,
            12 => Parser::Message,
            13 => Parser::NbtCompoundTag,
            14 => Parser::Particle,
            15 => Parser::Rotation,
            16 => Parser::ResourceLocation,
            17 => Parser::Uuid,
            n => bail!("unknown command parser id {n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_node_round_trip() {
        let node = Node {
            children: vec![VarInt(1), VarInt(2)],
            data: NodeData::Literal {
                name: "give".to_owned(),
            },
            executable: true,
            redirect_node: None,
        };
        let mut buf = vec![];
        node.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        let decoded = Node::decode(&mut r).unwrap();
        assert!(matches!(decoded.data, NodeData::Literal { name } if name == "give"));
        assert_eq!(decoded.children, node.children);
        assert!(decoded.executable);
    }

    #[test]
    fn argument_node_with_suggestion_round_trip() {
        let node = Node {
            children: vec![],
            data: NodeData::Argument {
                name: "target".to_owned(),
                parser: Parser::Entity {
                    single: true,
                    only_players: false,
                },
                suggestion: Some(Suggestion::AskServer),
            },
            executable: false,
            redirect_node: Some(VarInt(4)),
        };
        let mut buf = vec![];
        node.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        let decoded = Node::decode(&mut r).unwrap();
        assert_eq!(decoded.redirect_node, Some(VarInt(4)));
        match decoded.data {
            NodeData::Argument {
                name,
                parser: Parser::Entity { single, .. },
                suggestion: Some(Suggestion::AskServer),
            } => {
                assert_eq!(name, "target");
                assert!(single);
            }
            other => panic!("unexpected node data: {other:?}"),
        }
    }

    #[test]
    fn bounded_integer_parser_round_trip() {
        let parser = Parser::Integer {
            min: Some(0),
            max: None,
        };
        let mut buf = vec![];
        parser.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert!(matches!(
            Parser::decode(&mut r).unwrap(),
            Parser::Integer {
                min: Some(0),
                max: None
            }
        ));
    }
}
