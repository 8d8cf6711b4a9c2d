use crate::tag::Tag;
use crate::Compound;

/// An arbitrary NBT value: one payload for each of the 13 tag ids.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// An NBT list value.
///
/// NBT lists are homogeneous: every element has the same tag. A JSON-style
/// heterogeneous list like `[42, "hello", {}]` has no NBT representation, so
/// every element type gets its own variant here instead of one `Vec<Value>`.
#[derive(Clone, PartialEq, Debug)]
pub enum List {
    /// Element type `End`, length zero. The only way to represent an empty
    /// list, since an empty list still has to declare a (possibly
    /// meaningless) element tag on the wire.
    End,
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Vec<i8>>),
    String(Vec<String>),
    List(Vec<List>),
    Compound(Vec<Compound>),
    IntArray(Vec<Vec<i32>>),
    LongArray(Vec<Vec<i64>>),
}

impl List {
    pub fn len(&self) -> usize {
        match self {
            List::End => 0,
            List::Byte(l) => l.len(),
            List::Short(l) => l.len(),
            List::Int(l) => l.len(),
            List::Long(l) => l.len(),
            List::Float(l) => l.len(),
            List::Double(l) => l.len(),
            List::ByteArray(l) => l.len(),
            List::String(l) => l.len(),
            List::List(l) => l.len(),
            List::Compound(l) => l.len(),
            List::IntArray(l) => l.len(),
            List::LongArray(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tag id written for this list's elements on the wire.
    pub fn element_tag(&self) -> Tag {
        match self {
            List::End => Tag::End,
            List::Byte(_) => Tag::Byte,
            List::Short(_) => Tag::Short,
            List::Int(_) => Tag::Int,
            List::Long(_) => Tag::Long,
            List::Float(_) => Tag::Float,
            List::Double(_) => Tag::Double,
            List::ByteArray(_) => Tag::ByteArray,
            List::String(_) => Tag::String,
            List::List(_) => Tag::List,
            List::Compound(_) => Tag::Compound,
            List::IntArray(_) => Tag::IntArray,
            List::LongArray(_) => Tag::LongArray,
        }
    }
}

/// Stable Rust can't build new identifiers in a macro, so the accessor names
/// are supplied at the call site instead of derived from `$nbt_type`.
macro_rules! nbt_conversion {
    ( $($nbt_type:ident = $value_type:ty => $is_function:ident $as_function:ident $as_mut_function:ident $into_function:ident)+ ) => {
        $(
            pub fn $is_function(&self) -> bool {
                self.$as_function().is_some()
            }

            pub fn $as_function(&self) -> Option<&$value_type> {
                match self {
                    Self::$nbt_type(value) => Some(value),
                    _ => None
                }
            }

            pub fn $as_mut_function(&mut self) -> Option<&mut $value_type> {
                match self {
                    Self::$nbt_type(value) => Some(value),
                    _ => None
                }
            }

            pub fn $into_function(self) -> Option<$value_type> {
                match self {
                    Self::$nbt_type(value) => Some(value),
                    _ => None
                }
            }
        )*
    };
}

impl Value {
    nbt_conversion! {
        Byte = i8 => is_byte as_byte as_byte_mut into_byte
        Short = i16 => is_short as_short as_short_mut into_short
        Int = i32 => is_int as_int as_int_mut into_int
        Long = i64 => is_long as_long as_long_mut into_long
        Float = f32 => is_float as_float as_float_mut into_float
        Double = f64 => is_double as_double as_double_mut into_double
        ByteArray = Vec<i8> => is_byte_array as_byte_array as_byte_array_mut into_byte_array
        String = String => is_string as_string as_string_mut into_string
        List = List => is_list as_list as_list_mut into_list
        Compound = Compound => is_compound as_compound as_compound_mut into_compound
        IntArray = Vec<i32> => is_int_array as_int_array as_int_array_mut into_int_array
        LongArray = Vec<i64> => is_long_array as_long_array as_long_array_mut into_long_array
    }

    /// The tag id this value is written with on the wire.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Byte(_) => Tag::Byte,
            Self::Short(_) => Tag::Short,
            Self::Int(_) => Tag::Int,
            Self::Long(_) => Tag::Long,
            Self::Float(_) => Tag::Float,
            Self::Double(_) => Tag::Double,
            Self::ByteArray(_) => Tag::ByteArray,
            Self::String(_) => Tag::String,
            Self::List(_) => Tag::List,
            Self::Compound(_) => Tag::Compound,
            Self::IntArray(_) => Tag::IntArray,
            Self::LongArray(_) => Tag::LongArray,
        }
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

/// Bools have no dedicated NBT tag; Minecraft stores them as a 0/1 byte.
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Byte(b as _)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Vec<i8>> for Value {
    fn from(v: Vec<i8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Compound> for Value {
    fn from(v: Compound) -> Self {
        Self::Compound(v)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Self::LongArray(v)
    }
}

impl From<Vec<i8>> for List {
    fn from(v: Vec<i8>) -> Self {
        List::Byte(v)
    }
}

impl From<Vec<i16>> for List {
    fn from(v: Vec<i16>) -> Self {
        List::Short(v)
    }
}

impl From<Vec<i32>> for List {
    fn from(v: Vec<i32>) -> Self {
        List::Int(v)
    }
}

impl From<Vec<i64>> for List {
    fn from(v: Vec<i64>) -> Self {
        List::Long(v)
    }
}

impl From<Vec<f32>> for List {
    fn from(v: Vec<f32>) -> Self {
        List::Float(v)
    }
}

impl From<Vec<f64>> for List {
    fn from(v: Vec<f64>) -> Self {
        List::Double(v)
    }
}

impl From<Vec<String>> for List {
    fn from(v: Vec<String>) -> Self {
        List::String(v)
    }
}

impl From<Vec<Compound>> for List {
    fn from(v: Vec<Compound>) -> Self {
        List::Compound(v)
    }
}
