use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::tag::Tag;
use crate::{Compound, Error, List, Result, Value};

/// Reserving capacity ahead of time for a length we read from untrusted
/// input is an allocation-DoS vector if taken at face value; cap it so a
/// forged huge count costs one bounded allocation instead of gigabytes.
const MAX_PREALLOC_BYTES: usize = 2048;

/// NBT data is a tree; bound the recursion so a maliciously deep document
/// can't blow the stack.
const MAX_DEPTH: usize = 512;

fn cautious_capacity<Element>(size_hint: usize) -> usize {
    let max_elements = MAX_PREALLOC_BYTES / std::mem::size_of::<Element>().max(1);
    size_hint.min(max_elements)
}

/// Decodes an uncompressed root NBT tag (tag id + name + payload) from `r`,
/// returning its value and the root's name.
///
/// This does not sniff for gzip; see
/// [`from_binary_gzip_aware`][crate::binary::from_binary_gzip_aware] for
/// that.
pub fn from_binary<R: Read>(r: &mut R) -> Result<(Value, String)> {
    let mut state = DecodeState { reader: r, depth: 0 };

    let root_tag = state.read_tag()?;
    if root_tag == Tag::End {
        return Err(Error::new_static("expected a typed root tag, got End"));
    }

    let root_name = state.read_string()?;
    let value = state.read_value(root_tag)?;

    Ok((value, root_name))
}

struct DecodeState<R> {
    reader: R,
    depth: usize,
}

impl<R: Read> DecodeState<R> {
    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::new_static("reached maximum NBT recursion depth"));
        }

        let res = f(self);
        self.depth -= 1;
        res
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let id = self.reader.read_u8()?;
        Tag::from_u8(id).ok_or_else(|| Error::new_owned(format!("invalid tag id {id}")))
    }

    fn read_byte(&mut self) -> Result<i8> {
        Ok(self.reader.read_i8()?)
    }

    fn read_short(&mut self) -> Result<i16> {
        Ok(self.reader.read_i16::<BigEndian>()?)
    }

    fn read_int(&mut self) -> Result<i32> {
        Ok(self.reader.read_i32::<BigEndian>()?)
    }

    fn read_long(&mut self) -> Result<i64> {
        Ok(self.reader.read_i64::<BigEndian>()?)
    }

    fn read_float(&mut self) -> Result<f32> {
        Ok(self.reader.read_f32::<BigEndian>()?)
    }

    fn read_double(&mut self) -> Result<f64> {
        Ok(self.reader.read_f64::<BigEndian>()?)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_int()?;
        if len < 0 {
            return Err(Error::new_static("negative byte array length"));
        }

        let mut array = Vec::with_capacity(cautious_capacity::<i8>(len as usize));
        for _ in 0..len {
            array.push(self.read_byte()?);
        }
        Ok(array)
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_int()?;
        if len < 0 {
            return Err(Error::new_static("negative int array length"));
        }

        let mut array = Vec::with_capacity(cautious_capacity::<i32>(len as usize));
        for _ in 0..len {
            array.push(self.read_int()?);
        }
        Ok(array)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_int()?;
        if len < 0 {
            return Err(Error::new_static("negative long array length"));
        }

        let mut array = Vec::with_capacity(cautious_capacity::<i64>(len as usize));
        for _ in 0..len {
            array.push(self.read_long()?);
        }
        Ok(array)
    }

    /// A u16 byte length followed by that many Modified UTF-8 bytes.
    fn read_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;

        let mut bytes = vec![0u8; len];
        self.reader.read_exact(&mut bytes)?;

        cesu8::from_java_cesu8(&bytes)
            .map(|s| s.into_owned())
            .map_err(|_| Error::new_static("invalid modified UTF-8 string"))
    }

    fn read_any_list(&mut self) -> Result<List> {
        self.check_depth(Self::read_any_list_inner)
    }

    fn read_any_list_inner(&mut self) -> Result<List> {
        let element_tag = self.read_tag()?;
        let len = self.read_int()?;

        if len <= 0 {
            return Ok(List::End);
        }

        let len = len as usize;

        Ok(match element_tag {
            Tag::End => {
                return Err(Error::new_static(
                    "list of End tags with nonzero length is invalid",
                ))
            }
            Tag::Byte => List::Byte(self.read_list_elements(len, Self::read_byte)?),
            Tag::Short => List::Short(self.read_list_elements(len, Self::read_short)?),
            Tag::Int => List::Int(self.read_list_elements(len, Self::read_int)?),
            Tag::Long => List::Long(self.read_list_elements(len, Self::read_long)?),
            Tag::Float => List::Float(self.read_list_elements(len, Self::read_float)?),
            Tag::Double => List::Double(self.read_list_elements(len, Self::read_double)?),
            Tag::ByteArray => {
                List::ByteArray(self.read_list_elements(len, Self::read_byte_array)?)
            }
            Tag::String => List::String(self.read_list_elements(len, Self::read_string)?),
            Tag::List => List::List(self.read_list_elements(len, Self::read_any_list)?),
            Tag::Compound => List::Compound(self.read_list_elements(len, Self::read_compound)?),
            Tag::IntArray => List::IntArray(self.read_list_elements(len, Self::read_int_array)?),
            Tag::LongArray => {
                List::LongArray(self.read_list_elements(len, Self::read_long_array)?)
            }
        })
    }

    fn read_list_elements<T>(
        &mut self,
        len: usize,
        mut read_one: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut elements = Vec::with_capacity(cautious_capacity::<T>(len));
        for _ in 0..len {
            elements.push(read_one(self)?);
        }
        Ok(elements)
    }

    fn read_compound(&mut self) -> Result<Compound> {
        self.check_depth(Self::read_compound_inner)
    }

    fn read_compound_inner(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let tag = self.read_tag()?;
            if tag == Tag::End {
                return Ok(compound);
            }

            let name = self.read_string()?;
            let value = self.read_value(tag)?;
            compound.insert(name, value);
        }
    }

    fn read_value(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::End => return Err(Error::new_static("unexpected End tag")),
            Tag::Byte => Value::Byte(self.read_byte()?),
            Tag::Short => Value::Short(self.read_short()?),
            Tag::Int => Value::Int(self.read_int()?),
            Tag::Long => Value::Long(self.read_long()?),
            Tag::Float => Value::Float(self.read_float()?),
            Tag::Double => Value::Double(self.read_double()?),
            Tag::ByteArray => Value::ByteArray(self.read_byte_array()?),
            Tag::String => Value::String(self.read_string()?),
            Tag::List => Value::List(self.read_any_list()?),
            Tag::Compound => Value::Compound(self.read_compound()?),
            Tag::IntArray => Value::IntArray(self.read_int_array()?),
            Tag::LongArray => Value::LongArray(self.read_long_array()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound;

    #[test]
    fn rejects_end_root_tag() {
        let buf = [0u8];
        assert!(from_binary(&mut &buf[..]).is_err());
    }

    #[test]
    fn rejects_excessive_depth() {
        let mut buf = Vec::new();
        buf.push(Tag::Compound.id());
        buf.extend_from_slice(&0u16.to_be_bytes()); // root name ""

        for _ in 0..(MAX_DEPTH + 1) {
            buf.push(Tag::Compound.id());
            buf.extend_from_slice(&0u16.to_be_bytes());
            buf.extend_from_slice(b"c");
        }

        assert!(from_binary(&mut &buf[..]).is_err());
    }

    #[test]
    fn round_trips_simple_compound() {
        let c = compound! {
            "byte" => 5_i8,
            "name" => "steve",
        };

        let mut buf = Vec::new();
        crate::to_binary(&mut buf, &c, "root").unwrap();

        let (value, name) = from_binary(&mut buf.as_slice()).unwrap();
        assert_eq!(name, "root");
        assert_eq!(value.into_compound().unwrap(), c);
    }
}
