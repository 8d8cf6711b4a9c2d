use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::tag::Tag;
use crate::{Compound, Error, List, Result, Value};

/// Encodes uncompressed NBT binary data to the provided writer.
///
/// Only compounds are permitted at the top level, so this takes a
/// [`Compound`] reference rather than a [`Value`]. `root_name` is usually
/// the empty string; Minecraft leaves it unused almost everywhere it writes
/// NBT over the network.
pub fn to_binary<W: Write>(mut writer: W, comp: &Compound, root_name: &str) -> Result<()> {
    let mut state = EncodeState { writer: &mut writer };

    state.write_tag(Tag::Compound)?;
    state.write_string(root_name)?;
    state.write_compound(comp)?;

    Ok(())
}

struct EncodeState<W> {
    writer: W,
}

impl<W: Write> EncodeState<W> {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        Ok(self.writer.write_u8(tag.id())?)
    }

    fn write_value(&mut self, v: &Value) -> Result<()> {
        match v {
            Value::Byte(v) => self.write_byte(*v),
            Value::Short(v) => self.write_short(*v),
            Value::Int(v) => self.write_int(*v),
            Value::Long(v) => self.write_long(*v),
            Value::Float(v) => self.write_float(*v),
            Value::Double(v) => self.write_double(*v),
            Value::ByteArray(v) => self.write_byte_array(v),
            Value::String(v) => self.write_string(v),
            Value::List(v) => self.write_any_list(v),
            Value::Compound(v) => self.write_compound(v),
            Value::IntArray(v) => self.write_int_array(v),
            Value::LongArray(v) => self.write_long_array(v),
        }
    }

    fn write_byte(&mut self, byte: i8) -> Result<()> {
        Ok(self.writer.write_i8(byte)?)
    }

    fn write_short(&mut self, short: i16) -> Result<()> {
        Ok(self.writer.write_i16::<BigEndian>(short)?)
    }

    fn write_int(&mut self, int: i32) -> Result<()> {
        Ok(self.writer.write_i32::<BigEndian>(int)?)
    }

    fn write_long(&mut self, long: i64) -> Result<()> {
        Ok(self.writer.write_i64::<BigEndian>(long)?)
    }

    fn write_float(&mut self, float: f32) -> Result<()> {
        Ok(self.writer.write_f32::<BigEndian>(float)?)
    }

    fn write_double(&mut self, double: f64) -> Result<()> {
        Ok(self.writer.write_f64::<BigEndian>(double)?)
    }

    fn write_len(&mut self, len: usize, what: &str) -> Result<()> {
        match i32::try_from(len) {
            Ok(n) => Ok(self.writer.write_i32::<BigEndian>(n)?),
            Err(_) => Err(Error::new_owned(format!(
                "{what} of length {len} exceeds maximum of i32::MAX"
            ))),
        }
    }

    fn write_byte_array(&mut self, bytes: &[i8]) -> Result<()> {
        self.write_len(bytes.len(), "byte array")?;
        let bytes: Vec<u8> = bytes.iter().map(|&b| b as u8).collect();
        Ok(self.writer.write_all(&bytes)?)
    }

    /// Writes a length-prefixed Modified UTF-8 string.
    fn write_string(&mut self, s: &str) -> Result<()> {
        let encoded = cesu8::to_java_cesu8(s);

        let len: u16 = encoded
            .len()
            .try_into()
            .map_err(|_| Error::new_owned(format!("string of length {} exceeds u16::MAX", s.len())))?;

        self.writer.write_u16::<BigEndian>(len)?;
        Ok(self.writer.write_all(&encoded)?)
    }

    fn write_any_list(&mut self, list: &List) -> Result<()> {
        match list {
            List::End => {
                self.write_tag(Tag::End)?;
                self.writer.write_i32::<BigEndian>(0)?;
                Ok(())
            }
            List::Byte(v) => {
                self.write_tag(Tag::Byte)?;
                self.write_byte_array(v)
            }
            List::Short(l) => self.write_list(l, Tag::Short, Self::write_short),
            List::Int(l) => self.write_list(l, Tag::Int, Self::write_int),
            List::Long(l) => self.write_list(l, Tag::Long, Self::write_long),
            List::Float(l) => self.write_list(l, Tag::Float, Self::write_float),
            List::Double(l) => self.write_list(l, Tag::Double, Self::write_double),
            List::ByteArray(v) => self.write_list_ref(v, Tag::ByteArray, |st, a| st.write_byte_array(a)),
            List::String(v) => self.write_list_ref(v, Tag::String, |st, s| st.write_string(s)),
            List::List(v) => self.write_list_ref(v, Tag::List, Self::write_any_list),
            List::Compound(v) => self.write_list_ref(v, Tag::Compound, Self::write_compound),
            List::IntArray(v) => self.write_list_ref(v, Tag::IntArray, |st, a| st.write_int_array(a)),
            List::LongArray(v) => {
                self.write_list_ref(v, Tag::LongArray, |st, a| st.write_long_array(a))
            }
        }
    }

    fn write_list<T: Copy>(
        &mut self,
        list: &[T],
        elem_type: Tag,
        mut write_elem: impl FnMut(&mut Self, T) -> Result<()>,
    ) -> Result<()> {
        self.write_tag(elem_type)?;
        self.write_len(list.len(), elem_type.name())?;
        for &elem in list {
            write_elem(self, elem)?;
        }
        Ok(())
    }

    fn write_list_ref<T>(
        &mut self,
        list: &[T],
        elem_type: Tag,
        mut write_elem: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.write_tag(elem_type)?;
        self.write_len(list.len(), elem_type.name())?;
        for elem in list {
            write_elem(self, elem)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, c: &Compound) -> Result<()> {
        for (k, v) in c {
            self.write_tag(v.tag())?;
            self.write_string(k)?;
            self.write_value(v)?;
        }
        self.write_tag(Tag::End)
    }

    fn write_int_array(&mut self, ia: &[i32]) -> Result<()> {
        self.write_len(ia.len(), "int array")?;
        for &i in ia {
            self.write_int(i)?;
        }
        Ok(())
    }

    fn write_long_array(&mut self, la: &[i64]) -> Result<()> {
        self.write_len(la.len(), "long array")?;
        for &l in la {
            self.write_long(l)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound;

    #[test]
    fn writes_end_tag_for_empty_compound() {
        let mut buf = Vec::new();
        to_binary(&mut buf, &Compound::new(), "").unwrap();
        // tag(Compound) + name len(0) + End tag.
        assert_eq!(buf, vec![Tag::Compound.id(), 0, 0, Tag::End.id()]);
    }

    #[test]
    fn writes_empty_list_as_end_type_zero_length() {
        let c = compound! { "l" => List::End };
        let mut buf = Vec::new();
        to_binary(&mut buf, &c, "").unwrap();
        assert!(buf
            .windows(5)
            .any(|w| w == [Tag::List.id(), 0, 1, b'l', Tag::End.id()]));
    }
}
