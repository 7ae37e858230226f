use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

/// NBT tag type IDs.
pub const TAG_END: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_SHORT: u8 = 2;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_FLOAT: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_BYTE_ARRAY: u8 = 7;
pub const TAG_STRING: u8 = 8;
pub const TAG_LIST: u8 = 9;
pub const TAG_COMPOUND: u8 = 10;
pub const TAG_INT_ARRAY: u8 = 11;
pub const TAG_LONG_ARRAY: u8 = 12;

/// Maximum nesting of lists and compounds accepted when reading.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NbtError {
    #[error("Unexpected end of NBT data")]
    UnexpectedEnd,
    #[error("Invalid NBT tag type: {0}")]
    InvalidTagType(u8),
    #[error("NBT nesting deeper than {MAX_DEPTH}")]
    TooDeep,
    #[error("Invalid NBT length: {0}")]
    InvalidLength(i32),
    #[error("NBT string is not valid UTF-8")]
    InvalidString,
}

pub type NbtResult<T> = Result<T, NbtError>;

/// An NBT value.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// The element type is kept so that empty lists re-encode as they arrived.
    List {
        element_type: u8,
        items: Vec<NbtValue>,
    },
    Compound(Vec<(String, NbtValue)>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// A root tag together with the name it was written under.
#[derive(Debug, Clone, PartialEq)]
pub struct RootTag {
    pub name: String,
    pub value: NbtValue,
}

impl RootTag {
    pub fn new(name: impl Into<String>, value: NbtValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl From<NbtValue> for RootTag {
    fn from(value: NbtValue) -> Self {
        Self::new("", value)
    }
}

impl NbtValue {
    /// A list whose element type is taken from its first item.
    pub fn list(items: Vec<NbtValue>) -> Self {
        let element_type = items.first().map_or(TAG_END, NbtValue::tag_id);
        NbtValue::List {
            element_type,
            items,
        }
    }

    pub fn empty_list(element_type: u8) -> Self {
        NbtValue::List {
            element_type,
            items: Vec::new(),
        }
    }

    pub fn tag_id(&self) -> u8 {
        match self {
            NbtValue::Byte(_) => TAG_BYTE,
            NbtValue::Short(_) => TAG_SHORT,
            NbtValue::Int(_) => TAG_INT,
            NbtValue::Long(_) => TAG_LONG,
            NbtValue::Float(_) => TAG_FLOAT,
            NbtValue::Double(_) => TAG_DOUBLE,
            NbtValue::ByteArray(_) => TAG_BYTE_ARRAY,
            NbtValue::String(_) => TAG_STRING,
            NbtValue::List { .. } => TAG_LIST,
            NbtValue::Compound(_) => TAG_COMPOUND,
            NbtValue::IntArray(_) => TAG_INT_ARRAY,
            NbtValue::LongArray(_) => TAG_LONG_ARRAY,
        }
    }

    /// Look up a direct child of a compound by name.
    pub fn get(&self, key: &str) -> Option<&NbtValue> {
        match self {
            NbtValue::Compound(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Write this value as a full named root tag.
    pub fn write_root_named(&self, name: &str, buf: &mut BytesMut) {
        buf.put_u8(self.tag_id());
        write_nbt_string(name, buf);
        self.write_payload(buf);
    }

    /// Write just the payload (no tag type or name).
    pub fn write_payload(&self, buf: &mut BytesMut) {
        match self {
            NbtValue::Byte(v) => buf.put_i8(*v),
            NbtValue::Short(v) => buf.put_i16(*v),
            NbtValue::Int(v) => buf.put_i32(*v),
            NbtValue::Long(v) => buf.put_i64(*v),
            NbtValue::Float(v) => buf.put_f32(*v),
            NbtValue::Double(v) => buf.put_f64(*v),
            NbtValue::ByteArray(v) => {
                buf.put_i32(v.len() as i32);
                for b in v {
                    buf.put_i8(*b);
                }
            }
            NbtValue::String(v) => {
                write_nbt_string(v, buf);
            }
            NbtValue::List {
                element_type,
                items,
            } => {
                buf.put_u8(items.first().map_or(*element_type, NbtValue::tag_id));
                buf.put_i32(items.len() as i32);
                for item in items {
                    item.write_payload(buf);
                }
            }
            NbtValue::Compound(entries) => {
                for (name, value) in entries {
                    buf.put_u8(value.tag_id());
                    write_nbt_string(name, buf);
                    value.write_payload(buf);
                }
                buf.put_u8(TAG_END);
            }
            NbtValue::IntArray(v) => {
                buf.put_i32(v.len() as i32);
                for i in v {
                    buf.put_i32(*i);
                }
            }
            NbtValue::LongArray(v) => {
                buf.put_i32(v.len() as i32);
                for l in v {
                    buf.put_i64(*l);
                }
            }
        }
    }

    /// Read the payload of a tag whose type byte has already been consumed.
    pub fn read_payload(tag_id: u8, buf: &mut BytesMut) -> NbtResult<Self> {
        read_payload(tag_id, buf, 0)
    }
}

/// Read an optional root tag in network form: a type byte, the root name,
/// then the payload. A lone `TAG_END` means "no tag".
pub fn read_network(buf: &mut BytesMut) -> NbtResult<Option<RootTag>> {
    let tag_id = take_u8(buf)?;
    if tag_id == TAG_END {
        return Ok(None);
    }
    let name = read_nbt_string(buf)?;
    let value = read_payload(tag_id, buf, 0)?;
    Ok(Some(RootTag { name, value }))
}

pub fn write_network(tag: Option<&RootTag>, buf: &mut BytesMut) {
    match tag {
        Some(tag) => tag.value.write_root_named(&tag.name, buf),
        None => buf.put_u8(TAG_END),
    }
}

fn read_payload(tag_id: u8, buf: &mut BytesMut, depth: usize) -> NbtResult<NbtValue> {
    if depth > MAX_DEPTH {
        return Err(NbtError::TooDeep);
    }
    let value = match tag_id {
        TAG_BYTE => NbtValue::Byte(take_u8(buf)? as i8),
        TAG_SHORT => {
            ensure(buf, 2)?;
            NbtValue::Short(buf.get_i16())
        }
        TAG_INT => {
            ensure(buf, 4)?;
            NbtValue::Int(buf.get_i32())
        }
        TAG_LONG => {
            ensure(buf, 8)?;
            NbtValue::Long(buf.get_i64())
        }
        TAG_FLOAT => {
            ensure(buf, 4)?;
            NbtValue::Float(buf.get_f32())
        }
        TAG_DOUBLE => {
            ensure(buf, 8)?;
            NbtValue::Double(buf.get_f64())
        }
        TAG_BYTE_ARRAY => {
            let len = read_len(buf, 1)?;
            NbtValue::ByteArray((0..len).map(|_| buf.get_i8()).collect())
        }
        TAG_STRING => NbtValue::String(read_nbt_string(buf)?),
        TAG_LIST => {
            let element_id = take_u8(buf)?;
            let len = read_len(buf, 0)?;
            if element_id == TAG_END && len > 0 {
                return Err(NbtError::InvalidTagType(TAG_END));
            }
            let mut items = Vec::with_capacity(len.min(buf.remaining()));
            for _ in 0..len {
                items.push(read_payload(element_id, buf, depth + 1)?);
            }
            NbtValue::List {
                element_type: element_id,
                items,
            }
        }
        TAG_COMPOUND => {
            let mut entries = Vec::new();
            loop {
                let child_id = take_u8(buf)?;
                if child_id == TAG_END {
                    break;
                }
                let name = read_nbt_string(buf)?;
                let value = read_payload(child_id, buf, depth + 1)?;
                entries.push((name, value));
            }
            NbtValue::Compound(entries)
        }
        TAG_INT_ARRAY => {
            let len = read_len(buf, 4)?;
            NbtValue::IntArray((0..len).map(|_| buf.get_i32()).collect())
        }
        TAG_LONG_ARRAY => {
            let len = read_len(buf, 8)?;
            NbtValue::LongArray((0..len).map(|_| buf.get_i64()).collect())
        }
        other => return Err(NbtError::InvalidTagType(other)),
    };
    Ok(value)
}

fn ensure(buf: &BytesMut, n: usize) -> NbtResult<()> {
    if buf.remaining() < n {
        return Err(NbtError::UnexpectedEnd);
    }
    Ok(())
}

fn take_u8(buf: &mut BytesMut) -> NbtResult<u8> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

/// Read an i32 length and make sure `len * element_size` bytes are actually
/// there, so a hostile length can't trigger a huge allocation.
fn read_len(buf: &mut BytesMut, element_size: usize) -> NbtResult<usize> {
    ensure(buf, 4)?;
    let len = buf.get_i32();
    if len < 0 {
        return Err(NbtError::InvalidLength(len));
    }
    let len = len as usize;
    if element_size > 0 && buf.remaining() < len.saturating_mul(element_size) {
        return Err(NbtError::UnexpectedEnd);
    }
    Ok(len)
}

fn read_nbt_string(buf: &mut BytesMut) -> NbtResult<String> {
    ensure(buf, 2)?;
    let len = buf.get_u16() as usize;
    ensure(buf, len)?;
    let bytes = buf.split_to(len);
    String::from_utf8(bytes.to_vec()).map_err(|_| NbtError::InvalidString)
}

fn write_nbt_string(s: &str, buf: &mut BytesMut) {
    let bytes = s.as_bytes();
    buf.put_u16(bytes.len() as u16);
    buf.put_slice(bytes);
}

/// Helper macro for building compound tags.
#[macro_export]
macro_rules! nbt_compound {
    ($($key:expr => $val:expr),* $(,)?) => {
        $crate::NbtValue::Compound(vec![
            $(($key.into(), $val)),*
        ])
    };
}

/// Helper macro for building list tags.
#[macro_export]
macro_rules! nbt_list {
    ($($val:expr),* $(,)?) => {
        $crate::NbtValue::list(vec![$($val),*])
    };
}
