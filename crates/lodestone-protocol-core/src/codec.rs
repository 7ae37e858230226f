use bytes::{Buf, BufMut, BytesMut};
use lodestone_nbt::{NbtError, RootTag};
use lodestone_types::{BlockPos, ItemStack, TextComponent};
use thiserror::Error;
use uuid::Uuid;

use crate::state::{PacketDirection, ProtocolState};

/// Default cap for strings, in UTF-16 code units.
pub const DEFAULT_MAX_STRING_LEN: usize = 32767;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("VarInt too big")]
    VarIntTooBig,
    #[error("VarLong too big")]
    VarLongTooBig,
    #[error("Not enough data")]
    NotEnoughData,
    #[error("String too long: {0} > {1}")]
    StringTooLong(usize, usize),
    #[error("String is not valid UTF-8")]
    InvalidUtf8,
    #[error("Malformed NBT: {0}")]
    Nbt(#[from] NbtError),
    #[error("Malformed data: {0}")]
    Malformed(String),
    #[error("{0} bytes left over after packet body")]
    TrailingBytes(usize),
    #[error("Unknown {domain} code: {code}")]
    UnknownCode { domain: &'static str, code: i32 },
    #[error("Unknown packet id 0x{id:02X} for {state} {direction}")]
    UnknownOpcode {
        state: ProtocolState,
        direction: PacketDirection,
        id: i32,
    },
    #[error("{name} is not registered for {state} {direction}")]
    UnregisteredPacket {
        name: &'static str,
        state: ProtocolState,
        direction: PacketDirection,
    },
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Illegal state transition {from} -> {to}")]
    InvalidTransition {
        from: ProtocolState,
        to: ProtocolState,
    },
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A primitive could not be read: bad varint, short buffer, oversized string...
    Format,
    /// A magic-value lookup missed.
    UnknownCode,
    /// No packet registered for an incoming id. The connection can't resync after this.
    UnknownOpcode,
    /// A structured (JSON) sub-document is missing a required field.
    Schema,
    /// A packet invariant was violated at construction.
    InvalidArgument,
    /// The codec was driven incorrectly (unregistered packet, illegal transition).
    Usage,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::VarIntTooBig
            | CodecError::VarLongTooBig
            | CodecError::NotEnoughData
            | CodecError::StringTooLong(..)
            | CodecError::InvalidUtf8
            | CodecError::Nbt(_)
            | CodecError::Malformed(_)
            | CodecError::TrailingBytes(_) => ErrorKind::Format,
            CodecError::UnknownCode { .. } => ErrorKind::UnknownCode,
            CodecError::UnknownOpcode { .. } => ErrorKind::UnknownOpcode,
            CodecError::Schema(_) => ErrorKind::Schema,
            CodecError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CodecError::UnregisteredPacket { .. } | CodecError::InvalidTransition { .. } => {
                ErrorKind::Usage
            }
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => CodecError::Schema(err.to_string()),
            _ => CodecError::Malformed(format!("invalid JSON: {err}")),
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

fn ensure(buf: &BytesMut, n: usize) -> CodecResult<()> {
    if buf.remaining() < n {
        return Err(CodecError::NotEnoughData);
    }
    Ok(())
}

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;
const MAX_VARINT_BYTES: usize = 5;
const MAX_VARLONG_BYTES: usize = 10;

/// Read up to `max_bytes` 7-bit groups, least significant first.
fn read_var(buf: &mut BytesMut, max_bytes: usize) -> CodecResult<Option<u64>> {
    let mut value = 0u64;
    for i in 0..max_bytes {
        let byte = read_u8(buf)?;
        value |= u64::from(byte & SEGMENT_BITS) << (7 * i);
        if byte & CONTINUE_BIT == 0 {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn write_var(buf: &mut BytesMut, mut value: u64) {
    while value > u64::from(SEGMENT_BITS) {
        buf.put_u8((value as u8 & SEGMENT_BITS) | CONTINUE_BIT);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Read a varint.
///
/// # Errors
///
/// [`CodecError::NotEnoughData`] if the buffer ends mid-value and
/// [`CodecError::VarIntTooBig`] past five bytes. Both are
/// [`ErrorKind::Format`].
pub fn read_varint(buf: &mut BytesMut) -> CodecResult<i32> {
    match read_var(buf, MAX_VARINT_BYTES)? {
        Some(value) => Ok(value as u32 as i32),
        None => Err(CodecError::VarIntTooBig),
    }
}

/// Negative values always take five bytes.
pub fn write_varint(buf: &mut BytesMut, value: i32) {
    write_var(buf, u64::from(value as u32));
}

pub fn varint_len(value: i32) -> usize {
    let bits = 32 - (value as u32).leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Read a varlong. Fails like [`read_varint`], with
/// [`CodecError::VarLongTooBig`] past ten bytes.
pub fn read_varlong(buf: &mut BytesMut) -> CodecResult<i64> {
    match read_var(buf, MAX_VARLONG_BYTES)? {
        Some(value) => Ok(value as i64),
        None => Err(CodecError::VarLongTooBig),
    }
}

pub fn write_varlong(buf: &mut BytesMut, value: i64) {
    write_var(buf, value as u64);
}

/// Read a protocol string (varint-prefixed UTF-8).
///
/// `max_len` is measured in UTF-16 code units, as the game does. The declared
/// byte length is checked against `max_len * 4` before anything is copied.
pub fn read_string(buf: &mut BytesMut, max_len: usize) -> CodecResult<String> {
    let len = read_varint(buf)?;
    if len < 0 {
        return Err(CodecError::Malformed(format!("negative string length {len}")));
    }
    let len = len as usize;
    if len > max_len * 4 {
        return Err(CodecError::StringTooLong(len, max_len));
    }
    ensure(buf, len)?;
    let bytes = buf.split_to(len);
    let s = String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)?;
    let units = s.encode_utf16().count();
    if units > max_len {
        return Err(CodecError::StringTooLong(units, max_len));
    }
    Ok(s)
}

/// Write a protocol string.
pub fn write_string(buf: &mut BytesMut, s: &str) {
    write_varint(buf, s.len() as i32);
    buf.put_slice(s.as_bytes());
}

pub fn read_u8(buf: &mut BytesMut) -> CodecResult<u8> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

pub fn read_i8(buf: &mut BytesMut) -> CodecResult<i8> {
    ensure(buf, 1)?;
    Ok(buf.get_i8())
}

pub fn read_bool(buf: &mut BytesMut) -> CodecResult<bool> {
    Ok(read_u8(buf)? != 0)
}

pub fn read_i16(buf: &mut BytesMut) -> CodecResult<i16> {
    ensure(buf, 2)?;
    Ok(buf.get_i16())
}

pub fn read_u16(buf: &mut BytesMut) -> CodecResult<u16> {
    ensure(buf, 2)?;
    Ok(buf.get_u16())
}

pub fn read_i32(buf: &mut BytesMut) -> CodecResult<i32> {
    ensure(buf, 4)?;
    Ok(buf.get_i32())
}

pub fn read_i64(buf: &mut BytesMut) -> CodecResult<i64> {
    ensure(buf, 8)?;
    Ok(buf.get_i64())
}

pub fn read_f32(buf: &mut BytesMut) -> CodecResult<f32> {
    ensure(buf, 4)?;
    Ok(buf.get_f32())
}

pub fn read_f64(buf: &mut BytesMut) -> CodecResult<f64> {
    ensure(buf, 8)?;
    Ok(buf.get_f64())
}

/// Read a UUID (128 bits, big endian).
pub fn read_uuid(buf: &mut BytesMut) -> CodecResult<Uuid> {
    ensure(buf, 16)?;
    let mut bytes = [0u8; 16];
    buf.copy_to_slice(&mut bytes);
    Ok(Uuid::from_bytes(bytes))
}

/// Write a UUID.
pub fn write_uuid(buf: &mut BytesMut, uuid: &Uuid) {
    buf.put_slice(uuid.as_bytes());
}

/// Read a byte array with varint length prefix.
pub fn read_byte_array(buf: &mut BytesMut) -> CodecResult<Vec<u8>> {
    let len = read_varint(buf)?;
    if len < 0 {
        return Err(CodecError::Malformed(format!("negative array length {len}")));
    }
    ensure(buf, len as usize)?;
    let bytes = buf.split_to(len as usize);
    Ok(bytes.to_vec())
}

/// Write a byte array with varint length prefix.
pub fn write_byte_array(buf: &mut BytesMut, data: &[u8]) {
    write_varint(buf, data.len() as i32);
    buf.put_slice(data);
}

/// Take every byte left in the packet body.
pub fn read_remaining(buf: &mut BytesMut) -> Vec<u8> {
    buf.split().to_vec()
}

/// Read a collection count, rejecting negatives.
pub fn read_count(buf: &mut BytesMut) -> CodecResult<usize> {
    let count = read_varint(buf)?;
    if count < 0 {
        return Err(CodecError::Malformed(format!("negative count {count}")));
    }
    Ok(count as usize)
}

pub fn read_position(buf: &mut BytesMut) -> CodecResult<BlockPos> {
    ensure(buf, 8)?;
    Ok(BlockPos::decode(buf.get_u64()))
}

pub fn write_position(buf: &mut BytesMut, pos: &BlockPos) {
    buf.put_u64(pos.encode());
}

/// Read an optional root tag, keeping its root name.
pub fn read_nbt(buf: &mut BytesMut) -> CodecResult<Option<RootTag>> {
    Ok(lodestone_nbt::read_network(buf)?)
}

pub fn write_nbt(buf: &mut BytesMut, nbt: Option<&RootTag>) {
    lodestone_nbt::write_network(nbt, buf);
}

/// Read an item stack: presence flag, then item id, count and tag.
/// Returns None for empty slots.
pub fn read_item_stack(buf: &mut BytesMut) -> CodecResult<Option<ItemStack>> {
    if !read_bool(buf)? {
        return Ok(None);
    }
    let item_id = read_varint(buf)?;
    let count = read_i8(buf)?;
    let nbt = read_nbt(buf)?;
    Ok(Some(ItemStack {
        item_id,
        count,
        nbt,
    }))
}

/// Write an item stack. Empty slots are a single `false` byte.
pub fn write_item_stack(buf: &mut BytesMut, item: &Option<ItemStack>) {
    match item {
        None => buf.put_u8(0),
        Some(item) => {
            buf.put_u8(1);
            write_varint(buf, item.item_id);
            buf.put_i8(item.count);
            write_nbt(buf, item.nbt.as_ref());
        }
    }
}

/// Read a JSON text component carried in a string.
pub fn read_component(buf: &mut BytesMut) -> CodecResult<TextComponent> {
    let json = read_string(buf, DEFAULT_MAX_STRING_LEN)?;
    Ok(TextComponent::from_json(&json)?)
}

pub fn write_component(buf: &mut BytesMut, component: &TextComponent) {
    write_string(buf, &component.to_json());
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_nbt::{nbt_compound, NbtValue};

    #[test]
    fn test_varint_roundtrip() {
        let test_cases = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (127, vec![0x7F]),
            (128, vec![0x80, 0x01]),
            (255, vec![0xFF, 0x01]),
            (25565, vec![0xDD, 0xC7, 0x01]),
            (2097151, vec![0xFF, 0xFF, 0x7F]),
            (i32::MAX, vec![0xFF, 0xFF, 0xFF, 0xFF, 0x07]),
            (-1, vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
            (i32::MIN, vec![0x80, 0x80, 0x80, 0x80, 0x08]),
        ];

        for (value, expected_bytes) in test_cases {
            let mut buf = BytesMut::new();
            write_varint(&mut buf, value);
            assert_eq!(
                buf.to_vec(),
                expected_bytes,
                "write_varint({}) failed",
                value
            );

            let mut buf = BytesMut::from(&expected_bytes[..]);
            let result = read_varint(&mut buf).unwrap();
            assert_eq!(result, value, "read_varint for {} failed", value);
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn test_varint_too_big() {
        let mut buf = BytesMut::from(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01][..]);
        let err = read_varint(&mut buf).unwrap_err();
        assert!(matches!(err, CodecError::VarIntTooBig));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_varint_truncated() {
        let mut buf = BytesMut::from(&[0x80, 0x80][..]);
        assert!(matches!(
            read_varint(&mut buf),
            Err(CodecError::NotEnoughData)
        ));
    }

    #[test]
    fn test_varint_len() {
        assert_eq!(varint_len(0), 1);
        assert_eq!(varint_len(127), 1);
        assert_eq!(varint_len(128), 2);
        assert_eq!(varint_len(25565), 3);
        assert_eq!(varint_len(-1), 5);
    }

    #[test]
    fn test_varlong_roundtrip() {
        for value in [0i64, 1, 300, i64::MAX, i64::MIN, -1] {
            let mut buf = BytesMut::new();
            write_varlong(&mut buf, value);
            assert_eq!(read_varlong(&mut buf).unwrap(), value);
        }
    }

    #[test]
    fn test_varlong_too_big() {
        let mut bytes = vec![0x80; 10];
        bytes.push(0x01);
        let mut buf = BytesMut::from(&bytes[..]);
        let err = read_varlong(&mut buf).unwrap_err();
        assert!(matches!(err, CodecError::VarLongTooBig));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_string_roundtrip() {
        let test_str = "Hello, Minecraft!";
        let mut buf = BytesMut::new();
        write_string(&mut buf, test_str);
        let result = read_string(&mut buf, 32767).unwrap();
        assert_eq!(result, test_str);
    }

    #[test]
    fn test_string_cap() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "seventeen_letters");
        assert!(matches!(
            read_string(&mut buf, 16),
            Err(CodecError::StringTooLong(17, 16))
        ));

        // Declared length far beyond the cap is rejected before the body is read
        let mut buf = BytesMut::new();
        write_varint(&mut buf, 1_000_000);
        assert!(matches!(
            read_string(&mut buf, 16),
            Err(CodecError::StringTooLong(1_000_000, 16))
        ));
    }

    #[test]
    fn test_string_declared_past_body() {
        let mut buf = BytesMut::new();
        write_varint(&mut buf, 10);
        buf.put_slice(b"abc");
        assert!(matches!(
            read_string(&mut buf, 32767),
            Err(CodecError::NotEnoughData)
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut buf = BytesMut::new();
        write_varint(&mut buf, 2);
        buf.put_slice(&[0xC3, 0x28]);
        assert!(matches!(
            read_string(&mut buf, 32767),
            Err(CodecError::InvalidUtf8)
        ));
    }

    #[test]
    fn test_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let mut buf = BytesMut::new();
        write_uuid(&mut buf, &uuid);
        let result = read_uuid(&mut buf).unwrap();
        assert_eq!(result, uuid);
    }

    #[test]
    fn test_fixed_width_bounds() {
        let mut buf = BytesMut::from(&[0x01][..]);
        assert!(matches!(read_i16(&mut buf), Err(CodecError::NotEnoughData)));
        assert!(matches!(read_i64(&mut buf), Err(CodecError::NotEnoughData)));
        assert_eq!(read_u8(&mut buf).unwrap(), 1);
    }

    #[test]
    fn test_empty_item_stack_is_one_byte() {
        let mut buf = BytesMut::new();
        write_item_stack(&mut buf, &None);
        assert_eq!(&buf[..], &[0x00]);
        assert_eq!(read_item_stack(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_item_stack_roundtrip() {
        let items = [
            ItemStack::new(1, 64),
            ItemStack::new(802, 1).with_nbt(nbt_compound! {
                "Damage" => NbtValue::Int(12),
            }),
        ];
        for item in items {
            let mut buf = BytesMut::new();
            write_item_stack(&mut buf, &Some(item.clone()));
            buf.put_u8(0x7F);
            assert_eq!(read_item_stack(&mut buf).unwrap(), Some(item));
            assert_eq!(&buf[..], &[0x7F]);
        }
    }

    #[test]
    fn test_item_nbt_reencodes_byte_for_byte() {
        let mut wire = BytesMut::new();
        wire.put_u8(1);
        write_varint(&mut wire, 802);
        wire.put_i8(1);
        wire.put_u8(lodestone_nbt::TAG_COMPOUND);
        wire.put_u16(3);
        wire.put_slice(b"tag");
        wire.put_u8(lodestone_nbt::TAG_LIST);
        wire.put_u16(11);
        wire.put_slice(b"Enchantment");
        wire.put_u8(lodestone_nbt::TAG_INT);
        wire.put_i32(0);
        wire.put_u8(lodestone_nbt::TAG_END);
        let expected = wire.clone();

        let item = read_item_stack(&mut wire).unwrap();
        assert!(wire.is_empty());
        let mut out = BytesMut::new();
        write_item_stack(&mut out, &item);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_item_stack_malformed_nbt() {
        let mut buf = BytesMut::new();
        buf.put_u8(1);
        write_varint(&mut buf, 5);
        buf.put_i8(1);
        buf.put_u8(lodestone_nbt::TAG_COMPOUND);
        let err = read_item_stack(&mut buf).unwrap_err();
        assert!(matches!(err, CodecError::Nbt(_)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_component_roundtrip() {
        let component = TextComponent::plain("Server closed");
        let mut buf = BytesMut::new();
        write_component(&mut buf, &component);
        assert_eq!(read_component(&mut buf).unwrap(), component);
    }

    #[test]
    fn test_json_error_classification() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(CodecError::from(syntax).kind(), ErrorKind::Format);

        let data = serde_json::from_str::<u8>("\"text\"").unwrap_err();
        assert_eq!(CodecError::from(data).kind(), ErrorKind::Schema);
    }
}
