//! Two-way tables between wire codes and closed sets of named variants.
//!
//! Every field whose wire value is "a small number meaning one of N things"
//! gets its own domain. Domains never fall back onto each other: the same
//! code can mean different things in different domains, and a code missing
//! from a domain is an error.

use bytes::{BufMut, BytesMut};

use crate::codec::{read_i8, read_u8, read_varint, write_varint, CodecResult};

pub trait MagicValue: Sized + Copy + Eq + std::fmt::Debug + 'static {
    /// Name of the domain, used in error messages.
    const DOMAIN: &'static str;

    /// The wire code for this variant. Total over the domain.
    fn code(self) -> i32;

    /// Map a wire code back to its variant, failing with
    /// [`CodecError::UnknownCode`](crate::CodecError::UnknownCode).
    fn from_code(code: i32) -> CodecResult<Self>;
}

/// Declares a magic-value domain: the enum, both directions of its table and
/// an `ALL` slice listing every variant.
///
/// ```
/// lodestone_protocol_core::magic_values! {
///     pub enum Difficulty: "difficulty" {
///         Peaceful = 0,
///         Easy = 1,
///     }
/// }
/// ```
#[macro_export]
macro_rules! magic_values {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $domain:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::MagicValue for $name {
            const DOMAIN: &'static str = $domain;

            fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            fn from_code(code: i32) -> $crate::CodecResult<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err($crate::CodecError::UnknownCode {
                        domain: $domain,
                        code,
                    }),
                }
            }
        }
    };
}

/// Read an unsigned byte and map it through `T`'s domain.
pub fn read_magic_u8<T: MagicValue>(buf: &mut BytesMut) -> CodecResult<T> {
    T::from_code(read_u8(buf)? as i32)
}

/// Read a signed byte and map it through `T`'s domain.
pub fn read_magic_i8<T: MagicValue>(buf: &mut BytesMut) -> CodecResult<T> {
    T::from_code(read_i8(buf)? as i32)
}

pub fn write_magic_u8<T: MagicValue>(buf: &mut BytesMut, value: T) {
    buf.put_u8(value.code() as u8);
}

pub fn read_magic_varint<T: MagicValue>(buf: &mut BytesMut) -> CodecResult<T> {
    T::from_code(read_varint(buf)?)
}

pub fn write_magic_varint<T: MagicValue>(buf: &mut BytesMut, value: T) {
    write_varint(buf, value.code());
}
