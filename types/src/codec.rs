//! Action-data codec
//!
//! The binary calling convention for action arguments. Fixed-width integers
//! are little-endian, `bool` is one byte, strings and vectors carry a
//! [`VarUint32`] length prefix.

use std::mem::size_of;

use crate::{error::CodecError, name::Name};

/// Types that can be written as action data
pub trait Pack {
    /// Appends the encoding of `self` to `out`
    fn pack(&self, out: &mut Vec<u8>);

    /// Encodes `self` into a fresh buffer
    fn packed(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.pack(&mut out);
        out
    }
}

/// Types that can be read from action data
pub trait Unpack: Sized {
    /// Decodes a value from the front of `input`, advancing it past the
    /// consumed bytes
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError>;
}

/// Decodes exactly one value from `bytes`
///
/// # Errors
/// Any decoding error of `T`, or [`CodecError::TrailingBytes`] if input is
/// left over once the value is complete.
pub fn unpack_from_slice<T: Unpack>(mut bytes: &[u8]) -> Result<T, CodecError> {
    let value = T::unpack(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(CodecError::TrailingBytes(bytes.len()));
    }
    Ok(value)
}

fn take<'a>(input: &mut &'a [u8], needed: usize) -> Result<&'a [u8], CodecError> {
    if input.len() < needed {
        return Err(CodecError::UnexpectedEnd {
            needed,
            remaining: input.len(),
        });
    }
    let (head, tail) = input.split_at(needed);
    *input = tail;
    Ok(head)
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pack for $ty {
                fn pack(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }

            impl Unpack for $ty {
                fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
                    let bytes = take(input, size_of::<$ty>())?;
                    let mut raw = [0u8; size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    Ok(<$ty>::from_le_bytes(raw))
                }
            }
        )*
    };
}

impl_fixed_width!(i8, u8, i16, u16, i32, u32, i64, u64);

impl Pack for bool {
    fn pack(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }
}

impl Unpack for bool {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        match u8::unpack(input)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }
}

impl Pack for Name {
    fn pack(&self, out: &mut Vec<u8>) {
        self.as_u64().pack(out);
    }
}

impl Unpack for Name {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        u64::unpack(input).map(Name::from_u64)
    }
}

/// Variable-length unsigned 32-bit integer (LEB128, at most 5 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarUint32(pub u32);

impl VarUint32 {
    /// Maximum encoded size in bytes
    pub const MAX_LEN: usize = 5;

    /// Length prefix for a collection of `len` items
    ///
    /// Lengths above `u32::MAX` saturate; no action payload comes close.
    pub fn from_len(len: usize) -> Self {
        VarUint32(u32::try_from(len).unwrap_or(u32::MAX))
    }
}

impl Pack for VarUint32 {
    fn pack(&self, out: &mut Vec<u8>) {
        let mut value = self.0;
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            out.push(byte);
            if value == 0 {
                break;
            }
        }
    }
}

impl Unpack for VarUint32 {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        let mut value: u64 = 0;
        for i in 0..Self::MAX_LEN {
            let byte = u8::unpack(input)?;
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return u32::try_from(value)
                    .map(VarUint32)
                    .map_err(|_| CodecError::VarUintOverflow);
            }
        }
        Err(CodecError::VarUintOverflow)
    }
}

impl Pack for String {
    fn pack(&self, out: &mut Vec<u8>) {
        self.as_str().pack(out);
    }
}

impl Pack for str {
    fn pack(&self, out: &mut Vec<u8>) {
        VarUint32::from_len(self.len()).pack(out);
        out.extend_from_slice(self.as_bytes());
    }
}

impl Unpack for String {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        let len = VarUint32::unpack(input)?.0 as usize;
        let bytes = take(input, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack(&self, out: &mut Vec<u8>) {
        VarUint32::from_len(self.len()).pack(out);
        for item in self {
            item.pack(out);
        }
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack(input: &mut &[u8]) -> Result<Self, CodecError> {
        let count = VarUint32::unpack(input)?.0 as usize;
        // Every element takes at least one byte
        let mut items = Vec::with_capacity(count.min(input.len()));
        for _ in 0..count {
            items.push(T::unpack(input)?);
        }
        Ok(items)
    }
}

impl Pack for () {
    fn pack(&self, _out: &mut Vec<u8>) {}
}

impl Unpack for () {
    fn unpack(_input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(())
    }
}

impl<T: Pack + ?Sized> Pack for &T {
    fn pack(&self, out: &mut Vec<u8>) {
        (**self).pack(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_little_endian() {
        assert_eq!((-1i8).packed(), vec![0xff]);
        assert_eq!(200u8.packed(), vec![0xc8]);
        assert_eq!(0x1234u16.packed(), vec![0x34, 0x12]);
        assert_eq!(0xdeadbeefu32.packed(), vec![0xef, 0xbe, 0xad, 0xde]);
        assert_eq!(
            1u64.packed(),
            vec![0x01, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!((-2i32).packed(), vec![0xfe, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_fixed_width_decode() {
        assert_eq!(unpack_from_slice::<i8>(&[0x80]).unwrap(), i8::MIN);
        assert_eq!(unpack_from_slice::<u16>(&[0xff, 0xff]).unwrap(), u16::MAX);
        assert_eq!(
            unpack_from_slice::<u32>(&[0x01, 0x00, 0x00, 0x80]).unwrap(),
            0x8000_0001
        );
        assert_eq!(
            unpack_from_slice::<u64>(&[0xff; 8]).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_short_input() {
        assert_eq!(
            unpack_from_slice::<u32>(&[1, 2]),
            Err(CodecError::UnexpectedEnd { needed: 4, remaining: 2 })
        );
        assert_eq!(
            unpack_from_slice::<u8>(&[]),
            Err(CodecError::UnexpectedEnd { needed: 1, remaining: 0 })
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert_eq!(
            unpack_from_slice::<u16>(&[1, 0, 9]),
            Err(CodecError::TrailingBytes(1))
        );
        assert_eq!(unpack_from_slice::<()>(&[0]), Err(CodecError::TrailingBytes(1)));
    }

    #[test]
    fn test_bool() {
        assert_eq!(true.packed(), vec![1]);
        assert_eq!(false.packed(), vec![0]);
        assert_eq!(unpack_from_slice::<bool>(&[1]).unwrap(), true);
        assert_eq!(unpack_from_slice::<bool>(&[2]), Err(CodecError::InvalidBool(2)));
    }

    #[test]
    fn test_varuint32_encoding() {
        assert_eq!(VarUint32(0).packed(), vec![0x00]);
        assert_eq!(VarUint32(127).packed(), vec![0x7f]);
        assert_eq!(VarUint32(128).packed(), vec![0x80, 0x01]);
        assert_eq!(VarUint32(300).packed(), vec![0xac, 0x02]);
        assert_eq!(
            VarUint32(u32::MAX).packed(),
            vec![0xff, 0xff, 0xff, 0xff, 0x0f]
        );
        assert_eq!(
            unpack_from_slice::<VarUint32>(&[0xac, 0x02]).unwrap(),
            VarUint32(300)
        );
    }

    #[test]
    fn test_varuint32_overflow() {
        // Sixth continuation byte
        assert_eq!(
            unpack_from_slice::<VarUint32>(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]),
            Err(CodecError::VarUintOverflow)
        );
        // Five bytes but above u32::MAX
        assert_eq!(
            unpack_from_slice::<VarUint32>(&[0xff, 0xff, 0xff, 0xff, 0x1f]),
            Err(CodecError::VarUintOverflow)
        );
    }

    #[test]
    fn test_string() {
        let packed = "hello from msgbox".packed();
        assert_eq!(packed[0], 17);
        assert_eq!(&packed[1..], b"hello from msgbox");
        assert_eq!(
            unpack_from_slice::<String>(&packed).unwrap(),
            "hello from msgbox"
        );

        // Multi-byte characters count in bytes
        let packed = "héllo".to_string().packed();
        assert_eq!(packed[0], 6);
        assert_eq!(unpack_from_slice::<String>(&packed).unwrap(), "héllo");
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(
            unpack_from_slice::<String>(&[2, 0xff, 0xfe]),
            Err(CodecError::InvalidUtf8)
        );
        assert_eq!(
            unpack_from_slice::<String>(&[5, b'a']),
            Err(CodecError::UnexpectedEnd { needed: 5, remaining: 1 })
        );
    }

    #[test]
    fn test_name() {
        let name: Name = "me.wam".parse().unwrap();
        let packed = name.packed();
        assert_eq!(packed, name.as_u64().to_le_bytes().to_vec());
        assert_eq!(unpack_from_slice::<Name>(&packed).unwrap(), name);
    }

    #[test]
    fn test_vec() {
        let values: Vec<u16> = vec![1, 2, 0x0300];
        let packed = values.packed();
        assert_eq!(packed, vec![3, 1, 0, 2, 0, 0, 3]);
        assert_eq!(unpack_from_slice::<Vec<u16>>(&packed).unwrap(), values);

        // Claimed count larger than the input
        assert!(unpack_from_slice::<Vec<u64>>(&[0xff, 0xff, 0x03]).is_err());
    }

    #[test]
    fn test_sequential_fields() {
        let mut out = Vec::new();
        7u8.pack(&mut out);
        "abc".pack(&mut out);
        (-5i64).pack(&mut out);

        let mut input = out.as_slice();
        assert_eq!(u8::unpack(&mut input).unwrap(), 7);
        assert_eq!(String::unpack(&mut input).unwrap(), "abc");
        assert_eq!(i64::unpack(&mut input).unwrap(), -5);
        assert!(input.is_empty());
    }
}
