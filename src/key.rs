//! Key encoding.
//!
//! Insert and query must hash the *same bytes* for a key, so every key type
//! has one explicit, type-stable encoding:
//!
//! | Key type                               | Encoding                      |
//! |----------------------------------------|-------------------------------|
//! | `str`, `String`                        | raw UTF-8 bytes               |
//! | `[u8]`, `Vec<u8>`, `[u8; N]`           | the bytes themselves          |
//! | `i8`..`i128`, `u8`..`u128`             | fixed-width little-endian     |
//! | `serde_json::Value` (feature `serde`)  | strings and integers as above |
//!
//! Width is part of the encoding: `5u32` and `5u64` are different keys.
//! `usize` and `isize` are not keys because their width depends on the
//! target. Types without an encoding are rejected at compile time; dynamic
//! values without one are rejected with
//! [`BloomError::UnsupportedKey`](crate::BloomError::UnsupportedKey).
//!
//! # Examples
//!
//! ```
//! use bytebloom::BloomKey;
//!
//! assert_eq!(&*"ab".key_bytes()?, b"ab");
//! assert_eq!(&*0x0102u16.key_bytes()?, &[0x02, 0x01]);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```

use crate::error::Result;
use std::borrow::Cow;

/// A value with a deterministic byte encoding for hashing.
pub trait BloomKey {
    /// Encoded bytes of this key.
    ///
    /// # Errors
    ///
    /// Returns [`BloomError::UnsupportedKey`](crate::BloomError::UnsupportedKey)
    /// when a dynamically typed value has no encoding.
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

impl BloomKey for str {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl BloomKey for String {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl BloomKey for [u8] {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl BloomKey for Vec<u8> {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<const N: usize> BloomKey for [u8; N] {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<K: BloomKey + ?Sized> BloomKey for &K {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).key_bytes()
    }
}

impl<K: BloomKey + ?Sized> BloomKey for Box<K> {
    #[inline]
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).key_bytes()
    }
}

macro_rules! impl_int_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl BloomKey for $t {
                #[inline]
                fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
                    Ok(Cow::Owned(self.to_le_bytes().to_vec()))
                }
            }
        )*
    };
}

impl_int_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

#[cfg(feature = "serde")]
impl BloomKey for serde_json::Value {
    /// Strings encode like `str`. Integers encode like `u64` when
    /// non-negative and like `i64` otherwise (identical bytes wherever both
    /// apply). Every other JSON value is unsupported.
    fn key_bytes(&self) -> Result<Cow<'_, [u8]>> {
        use crate::error::BloomError;
        use serde_json::Value;

        match self {
            Value::String(s) => Ok(Cow::Borrowed(s.as_bytes())),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(Cow::Owned(u.to_le_bytes().to_vec()))
                } else if let Some(i) = n.as_i64() {
                    Ok(Cow::Owned(i.to_le_bytes().to_vec()))
                } else {
                    Err(BloomError::unsupported_key("float"))
                }
            }
            Value::Null => Err(BloomError::unsupported_key("null")),
            Value::Bool(_) => Err(BloomError::unsupported_key("bool")),
            Value::Array(_) => Err(BloomError::unsupported_key("array")),
            Value::Object(_) => Err(BloomError::unsupported_key("object")),
        }
    }
}
