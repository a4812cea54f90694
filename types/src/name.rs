//! Packed 64-bit account names
//!
//! A name is up to 13 characters from `.12345abcdefghijklmnopqrstuvwxyz`.
//! The first 12 characters use 5 bits each, starting at the most significant
//! end of the `u64`; the 13th character is stored in the low 4 bits and
//! must be `.` or one of `a`-`j`.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NameError;

/// Maximum number of characters in a name
pub const MAX_NAME_LENGTH: usize = 13;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Account, action, table or permission identifier
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u64);

impl Name {
    /// The empty name (`""`, value 0)
    pub const EMPTY: Name = Name(0);

    /// Wraps an already packed value
    pub const fn from_u64(value: u64) -> Self {
        Name(value)
    }

    /// The packed value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this is the empty name
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Parses a name literal at compile time
    ///
    /// Intended for `const` items, where an invalid literal is a build error:
    ///
    /// ```rust
    /// use msgbox_types::Name;
    ///
    /// const MESSAGES: Name = Name::constant("messages");
    /// assert_eq!(MESSAGES.to_string(), "messages");
    /// ```
    ///
    /// # Panics
    /// Panics if `literal` is not a valid name. Use [`str::parse`] for input
    /// that is not known ahead of time.
    pub const fn constant(literal: &str) -> Self {
        match encode(literal.as_bytes()) {
            Ok(value) => Name(value),
            Err(_) => panic!("invalid name literal"),
        }
    }
}

const fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

const fn encode(bytes: &[u8]) -> Result<u64, NameError> {
    if bytes.len() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong(bytes.len()));
    }

    let mut only_dots = true;
    let mut value = 0u64;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let symbol = match char_to_symbol(c) {
            Some(symbol) => symbol,
            None => {
                return Err(NameError::InvalidChar {
                    ch: c as char,
                    position: i,
                })
            }
        };
        if symbol != 0 {
            only_dots = false;
        }

        if i < MAX_NAME_LENGTH - 1 {
            value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
        } else {
            if !matches!(c, b'.' | b'a'..=b'j') {
                return Err(NameError::InvalidLastChar(c as char));
            }
            value |= symbol;
        }
        i += 1;
    }

    if only_dots && !bytes.is_empty() {
        return Err(NameError::OnlyDots);
    }
    Ok(value)
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encode(s.as_bytes()).map(Name)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> u64 {
        name.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [b'.'; MAX_NAME_LENGTH];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LENGTH {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            buf[MAX_NAME_LENGTH - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }

        let end = buf.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // CHARMAP is ASCII
        let text = std::str::from_utf8(&buf[..end]).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
