use crate::ObjectId;
use core::fmt;

/// Number of hex digits in the canonical form of an [`ObjectId`].
pub const OBJECT_ID_HEX_LEN: usize = 24;

const ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// Errors that can occur while decoding a hex string into an [`ObjectId`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HexError {
    /// The input was not exactly [`OBJECT_ID_HEX_LEN`] bytes long.
    InvalidLength { len: usize },
    /// The input contained a byte outside `[0-9a-fA-F]`.
    InvalidAscii { byte: u8 },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => {
                write!(f, "invalid length: {len} (expected {OBJECT_ID_HEX_LEN})")
            }
            Self::InvalidAscii { byte } => write!(f, "invalid ascii byte: {byte}"),
        }
    }
}

impl core::error::Error for HexError {}

/// A stack-allocated view over the canonical hex form of an [`ObjectId`].
///
/// Implements [`fmt::Display`] and [`AsRef<str>`] so it can be written or
/// compared without allocating.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexFormatter {
    buf: [u8; OBJECT_ID_HEX_LEN],
}

impl HexFormatter {
    fn new(id: &ObjectId) -> Self {
        let mut buf = [b'0'; OBJECT_ID_HEX_LEN];
        let mut raw = id.to_raw();
        for slot in buf.iter_mut().rev() {
            *slot = ALPHABET[(raw & 0xf) as usize];
            raw >>= 4;
        }
        Self { buf }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // The buffer only ever holds bytes from `ALPHABET`.
        core::str::from_utf8(&self.buf).unwrap_or_default()
    }

    #[must_use]
    pub fn as_string(&self) -> String {
        self.as_str().to_owned()
    }
}

impl AsRef<str> for HexFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HexFormatter").field(&self.as_str()).finish()
    }
}

impl PartialEq<str> for HexFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HexFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl ObjectId {
    /// Returns the canonical lowercase hex form of this id.
    ///
    /// ```
    /// use oidkit::ObjectId;
    ///
    /// let id = ObjectId::from(1, 2, 3, 4);
    /// assert_eq!(id.encode(), "000000010000020003000004");
    /// ```
    #[must_use]
    pub fn encode(&self) -> HexFormatter {
        HexFormatter::new(self)
    }

    /// Decodes a 24-digit hex string. Both letter cases are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 24 bytes long or contains
    /// a non-hex byte.
    pub fn decode(input: impl AsRef<[u8]>) -> Result<Self, HexError> {
        let bytes = input.as_ref();
        if bytes.len() != OBJECT_ID_HEX_LEN {
            return Err(HexError::InvalidLength { len: bytes.len() });
        }

        let mut raw: u128 = 0;
        for &byte in bytes {
            let nibble = match byte {
                b'0'..=b'9' => byte - b'0',
                b'a'..=b'f' => byte - b'a' + 10,
                b'A'..=b'F' => byte - b'A' + 10,
                _ => return Err(HexError::InvalidAscii { byte }),
            };
            raw = (raw << 4) | u128::from(nibble);
        }
        Ok(Self::from_raw(raw))
    }
}

/// Returns `true` if `input` is a well-formed ObjectId hex string.
///
/// This is the same check the skill-tracker service applies to `{id}` path
/// segments before accepting them.
#[must_use]
pub fn is_valid(input: &str) -> bool {
    ObjectId::decode(input).is_ok()
}
