use core::fmt;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `oidkit` can produce.
///
/// [`crate::normalize`] never surfaces these; they exist for the strict
/// entry points ([`crate::ObjectId::decode`], [`crate::ObjectIdLike::resolve`])
/// and for tests that need to know *why* an identifier was unavailable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The input was not a 24-digit hexadecimal string.
    HexError(crate::HexError),

    /// The payload could not be turned into an identifier.
    ResolveError(crate::ResolveError),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::HexError(e) => write!(fmt, "hex decode failed: {e}"),
            Self::ResolveError(e) => write!(fmt, "unresolvable identifier: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<crate::HexError> for Error {
    fn from(err: crate::HexError) -> Self {
        Self::HexError(err)
    }
}

impl From<crate::ResolveError> for Error {
    fn from(err: crate::ResolveError) -> Self {
        Self::ResolveError(err)
    }
}
