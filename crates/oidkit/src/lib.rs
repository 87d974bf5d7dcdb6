mod error;
mod hex;
mod id;
mod normalize;
#[cfg(feature = "serde")]
pub mod serde;

pub use crate::error::*;
pub use crate::hex::*;
pub use crate::id::*;
pub use crate::normalize::*;
