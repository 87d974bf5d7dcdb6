use core::fmt;
use std::time::{Duration, SystemTime};

/// A 96-bit MongoDB-style ObjectId.
///
/// - 32 bits timestamp (seconds since the Unix epoch)
/// - 24 bits machine identifier
/// - 16 bits process identifier
/// - 24 bits counter
///
/// ```text
///  Bit Index:  95             64 63             40 39             24 23            0
///              +----------------+-----------------+-----------------+--------------+
///  Field:      | timestamp (32) | machine ID (24) | process ID (16) | counter (24) |
///              +----------------+-----------------+-----------------+--------------+
///              |<------------------ MSB ------ 96 bits ------ LSB ---------------->|
/// ```
///
/// The value is backed by a `u128` whose upper 32 bits are always zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ObjectId {
    id: u128,
}

impl ObjectId {
    pub const TIMESTAMP_BITS: u32 = 32;
    pub const MACHINE_ID_BITS: u32 = 24;
    pub const PROCESS_ID_BITS: u32 = 16;
    pub const COUNTER_BITS: u32 = 24;

    /// Bitmask for the 32-bit timestamp field. Occupies bits 64 through 95.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for the 24-bit machine identifier. Occupies bits 40 through 63.
    pub const MACHINE_ID_MASK: u64 = (1 << Self::MACHINE_ID_BITS) - 1;

    /// Bitmask for the 16-bit process identifier. Occupies bits 24 through 39.
    pub const PROCESS_ID_MASK: u64 = (1 << Self::PROCESS_ID_BITS) - 1;

    /// Bitmask for the 24-bit counter. Occupies bits 0 through 23.
    pub const COUNTER_MASK: u64 = (1 << Self::COUNTER_BITS) - 1;

    pub const COUNTER_SHIFT: u32 = 0;
    pub const PROCESS_ID_SHIFT: u32 = Self::COUNTER_SHIFT + Self::COUNTER_BITS;
    pub const MACHINE_ID_SHIFT: u32 = Self::PROCESS_ID_SHIFT + Self::PROCESS_ID_BITS;
    pub const TIMESTAMP_SHIFT: u32 = Self::MACHINE_ID_SHIFT + Self::MACHINE_ID_BITS;

    const VALID_MASK: u128 = (1 << (Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS)) - 1;

    /// Packs the four components into an id. Each component is masked to its
    /// bit width first, so overflowing bits are silently discarded.
    #[must_use]
    pub const fn from(timestamp: u64, machine_id: u64, process_id: u64, counter: u64) -> Self {
        let t = ((timestamp & Self::TIMESTAMP_MASK) as u128) << Self::TIMESTAMP_SHIFT;
        let m = ((machine_id & Self::MACHINE_ID_MASK) as u128) << Self::MACHINE_ID_SHIFT;
        let p = ((process_id & Self::PROCESS_ID_MASK) as u128) << Self::PROCESS_ID_SHIFT;
        let c = ((counter & Self::COUNTER_MASK) as u128) << Self::COUNTER_SHIFT;
        Self { id: t | m | p | c }
    }

    /// Extracts the timestamp (seconds since the Unix epoch).
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) as u64 & Self::TIMESTAMP_MASK
    }

    /// Extracts the machine identifier.
    #[must_use]
    pub const fn machine_id(&self) -> u64 {
        (self.id >> Self::MACHINE_ID_SHIFT) as u64 & Self::MACHINE_ID_MASK
    }

    /// Extracts the process identifier.
    #[must_use]
    pub const fn process_id(&self) -> u64 {
        (self.id >> Self::PROCESS_ID_SHIFT) as u64 & Self::PROCESS_ID_MASK
    }

    /// Extracts the counter.
    #[must_use]
    pub const fn counter(&self) -> u64 {
        (self.id >> Self::COUNTER_SHIFT) as u64 & Self::COUNTER_MASK
    }

    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Converts a raw integer into an id. Bits above bit 95 are cleared.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self {
            id: raw & Self::VALID_MASK,
        }
    }

    /// Returns the id's timestamp as a [`SystemTime`]. Precision is whole
    /// seconds.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.timestamp())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("ObjectId");
        dbg.field("id", &format_args!("{}", self.encode()));
        dbg.field("timestamp", &format_args!("{} (0x{:x})", self.timestamp(), self.timestamp()));
        dbg.field("machine_id", &format_args!("{} (0x{:x})", self.machine_id(), self.machine_id()));
        dbg.field("process_id", &format_args!("{} (0x{:x})", self.process_id(), self.process_id()));
        dbg.field("counter", &format_args!("{} (0x{:x})", self.counter(), self.counter()));
        dbg.finish()
    }
}

impl From<ObjectId> for String {
    fn from(val: ObjectId) -> Self {
        val.encode().as_string()
    }
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool {
        Self::decode(other).map(|id| id == *self).unwrap_or(false)
    }
}

impl PartialEq<&str> for ObjectId {
    fn eq(&self, other: &&str) -> bool {
        <Self as PartialEq<str>>::eq(self, other)
    }
}

impl core::str::FromStr for ObjectId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s)?)
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = crate::Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(Self::decode(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip() {
        let id = ObjectId::from(0x507f_1f77, 0xbc_f86c, 0xd799, 0x43_9011);
        assert_eq!(id.timestamp(), 0x507f_1f77);
        assert_eq!(id.machine_id(), 0xbc_f86c);
        assert_eq!(id.process_id(), 0xd799);
        assert_eq!(id.counter(), 0x43_9011);
        assert_eq!(id.to_raw(), 0x507f_1f77_bcf8_6cd7_9943_9011);
    }

    #[test]
    fn components_are_masked() {
        let id = ObjectId::from(u64::MAX, u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(id.timestamp(), ObjectId::TIMESTAMP_MASK);
        assert_eq!(id.machine_id(), ObjectId::MACHINE_ID_MASK);
        assert_eq!(id.process_id(), ObjectId::PROCESS_ID_MASK);
        assert_eq!(id.counter(), ObjectId::COUNTER_MASK);
        assert_eq!(id.to_raw(), (1u128 << 96) - 1);

        let id = ObjectId::from(0x1_0000_0005, 0, 0, 0);
        assert_eq!(id.timestamp(), 5);
    }

    #[test]
    fn from_raw_clears_high_bits() {
        let id = ObjectId::from_raw(u128::MAX);
        assert_eq!(id.to_raw(), (1u128 << 96) - 1);
    }

    #[test]
    fn datetime_uses_seconds() {
        let id = ObjectId::from(1_000, 0, 0, 0);
        assert_eq!(
            id.datetime(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_000)
        );
    }

    #[test]
    fn compares_against_hex_strings() {
        let id = ObjectId::from(1, 2, 3, 4);
        assert_eq!(id, "000000010000020003000004");
        assert_eq!(id, "000000010000020003000004".to_uppercase().as_str());
        assert_ne!(id, "zzz");
        assert_eq!(String::from(id), "000000010000020003000004");
        println!("{id:#?}");
    }
}
