use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core::fmt;
use serde_json::{Map, Value};

/// Keys that may carry a precomputed hex string, in lookup order.
pub const WRAPPED_KEYS: &[&str] = &["$oid", "oid", "id", "hexString", "hex", "value"];

/// One of the four packed fields of an [`crate::ObjectId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Timestamp,
    MachineIdentifier,
    ProcessIdentifier,
    Counter,
}

impl Component {
    /// All components in layout order (most significant first).
    pub const ALL: [Component; 4] = [
        Self::Timestamp,
        Self::MachineIdentifier,
        Self::ProcessIdentifier,
        Self::Counter,
    ];

    /// Alternate field names for this component, in lookup order.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Timestamp => &["timestamp", "timeSecond", "time", "date"],
            Self::MachineIdentifier => &["machineIdentifier", "machine", "machineId"],
            Self::ProcessIdentifier => &["processIdentifier", "process", "processId"],
            Self::Counter => &["counter", "increment", "inc"],
        }
    }

    /// Returns the parsed value of the first alias that yields one.
    ///
    /// Later aliases are never consulted once an earlier one parses, even if
    /// the value looks implausible.
    #[must_use]
    pub fn find(self, fields: &Map<String, Value>) -> Option<u64> {
        let parse: fn(&Value) -> Option<u64> = match self {
            Self::Timestamp => parse_timestamp,
            _ => parse_integer,
        };
        self.aliases()
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(parse)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timestamp => "timestamp",
            Self::MachineIdentifier => "machine identifier",
            Self::ProcessIdentifier => "process identifier",
            Self::Counter => "counter",
        };
        f.write_str(name)
    }
}

/// Returns the first wrapped hex string in `fields`, with the key it was
/// found under. Non-string values under a wrapped key are skipped.
#[must_use]
pub fn find_wrapped(fields: &Map<String, Value>) -> Option<(&'static str, &str)> {
    WRAPPED_KEYS
        .iter()
        .find_map(|key| fields.get(*key)?.as_str().map(|hex| (*key, hex)))
}

/// Accepts JSON integers (integral floats included) and non-empty base-10
/// numeric strings. Negative values wrap into two's complement so that the
/// later bit mask keeps their low bits.
pub(crate) fn parse_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i as u64)
            } else if let Some(u) = n.as_u64() {
                Some(u)
            } else {
                let f = n.as_f64()?;
                (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.2e18).then_some(f as i64 as u64)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i128>().ok().map(|i| i as u64)
        }
        _ => None,
    }
}

/// Integer rules first, then a calendar date converted to whole seconds
/// since the Unix epoch.
pub(crate) fn parse_timestamp(value: &Value) -> Option<u64> {
    parse_integer(value).or_else(|| parse_date_seconds(value).map(|secs| secs as u64))
}

/// Interprets date strings and Extended JSON `{"$date": ...}` wrappers.
///
/// `$date` may hold a date string, epoch milliseconds, or
/// `{"$numberLong": "<millis>"}`.
fn parse_date_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Object(fields) => match fields.get("$date")? {
            Value::String(s) => parse_date_str(s.trim()),
            Value::Number(n) => n.as_i64().map(millis_to_secs),
            Value::Object(inner) => inner
                .get("$numberLong")?
                .as_str()?
                .trim()
                .parse::<i64>()
                .ok()
                .map(millis_to_secs),
            _ => None,
        },
        _ => None,
    }
}

fn millis_to_secs(millis: i64) -> i64 {
    millis.div_euclid(1000)
}

fn parse_date_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp());
    }
    // Zone-less forms are read as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
}
