use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

/// Newtype-struct name the tree builder matches to recognise a timestamp leaf.
/// Any other serializer just sees the inner RFC 3339 string.
pub(crate) const TIMESTAMP_TOKEN: &str = "$likeadmin::Timestamp";

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A date-time leaf in a handler result.
///
/// Response schemas type their time fields as `Timestamp` so the normalizer
/// can render them in the configured zone and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// No zone attached; interpreted as UTC.
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Unix seconds as stored in the `*_time` columns.
    pub fn from_unix(secs: i64) -> Self {
        match DateTime::from_timestamp(secs, 0) {
            Some(dt) => Timestamp::Aware(dt.fixed_offset()),
            None => Timestamp::Naive(NaiveDateTime::default()),
        }
    }

    pub fn localize(&self, tz: &Tz) -> DateTime<Tz> {
        match self {
            Timestamp::Naive(naive) => Utc.from_utc_datetime(naive).with_timezone(tz),
            Timestamp::Aware(aware) => aware.with_timezone(tz),
        }
    }

    /// Recover a timestamp from its wire string. Strings that carry no offset
    /// are naive; anything unparseable is not a timestamp.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
            return Some(Timestamp::Aware(aware));
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
            .ok()
            .map(Timestamp::Naive)
    }

    fn to_wire_string(self) -> String {
        match self {
            Timestamp::Naive(naive) => naive.format(NAIVE_FORMAT).to_string(),
            Timestamp::Aware(aware) => aware.to_rfc3339(),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Timestamp::Aware(value)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp::Aware(value.fixed_offset())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(TIMESTAMP_TOKEN, &self.to_wire_string())
    }
}
