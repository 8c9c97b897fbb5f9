//! Parsing of timestamps in request bodies.
//!
//! RFC 3339 timestamps are taken as is. Timestamps without an offset, such as
//! `2025-06-01T10:30:00`, are taken to be in UTC.

use serde::{Deserialize, Deserializer, de::Error as _};
use time::{
    OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::patch::Patch;

const LOCAL_FORMATS: [&[BorrowedFormatItem]; 2] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
];

/// Parse an RFC 3339 timestamp, or a timestamp without an offset which is assumed to be UTC.
///
/// # Errors
/// Returns the RFC 3339 parse error if `text` matches neither form.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339).or_else(|error| {
        LOCAL_FORMATS
            .iter()
            .find_map(|format| PrimitiveDateTime::parse(text, *format).ok())
            .map(PrimitiveDateTime::assume_utc)
            .ok_or(error)
    })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_timestamp(&text).map_err(|error| D::Error::custom(format!("{text:?}: {error}")))
}

/// Deserialize a timestamp into a [Patch].
///
/// Use with `#[serde(default, deserialize_with = "crate::timestamp::deserialize_patch")]`.
pub fn deserialize_patch<'de, D>(deserializer: D) -> Result<Patch<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_timestamp(deserializer).map(Patch::Present)
}

/// Serde helpers for an optional timestamp, use with
/// `#[serde(default, with = "crate::timestamp::option")]`.
///
/// Timestamps are always written as RFC 3339.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    /// Serialize an optional timestamp as RFC 3339.
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::option::serialize(value, serializer)
    }

    /// Deserialize an optional timestamp, see [super::parse_timestamp].
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(deserialize_with = "super::deserialize_timestamp")] OffsetDateTime);

        Option::<Wrapper>::deserialize(deserializer).map(|value| value.map(|Wrapper(date)| date))
    }
}
