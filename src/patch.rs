//! Partial updates that distinguish between a field being omitted and a field being set.
//!
//! A JSON field that is missing from the request body becomes [Patch::Absent] and leaves the
//! stored value untouched. A field that is present becomes [Patch::Present]. For nullable columns
//! use `Patch<Option<T>>`, so that `null` becomes `Present(None)` and clears the stored value.
//!
//! Fields must be annotated with `#[serde(default)]` so that missing fields deserialize to
//! [Patch::Absent].

use serde::{Deserialize, Deserializer};

/// A field in a partial update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not included in the request.
    Absent,
    /// The field was included in the request with this value.
    Present(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Return the new value if present, otherwise `current`.
    pub fn unwrap_or(self, current: T) -> T {
        match self {
            Patch::Absent => current,
            Patch::Present(value) => value,
        }
    }

    /// Convert the value, if present, with a fallible function such as a validating constructor.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        match self {
            Patch::Absent => Ok(Patch::Absent),
            Patch::Present(value) => f(value).map(Patch::Present),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Patch::Present)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use time::{OffsetDateTime, macros::datetime};

    use super::Patch;

    #[derive(Debug, Deserialize)]
    struct Changes {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        note: Patch<Option<String>>,
        #[serde(default, deserialize_with = "crate::timestamp::deserialize_patch")]
        date: Patch<OffsetDateTime>,
    }

    #[test]
    fn missing_fields_are_absent() {
        let changes: Changes = serde_json::from_str("{}").unwrap();

        assert_eq!(changes.name, Patch::Absent);
        assert_eq!(changes.note, Patch::Absent);
        assert_eq!(changes.date, Patch::Absent);
    }

    #[test]
    fn null_is_distinct_from_missing() {
        let changes: Changes = serde_json::from_str(r#"{"note": null}"#).unwrap();

        assert_eq!(changes.note, Patch::Present(None));
        assert_eq!(changes.name, Patch::Absent);
    }

    #[test]
    fn present_values_are_kept() {
        let changes: Changes = serde_json::from_str(
            r#"{"name": "Food", "note": "weekly", "date": "2025-03-04T05:06:07Z"}"#,
        )
        .unwrap();

        assert_eq!(changes.name, Patch::Present("Food".to_owned()));
        assert_eq!(changes.note, Patch::Present(Some("weekly".to_owned())));
        assert_eq!(changes.date, Patch::Present(datetime!(2025-03-04 05:06:07 UTC)));
    }

    #[test]
    fn null_for_non_nullable_field_is_rejected() {
        let result = serde_json::from_str::<Changes>(r#"{"name": null}"#);

        assert!(result.is_err());
    }

    #[test]
    fn unwrap_or_keeps_current_value_when_absent() {
        assert_eq!(Patch::Absent.unwrap_or(1.5), 1.5);
        assert_eq!(Patch::Present(2.0).unwrap_or(1.5), 2.0);
    }
}
