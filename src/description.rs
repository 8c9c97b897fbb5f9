//! Free-text descriptions shared by categories and transactions.

use std::fmt::Display;

use serde::Serialize;

use crate::{Error, error::MAX_DESCRIPTION_LENGTH};

/// A validated description: non-empty after trimming and at most
/// [MAX_DESCRIPTION_LENGTH] characters long.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct Description(String);

impl Description {
    /// Create a description.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyDescription] if `text` is empty or only
    /// whitespace, or an [Error::DescriptionTooLong] if it is too long.
    pub fn new(text: &str) -> Result<Self, Error> {
        let text = text.trim();

        if text.is_empty() {
            Err(Error::EmptyDescription)
        } else if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            Err(Error::DescriptionTooLong)
        } else {
            Ok(Self(text.to_owned()))
        }
    }

    /// Validate an optional description, passing `None` through.
    pub fn new_optional(text: Option<String>) -> Result<Option<Self>, Error> {
        text.as_deref().map(Self::new).transpose()
    }

    /// Create a description without validation.
    ///
    /// The caller should ensure that the string is not empty. Used when reading rows that were
    /// validated before they were written.
    pub fn new_unchecked(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
