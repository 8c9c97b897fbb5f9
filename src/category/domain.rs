//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, database_id::CategoryId, description::Description, error::MAX_CATEGORY_NAME_LENGTH,
    patch::Patch,
};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string,
    /// or an [Error::CategoryNameTooLong] if it has more than [MAX_CATEGORY_NAME_LENGTH]
    /// characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
            Err(Error::CategoryNameTooLong)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named grouping for transactions, e.g. 'Groceries' or 'Rent'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The unique name of the category.
    pub name: CategoryName,
    /// An optional note on what belongs in the category.
    pub description: Option<Description>,
    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// The name of the category, must not already be in use.
    pub name: CategoryName,
    /// An optional note on what belongs in the category.
    pub description: Option<Description>,
}

/// Validated changes to apply to an existing category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryChanges {
    pub name: Patch<CategoryName>,
    pub description: Patch<Option<Description>>,
}

/// Request body for creating a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<CategoryForm> for NewCategory {
    type Error = Error;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: CategoryName::new(&form.name)?,
            description: Description::new_optional(form.description)?,
        })
    }
}

/// Request body for a partial update of a category.
///
/// Fields that are left out keep their current value. Setting `description` to `null` removes
/// the description.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryUpdateForm {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
}

impl TryFrom<CategoryUpdateForm> for CategoryChanges {
    type Error = Error;

    fn try_from(form: CategoryUpdateForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.try_map(|name| CategoryName::new(&name))?,
            description: form.description.try_map(Description::new_optional)?,
        })
    }
}


#[cfg(test)]
mod category_form_tests {
    use crate::{
        Error,
        category::{
            CategoryChanges, CategoryForm, CategoryName, CategoryUpdateForm, NewCategory,
        },
        description::Description,
        patch::Patch,
    };

    #[test]
    fn form_converts_to_new_category() {
        let form = CategoryForm {
            name: " Groceries ".to_owned(),
            description: Some("Food and drink".to_owned()),
        };

        let got = NewCategory::try_from(form);

        assert_eq!(
            got,
            Ok(NewCategory {
                name: CategoryName::new_unchecked("Groceries"),
                description: Some(Description::new_unchecked("Food and drink".to_owned())),
            })
        );
    }

    #[test]
    fn form_with_empty_name_is_rejected() {
        let form = CategoryForm {
            name: "  ".to_owned(),
            description: None,
        };

        assert_eq!(NewCategory::try_from(form), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn update_form_keeps_absent_fields_absent() {
        let form: CategoryUpdateForm = serde_json::from_str(r#"{"description": null}"#).unwrap();

        let got = CategoryChanges::try_from(form);

        assert_eq!(
            got,
            Ok(CategoryChanges {
                name: Patch::Absent,
                description: Patch::Present(None),
            })
        );
    }

    #[test]
    fn update_form_validates_present_name() {
        let form: CategoryUpdateForm = serde_json::from_str(r#"{"name": ""}"#).unwrap();

        assert_eq!(
            CategoryChanges::try_from(form),
            Err(Error::EmptyCategoryName)
        );
    }
}
