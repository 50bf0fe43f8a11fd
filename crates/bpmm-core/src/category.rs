//! The closed set of BPMM modeling concepts.
//!
//! The integer code of each [`Category`] is part of the document format:
//! elements are written with their code and read back by validating it
//! against the enumeration. Variants must never be reordered without a
//! format version bump.

use std::fmt;

use thiserror::Error;

/// Error returned when an integer does not name a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown category code {0}")]
pub struct UnknownCategory(pub i64);

/// Modeling concept an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Vision,
    Goal,
    Objective,
    Mission,
    Strategy,
    Tactic,
    BusinessPolicy,
    BusinessRule,
    Influencer,
    Assessment,
    Note,
}

impl Category {
    const ALL: [Category; 11] = [
        Category::Vision,
        Category::Goal,
        Category::Objective,
        Category::Mission,
        Category::Strategy,
        Category::Tactic,
        Category::BusinessPolicy,
        Category::BusinessRule,
        Category::Influencer,
        Category::Assessment,
        Category::Note,
    ];

    /// Returns every category in wire-code order.
    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Returns the integer code used in serialized documents.
    ///
    /// # Examples
    ///
    /// ```
    /// use bpmm_core::category::Category;
    ///
    /// assert_eq!(Category::Vision.code(), 0);
    /// assert_eq!(Category::Mission.code(), 3);
    /// assert_eq!(Category::Note.code(), 10);
    /// ```
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Looks up a category by its integer code.
    ///
    /// Returns `None` for codes outside the enumeration instead of failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bpmm_core::category::Category;
    ///
    /// assert_eq!(Category::from_code(7), Some(Category::BusinessRule));
    /// assert_eq!(Category::from_code(999), None);
    /// assert_eq!(Category::from_code(-1), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Human readable label of the concept.
    pub fn label(self) -> &'static str {
        match self {
            Category::Vision => "Vision",
            Category::Goal => "Goal",
            Category::Objective => "Objective",
            Category::Mission => "Mission",
            Category::Strategy => "Strategy",
            Category::Tactic => "Tactic",
            Category::BusinessPolicy => "Business Policy",
            Category::BusinessRule => "Business Rule",
            Category::Influencer => "Influencer",
            Category::Assessment => "Assessment",
            Category::Note => "Note",
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = UnknownCategory;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(UnknownCategory(code))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
