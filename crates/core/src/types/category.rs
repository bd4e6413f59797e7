//! The fixed set of watch categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Watch category.
///
/// The catalog uses a small closed set; unknown categories are rejected at
/// the provider boundary rather than carried as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Luxury,
    Sport,
    Fashion,
    Smartwatch,
}

impl Category {
    /// All known categories, in display order.
    pub const ALL: [Self; 4] = [Self::Luxury, Self::Sport, Self::Fashion, Self::Smartwatch];

    /// The lowercase wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Luxury => "luxury",
            Self::Sport => "sport",
            Self::Fashion => "fashion",
            Self::Smartwatch => "smartwatch",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "luxury" => Ok(Self::Luxury),
            "sport" => Ok(Self::Sport),
            "fashion" => Ok(Self::Fashion),
            "smartwatch" => Ok(Self::Smartwatch),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Luxury ".parse::<Category>(), Ok(Category::Luxury));
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "dive".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: dive");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Smartwatch).expect("serialize");
        assert_eq!(json, "\"smartwatch\"");
    }
}
