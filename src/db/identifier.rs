//! Allow-listing for table and column names.
//!
//! Identifiers cannot be bound as query parameters, so any name that ends up
//! inside SQL text goes through [`Identifier::parse`] first. The pattern check
//! is the safety boundary; quoting only preserves case.

use crate::error::{BrowseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// A table or column name that passed [`is_valid_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(name: &str) -> Result<Self> {
        if is_valid_identifier(name) {
            Ok(Identifier(name.to_string()))
        } else {
            Err(BrowseError::InvalidIdentifier(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
