//! Validated image identifiers.

use std::fmt;
use thiserror::Error;

/// Maximum accepted identifier length.
const MAX_ID_LENGTH: usize = 100;

/// Why an identifier string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidImageId {
    /// The identifier was empty.
    #[error("image id must not be empty")]
    Empty,

    /// The identifier exceeded the maximum length.
    #[error("image id too long ({length} chars, max {MAX_ID_LENGTH})")]
    TooLong {
        /// Observed length of the rejected identifier.
        length: usize,
    },

    /// The identifier contained a character outside `[A-Za-z0-9_-]`.
    #[error("image id contains invalid character {character:?}")]
    InvalidCharacter {
        /// The first offending character.
        character: char,
    },
}

/// An opaque image identifier extracted from the request path.
///
/// The identifier never carries a format suffix; the variant resolver
/// appends one per supported format. The charset restriction makes path
/// traversal impossible by construction (no `/`, `\` or `.`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    /// Validate and wrap a raw identifier string.
    ///
    /// Accepts 1 to 100 characters from `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, InvalidImageId> {
        if raw.is_empty() {
            return Err(InvalidImageId::Empty);
        }
        if raw.len() > MAX_ID_LENGTH {
            return Err(InvalidImageId::TooLong { length: raw.len() });
        }
        if let Some(character) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(InvalidImageId::InvalidCharacter { character });
        }
        Ok(Self(raw.to_string()))
    }

    /// The validated identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
