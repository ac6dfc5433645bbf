//! Request-scoped value types.
//!
//! Everything here lives for exactly one inbound request: an identifier is
//! parsed, candidates are built for it, and the race result is handed to the
//! response layer and discarded.

mod format;
mod id;

pub use format::ImageFormat;
pub use id::{ImageId, InvalidImageId};

use bytes::Bytes;
use url::Url;

/// One speculative upstream variant of a requested image.
///
/// Immutable once constructed; the resolver creates one per supported format
/// and the race coordinator consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    url: Url,
    format: ImageFormat,
}

impl Candidate {
    /// Create a candidate for the given URL and format tag.
    #[must_use]
    pub const fn new(url: Url, format: ImageFormat) -> Self {
        Self { url, format }
    }

    /// The upstream URL this candidate will be fetched from.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// The format this candidate is tagged with.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }
}

/// Outcome of racing all candidates for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceResult {
    /// A candidate succeeded; the payload and its format tag.
    Found {
        /// The complete image payload of the winning candidate.
        bytes: Bytes,
        /// The format the winning candidate was tagged with.
        format: ImageFormat,
    },
    /// Every candidate failed, or the race deadline elapsed first.
    NotFound,
}
