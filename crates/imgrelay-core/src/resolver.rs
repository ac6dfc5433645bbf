//! Candidate URL construction.
//!
//! Pure template substitution: one candidate per configured format, built as
//! `<base-url><id>.<ext>`. Order follows the configured format list so the
//! output is stable for tests; the race itself is symmetric.

use crate::domain::{Candidate, ImageFormat, ImageId};
use url::Url;

/// Builds the ordered candidate set for a validated identifier.
#[derive(Debug, Clone)]
pub struct VariantResolver {
    base_url: Url,
    formats: Vec<ImageFormat>,
}

impl VariantResolver {
    /// Create a resolver for the given upstream base URL and format set.
    ///
    /// The base URL is expected to end with the upstream path prefix
    /// (e.g. `http://cdn:3000/u/`); the identifier and extension are
    /// appended verbatim.
    #[must_use]
    pub const fn new(base_url: Url, formats: Vec<ImageFormat>) -> Self {
        Self { base_url, formats }
    }

    /// One candidate per configured format, in configuration order.
    #[must_use]
    pub fn resolve(&self, id: &ImageId) -> Vec<Candidate> {
        self.formats
            .iter()
            .map(|format| {
                // Appending a validated id segment to the base path cannot
                // fail, so the candidate is built by path mutation rather
                // than reparsing a formatted string.
                let mut url = self.base_url.clone();
                url.set_path(&format!(
                    "{}{}.{}",
                    self.base_url.path(),
                    id.as_str(),
                    format.extension()
                ));
                Candidate::new(url, *format)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> VariantResolver {
        VariantResolver::new(
            Url::parse("http://cdn_zipline:3000/u/").unwrap(),
            ImageFormat::ALL.to_vec(),
        )
    }

    #[test]
    fn one_candidate_per_format_in_stable_order() {
        let id = ImageId::parse("abc123").unwrap();
        let candidates = resolver().resolve(&id);

        let urls: Vec<&str> = candidates.iter().map(|c| c.url().as_str()).collect();
        assert_eq!(
            urls,
            [
                "http://cdn_zipline:3000/u/abc123.webp",
                "http://cdn_zipline:3000/u/abc123.png",
                "http://cdn_zipline:3000/u/abc123.jpg",
            ]
        );

        let formats: Vec<ImageFormat> = candidates.iter().map(Candidate::format).collect();
        assert_eq!(formats, ImageFormat::ALL.to_vec());
    }

    #[test]
    fn resolving_twice_is_deterministic() {
        let id = ImageId::parse("repeat-me").unwrap();
        let resolver = resolver();
        assert_eq!(resolver.resolve(&id), resolver.resolve(&id));
    }

    #[test]
    fn edge_shaped_ids_resolve_cleanly() {
        let resolver = resolver();

        let long = "a".repeat(100);
        let id = ImageId::parse(&long).unwrap();
        let candidates = resolver.resolve(&id);
        assert_eq!(
            candidates[0].url().as_str(),
            format!("http://cdn_zipline:3000/u/{long}.webp")
        );

        let id = ImageId::parse("-_-mixed_ID-42-_-").unwrap();
        let candidates = resolver.resolve(&id);
        assert_eq!(
            candidates[2].url().as_str(),
            "http://cdn_zipline:3000/u/-_-mixed_ID-42-_-.jpg"
        );
    }

    #[test]
    fn format_subset_is_respected() {
        let resolver = VariantResolver::new(
            Url::parse("http://cdn_zipline:3000/u/").unwrap(),
            vec![ImageFormat::Png, ImageFormat::Jpeg],
        );
        let id = ImageId::parse("x").unwrap();
        let candidates = resolver.resolve(&id);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].format(), ImageFormat::Png);
        assert_eq!(candidates[1].format(), ImageFormat::Jpeg);
    }
}
