//! Supported image formats.

use std::fmt;

/// An image format the proxy knows how to race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// WebP (`.webp`, `image/webp`).
    Webp,
    /// PNG (`.png`, `image/png`).
    Png,
    /// JPEG (`.jpg`, `image/jpeg`).
    Jpeg,
}

impl ImageFormat {
    /// All supported formats in the default candidate order.
    pub const ALL: [Self; 3] = [Self::Webp, Self::Png, Self::Jpeg];

    /// The file extension appended to candidate URLs.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// The MIME type served for a winning payload of this format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
