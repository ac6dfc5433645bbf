#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod race;
pub mod resolver;

// Re-export commonly used types for convenience
pub use domain::{Candidate, ImageFormat, ImageId, InvalidImageId, RaceResult};
pub use ports::{FetchError, FetchOutcome, ImageFetcher};
pub use race::RaceCoordinator;
pub use resolver::VariantResolver;
