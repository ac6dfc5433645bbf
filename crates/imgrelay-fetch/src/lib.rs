#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;

// Silence unused dev-dependency warnings; these are used by the
// integration tests in tests/ only.
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use url as _;

pub use client::ReqwestFetcher;
pub use config::FetcherConfig;
