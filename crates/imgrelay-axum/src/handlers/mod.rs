//! Request handlers.

pub mod images;
