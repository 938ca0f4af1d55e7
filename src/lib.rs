//! Reelposter - resolves noisy media filenames to poster artwork
//!
//! This library crate exposes the resolver and its configuration so the
//! binary and integration tests share one code path.

pub mod config;
pub mod metadata;
