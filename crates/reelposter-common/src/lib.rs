//! Reelposter-Common: shared types and errors.
//!
//! This crate provides the pieces used by both the catalog client and the
//! resolver:
//!
//! - **Catalog types**: [`Candidate`] search results and the [`MediaKind`] they belong to
//! - **Error Handling**: the failure taxonomy of a poster resolution
//!
//! # Examples
//!
//! ```
//! use reelposter_common::{Candidate, Error, MediaKind};
//!
//! let candidate = Candidate::new(1399, MediaKind::Series).with_title("Game of Thrones");
//! assert_eq!(candidate.display_title(), Some("Game of Thrones"));
//!
//! let err = Error::no_candidates("Game of Thrones");
//! assert_eq!(err.kind(), "no_candidates");
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
