//! Filesystem primitives for Carcass
//!
//! Provides normalized path handling, atomic writes and the recursive
//! delete/copy operations server provisioning is built on.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_segment};
