//! Core definitions (errors and results), relied upon by all seqvec-* crates.

pub mod error;
pub mod result;

pub use result::Result;
