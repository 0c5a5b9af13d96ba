//! Version bumping.

pub mod bump;

pub use bump::{BumpDirective, BumpType, DEFAULT_VERSION, calculate_next_version};
