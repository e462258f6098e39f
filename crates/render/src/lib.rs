//! Hands the merged novel to calibre's `ebook-convert`.

mod convert;
pub mod error;
mod output;

pub use crate::convert::{Converter, EXECUTABLE};
pub use crate::output::OutputPaths;
