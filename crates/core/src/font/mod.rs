//! Font construction.
//!
//! - `simple` - metrics-only fonts built from font dictionaries (SimpleFont)

pub mod simple;

pub use simple::{SimpleFont, SimpleFontBuilder};
