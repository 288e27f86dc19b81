//! Named resource resolution for content streams.
//!
//! This module contains:
//! - `collab` - resolver and font builder traits the store depends on
//! - `scope` - stack of name frames with fall-through lookup
//! - `store` - the resource store and its scope guard
//! - `options` - load options

pub mod collab;
pub mod options;
pub mod scope;
pub mod store;

pub use collab::{FontBuilder, ObjectResolver};
pub use options::LoadOptions;
pub use scope::ScopedNameTable;
pub use store::{ResourceScope, ResourceStore};
