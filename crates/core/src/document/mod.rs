//! PDF document objects.
//!
//! - `objtable` - in-memory indirect object table (ObjectTable)

pub mod objtable;

pub use objtable::ObjectTable;
