//! PDF model types - objects and color space definitions.
//!
//! This module contains the data model the resource store operates on:
//! - `objects` - PDF object types (PDFObject, PDFStream, PDFObjRef)
//! - `color` - Color space definitions (PDFColorSpace, ColorSpaceDef)

pub mod color;
pub mod objects;

// Re-export main types for convenience
pub use color::{ColorSpaceDef, PDFColorSpace};
pub use objects::{PDFDict, PDFObjRef, PDFObject, PDFStream};
