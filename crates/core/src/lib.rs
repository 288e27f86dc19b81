//! pdfrsrc - scoped resolution of PDF page resources.
//!
//! Content streams refer to fonts, XObjects, graphics states and color
//! spaces by short names such as `/F1`. [`ResourceStore`] maps those names
//! back to document objects while an interpreter walks a page and the
//! form XObjects, patterns and glyph procedures nested inside it.
//!
//! ```
//! use pdfrsrc_core::{ObjectTable, PDFDict, PDFObject, ResourceStore, SimpleFontBuilder};
//!
//! let mut table = ObjectTable::new();
//! table.insert(
//!     5,
//!     PDFObject::Dict(PDFDict::from([
//!         ("Subtype".to_string(), PDFObject::name("Type1")),
//!         ("BaseFont".to_string(), PDFObject::name("Helvetica")),
//!     ])),
//! );
//! let resources = PDFDict::from([(
//!     "Font".to_string(),
//!     PDFObject::Dict(PDFDict::from([("F1".to_string(), PDFObject::reference(5))])),
//! )]);
//!
//! let mut store = ResourceStore::new(&table, SimpleFontBuilder);
//! let mut page = store.enter(&resources, false)?;
//! let font = page.get_font("F1").unwrap();
//! assert_eq!(font.basefont.as_deref(), Some("Helvetica"));
//! # Ok::<(), pdfrsrc_core::PdfError>(())
//! ```

pub mod document;
pub mod error;
pub mod font;
pub mod model;
pub mod resources;

pub use document::ObjectTable;
pub use error::{PdfError, Result};
pub use font::{SimpleFont, SimpleFontBuilder};
pub use model::{ColorSpaceDef, PDFColorSpace, PDFDict, PDFObjRef, PDFObject, PDFStream};
pub use resources::{
    FontBuilder, LoadOptions, ObjectResolver, ResourceScope, ResourceStore, ScopedNameTable,
};
