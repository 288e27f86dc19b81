//! Collaborator seams the resource store depends on.
//!
//! The store never parses bytes or decodes fonts itself. It asks an
//! [`ObjectResolver`] to follow indirect references and a
//! [`FontBuilder`] to turn a font dictionary into something queryable.

use crate::error::Result;
use crate::model::{PDFDict, PDFObject, PDFStream};
use std::sync::Arc;

/// Dereferences values that may be indirect references.
pub trait ObjectResolver {
    /// Resolve `obj` to its underlying value.
    ///
    /// Direct values come back unchanged. Reference chains are followed
    /// to the end; a dangling or cyclic reference is an error.
    fn resolve(&self, obj: &PDFObject) -> Result<Arc<PDFObject>>;

    /// Resolve to a dictionary, or `None` if it is missing or another type.
    fn resolve_dict(&self, obj: &PDFObject) -> Option<PDFDict> {
        match self.resolve(obj).ok()?.as_ref() {
            PDFObject::Dict(d) => Some(d.clone()),
            _ => None,
        }
    }

    /// Resolve to a stream, or `None` if it is missing or another type.
    fn resolve_stream(&self, obj: &PDFObject) -> Option<PDFStream> {
        match self.resolve(obj).ok()?.as_ref() {
            PDFObject::Stream(s) => Some((**s).clone()),
            _ => None,
        }
    }
}

impl<R: ObjectResolver + ?Sized> ObjectResolver for &R {
    fn resolve(&self, obj: &PDFObject) -> Result<Arc<PDFObject>> {
        (**self).resolve(obj)
    }
}

/// Constructs a font from its raw font dictionary.
pub trait FontBuilder {
    type Font;

    /// Build a font. `lenient` relaxes validation of malformed entries.
    fn build(&mut self, spec: &PDFDict, lenient: bool) -> Result<Self::Font>;
}

impl<T, F> FontBuilder for F
where
    F: FnMut(&PDFDict, bool) -> Result<T>,
{
    type Font = T;

    fn build(&mut self, spec: &PDFDict, lenient: bool) -> Result<T> {
        self(spec, lenient)
    }
}
