//! In-memory object table.
//!
//! Holds already-parsed indirect objects by object number and resolves
//! references against them. Useful wherever objects come from somewhere
//! other than a parsed file: generated documents, tests, or a cache
//! filled by a separate parser.

use crate::error::{PdfError, Result};
use crate::model::PDFObject;
use crate::resources::ObjectResolver;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Indirect objects keyed by object number.
#[derive(Debug, Default, Clone)]
pub struct ObjectTable {
    objects: FxHashMap<u32, Arc<PDFObject>>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `obj` as object `objid`, replacing any previous value.
    ///
    /// Streams get their object number recorded.
    pub fn insert(&mut self, objid: u32, obj: PDFObject) {
        let obj = match obj {
            PDFObject::Stream(mut s) => {
                s.objid = Some(objid);
                PDFObject::Stream(s)
            }
            other => other,
        };
        self.objects.insert(objid, Arc::new(obj));
    }

    /// Get an object by ID without following references.
    pub fn getobj(&self, objid: u32) -> Result<Arc<PDFObject>> {
        self.objects
            .get(&objid)
            .cloned()
            .ok_or(PdfError::ObjectNotFound(objid))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectResolver for ObjectTable {
    fn resolve(&self, obj: &PDFObject) -> Result<Arc<PDFObject>> {
        let mut seen = FxHashSet::default();
        let mut current = match obj {
            PDFObject::Ref(r) => {
                seen.insert(r.objid);
                self.getobj(r.objid)?
            }
            _ => return Ok(Arc::new(obj.clone())),
        };
        loop {
            match current.as_ref() {
                PDFObject::Ref(r) => {
                    if !seen.insert(r.objid) {
                        return Err(PdfError::SyntaxError(format!(
                            "circular reference detected for obj {}",
                            r.objid
                        )));
                    }
                    current = self.getobj(r.objid)?;
                }
                _ => return Ok(current),
            }
        }
    }
}
