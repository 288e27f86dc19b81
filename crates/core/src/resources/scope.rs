//! Scoped name table for font and XObject resource names.
//!
//! Each active resource dictionary owns one frame. Lookups fall through
//! from the innermost frame to the page frame, so a form XObject sees its
//! own names first and its parent's names otherwise.

use crate::model::PDFObjRef;
use rustc_hash::FxHashMap;

/// Stack of name -> reference frames.
#[derive(Debug, Default)]
pub struct ScopedNameTable {
    frames: Vec<FxHashMap<String, PDFObjRef>>,
}

impl ScopedNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty innermost frame.
    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    /// Drop the innermost frame.
    ///
    /// # Panics
    /// If no frame is open. That means load/unload calls were unbalanced.
    pub fn pop(&mut self) {
        assert!(
            self.frames.pop().is_some(),
            "resource scope popped with no active scope"
        );
    }

    /// Bind `name` in the innermost frame.
    ///
    /// # Panics
    /// If no frame is open.
    pub fn set(&mut self, name: &str, reference: PDFObjRef) {
        let frame = self
            .frames
            .last_mut()
            .expect("resource name bound with no active scope");
        frame.insert(name.to_string(), reference);
    }

    /// Find `name`, innermost frame first.
    pub fn get(&self, name: &str) -> Option<&PDFObjRef> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_falls_through_to_outer_frame() {
        let mut table = ScopedNameTable::new();
        table.push();
        table.set("F1", PDFObjRef::new(1, 0));
        table.push();
        table.set("F2", PDFObjRef::new(2, 0));

        assert_eq!(table.get("F1"), Some(&PDFObjRef::new(1, 0)));
        assert_eq!(table.get("F2"), Some(&PDFObjRef::new(2, 0)));
        assert_eq!(table.depth(), 2);

        table.pop();
        assert_eq!(table.get("F1"), Some(&PDFObjRef::new(1, 0)));
        assert_eq!(table.get("F2"), None);
    }

    #[test]
    fn test_inner_frame_shadows_outer() {
        let mut table = ScopedNameTable::new();
        table.push();
        table.set("F1", PDFObjRef::new(1, 0));
        table.push();
        table.set("F1", PDFObjRef::new(7, 0));

        assert_eq!(table.get("F1"), Some(&PDFObjRef::new(7, 0)));
        table.pop();
        assert_eq!(table.get("F1"), Some(&PDFObjRef::new(1, 0)));
    }

    #[test]
    fn test_set_overwrites_within_frame() {
        let mut table = ScopedNameTable::new();
        table.push();
        table.set("X", PDFObjRef::new(1, 0));
        table.set("X", PDFObjRef::new(2, 0));
        assert_eq!(table.get("X"), Some(&PDFObjRef::new(2, 0)));
    }

    #[test]
    fn test_empty_table_finds_nothing() {
        let table = ScopedNameTable::new();
        assert_eq!(table.get("F1"), None);
        assert_eq!(table.depth(), 0);
    }

    #[test]
    #[should_panic(expected = "no active scope")]
    fn test_pop_empty_panics() {
        let mut table = ScopedNameTable::new();
        table.pop();
    }
}
