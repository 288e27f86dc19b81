//! Resource store: scoped resolution of named page resources.
//!
//! A content stream interpreter loads the page's resource dictionary,
//! then loads one more dictionary for every nested stream it enters
//! (form XObjects, Type3 glyph procedures, tiling patterns) and unloads
//! it again on the way out. Operators resolve names like `/F1` or `/Im0`
//! against whatever is active at that point.
//!
//! Not everything is scoped. Fonts and XObjects live in a stack of frames
//! with fall-through lookup; ExtGState, ColorSpace, Properties, Shading
//! and Pattern entries go into flat registries that persist across
//! unloads, and a later registration under the same name replaces the
//! earlier one. Fonts are additionally cached by object reference for
//! the life of the store, so a font shared by many pages or forms is
//! built once.

use super::collab::{FontBuilder, ObjectResolver};
use super::options::LoadOptions;
use super::scope::ScopedNameTable;
use crate::error::{PdfError, Result};
use crate::model::{ColorSpaceDef, PDFDict, PDFObjRef, PDFObject, PDFStream};
use rustc_hash::FxHashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, warn};

/// Last resolved font name and its result.
type FontMemo<F> = Option<(String, Option<Arc<F>>)>;

/// Repository of the resources visible to the content stream being
/// interpreted.
///
/// Single-threaded and owned by one interpretation session.
pub struct ResourceStore<R, B: FontBuilder> {
    resolver: R,
    builder: B,
    options: LoadOptions,
    /// Font and XObject names share this table.
    names: ScopedNameTable,
    /// Built fonts by object reference. Never evicted.
    loaded_fonts: FxHashMap<PDFObjRef, Arc<B::Font>>,
    extgstates: FxHashMap<String, PDFDict>,
    colorspaces: FxHashMap<String, ColorSpaceDef>,
    properties: FxHashMap<String, PDFDict>,
    shadings: FxHashMap<String, PDFObject>,
    patterns: FxHashMap<String, PDFObject>,
    last_font: FontMemo<B::Font>,
}

impl<R: ObjectResolver, B: FontBuilder> ResourceStore<R, B> {
    /// Create an empty store with strict load options.
    pub fn new(resolver: R, builder: B) -> Self {
        Self {
            resolver,
            builder,
            options: LoadOptions::default(),
            names: ScopedNameTable::new(),
            loaded_fonts: FxHashMap::default(),
            extgstates: FxHashMap::default(),
            colorspaces: FxHashMap::default(),
            properties: FxHashMap::default(),
            shadings: FxHashMap::default(),
            patterns: FxHashMap::default(),
            last_font: None,
        }
    }

    /// Sets the options used by [`load_with_options`](Self::load_with_options)
    /// and [`enter_with_options`](Self::enter_with_options).
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn options(&self) -> LoadOptions {
        self.options
    }

    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Number of resource scopes currently loaded.
    pub fn depth(&self) -> usize {
        self.names.depth()
    }

    /// Number of distinct fonts built and cached so far.
    pub fn cached_font_count(&self) -> usize {
        self.loaded_fonts.len()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Open a new resource scope and populate it from `resources`.
    ///
    /// The scope is pushed before any entry is read. If an entry fails,
    /// the error is returned with the scope still open; the caller must
    /// still call [`unload`](Self::unload), or use [`enter`](Self::enter).
    pub fn load(&mut self, resources: &PDFDict, lenient: bool) -> Result<()> {
        self.last_font = None;
        self.names.push();
        debug!(depth = self.names.depth(), "resource scope pushed");

        if let Some(fonts) = self.sub_dict(resources, "Font", lenient)? {
            self.load_fonts(&fonts, lenient)?;
        }

        if let Some(xobjects) = self.sub_dict(resources, "XObject", lenient)? {
            for (name, value) in &xobjects {
                let PDFObject::Ref(reference) = value else {
                    return Err(PdfError::format(format!(
                        "XObject {name} must be an indirect reference, got {}",
                        value.type_name()
                    )));
                };
                self.names.set(name, *reference);
            }
        }

        if let Some(states) = self.sub_dict(resources, "ExtGState", lenient)? {
            for (name, value) in &states {
                let state = self.resolver.resolve_dict(value).ok_or_else(|| {
                    PdfError::format(format!("ExtGState {name} is not a dictionary"))
                })?;
                self.extgstates.insert(name.clone(), state);
            }
        }

        if let Some(spaces) = self.sub_dict(resources, "ColorSpace", lenient)? {
            for (name, value) in &spaces {
                let resolved = self.resolve_entry("ColorSpace", name, value)?;
                let def = ColorSpaceDef::from_object(&resolved)?;
                self.colorspaces.insert(name.clone(), def);
            }
        }

        if let Some(props) = self.sub_dict(resources, "Properties", lenient)? {
            for (name, value) in &props {
                let list = self.resolver.resolve_dict(value).ok_or_else(|| {
                    PdfError::format(format!("property list {name} is not a dictionary"))
                })?;
                self.properties.insert(name.clone(), list);
            }
        }

        if let Some(shadings) = self.sub_dict(resources, "Shading", lenient)? {
            for (name, value) in &shadings {
                let shading = self.resolve_dict_or_stream("Shading", name, value)?;
                self.shadings.insert(name.clone(), shading);
            }
        }

        if let Some(patterns) = self.sub_dict(resources, "Pattern", lenient)? {
            for (name, value) in &patterns {
                let pattern = self.resolve_dict_or_stream("Pattern", name, value)?;
                self.patterns.insert(name.clone(), pattern);
            }
        }

        Ok(())
    }

    /// [`load`](Self::load) with the store's configured leniency.
    pub fn load_with_options(&mut self, resources: &PDFDict) -> Result<()> {
        self.load(resources, self.options.lenient)
    }

    /// Close the innermost resource scope.
    ///
    /// # Panics
    /// If no scope is loaded.
    pub fn unload(&mut self) {
        self.last_font = None;
        self.names.pop();
        debug!(depth = self.names.depth(), "resource scope popped");
    }

    /// Load `resources` and return a guard that unloads them when dropped.
    ///
    /// Unlike [`load`](Self::load), a failed load leaves the scope stack
    /// as it was.
    pub fn enter(&mut self, resources: &PDFDict, lenient: bool) -> Result<ResourceScope<'_, R, B>> {
        if let Err(err) = self.load(resources, lenient) {
            self.unload();
            return Err(err);
        }
        Ok(ResourceScope { store: self })
    }

    /// [`enter`](Self::enter) with the store's configured leniency.
    pub fn enter_with_options(&mut self, resources: &PDFDict) -> Result<ResourceScope<'_, R, B>> {
        self.enter(resources, self.options.lenient)
    }

    fn load_fonts(&mut self, fonts: &PDFDict, lenient: bool) -> Result<()> {
        for (name, value) in fonts {
            let PDFObject::Ref(reference) = value else {
                if lenient {
                    warn!(font = %name, got = value.type_name(), "skipping font that is not an indirect reference");
                    continue;
                }
                return Err(PdfError::format(format!(
                    "font {name} must be an indirect reference, got {}",
                    value.type_name()
                )));
            };

            self.names.set(name, *reference);

            if self.loaded_fonts.contains_key(reference) {
                continue;
            }

            let spec = self.resolver.resolve_dict(value).ok_or_else(|| {
                PdfError::format(format!("font {name} ({reference}) is not a dictionary"))
            })?;
            let font = self.builder.build(&spec, lenient)?;
            debug!(font = %name, reference = %reference, "font built");
            self.loaded_fonts.insert(*reference, Arc::new(font));
        }
        Ok(())
    }

    /// Fetch a resource category sub-dictionary such as `/Font`.
    ///
    /// An absent or `null` category contributes nothing. Any other
    /// non-dictionary value is a format error, or ignored when lenient.
    fn sub_dict(&self, resources: &PDFDict, key: &str, lenient: bool) -> Result<Option<PDFDict>> {
        let Some(value) = resources.get(key) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        if let Some(dict) = self.resolver.resolve_dict(value) {
            return Ok(Some(dict));
        }
        if lenient {
            warn!(category = key, got = value.type_name(), "ignoring resource category that is not a dictionary");
            return Ok(None);
        }
        Err(PdfError::format(format!(
            "resource category {key} is not a dictionary, got {}",
            value.type_name()
        )))
    }

    /// Dereference a registry entry; an unresolvable value is a format error.
    fn resolve_entry(
        &self,
        category: &'static str,
        name: &str,
        value: &PDFObject,
    ) -> Result<Arc<PDFObject>> {
        self.resolver
            .resolve(value)
            .map_err(|err| PdfError::format(format!("{category} {name} cannot be resolved: {err}")))
    }

    fn resolve_dict_or_stream(
        &self,
        category: &'static str,
        name: &str,
        value: &PDFObject,
    ) -> Result<PDFObject> {
        let resolved = self.resolve_entry(category, name, value)?;
        match resolved.as_ref() {
            PDFObject::Dict(_) | PDFObject::Stream(_) => Ok((*resolved).clone()),
            other => Err(PdfError::format(format!(
                "{category} {name} must be a dictionary or stream, got {}",
                other.type_name()
            ))),
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve a font by resource name.
    ///
    /// Returns `None` for unknown names, names bound to something that is
    /// not a loaded font, and fonts skipped during a lenient load.
    pub fn get_font(&mut self, name: &str) -> Option<Arc<B::Font>> {
        if let Some((memo_name, font)) = &self.last_font
            && memo_name == name
        {
            return font.clone();
        }

        let reference = self.names.get(name)?;
        let font = self.loaded_fonts.get(reference).cloned();
        self.last_font = Some((name.to_string(), font.clone()));
        font
    }

    /// Build a font straight from an object reference, bypassing names.
    ///
    /// The result is not cached. Used for fonts referenced by identity,
    /// e.g. from inside a Type3 glyph procedure.
    pub fn get_font_directly(&mut self, reference: &PDFObjRef, lenient: bool) -> Result<B::Font> {
        self.last_font = None;
        let spec = self
            .resolver
            .resolve_dict(&PDFObject::Ref(*reference))
            .ok_or_else(|| PdfError::format(format!("font {reference} is not a dictionary")))?;
        self.builder.build(&spec, lenient)
    }

    /// Resolve an XObject by resource name.
    ///
    /// Dereferenced on every call.
    pub fn get_xobject(&self, name: &str) -> Result<PDFStream> {
        let reference = self
            .names
            .get(name)
            .ok_or_else(|| PdfError::not_found("XObject", name))?;
        self.resolver
            .resolve_stream(&PDFObject::Ref(*reference))
            .ok_or_else(|| PdfError::format(format!("XObject {name} ({reference}) is not a stream")))
    }

    /// Look up a registered color space.
    ///
    /// An unregistered name is `Ok(None)`; an empty name is an error.
    pub fn try_get_colorspace(&self, name: &str) -> Result<Option<&ColorSpaceDef>> {
        if name.is_empty() {
            return Err(PdfError::InvalidArgument(
                "color space name must not be empty".to_string(),
            ));
        }
        Ok(self.colorspaces.get(name))
    }

    /// Look up a registered extended graphics state.
    pub fn get_extgstate(&self, name: &str) -> Result<&PDFDict> {
        self.extgstates
            .get(name)
            .ok_or_else(|| PdfError::not_found("ExtGState", name))
    }

    /// Look up a registered marked-content property list.
    pub fn get_properties(&self, name: &str) -> Result<&PDFDict> {
        self.properties
            .get(name)
            .ok_or_else(|| PdfError::not_found("Properties", name))
    }

    /// Look up a registered shading (dictionary or stream).
    pub fn get_shading(&self, name: &str) -> Result<&PDFObject> {
        self.shadings
            .get(name)
            .ok_or_else(|| PdfError::not_found("Shading", name))
    }

    /// Look up a registered pattern (dictionary or stream).
    pub fn get_pattern(&self, name: &str) -> Result<&PDFObject> {
        self.patterns
            .get(name)
            .ok_or_else(|| PdfError::not_found("Pattern", name))
    }
}

/// A loaded resource scope that unloads itself on drop.
///
/// Derefs to the store, so lookups and nested [`enter`](ResourceStore::enter)
/// calls go through the guard.
pub struct ResourceScope<'s, R: ObjectResolver, B: FontBuilder> {
    store: &'s mut ResourceStore<R, B>,
}

impl<R: ObjectResolver, B: FontBuilder> Deref for ResourceScope<'_, R, B> {
    type Target = ResourceStore<R, B>;

    fn deref(&self) -> &Self::Target {
        &*self.store
    }
}

impl<R: ObjectResolver, B: FontBuilder> DerefMut for ResourceScope<'_, R, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.store
    }
}

impl<R: ObjectResolver, B: FontBuilder> Drop for ResourceScope<'_, R, B> {
    fn drop(&mut self) {
        self.store.unload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ObjectTable;

    fn font_dict(basefont: &str) -> PDFObject {
        PDFObject::Dict(PDFDict::from([
            ("Type".to_string(), PDFObject::name("Font")),
            ("BaseFont".to_string(), PDFObject::name(basefont)),
        ]))
    }

    fn fonts(entries: &[(&str, u32)]) -> PDFDict {
        let fonts: PDFDict = entries
            .iter()
            .map(|(name, objid)| (name.to_string(), PDFObject::reference(*objid)))
            .collect();
        PDFDict::from([("Font".to_string(), PDFObject::Dict(fonts))])
    }

    fn base_font(spec: &PDFDict, _lenient: bool) -> Result<String> {
        Ok(spec["BaseFont"].as_name()?.to_string())
    }

    fn table() -> ObjectTable {
        let mut table = ObjectTable::new();
        table.insert(1, font_dict("Helvetica"));
        table.insert(2, font_dict("Courier"));
        table
    }

    #[test]
    fn test_memo_set_on_lookup() {
        let table = table();
        let mut store = ResourceStore::new(&table, base_font);
        store.load(&fonts(&[("F1", 1)]), false).unwrap();

        assert!(store.last_font.is_none());
        let font = store.get_font("F1");
        let (name, memo) = store.last_font.as_ref().unwrap();
        assert_eq!(name, "F1");
        assert!(Arc::ptr_eq(memo.as_ref().unwrap(), font.as_ref().unwrap()));
    }

    #[test]
    fn test_memo_skips_scope_scan() {
        let table = table();
        let mut store = ResourceStore::new(&table, base_font);
        store.load(&fonts(&[("F1", 1), ("F2", 2)]), false).unwrap();
        assert_eq!(store.get_font("F1").as_deref().map(String::as_str), Some("Helvetica"));

        // Rebind F1 behind the memo's back; a rescan would see Courier.
        store.names.set("F1", PDFObjRef::new(2, 0));
        assert_eq!(store.get_font("F1").as_deref().map(String::as_str), Some("Helvetica"));

        // Another resolvable name replaces the memo and the next F1 lookup rescans.
        assert_eq!(store.get_font("F2").as_deref().map(String::as_str), Some("Courier"));
        assert_eq!(store.get_font("F1").as_deref().map(String::as_str), Some("Courier"));
    }

    #[test]
    fn test_unknown_name_leaves_memo_untouched() {
        let table = table();
        let mut store = ResourceStore::new(&table, base_font);
        store.load(&fonts(&[("F1", 1)]), false).unwrap();
        store.get_font("F1");

        assert!(store.get_font("Nope").is_none());
        assert_eq!(store.last_font.as_ref().unwrap().0, "F1");
    }

    #[test]
    fn test_memo_reset_on_load_unload_and_direct() {
        let table = table();
        let mut store = ResourceStore::new(&table, base_font);
        store.load(&fonts(&[("F1", 1)]), false).unwrap();

        store.get_font("F1");
        store.load(&PDFDict::new(), false).unwrap();
        assert!(store.last_font.is_none());

        store.get_font("F1");
        store.unload();
        assert!(store.last_font.is_none());

        store.get_font("F1");
        store.get_font_directly(&PDFObjRef::new(2, 0), false).unwrap();
        assert!(store.last_font.is_none());
    }

    #[test]
    fn test_memo_survives_registry_lookups() {
        let table = table();
        let mut store = ResourceStore::new(&table, base_font);
        store.load(&fonts(&[("F1", 1)]), false).unwrap();
        store.get_font("F1");

        let _ = store.try_get_colorspace("CS0");
        let _ = store.get_extgstate("GS0");
        let _ = store.get_xobject("F1");
        assert_eq!(store.last_font.as_ref().unwrap().0, "F1");
    }
}
