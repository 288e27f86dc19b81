//! PDF color space definitions.
//!
//! Only the declared shape of a color space is modelled here; pixel
//! conversion belongs to a renderer.

use super::objects::PDFObject;
use crate::error::{PdfError, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Represents a PDF color space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PDFColorSpace {
    /// Name of the color space (e.g., "DeviceRGB")
    pub name: String,
    /// Number of color components
    pub ncomponents: usize,
}

impl PDFColorSpace {
    /// Create a new color space.
    pub fn new(name: &str, ncomponents: usize) -> Self {
        Self {
            name: name.to_string(),
            ncomponents,
        }
    }
}

/// Predefined PDF color spaces.
pub static PREDEFINED_COLORSPACE: LazyLock<HashMap<&'static str, PDFColorSpace>> =
    LazyLock::new(|| {
        let entries = [
            ("DeviceGray", 1),
            ("CalRGB", 3),
            ("CalGray", 1),
            ("Lab", 3),
            ("DeviceRGB", 3),
            ("DeviceCMYK", 4),
            ("Separation", 1),
            ("Indexed", 1),
            ("Pattern", 1),
        ];

        let mut map = HashMap::with_capacity(entries.len());
        for (name, n) in entries {
            map.insert(name, PDFColorSpace::new(name, n));
        }
        map
    });

/// A color space as declared in a `/ColorSpace` resource sub-dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpaceDef {
    /// A standard color space referenced by name, e.g. `/CS0 /DeviceRGB`.
    Named(String),
    /// A parameterized family, e.g. `/CS1 [/Indexed /DeviceRGB 255 <...>]`.
    ///
    /// `params` is the full declaration array, family name included.
    Family {
        family: String,
        params: Vec<PDFObject>,
    },
}

impl ColorSpaceDef {
    /// Build a definition from an already dereferenced declaration.
    pub fn from_object(obj: &PDFObject) -> Result<Self> {
        match obj {
            PDFObject::Name(name) => Ok(Self::Named(name.clone())),
            PDFObject::Array(arr) => {
                let Some(first) = arr.first() else {
                    return Err(PdfError::format("empty color space array"));
                };
                match first {
                    PDFObject::Name(family) => Ok(Self::Family {
                        family: family.clone(),
                        params: arr.clone(),
                    }),
                    other => Err(PdfError::format(format!(
                        "color space array must start with a name, got {}",
                        other.type_name()
                    ))),
                }
            }
            other => Err(PdfError::format(format!(
                "unrecognized color space declaration: {}",
                other.type_name()
            ))),
        }
    }

    /// The declared color space or family name.
    pub fn family_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Family { family, .. } => family,
        }
    }

    /// Look the declared name up in the predefined color space table.
    pub fn predefined(&self) -> Option<PDFColorSpace> {
        PREDEFINED_COLORSPACE.get(self.family_name()).cloned()
    }
}
