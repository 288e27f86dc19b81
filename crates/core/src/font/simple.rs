//! Metrics-only fonts built straight from a font dictionary.
//!
//! No embedded program is decoded; this is enough to measure text and to
//! identify fonts, and serves as the default [`FontBuilder`].

use crate::error::{PdfError, Result};
use crate::model::{PDFDict, PDFObject};
use crate::resources::FontBuilder;
use std::collections::HashMap;

/// Maps CID / character code to glyph width in text space units * 1000.
pub type FontWidthDict = HashMap<u32, f64>;

/// A font described by its dictionary entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFont {
    /// `/Subtype`, e.g. `Type1`, `TrueType`, `Type0`, `Type3`.
    pub subtype: String,
    /// `/BaseFont`, if present.
    pub basefont: Option<String>,
    pub widths: FontWidthDict,
    pub default_width: f64,
}

impl SimpleFont {
    /// Width of `cid` in text space (1/1000 em units scaled to 1.0).
    pub fn char_width(&self, cid: u32) -> f64 {
        self.widths.get(&cid).copied().unwrap_or(self.default_width) / 1000.0
    }

    pub fn is_cid_font(&self) -> bool {
        matches!(self.subtype.as_str(), "Type0" | "CIDFontType0" | "CIDFontType2")
    }
}

/// Builds [`SimpleFont`]s.
///
/// In strict mode `/Subtype` must be a name. Lenient mode falls back to
/// `Type1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleFontBuilder;

impl FontBuilder for SimpleFontBuilder {
    type Font = SimpleFont;

    fn build(&mut self, spec: &PDFDict, lenient: bool) -> Result<SimpleFont> {
        let subtype = match spec.get("Subtype").map(PDFObject::as_name) {
            Some(Ok(name)) => name.to_string(),
            _ if lenient => "Type1".to_string(),
            _ => return Err(PdfError::FontError("font has no /Subtype name".to_string())),
        };
        let basefont = spec
            .get("BaseFont")
            .and_then(|obj| obj.as_name().ok())
            .map(str::to_string);

        Ok(SimpleFont {
            subtype,
            basefont,
            widths: parse_widths(spec, lenient)?,
            default_width: spec.get("DW").and_then(|obj| obj.as_num().ok()).unwrap_or(0.0),
        })
    }
}

/// Largest span a single `[cid_start cid_end w]` range may cover.
pub const MAX_CID_RANGE: u32 = 0xFFFF;

/// Parse widths from a font spec.
///
/// CID fonts use the `W` array; simple fonts use `Widths` starting at
/// `FirstChar`. A negative `FirstChar` is a font error in strict mode
/// and drops the `Widths` array in lenient mode.
fn parse_widths(spec: &PDFDict, lenient: bool) -> Result<FontWidthDict> {
    if let Some(PDFObject::Array(w_array)) = spec.get("W") {
        let widths = get_widths(w_array);
        if !widths.is_empty() {
            return Ok(widths);
        }
    }

    let mut result = FontWidthDict::new();
    if let Some(PDFObject::Array(widths_array)) = spec.get("Widths") {
        let first_char = spec
            .get("FirstChar")
            .and_then(|v| v.as_int().ok())
            .unwrap_or(0);
        let Ok(first_char) = u32::try_from(first_char) else {
            if lenient {
                return Ok(result);
            }
            return Err(PdfError::FontError(format!(
                "/FirstChar out of range: {first_char}"
            )));
        };

        for (i, width_obj) in widths_array.iter().enumerate() {
            let Some(code) = offset_code(first_char, i) else {
                break;
            };
            if let Ok(width) = width_obj.as_num() {
                result.insert(code, width);
            }
        }
    }
    Ok(result)
}

/// `base + i`, or `None` once past `u32::MAX`.
fn offset_code(base: u32, i: usize) -> Option<u32> {
    u32::try_from(i).ok().and_then(|i| base.checked_add(i))
}

/// A CID operand as `u32`, or `None` if negative, fractional or too large.
fn cid_value(n: f64) -> Option<u32> {
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}

/// Parse a CID font `W` array.
///
/// Handles two formats:
/// - `[cid [w1 w2 ...]]` - consecutive widths starting at cid
/// - `[cid_start cid_end w]` - range with the same width
///
/// Entries with invalid CIDs, inverted ranges and ranges wider than
/// [`MAX_CID_RANGE`] are skipped.
pub fn get_widths(seq: &[PDFObject]) -> FontWidthDict {
    let mut widths = FontWidthDict::new();
    let mut r: Vec<f64> = Vec::new();

    for v in seq {
        match v {
            PDFObject::Array(arr) => {
                if let Some(char1) = r.pop().and_then(cid_value) {
                    for (i, w) in arr.iter().enumerate() {
                        let Some(cid) = offset_code(char1, i) else {
                            break;
                        };
                        if let Ok(width) = w.as_num() {
                            widths.insert(cid, width);
                        }
                    }
                }
                r.clear();
            }
            other => {
                if let Ok(n) = other.as_num() {
                    r.push(n);
                    if r.len() == 3 {
                        if let (Some(char1), Some(char2)) = (cid_value(r[0]), cid_value(r[1]))
                            && char1 <= char2
                            && char2 - char1 <= MAX_CID_RANGE
                        {
                            for cid in char1..=char2 {
                                widths.insert(cid, r[2]);
                            }
                        }
                        r.clear();
                    }
                }
            }
        }
    }
    widths
}
