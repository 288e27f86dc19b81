//! Options controlling how resource dictionaries are loaded.

/// Load-time options for a [`ResourceStore`](super::ResourceStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip malformed font entries instead of failing.
    ///
    /// Only font entries are affected; malformed XObject, ExtGState and
    /// color space entries are always errors.
    pub lenient: bool,
}

impl LoadOptions {
    /// Strict options (the default).
    pub const fn strict() -> Self {
        Self { lenient: false }
    }

    /// Lenient options.
    pub const fn lenient() -> Self {
        Self { lenient: true }
    }

    /// Sets lenient mode.
    pub const fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}
