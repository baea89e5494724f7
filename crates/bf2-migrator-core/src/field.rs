//! Null-padded fixed-width string fields

use std::fmt;

use crate::error::{Error, Result};

/// A string stored in a slot of fixed width inside the executable
///
/// Shorter values are padded with null bytes, so `raw().len() == width()`
/// for every value that can be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedField {
    raw: Vec<u8>,
    text: String,
    width: usize,
}

impl FixedField {
    pub fn new(text: impl Into<String>, width: usize) -> Result<Self> {
        let text = text.into();
        if text.len() > width {
            return Err(Error::FieldOverflow { text, width });
        }

        let mut raw = Vec::with_capacity(width);
        raw.extend_from_slice(text.as_bytes());
        raw.resize(width, 0);

        Ok(Self { raw, text, width })
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of trailing null bytes
    pub fn padding(&self) -> usize {
        self.width - self.text.len()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }
}

impl fmt::Display for FixedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({} bytes)", self.text, self.width)
    }
}
