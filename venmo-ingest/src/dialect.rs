//! The CSV dialect Venmo uses for statement exports.
//!
//! Venmo writes every field quoted, escapes embedded quotes with a backslash
//! instead of doubling them, and terminates records with `\r\n`. Two lines of
//! account preamble precede the header line.

use csv::{ReaderBuilder, Terminator};

/// Immutable description of a statement file's CSV dialect.
#[derive(Debug, Clone, Copy)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// Escape byte used inside quoted fields when `double_quote` is off.
    pub escape: Option<u8>,
    pub double_quote: bool,
    /// Reject kept records whose width differs from the header.
    pub strict: bool,
    pub terminator: Terminator,
    /// Lines before the header line.
    pub preamble_lines: usize,
}

impl Dialect {
    pub const fn venmo() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: Some(b'\\'),
            double_quote: false,
            strict: true,
            terminator: Terminator::CRLF,
            preamble_lines: 2,
        }
    }

    /// 1-based line number of the header line.
    pub fn header_line(&self) -> u64 {
        self.preamble_lines as u64 + 1
    }

    /// Reader configuration for this dialect.
    ///
    /// The reader never consumes a header itself and tolerates ragged widths,
    /// since the preamble lines rarely match the data width. Width checking
    /// happens per kept record in [`crate::extract`].
    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.double_quote)
            .terminator(self.terminator)
            .has_headers(false)
            .flexible(true);
        builder
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::venmo()
    }
}
