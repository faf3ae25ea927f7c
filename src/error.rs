//! Error types for the pdf2array library.
//!
//! Every failure is fatal to a single call and is returned as
//! [`Pdf2ArrayError`]. There is no per-page error type: the geometric stages
//! (row building and the three filters) are total functions over the
//! fragments they receive, so the only things that can go wrong are the
//! document itself, the pdfium binding, or the caller's options.
//!
//! Errors fall into three groups:
//!
//! * **Parse errors**: the collaborator could not turn the input into
//!   fragments (not a PDF, corrupt, encrypted, pdfium missing). See
//!   [`Pdf2ArrayError::is_parse_error`].
//! * **Option errors**: [`Pdf2ArrayError::InvalidOptions`], raised when a
//!   configuration is built or validated. Out-of-range values are rejected,
//!   never clamped.
//! * **Internal errors**: a blocking task panicked.

use thiserror::Error;

/// All errors returned by the pdf2array library.
#[derive(Debug, Error)]
pub enum Pdf2ArrayError {
    // ── Parse errors ──────────────────────────────────────────────────────
    /// The bytes do not start with the `%PDF` magic number.
    #[error("Input is not a valid PDF\nFirst bytes: {magic:?}")]
    NotAPdf { magic: Vec<u8> },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF is corrupt: {detail}\nTry repairing with: qpdf input.pdf output.pdf")]
    CorruptPdf { detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password.\nSet one with ExtractionConfig::builder().password(..).")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF")]
    WrongPassword,

    /// pdfium could not produce text fragments for a page.
    #[error("Text extraction failed for page {page}: {detail}")]
    PageExtractionFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy,\n\
or place the platform library in the working directory.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Option errors ─────────────────────────────────────────────────────
    /// A numeric option is out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2ArrayError {
    /// True when the document (or the library used to decode it) is at
    /// fault rather than the caller's options.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::NotAPdf { .. }
                | Self::CorruptPdf { .. }
                | Self::PasswordRequired
                | Self::WrongPassword
                | Self::PageExtractionFailed { .. }
                | Self::PdfiumBindingFailed(_)
        )
    }
}
