//! Text extraction: turn PDF bytes into positioned fragments via pdfium.
//!
//! pdfium is blocking C code with internal global state, so everything here
//! is synchronous; [`crate::convert::pdf2array_async`] moves the whole
//! extraction onto tokio's blocking pool.
//!
//! Each pdfium text segment becomes one [`Fragment`]. Positions stay in PDF
//! user space (origin bottom-left, y up): `x` is the segment's left edge,
//! `y` its bottom edge and `height` the top-to-bottom extent.

use crate::error::Pdf2ArrayError;
use crate::model::Fragment;
use crate::source::FragmentSource;
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Magic bytes every PDF starts with.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

static RE_LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

/// Bind to a pdfium library.
///
/// Lookup order: `PDFIUM_LIB_PATH`, the platform library in the working
/// directory, then the system library path.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2ArrayError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => {
            debug!("Binding pdfium from PDFIUM_LIB_PATH={}", path);
            Pdfium::bind_to_library(PathBuf::from(path))
        }
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Pdf2ArrayError::PdfiumBindingFailed(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// Reject input that does not start with `%PDF`.
pub fn check_pdf_magic(bytes: &[u8]) -> Result<(), Pdf2ArrayError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        Err(Pdf2ArrayError::NotAPdf {
            magic: bytes.iter().take(PDF_MAGIC.len()).copied().collect(),
        })
    }
}

/// Remove invisible characters and fold line breaks into single spaces.
pub fn clean_fragment_text(raw: &str) -> String {
    let visible = raw.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{0000}',
            '\u{FFFE}',
        ],
        "",
    );
    RE_LINE_BREAKS.replace_all(&visible, " ").into_owned()
}

/// A pdfium document loaded from an in-memory buffer.
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
    page_count: usize,
}

impl<'a> PdfiumSource<'a> {
    /// Load `bytes` with an optional document password.
    pub fn load(
        pdfium: &'a Pdfium,
        bytes: &'a [u8],
        password: Option<&str>,
    ) -> Result<Self, Pdf2ArrayError> {
        check_pdf_magic(bytes)?;

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|e| load_error(e, password.is_some()))?;

        let page_count = document.pages().len() as usize;
        info!("PDF loaded: {} pages ({} bytes)", page_count, bytes.len());

        Ok(Self {
            document,
            page_count,
        })
    }
}

impl FragmentSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_fragments(&self, page_index: usize) -> Result<Vec<Fragment>, Pdf2ArrayError> {
        let page_error = |detail: String| Pdf2ArrayError::PageExtractionFailed {
            page: page_index + 1,
            detail,
        };

        let index = page_index
            .try_into()
            .map_err(|_| page_error(format!("page index {} out of range", page_index)))?;
        let page = self
            .document
            .pages()
            .get(index)
            .map_err(|e| page_error(e.to_string()))?;
        let text = page.text().map_err(|e| page_error(e.to_string()))?;

        let fragments: Vec<Fragment> = text
            .segments()
            .iter()
            .map(|segment| {
                let bounds = segment.bounds();
                let left = bounds.left().value as f64;
                let bottom = bounds.bottom().value as f64;
                Fragment::new(
                    clean_fragment_text(&segment.text()),
                    left,
                    bottom,
                    bounds.right().value as f64 - left,
                    bounds.top().value as f64 - bottom,
                )
            })
            .collect();

        trace!(
            "Page {}: {} segments extracted",
            page_index + 1,
            fragments.len()
        );
        Ok(fragments)
    }
}

/// Map a pdfium load failure to the matching parse error.
fn load_error(err: PdfiumError, had_password: bool) -> Pdf2ArrayError {
    let detail = format!("{:?}", err);
    if detail.contains("Password") || detail.contains("password") {
        if had_password {
            Pdf2ArrayError::WrongPassword
        } else {
            Pdf2ArrayError::PasswordRequired
        }
    } else {
        Pdf2ArrayError::CorruptPdf { detail }
    }
}
