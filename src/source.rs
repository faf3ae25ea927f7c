//! The document-parsing collaborator seam.
//!
//! The geometric core never looks at PDF bytes. It asks a
//! [`FragmentSource`] for the positioned text of each page, in whatever
//! order the source produces it. [`crate::pipeline::extract::PdfiumSource`]
//! is the pdfium-backed implementation; in-memory pages (`Vec<Vec<Fragment>>`
//! or `&[Vec<Fragment>]`) implement the trait too, which is how tests and
//! callers with their own parser feed the pipeline.

use crate::error::Pdf2ArrayError;
use crate::model::Fragment;

/// Supplies raw positioned fragments page by page.
pub trait FragmentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fragments of the 0-based page `page_index`, in any order.
    ///
    /// Positions must already be mapped into page space; any
    /// format-specific transform is the source's responsibility.
    fn page_fragments(&self, page_index: usize) -> Result<Vec<Fragment>, Pdf2ArrayError>;
}

impl FragmentSource for [Vec<Fragment>] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_fragments(&self, page_index: usize) -> Result<Vec<Fragment>, Pdf2ArrayError> {
        self.get(page_index)
            .cloned()
            .ok_or_else(|| Pdf2ArrayError::PageExtractionFailed {
                page: page_index + 1,
                detail: format!("document has {} pages", self.len()),
            })
    }
}

impl FragmentSource for Vec<Vec<Fragment>> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_fragments(&self, page_index: usize) -> Result<Vec<Fragment>, Pdf2ArrayError> {
        self.as_slice().page_fragments(page_index)
    }
}

impl<S: FragmentSource + ?Sized> FragmentSource for &S {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_fragments(&self, page_index: usize) -> Result<Vec<Fragment>, Pdf2ArrayError> {
        (**self).page_fragments(page_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_pages() {
        let pages = vec![vec![Fragment::new("a", 0.0, 0.0, 1.0, 1.0)], vec![]];
        assert_eq!(pages.page_count(), 2);
        assert_eq!(pages.page_fragments(0).unwrap().len(), 1);
        assert!(pages.page_fragments(1).unwrap().is_empty());
    }

    #[test]
    fn missing_page_is_an_extraction_error() {
        let pages: Vec<Vec<Fragment>> = vec![];
        let err = pages.page_fragments(4).unwrap_err();
        assert!(matches!(
            err,
            Pdf2ArrayError::PageExtractionFailed { page: 5, .. }
        ));
    }
}
