//! Pipeline stages for PDF-to-array extraction.
//!
//! Each submodule implements one transformation step and can be called on
//! its own. Apart from [`extract`], every stage is a pure function from rows
//! to rows.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ rows ──▶ footers ──▶ superscript ──▶ slice ──▶ Vec<Vec<String>>
//! (pdfium)   (lines)   (optional)  (optional)     (optional)
//! ```
//!
//! 1. [`extract`]: load the document and read each page's text segments
//! 2. [`rows`]: group fragments into visual lines using a tolerance
//!    derived from the smallest fragment on the page
//! 3. [`footers`]: drop bottom rows that repeat across pages, ignoring
//!    page numbers
//! 4. [`superscript`]: drop small fragments hugging a larger neighbour's
//!    top corner
//! 5. [`slice`]: merge each row's fragments into columns found from a
//!    horizontal occupancy histogram

pub mod extract;
pub mod footers;
pub mod rows;
pub mod slice;
pub mod superscript;
