//! # pdf2array
//!
//! Reconstruct the tabular structure of PDF text as a 2-D array of strings.
//!
//! PDF pages carry no notion of lines or cells, only runs of text placed at
//! coordinates. This crate groups those runs into visual rows and, on
//! request, cleans the rows up: repeated page footers are dropped, footnote
//! markers and exponents hugging larger text are removed, and each row is
//! re-partitioned into columns shared by the whole page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Extract      text segments + bounding boxes via pdfium
//!  ├─ 2. Rows         group by baseline, order top-down, left-right
//!  ├─ 3. Footers      (optional) drop rows repeating at every page bottom
//!  ├─ 4. Superscript  (optional) drop small fragments beside larger text
//!  ├─ 5. Slice        (optional) merge fragments into histogram columns
//!  └─ 6. Flatten      Vec<Vec<String>>
//! ```
//!
//! Steps 2–6 are pure geometry. They only see [`Fragment`]s supplied by a
//! [`FragmentSource`], so any parser that can produce positioned text can
//! drive them through [`extract_table`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2array::{pdf2array, ExtractionConfig, PageSelection};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("invoice.pdf")?;
//!     let config = ExtractionConfig::builder()
//!         .pages(PageSelection::Range(1, 2))
//!         .strip_footers(true)
//!         .strip_superscript(true)
//!         .slice(true)
//!         .build()?;
//!     for row in pdf2array(&bytes, &config)? {
//!         println!("{:?}", row);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## pdfium
//!
//! PDF decoding uses a pdfium shared library bound at runtime. It is looked
//! up through `PDFIUM_LIB_PATH`, then in the working directory, then on the
//! system library path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod spatial;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ExtractionConfig, ExtractionConfigBuilder, FilterSetting, FooterOptions, PageSelection,
    SliceOptions, SuperscriptOptions,
};
pub use convert::{apply_filters, extract_rows, extract_table, pdf2array, pdf2array_async};
pub use error::Pdf2ArrayError;
pub use model::{Fragment, Row};
pub use pipeline::extract::PdfiumSource;
pub use pipeline::footers::strip_footers;
pub use pipeline::rows::build_rows;
pub use pipeline::slice::apply_slice;
pub use pipeline::superscript::strip_superscripts;
pub use source::FragmentSource;
pub use spatial::{LinearIndex, RTreeIndex, SpatialIndex};
