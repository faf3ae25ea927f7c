//! Extraction entry points.
//!
//! [`pdf2array`] is the one-call API: bytes in, 2-D array of strings out.
//! The other functions expose the same pipeline at different depths:
//!
//! * [`pdf2array_async`]: the same call, run on tokio's blocking pool.
//! * [`extract_table`] / [`extract_rows`]: run over any [`FragmentSource`],
//!   for callers with their own document parser.
//! * [`apply_filters`]: only the configured filter chain, over rows built
//!   elsewhere.
//!
//! Every entry point validates the configuration first, because its fields
//! are public and may not have gone through the builder.

use crate::config::ExtractionConfig;
use crate::error::Pdf2ArrayError;
use crate::model::{to_array, Row};
use crate::pipeline::{extract, footers, rows, slice, superscript};
use crate::source::FragmentSource;
use std::time::Instant;
use tracing::{debug, info};

/// Extract the text of a PDF as rows of cell strings.
///
/// Binds pdfium, loads `bytes` (with `config.password` when set), and runs
/// the row builder plus the filters enabled in `config`.
///
/// # Errors
/// - [`Pdf2ArrayError::InvalidOptions`] for out-of-range options
/// - [`Pdf2ArrayError::NotAPdf`] when `bytes` lack the `%PDF` header
/// - any other parse error reported while loading or reading pages
///
/// # Example
/// ```rust,no_run
/// use pdf2array::{pdf2array, ExtractionConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("statement.pdf")?;
/// let config = ExtractionConfig::builder()
///     .strip_footers(true)
///     .slice(true)
///     .build()?;
/// for row in pdf2array(&bytes, &config)? {
///     println!("{}", row.join(" | "));
/// }
/// # Ok(())
/// # }
/// ```
pub fn pdf2array(bytes: &[u8], config: &ExtractionConfig) -> Result<Vec<Vec<String>>, Pdf2ArrayError> {
    config.validate()?;
    extract::check_pdf_magic(bytes)?;

    let pdfium = extract::bind_pdfium()?;
    let source = extract::PdfiumSource::load(&pdfium, bytes, config.password.as_deref())?;
    extract_table(&source, config)
}

/// Async wrapper around [`pdf2array`].
///
/// pdfium calls block, so the whole extraction runs inside
/// `tokio::task::spawn_blocking`.
pub async fn pdf2array_async(
    bytes: Vec<u8>,
    config: ExtractionConfig,
) -> Result<Vec<Vec<String>>, Pdf2ArrayError> {
    tokio::task::spawn_blocking(move || pdf2array(&bytes, &config))
        .await
        .map_err(|e| Pdf2ArrayError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Run the pipeline over any fragment source and flatten the result.
pub fn extract_table<S: FragmentSource + ?Sized>(
    source: &S,
    config: &ExtractionConfig,
) -> Result<Vec<Vec<String>>, Pdf2ArrayError> {
    Ok(to_array(&extract_rows(source, config)?))
}

/// Run the pipeline over any fragment source, keeping row geometry.
pub fn extract_rows<S: FragmentSource + ?Sized>(
    source: &S,
    config: &ExtractionConfig,
) -> Result<Vec<Row>, Pdf2ArrayError> {
    config.validate()?;
    let start = Instant::now();

    let rows = rows::rows_from_source(source, &config.pages)?;
    let rows = apply_filters(rows, config)?;

    info!(
        "Extracted {} rows in {}ms",
        rows.len(),
        start.elapsed().as_millis()
    );
    Ok(rows)
}

/// Apply the filters enabled in `config`, in their fixed order:
/// footers, superscripts, slice.
pub fn apply_filters(rows: Vec<Row>, config: &ExtractionConfig) -> Result<Vec<Row>, Pdf2ArrayError> {
    config.validate()?;
    let mut rows = rows;

    if let Some(options) = config.strip_footers.resolve() {
        debug!("Applying footer filter: {:?}", options);
        rows = footers::strip_footers(rows, &options);
    }
    if let Some(options) = config.strip_superscript.resolve() {
        debug!("Applying superscript filter: {:?}", options);
        rows = superscript::strip_superscripts(rows, &options);
    }
    if let Some(options) = config.slice.resolve() {
        debug!("Applying slice filter: {:?}", options);
        rows = slice::apply_slice(rows, &options);
    }
    Ok(rows)
}
