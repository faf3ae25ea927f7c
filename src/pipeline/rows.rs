//! Row building: group a page's raw fragments into visual lines.
//!
//! ## Tolerance
//!
//! Two fragments share a line when their baselines differ by less than half
//! the height of the *smallest* fragment on the page. Using the smallest
//! height keeps footnote-sized lines from being merged into their
//! neighbours, which a tolerance derived from body text would do.
//!
//! ## Ordering
//!
//! Fragments are first put in a strict total order (y descending, then x
//! ascending, remaining fields as tie-breaks) so the result does not depend
//! on the order the collaborator emitted them. The sorted run is then cut
//! into bands: a band starts at its highest fragment and takes every
//! following fragment whose y is within the tolerance of that top. Each
//! band becomes one row, its items ordered left to right.

use crate::config::PageSelection;
use crate::error::Pdf2ArrayError;
use crate::model::{renumber, Fragment, Row};
use crate::source::FragmentSource;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Lower bound on the height used to derive the row tolerance.
pub const MIN_ROW_HEIGHT: f64 = 0.001;

/// Pull the selected pages from `source` and build their rows.
///
/// Pages are read in increasing index order. Errors from the source are
/// returned unchanged.
pub fn rows_from_source<S: FragmentSource + ?Sized>(
    source: &S,
    selection: &PageSelection,
) -> Result<Vec<Row>, Pdf2ArrayError> {
    let total_pages = source.page_count();
    let indices = selection.to_indices(total_pages);
    debug!("Selected {} of {} pages", indices.len(), total_pages);

    let mut pages = Vec::with_capacity(indices.len());
    for idx in indices {
        pages.push((idx, source.page_fragments(idx)?));
    }
    Ok(build_rows(pages))
}

/// Build rows for every `(page_index, fragments)` pair, in the given order.
///
/// Fragments without a positive, finite size or with a non-finite position
/// are dropped. Pages left with nothing contribute no rows. The returned
/// rows are numbered by position.
pub fn build_rows<I>(pages: I) -> Vec<Row>
where
    I: IntoIterator<Item = (usize, Vec<Fragment>)>,
{
    let mut rows = Vec::new();
    for (page, fragments) in pages {
        rows.extend(page_rows(page, fragments));
    }
    renumber(&mut rows);
    info!("Built {} rows", rows.len());
    rows
}

/// Row tolerance for a set of fragments: half the smallest height.
pub fn y_tolerance(fragments: &[Fragment]) -> f64 {
    let min_height = fragments
        .iter()
        .map(|f| f.height)
        .fold(f64::INFINITY, f64::min);
    min_height.max(MIN_ROW_HEIGHT) / 2.0
}

fn page_rows(page: usize, fragments: Vec<Fragment>) -> Vec<Row> {
    let raw_count = fragments.len();
    let mut items: Vec<Fragment> = fragments
        .into_iter()
        .filter(|f| f.has_area() && f.x.is_finite() && f.y.is_finite())
        .collect();

    if items.is_empty() {
        debug!("Page {}: no usable fragments ({} raw)", page + 1, raw_count);
        return Vec::new();
    }

    let tolerance = y_tolerance(&items);
    items.sort_by(top_to_bottom);

    let mut rows = Vec::new();
    let mut band: Vec<Fragment> = Vec::new();
    let mut band_top = 0.0;

    for fragment in items {
        if !band.is_empty() && fragment.y > band_top - tolerance {
            band.push(fragment);
            continue;
        }
        if let Some(row) = close_band(page, &mut band) {
            rows.push(row);
        }
        band_top = fragment.y;
        band.push(fragment);
    }
    if let Some(row) = close_band(page, &mut band) {
        rows.push(row);
    }

    debug!(
        "Page {}: {} fragments → {} rows (y tolerance {:.3})",
        page + 1,
        raw_count,
        rows.len(),
        tolerance
    );
    rows
}

/// Turn the pending band into a row, left to right.
fn close_band(page: usize, band: &mut Vec<Fragment>) -> Option<Row> {
    band.sort_by(left_to_right);
    let mut items = band.drain(..);
    let mut row = Row::start(page, 0, items.next()?);
    for fragment in items {
        row.push(fragment);
    }
    Some(row)
}

fn top_to_bottom(a: &Fragment, b: &Fragment) -> Ordering {
    b.y.total_cmp(&a.y)
        .then(a.x.total_cmp(&b.x))
        .then_with(|| tie_break(a, b))
}

fn left_to_right(a: &Fragment, b: &Fragment) -> Ordering {
    a.x.total_cmp(&b.x)
        .then(b.y.total_cmp(&a.y))
        .then_with(|| tie_break(a, b))
}

fn tie_break(a: &Fragment, b: &Fragment) -> Ordering {
    a.text
        .cmp(&b.text)
        .then(a.width.total_cmp(&b.width))
        .then(a.height.total_cmp(&b.height))
}
