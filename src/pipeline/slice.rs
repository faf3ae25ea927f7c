//! Column segmentation ("slice").
//!
//! Each page is cut into `vertical_slices` equal buckets across its width
//! and every fragment bumps the buckets it covers:
//!
//! ```text
//!  [...] [...] [...]
//!  [..]  [..]  [..]
//!  [.........] [...]
//! 0333321333320333320
//! |     |     |     |
//! ```
//!
//! Local minima of that occupancy profile start new columns. Every row is
//! then re-partitioned: the fragments falling in one column are merged into
//! a single fragment spanning from the column start to the rightmost
//! consumed edge.

use crate::config::SliceOptions;
use crate::model::{pages, Fragment, Row};
use tracing::{debug, info, warn};

/// Re-partition every page's rows into histogram-derived columns.
///
/// A resolution outside `1..=SliceOptions::MAX_VERTICAL_SLICES` leaves the
/// rows unchanged.
pub fn apply_slice(rows: Vec<Row>, options: &SliceOptions) -> Vec<Row> {
    if options.validate().is_err() {
        warn!(
            "Skipping slice: vertical_slices {} out of range",
            options.vertical_slices
        );
        return rows;
    }

    let mut out = Vec::with_capacity(rows.len());
    for page in pages(&rows) {
        out.extend(slice_page(page, options.vertical_slices));
    }
    info!("Sliced {} rows into columns", out.len());
    out
}

fn slice_page(rows: &[Row], slices: usize) -> Vec<Row> {
    let width = rows
        .iter()
        .flat_map(|row| &row.items)
        .map(Fragment::right)
        .fold(0.0, f64::max);
    if !(width > 0.0 && width.is_finite()) {
        return rows.to_vec();
    }

    let histogram = occupancy(rows, width, slices);
    let columns = column_bounds(&find_local_minima(&histogram), width, slices);
    if let Some(row) = rows.first() {
        debug!(
            "Page {}: width {:.1}, {} columns",
            row.page + 1,
            width,
            columns.len()
        );
    }

    rows.iter().map(|row| merge_into_columns(row, &columns)).collect()
}

/// Count of fragments covering each bucket.
fn occupancy(rows: &[Row], width: f64, slices: usize) -> Vec<usize> {
    let bucket = |x: f64| (slices as f64 * x / width).floor().clamp(0.0, slices as f64) as usize;

    let mut counts = vec![0usize; slices];
    for item in rows.iter().flat_map(|row| &row.items) {
        let (left, right) = (bucket(item.x), bucket(item.right()));
        if left < right {
            for count in &mut counts[left..right] {
                *count += 1;
            }
        }
    }
    counts
}

/// `[start, end)` x ranges, one per minimum plus a trailing open column.
fn column_bounds(minima: &[usize], width: f64, slices: usize) -> Vec<(f64, f64)> {
    let to_x = |i: usize| i as f64 * width / slices as f64;

    let mut bounds = Vec::with_capacity(minima.len() + 1);
    let mut start = 0.0;
    for &m in minima {
        let end = to_x(m);
        bounds.push((start, end));
        start = end;
    }
    bounds.push((start, f64::INFINITY));
    bounds
}

/// Indices where a descent (or the start) turns into a strict ascent.
///
/// A run of equal values reports its first index. A trailing descent with
/// no following rise reports nothing.
pub fn find_local_minima(values: &[usize]) -> Vec<usize> {
    #[derive(PartialEq)]
    enum Direction {
        Flat,
        Descending,
        Ascending,
    }

    let mut minima = Vec::new();
    let mut min_idx = 0;
    let mut direction = Direction::Flat;

    for (i, &value) in values.iter().enumerate() {
        if value < values[min_idx] {
            min_idx = i;
            direction = Direction::Descending;
        } else if value > values[min_idx] {
            if direction != Direction::Ascending {
                minima.push(min_idx);
            }
            min_idx = i;
            direction = Direction::Ascending;
        }
    }
    minima
}

fn merge_into_columns(row: &Row, columns: &[(f64, f64)]) -> Row {
    let mut merged: Vec<Fragment> = Vec::new();
    let mut items = row.items.iter().peekable();

    for &(start, end) in columns {
        let mut column: Option<Fragment> = None;
        while let Some(item) = items.next_if(|item| item.x < end) {
            match column.as_mut() {
                None => {
                    column = Some(Fragment {
                        text: item.text.clone(),
                        x: start,
                        y: item.y,
                        width: item.right() - start,
                        height: item.height,
                    });
                }
                Some(acc) => {
                    if acc.text.is_empty() {
                        acc.text.clone_from(&item.text);
                    } else if !item.text.is_empty() {
                        acc.text.push(' ');
                        acc.text.push_str(&item.text);
                    }
                    acc.width = acc.width.max(item.right() - start);
                    acc.height = acc.height.max(item.height);
                }
            }
        }
        merged.extend(column);
        if items.peek().is_none() {
            break;
        }
    }

    Row {
        page: row.page,
        row_number: row.row_number,
        y: row.y,
        xs: merged.iter().map(|f| f.x).collect(),
        items: merged,
    }
}
