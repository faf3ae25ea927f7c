//! Superscript and subscript removal.
//!
//! A fragment is treated as a superscript (footnote marker, exponent,
//! reference number) when exactly one noticeably taller fragment has a top
//! corner right next to it:
//!
//! ```text
//!   main text┐¹      search the top-right corners around ¹'s mid-left
//!          ²┌main    search the top-left corners around ²'s mid-right
//! ```
//!
//! "Noticeably taller" means `neighbour.height * height_scale > height`.
//! The search radius is `height * radius_scale`. Two or more qualifying
//! neighbours on a side make the fragment ambiguous, and it is kept.
//!
//! Each page gets its own pair of spatial indexes; fragments never interact
//! across pages.

use crate::config::SuperscriptOptions;
use crate::model::{pages, renumber, Fragment, Row};
use crate::spatial::{Point, RTreeIndex, SpatialIndex};
use std::collections::HashSet;
use tracing::{debug, info};

/// Remove superscript fragments using an R-tree per page.
pub fn strip_superscripts(rows: Vec<Row>, options: &SuperscriptOptions) -> Vec<Row> {
    strip_superscripts_with(rows, options, RTreeIndex::new)
}

/// Remove superscript fragments, building each page's indexes with
/// `build_index`.
///
/// Rows emptied by the removal are dropped and survivors renumbered.
pub fn strip_superscripts_with<I, F>(
    rows: Vec<Row>,
    options: &SuperscriptOptions,
    build_index: F,
) -> Vec<Row>
where
    I: SpatialIndex,
    F: Fn(&[Point]) -> I,
{
    if !options.strip_left && !options.strip_right {
        return rows;
    }

    let mut marked: HashSet<(usize, usize)> = HashSet::new();
    let mut first_row = 0;
    for page in pages(&rows) {
        mark_page(page, first_row, options, &build_index, &mut marked);
        first_row += page.len();
    }

    if marked.is_empty() {
        return rows;
    }
    info!("Stripping {} superscript fragments", marked.len());

    let mut kept: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row_idx, mut row)| {
            row.retain_indexed(|item_idx| !marked.contains(&(row_idx, item_idx)));
            if row.is_empty() {
                debug!("Row {} emptied by superscript removal", row.row_number);
                None
            } else {
                Some(row)
            }
        })
        .collect();
    renumber(&mut kept);
    kept
}

/// Add `(row index, item index)` of every superscript on one page.
fn mark_page<I, F>(
    page: &[Row],
    first_row: usize,
    options: &SuperscriptOptions,
    build_index: &F,
    marked: &mut HashSet<(usize, usize)>,
) where
    I: SpatialIndex,
    F: Fn(&[Point]) -> I,
{
    let flat: Vec<(usize, usize, &Fragment)> = page
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.items
                .iter()
                .enumerate()
                .map(move |(i, f)| (first_row + r, i, f))
        })
        .collect();

    let top_left = options.strip_left.then(|| {
        let points: Vec<Point> = flat.iter().map(|(_, _, f)| [f.x, f.y]).collect();
        build_index(&points)
    });
    let top_right = options.strip_right.then(|| {
        let points: Vec<Point> = flat.iter().map(|(_, _, f)| [f.right(), f.y]).collect();
        build_index(&points)
    });

    for (i, &(row_idx, item_idx, f)) in flat.iter().enumerate() {
        let mid_y = f.y - f.height / 2.0;
        let radius = f.height * options.radius_scale;
        let is_main_text = |j: usize| flat[j].2.height * options.height_scale > f.height;

        // Larger text starting just right of `f`.
        let right_matches = top_left.as_ref().map_or(0, |index| {
            index
                .radius_search([f.right(), mid_y], radius)
                .into_iter()
                .filter(|&j| j != i && flat[j].2.x > f.x && is_main_text(j))
                .count()
        });

        // Larger text ending just left of `f`.
        let left_matches = top_right.as_ref().map_or(0, |index| {
            index
                .radius_search([f.x, mid_y], radius)
                .into_iter()
                .filter(|&j| j != i && flat[j].2.x < f.x && is_main_text(j))
                .count()
        });

        if right_matches == 1 || left_matches == 1 {
            debug!("Superscript {:?} at ({:.1}, {:.1})", f.text, f.x, f.y);
            marked.insert((row_idx, item_idx));
        }
    }
}
