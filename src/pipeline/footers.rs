//! Footer removal: drop a bottom row that repeats across most pages.
//!
//! The last row of every page is a footer candidate. Candidates are compared
//! pairwise and similar ones are joined into clusters with a union-find.
//! When the largest cluster covers more than `confidence` of the pages its
//! rows are removed, and the search runs again on what is left, since a
//! footer may be several lines tall. The loop stops at the first pass that
//! finds no qualifying cluster.
//!
//! Two candidates are similar when they have the same number of items, their
//! baselines are within `y_tolerance`, and item by item:
//!
//! * the left, right *or* centre x agree within `x_tolerance` (footers can be
//!   left, right or centre justified), and
//! * the text is equal once digit runs are removed and case and whitespace
//!   are normalised, so "Page 3" matches "Page 14".

use crate::config::FooterOptions;
use crate::model::{pages, renumber, Row};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info};

static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Remove repeating footer rows, renumbering the survivors.
///
/// Rows are matched by position, so incoming `row_number`s need not be
/// current.
pub fn strip_footers(mut rows: Vec<Row>, options: &FooterOptions) -> Vec<Row> {
    let mut passes = 0;
    let mut removed = 0;

    while let Some(footer_rows) = find_footer_rows(&rows, options) {
        passes += 1;
        removed += footer_rows.len();
        let mut position = 0;
        rows.retain(|_| {
            let keep = !footer_rows.contains(&position);
            position += 1;
            keep
        });
        renumber(&mut rows);
        debug!(
            "Footer pass {}: removed {} rows, {} remain",
            passes,
            footer_rows.len(),
            rows.len()
        );
    }

    if removed > 0 {
        info!("Stripped {} footer rows in {} passes", removed, passes);
    }
    rows
}

/// Positions of the footer cluster's rows, if one clears the confidence bar.
fn find_footer_rows(rows: &[Row], options: &FooterOptions) -> Option<HashSet<usize>> {
    let mut candidates: Vec<Candidate<'_>> = Vec::new();
    let mut page_end = 0;
    for page in pages(rows) {
        page_end += page.len();
        if let Some(last) = page.last() {
            candidates.push(Candidate::new(page_end - 1, last));
        }
    }

    // A pattern needs at least two pages to repeat on.
    if candidates.len() < 2 {
        return None;
    }

    let mut sets = DisjointSets::new(candidates.len());
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            if sets.find(i) != sets.find(j) && candidates[i].matches(&candidates[j], options) {
                sets.union(i, j);
            }
        }
    }

    let cluster = largest_cluster(&mut sets)?;
    let ratio = cluster.len() as f64 / candidates.len() as f64;
    debug!(
        "Largest footer cluster: {}/{} pages (ratio {:.2}, threshold {:.2})",
        cluster.len(),
        candidates.len(),
        ratio,
        options.confidence
    );
    if ratio <= options.confidence {
        return None;
    }

    Some(cluster.into_iter().map(|i| candidates[i].position).collect())
}

/// The first cluster of maximal size, ordered by lowest member.
/// Singletons are not clusters.
fn largest_cluster(sets: &mut DisjointSets) -> Option<Vec<usize>> {
    let mut order: Vec<usize> = Vec::new();
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); sets.len()];
    for i in 0..sets.len() {
        let root = sets.find(i);
        if members[root].is_empty() {
            order.push(root);
        }
        members[root].push(i);
    }

    let mut best: Option<usize> = None;
    for &root in &order {
        let size = members[root].len();
        if size >= 2 && best.is_none_or(|b| size > members[b].len()) {
            best = Some(root);
        }
    }
    best.map(|root| std::mem::take(&mut members[root]))
}

/// A footer candidate with its comparison keys precomputed.
struct Candidate<'a> {
    /// Index of the row in the document.
    position: usize,
    row: &'a Row,
    keys: Vec<String>,
}

impl<'a> Candidate<'a> {
    fn new(position: usize, row: &'a Row) -> Self {
        let keys = row.items.iter().map(|f| footer_text_key(&f.text)).collect();
        Self {
            position,
            row,
            keys,
        }
    }

    fn matches(&self, other: &Candidate<'_>, options: &FooterOptions) -> bool {
        let (a, b) = (self.row, other.row);
        if a.items.len() != b.items.len() {
            return false;
        }
        if (a.y - b.y).abs() > options.y_tolerance {
            return false;
        }

        let tol = options.x_tolerance;
        a.items.iter().zip(&b.items).all(|(fa, fb)| {
            (fa.x - fb.x).abs() <= tol
                || (fa.right() - fb.right()).abs() <= tol
                || (fa.center_x() - fb.center_x()).abs() <= tol
        }) && self.keys == other.keys
    }
}

/// Text used to compare footers: digits removed, lower case, single spaces.
pub fn footer_text_key(text: &str) -> String {
    let stripped = RE_DIGITS.replace_all(text, "");
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Union-find over candidate indices, with path compression and union by rank.
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}
