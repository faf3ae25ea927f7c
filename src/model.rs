//! Positioned text fragments and the rows built from them.
//!
//! Coordinates are page-space as supplied by the [`crate::source`]
//! collaborator. The y axis grows upward (PDF user space), so reading
//! order is *decreasing* y, then increasing x.

use serde::{Deserialize, Serialize};

/// An atomic piece of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Baseline y.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Fragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Horizontal centre.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// A fragment with no area carries no layout information.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Fragments believed to lie on one visual line of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 0-based page index.
    pub page: usize,
    /// Position of this row in the current row sequence.
    pub row_number: usize,
    /// Reference y, taken from the first fragment placed in the row.
    pub y: f64,
    /// Left x of each item, parallel to `items`.
    pub xs: Vec<f64>,
    pub items: Vec<Fragment>,
}

impl Row {
    /// Start a row on `page` with its first fragment.
    pub fn start(page: usize, row_number: usize, first: Fragment) -> Self {
        Self {
            page,
            row_number,
            y: first.y,
            xs: vec![first.x],
            items: vec![first],
        }
    }

    /// Append a fragment, keeping `xs` in sync.
    pub fn push(&mut self, fragment: Fragment) {
        self.xs.push(fragment.x);
        self.items.push(fragment);
    }

    /// Keep only the items whose index satisfies `keep`.
    pub fn retain_indexed(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let items = std::mem::take(&mut self.items);
        self.items = items
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, f)| f)
            .collect();
        self.xs = self.items.iter().map(|f| f.x).collect();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Item texts in order.
    pub fn texts(&self) -> Vec<String> {
        self.items.iter().map(|f| f.text.clone()).collect()
    }
}

/// Reassign `row_number` to each row's position.
///
/// Every stage that removes or reorders rows calls this before handing the
/// sequence on.
pub fn renumber(rows: &mut [Row]) {
    for (i, row) in rows.iter_mut().enumerate() {
        row.row_number = i;
    }
}

/// Split a document into consecutive runs of rows sharing a page.
pub fn pages(rows: &[Row]) -> impl Iterator<Item = &[Row]> {
    rows.chunk_by(|a, b| a.page == b.page)
}

/// Flatten rows into the final 2-D array of strings.
pub fn to_array(rows: &[Row]) -> Vec<Vec<String>> {
    rows.iter().map(Row::texts).collect()
}
