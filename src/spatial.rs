//! Radius queries over 2-D points.
//!
//! The superscript filter only needs one capability from a spatial index:
//! "which points lie within `radius` of this point?". Anything answering
//! that correctly can stand behind [`SpatialIndex`]; results are returned as
//! indices into the point slice the index was built from, in no particular
//! order.

use rstar::primitives::GeomWithData;
use rstar::RTree;

pub type Point = [f64; 2];

/// A point set supporting radius search.
pub trait SpatialIndex {
    /// Indices of all points whose distance to `point` is at most `radius`.
    fn radius_search(&self, point: Point, radius: f64) -> Vec<usize>;
}

/// R-tree backed index, bulk loaded once per page.
pub struct RTreeIndex {
    tree: RTree<GeomWithData<Point, usize>>,
}

impl RTreeIndex {
    pub fn new(points: &[Point]) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new(*p, i))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }
}

impl SpatialIndex for RTreeIndex {
    fn radius_search(&self, point: Point, radius: f64) -> Vec<usize> {
        self.tree
            .locate_within_distance(point, radius * radius)
            .map(|entry| entry.data)
            .collect()
    }
}

/// Linear scan. Adequate for small pages and useful as a reference.
pub struct LinearIndex {
    points: Vec<Point>,
}

impl LinearIndex {
    pub fn new(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }
}

impl SpatialIndex for LinearIndex {
    fn radius_search(&self, point: Point, radius: f64) -> Vec<usize> {
        let r2 = radius * radius;
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let dx = p[0] - point[0];
                let dy = p[1] - point[1];
                dx * dx + dy * dy <= r2
            })
            .map(|(i, _)| i)
            .collect()
    }
}
