//! Arena-backed binary range tree over issue-date-sorted positions.
//!
//! The tree partitions the positions `0..n` of a date-sorted sequence by
//! midpoint index, not by date value. Every node covers a contiguous span of
//! positions, so the records a node covers are always a slice of the sorted
//! sequence: an internal node's span is exactly its left child's span
//! followed by its right child's span.

use std::ops::Range;

use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive calendar date interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// True when `self` and `[from, to]` share at least one day
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        !(self.end < from || self.start > to)
    }

    /// True when every day of `self` lies inside `[from, to]`
    pub fn within(&self, from: NaiveDate, to: NaiveDate) -> bool {
        from <= self.start && self.end <= to
    }
}

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeNode {
    /// Min and max issue date of the covered span
    pub range: DateRange,
    /// Positions in the sorted sequence covered by this node
    pub span: Range<usize>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl RangeNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Balanced binary tree stored as a flat node arena.
///
/// Children are always pushed before their parent, so the root is the last
/// node of the arena.
#[derive(Debug, Clone)]
pub struct RangeTree {
    nodes: Vec<RangeNode>,
    root: NodeId,
}

impl RangeTree {
    /// Build a tree over `dates`, which must be sorted ascending.
    ///
    /// Returns `None` for an empty sequence.
    pub fn build(dates: &[NaiveDate]) -> Option<Self> {
        if dates.is_empty() {
            return None;
        }
        debug_assert!(dates.windows(2).all(|w| w[0] <= w[1]));

        let mut nodes = Vec::with_capacity(2 * dates.len() - 1);
        let root = Self::build_node(&mut nodes, dates, 0, dates.len() - 1);
        Some(Self { nodes, root })
    }

    fn build_node(nodes: &mut Vec<RangeNode>, dates: &[NaiveDate], start: usize, end: usize) -> NodeId {
        let node = if start == end {
            RangeNode {
                range: DateRange::single(dates[start]),
                span: start..start + 1,
                left: None,
                right: None,
            }
        } else {
            let mid = (start + end) / 2;
            let left = Self::build_node(nodes, dates, start, mid);
            let right = Self::build_node(nodes, dates, mid + 1, end);
            RangeNode {
                range: DateRange::new(nodes[left].range.start, nodes[right].range.end),
                span: start..end + 1,
                left: Some(left),
                right: Some(right),
            }
        };
        nodes.push(node);
        nodes.len() - 1
    }

    pub fn root(&self) -> &RangeNode {
        &self.nodes[self.root]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&RangeNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of positions (leaves) covered by the tree
    pub fn leaf_count(&self) -> usize {
        self.root().span.len()
    }

    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];
        if node.is_leaf() {
            return 1;
        }
        let left = node.left.map_or(0, |l| self.height_of(l));
        let right = node.right.map_or(0, |r| self.height_of(r));
        1 + left.max(right)
    }

    /// Append to `out` every position whose date lies in `[from, to]`, in
    /// ascending position order. Returns the number of nodes visited.
    ///
    /// Subtrees disjoint from the range are skipped; subtrees fully inside
    /// the range contribute their whole span without descending further.
    pub fn collect(&self, from: NaiveDate, to: NaiveDate, out: &mut Vec<usize>) -> usize {
        self.collect_node(self.root, from, to, out)
    }

    fn collect_node(&self, id: NodeId, from: NaiveDate, to: NaiveDate, out: &mut Vec<usize>) -> usize {
        let node = &self.nodes[id];

        if !node.range.overlaps(from, to) {
            return 1;
        }

        // Always true for an overlapping leaf, whose range is a single date.
        if node.range.within(from, to) {
            out.extend(node.span.clone());
            return 1;
        }

        let mut visited = 1;
        if let Some(left) = node.left {
            visited += self.collect_node(left, from, to, out);
        }
        if let Some(right) = node.right {
            visited += self.collect_node(right, from, to, out);
        }
        visited
    }
}
