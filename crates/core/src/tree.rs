//! Huffman tree construction.
//!
//! One leaf per frequency-table entry is queued with priority equal to its
//! count. The two lowest nodes are repeatedly merged (first dequeued becomes
//! the zero-child, second the one-child) until a single root remains.
//!
//! A table with a single entry (empty input: only the end-of-stream marker)
//! yields a root that is itself a leaf. No merge happens and the leaf's code
//! is the empty bit string.
//!
//! Nodes own their children, so dropping a [`HuffmanTree`] releases the whole
//! tree.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;
use crate::queue::{PriorityQueue, StableMinQueue};
use crate::symbol::Symbol;
use std::fmt::Write as _;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: Symbol,
        count: u64,
    },
    Internal {
        count: u64,
        zero: Box<HuffmanNode>,
        one: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: Symbol, count: u64) -> Self {
        HuffmanNode::Leaf { symbol, count }
    }

    /// Parent of `zero` and `one`, weighing their sum.
    ///
    /// # Errors
    /// `HuffmanError::WeightOverflow` if the sum does not fit in a `u64`.
    pub fn merge(zero: HuffmanNode, one: HuffmanNode) -> Result<Self> {
        let count = zero
            .count()
            .checked_add(one.count())
            .ok_or(HuffmanError::WeightOverflow {
                zero: zero.count(),
                one: one.count(),
            })?;
        Ok(HuffmanNode::Internal {
            count,
            zero: Box::new(zero),
            one: Box::new(one),
        })
    }

    pub fn count(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { count, .. } | HuffmanNode::Internal { count, .. } => *count,
        }
    }

    /// The leaf's symbol; `None` for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Child taken for `bit`; `None` at a leaf.
    pub fn child(&self, bit: bool) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { zero, one, .. } => Some(if bit { one } else { zero }),
        }
    }
}

/// A finished Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build a tree from `map` using the FIFO-stable [`StableMinQueue`].
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if `map` has no entries.
    pub fn from_frequencies<M: FrequencyMap + ?Sized>(map: &M) -> Result<Self> {
        build_encoding_tree(map, StableMinQueue::new())
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight (sum of every leaf count).
    pub fn count(&self) -> u64 {
        self.root.count()
    }

    pub fn leaf_count(&self) -> usize {
        fn walk(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 1,
                HuffmanNode::Internal { zero, one, .. } => walk(zero) + walk(one),
            }
        }
        walk(&self.root)
    }

    /// Length of the longest root-to-leaf path (0 for a single-leaf tree).
    pub fn depth(&self) -> usize {
        fn walk(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 0,
                HuffmanNode::Internal { zero, one, .. } => 1 + walk(zero).max(walk(one)),
            }
        }
        walk(&self.root)
    }

    /// Whether every internal node weighs exactly the sum of its children.
    pub fn is_balanced(&self) -> bool {
        fn walk(node: &HuffmanNode) -> bool {
            match node {
                HuffmanNode::Leaf { .. } => true,
                HuffmanNode::Internal { count, zero, one } => {
                    *count == zero.count() + one.count() && walk(zero) && walk(one)
                }
            }
        }
        walk(&self.root)
    }

    /// Leaves in zero-first depth-first order.
    pub fn leaves(&self) -> Vec<(Symbol, u64)> {
        fn walk(node: &HuffmanNode, out: &mut Vec<(Symbol, u64)>) {
            match node {
                HuffmanNode::Leaf { symbol, count } => out.push((*symbol, *count)),
                HuffmanNode::Internal { zero, one, .. } => {
                    walk(zero, out);
                    walk(one, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    /// Indented, human-readable dump of the tree.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, "root", &mut out);
        out
    }
}

fn render_node(node: &HuffmanNode, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        HuffmanNode::Leaf { symbol, count } => {
            let _ = writeln!(out, "{}{} -> {} [count: {}]", indent, label, symbol, count);
        }
        HuffmanNode::Internal { count, zero, one } => {
            let _ = writeln!(out, "{}{} -> * [count: {}]", indent, label, count);
            render_node(zero, depth + 1, "0", out);
            render_node(one, depth + 1, "1", out);
        }
    }
}

/// Build a Huffman tree from `map`, using `queue` to order merges.
///
/// Leaves are enqueued in `map.keys()` order, so the map's key order and the
/// queue's tie-breaking rule together fix the tree's shape.
///
/// # Errors
/// - `HuffmanError::EmptyFrequencyTable` if `map` has no entries
/// - `HuffmanError::WeightOverflow` if the counts add up past `u64::MAX`
pub fn build_encoding_tree<M, Q>(map: &M, mut queue: Q) -> Result<HuffmanTree>
where
    M: FrequencyMap + ?Sized,
    Q: PriorityQueue<HuffmanNode>,
{
    for symbol in map.keys() {
        let Some(count) = map.get(symbol) else {
            continue;
        };
        queue.enqueue(HuffmanNode::leaf(symbol, count), count);
    }

    while queue.size() > 1 {
        let zero = queue.dequeue().ok_or(HuffmanError::EmptyFrequencyTable)?;
        let one = queue.dequeue().ok_or(HuffmanError::EmptyFrequencyTable)?;
        let parent = HuffmanNode::merge(zero, one)?;
        let count = parent.count();
        queue.enqueue(parent, count);
    }

    let root = queue.dequeue().ok_or(HuffmanError::EmptyFrequencyTable)?;
    Ok(HuffmanTree { root })
}
