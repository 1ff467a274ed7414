//! Code table derivation.
//!
//! A symbol's code is its root-to-leaf path: `0` for every step into a
//! zero-child, `1` for every step into a one-child. Codes are leaf paths of a
//! binary tree, so the table is prefix-free by construction.

use crate::bitio::BitSequence;
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};
use std::collections::BTreeMap;

/// Symbol → code mapping, one entry per leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, BitSequence>,
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    ///
    /// A single-leaf tree maps its only symbol to the empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        collect_codes(tree.root(), BitSequence::new(), &mut codes);
        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSequence> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSequence)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitSequence> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// One `symbol<TAB>code` line per entry, shortest codes first.
    pub fn render(&self) -> String {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(symbol, code)| (code.len(), *symbol));
        entries
            .into_iter()
            .map(|(symbol, code)| format!("{}\t{}\n", symbol, code))
            .collect()
    }
}

fn collect_codes(node: &HuffmanNode, path: BitSequence, codes: &mut BTreeMap<Symbol, BitSequence>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path);
        }
        HuffmanNode::Internal { zero, one, .. } => {
            collect_codes(zero, path.with(false), codes);
            collect_codes(one, path.with(true), codes);
        }
    }
}
