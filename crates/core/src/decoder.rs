//! Huffman decoding.
//!
//! The decoder walks the tree one bit at a time from the root. Each bit moves
//! the cursor down exactly one edge and leaves are checked on arrival:
//! - end-of-stream leaf: stop (normal end)
//! - literal leaf: emit the byte and return to the root
//!
//! If the source runs dry before the end-of-stream leaf is reached, decoding
//! stops with whatever was emitted so far and reports
//! [`Termination::Truncated`]. This is a partial result, not an error.
//!
//! A tree whose root is a leaf (empty input) decodes to nothing without
//! reading a single bit.

use crate::bitio::BitSource;
use crate::error::Result;
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};
use std::io::Write;

/// How decoding ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The end-of-stream leaf was reached (or the tree had a single leaf)
    EndOfStream,
    /// The bit source was exhausted first
    Truncated,
}

/// Bytes produced by a decode run and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub bytes: Vec<u8>,
    pub termination: Termination,
    /// Bits consumed from the source
    pub bits_read: u64,
}

impl DecodeOutcome {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::EndOfStream
    }
}

/// Decode bits from `source` with `tree`, writing every byte to `output` as
/// soon as its leaf is reached.
///
/// # Errors
/// Only I/O errors from `source` or `output`; truncation is reported through
/// [`DecodeOutcome::termination`].
pub fn decode<S, W>(source: &mut S, tree: &HuffmanTree, output: &mut W) -> Result<DecodeOutcome>
where
    S: BitSource + ?Sized,
    W: Write + ?Sized,
{
    let mut bytes = Vec::new();
    let mut bits_read = 0u64;

    let HuffmanNode::Internal {
        zero: root_zero,
        one: root_one,
        ..
    } = tree.root()
    else {
        return Ok(DecodeOutcome {
            bytes,
            termination: Termination::EndOfStream,
            bits_read,
        });
    };

    // Children of the internal node the cursor sits on.
    let (mut zero, mut one) = (root_zero, root_one);
    loop {
        let Some(bit) = source.read_bit()? else {
            tracing::warn!(
                "bit source exhausted after {} bits and {} bytes without end-of-stream marker",
                bits_read,
                bytes.len()
            );
            return Ok(DecodeOutcome {
                bytes,
                termination: Termination::Truncated,
                bits_read,
            });
        };
        bits_read += 1;

        let next: &HuffmanNode = if bit { one } else { zero };
        match next {
            HuffmanNode::Internal {
                zero: next_zero,
                one: next_one,
                ..
            } => {
                zero = next_zero;
                one = next_one;
            }
            HuffmanNode::Leaf {
                symbol: Symbol::EndOfStream,
                ..
            } => {
                return Ok(DecodeOutcome {
                    bytes,
                    termination: Termination::EndOfStream,
                    bits_read,
                });
            }
            HuffmanNode::Leaf {
                symbol: Symbol::Literal(byte),
                ..
            } => {
                output.write_all(&[*byte])?;
                bytes.push(*byte);
                zero = root_zero;
                one = root_one;
            }
        }
    }
}
