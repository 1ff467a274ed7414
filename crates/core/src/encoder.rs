//! Huffman encoding.
//!
//! Encoding is split in two steps:
//! - [`derive_bit_sequence`]: maps every input byte through a [`CodeTable`]
//!   and appends the end-of-stream code (pure)
//! - [`persist`]: writes a bit sequence into a [`BitSink`] (effectful)
//!
//! A byte without a code is reported as `HuffmanError::MissingCode` instead
//! of being skipped.

use crate::bitio::{BitSequence, BitSink};
use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use std::io::{BufReader, Read};

/// Encode `symbols` followed by the end-of-stream marker.
///
/// # Errors
/// `HuffmanError::MissingCode` if a byte (or the end-of-stream marker) has no
/// entry in `codes`.
pub fn derive_bit_sequence<I>(symbols: I, codes: &CodeTable) -> Result<BitSequence>
where
    I: IntoIterator<Item = u8>,
{
    let mut bits = BitSequence::new();
    for byte in symbols {
        append_code(&mut bits, codes, Symbol::Literal(byte))?;
    }
    append_code(&mut bits, codes, Symbol::EndOfStream)?;
    Ok(bits)
}

/// Same as [`derive_bit_sequence`], reading the bytes from `reader`.
///
/// # Errors
/// Propagates read errors in addition to `HuffmanError::MissingCode`.
pub fn derive_bit_sequence_from_reader<R: Read>(reader: R, codes: &CodeTable) -> Result<BitSequence> {
    let mut bits = BitSequence::new();
    for byte in BufReader::new(reader).bytes() {
        append_code(&mut bits, codes, Symbol::Literal(byte?))?;
    }
    append_code(&mut bits, codes, Symbol::EndOfStream)?;
    Ok(bits)
}

fn append_code(bits: &mut BitSequence, codes: &CodeTable, symbol: Symbol) -> Result<()> {
    let code = codes.get(symbol).ok_or(HuffmanError::MissingCode { symbol })?;
    bits.extend_from(code);
    Ok(())
}

/// Write every bit of `bits` into `sink`, returning how many were written.
pub fn persist<S: BitSink + ?Sized>(bits: &BitSequence, sink: &mut S) -> Result<usize> {
    for bit in bits.iter() {
        sink.write_bit(bit)?;
    }
    Ok(bits.len())
}
