//! Bit-level I/O for Huffman payloads.
//!
//! Everything here is MSB-first: the first bit written lands in the most
//! significant position of the first byte.
//!
//! - [`BitSink`] / [`BitSource`]: the capabilities the encoder and decoder
//!   need. A source signals exhaustion with `Ok(None)`.
//! - [`BitWriter`] / [`BitReader`]: in-memory implementations.
//! - [`StreamBitWriter`] / [`StreamBitReader`]: implementations over
//!   `std::io` streams, used for container bodies.
//! - [`BitSequence`]: a packed, growable bit string (codes and payloads).
//!
//! # Padding Rules
//! - Writers pad an incomplete final byte with trailing zeros
//! - Readers cannot tell padding from data; the decoder stops at the
//!   end-of-stream leaf instead
//!
//! # Example
//! ```
//! use huffile_core::bitio::{BitReader, BitSink, BitSource, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! for bit in [true, false, true, true] {
//!     writer.write_bit(bit).unwrap();
//! }
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_0000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_bit().unwrap(), Some(false));
//! ```

use crate::error::Result;
use std::fmt;
use std::io::{self, Read, Write};

/// Destination for single bits.
pub trait BitSink {
    fn write_bit(&mut self, bit: bool) -> Result<()>;
}

/// Source of single bits. `Ok(None)` means the source is exhausted.
pub trait BitSource {
    fn read_bit(&mut self) -> Result<Option<bool>>;
}

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8 between calls
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    fn push(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Finish writing and return the output bytes, zero-padding the last one.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSink for BitWriter {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.push(bit);
        Ok(())
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.bit_position
    }
}

impl BitSource for BitReader<'_> {
    fn read_bit(&mut self) -> Result<Option<bool>> {
        let Some(&byte) = self.data.get(self.bit_position / 8) else {
            return Ok(None);
        };
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Ok(Some(bit))
    }
}

/// Packs bits into an underlying writer one byte at a time.
///
/// The final partial byte is zero-padded and written by [`finish`]. If the
/// writer is dropped without `finish` (an early `?` return, say) the partial
/// byte is still written and the stream flushed, ignoring errors.
///
/// [`finish`]: StreamBitWriter::finish
pub struct StreamBitWriter<W: Write> {
    inner: W,
    bit_buffer: u8,
    bit_count: u8,
    bits_written: u64,
    finished: bool,
}

impl<W: Write> StreamBitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bit_buffer: 0,
            bit_count: 0,
            bits_written: 0,
            finished: false,
        }
    }

    /// Number of logical bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Write the padded final byte and flush the underlying writer.
    pub fn finish(mut self) -> Result<()> {
        self.flush_partial()?;
        self.finished = true;
        Ok(())
    }

    fn flush_partial(&mut self) -> io::Result<()> {
        if self.bit_count > 0 {
            self.inner.write_all(&[self.bit_buffer])?;
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
        self.inner.flush()
    }
}

impl<W: Write> BitSink for StreamBitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;
        self.bits_written += 1;

        if self.bit_count == 8 {
            self.inner.write_all(&[self.bit_buffer])?;
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
        Ok(())
    }
}

impl<W: Write> Drop for StreamBitWriter<W> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.flush_partial();
        }
    }
}

/// Reads bits MSB-first from an underlying reader, one byte at a time.
///
/// End of input and an interrupted read both surface as exhaustion
/// (`Ok(None)`); any other I/O error propagates.
pub struct StreamBitReader<R: Read> {
    inner: R,
    current: u8,
    bits_left: u8,
    bits_read: u64,
}

impl<R: Read> StreamBitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            bits_left: 0,
            bits_read: 0,
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    fn refill(&mut self) -> Result<bool> {
        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.current = buf[0];
                self.bits_left = 8;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                tracing::debug!("bit source interrupted after {} bits", self.bits_read);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: Read> BitSource for StreamBitReader<R> {
    fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 && !self.refill()? {
            return Ok(None);
        }
        self.bits_left -= 1;
        self.bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1 == 1))
    }
}

/// A packed, growable sequence of bits.
///
/// Used both for individual codes and for whole encoded payloads. Bits are
/// stored MSB-first, so [`BitSequence::as_bytes`] is exactly the byte layout
/// a [`BitWriter`] would produce for the same bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - offset);
            }
        }
        self.len += 1;
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitSequence) {
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Copy of `self` with `bit` appended.
    pub fn with(&self, bit: bool) -> BitSequence {
        let mut next = self.clone();
        next.push(bit);
        next
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &BitSequence) -> bool {
        self.len <= other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Packed bytes, zero-padded at the end.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut seq = BitSequence::new();
        for bit in iter {
            seq.push(bit);
        }
        seq
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
