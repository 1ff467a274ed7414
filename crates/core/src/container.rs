//! Compressed artifact layout.
//!
//! An artifact is a header holding the frequency table, followed by the
//! bit-packed body. The decoder rebuilds the exact same tree from the header,
//! so the table is all it needs.
//!
//! # Header Format
//!
//! ```text
//! +--------------------+
//! | Magic (4 bytes)    |  0x48 0x55 0x46 0x31 ("HUF1")
//! +--------------------+
//! | entry_count (2)    |  u16 little-endian, 1..=257
//! +--------------------+
//! | entries            |  entry_count x { symbol: u16 (0..=256),
//! | (variable)         |                  count:  u64 }
//! +--------------------+
//! | crc32 (4)          |  u32 over entry_count and entries
//! +--------------------+
//! | body               |  MSB-first bits, last byte zero-padded
//! | (variable)         |
//! +--------------------+
//! ```
//!
//! Entries are written in symbol order, so the same table always serializes
//! to the same bytes. Symbol 256 is the end-of-stream marker.

use crate::error::{ContainerError, Error, Result};
use crate::frequency::{FrequencyMap, FrequencyTable};
use crate::symbol::Symbol;
use std::io::{self, Read, Write};

/// Magic number for artifacts: "HUF1"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x31];

/// Bytes per serialized entry (symbol + count)
const ENTRY_SIZE: usize = 2 + 8;

/// Largest possible table: every byte value plus the end-of-stream marker
const MAX_ENTRIES: u16 = 257;

/// Size in bytes of the header for `table`.
pub fn header_len(table: &FrequencyTable) -> usize {
    4 + 2 + table.len() * ENTRY_SIZE + 4
}

/// Serialize `table` as an artifact header.
pub fn encode_header(table: &FrequencyTable) -> Vec<u8> {
    let mut record = Vec::with_capacity(2 + table.len() * ENTRY_SIZE);
    record.extend_from_slice(&(table.len() as u16).to_le_bytes());
    for (symbol, count) in table.iter() {
        record.extend_from_slice(&symbol.to_wire().to_le_bytes());
        record.extend_from_slice(&count.to_le_bytes());
    }

    let crc32 = crc32fast::hash(&record);

    let mut header = Vec::with_capacity(header_len(table));
    header.extend_from_slice(&MAGIC);
    header.extend_from_slice(&record);
    header.extend_from_slice(&crc32.to_le_bytes());
    header
}

/// Write the header for `table` into `writer`, returning its length.
pub fn write_header<W: Write + ?Sized>(writer: &mut W, table: &FrequencyTable) -> Result<usize> {
    let header = encode_header(table);
    writer.write_all(&header)?;
    Ok(header.len())
}

/// Read and validate a header, leaving `reader` positioned at the body.
///
/// # Errors
/// - `ContainerError::HeaderTooShort` if input ends inside the header
/// - `ContainerError::InvalidMagic` if magic number doesn't match
/// - `Error::Crc` if the checksum doesn't match
/// - `ContainerError::{EntryCount, InvalidSymbol, ZeroCount,
///   DuplicateSymbol, MissingEndOfStream}` for a malformed table
/// - `ContainerError::CountOverflow` if the counts add up past `u64::MAX`
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<FrequencyTable> {
    let mut consumed = 0usize;

    let mut magic = [0u8; 4];
    read_field(reader, &mut magic, &mut consumed)?;
    if magic != MAGIC {
        return Err(ContainerError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let mut count_bytes = [0u8; 2];
    read_field(reader, &mut count_bytes, &mut consumed)?;
    let entry_count = u16::from_le_bytes(count_bytes);
    if entry_count == 0 || entry_count > MAX_ENTRIES {
        return Err(ContainerError::EntryCount(entry_count).into());
    }

    let mut entries = vec![0u8; entry_count as usize * ENTRY_SIZE];
    read_field(reader, &mut entries, &mut consumed)?;

    let mut crc_bytes = [0u8; 4];
    read_field(reader, &mut crc_bytes, &mut consumed)?;
    let expected = u32::from_le_bytes(crc_bytes);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&count_bytes);
    hasher.update(&entries);
    let actual = hasher.finalize();
    if actual != expected {
        return Err(Error::Crc { expected, actual });
    }

    let mut table = FrequencyTable::new();
    let mut total = 0u64;
    for entry in entries.chunks_exact(ENTRY_SIZE) {
        let wire = u16::from_le_bytes([entry[0], entry[1]]);
        let symbol = Symbol::from_wire(wire).ok_or(ContainerError::InvalidSymbol(wire))?;

        let mut count_field = [0u8; 8];
        count_field.copy_from_slice(&entry[2..]);
        let count = u64::from_le_bytes(count_field);

        if count == 0 {
            return Err(ContainerError::ZeroCount(symbol).into());
        }
        if table.contains_key(symbol) {
            return Err(ContainerError::DuplicateSymbol(symbol).into());
        }
        total = total
            .checked_add(count)
            .ok_or(ContainerError::CountOverflow(symbol))?;
        table.put(symbol, count);
    }

    if !table.contains_key(Symbol::EndOfStream) {
        return Err(ContainerError::MissingEndOfStream.into());
    }

    Ok(table)
}

/// `read_exact` that reports a short header instead of a bare EOF.
fn read_field<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8], consumed: &mut usize) -> Result<()> {
    match reader.read_exact(buf) {
        Ok(()) => {
            *consumed += buf.len();
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(ContainerError::HeaderTooShort {
            required: *consumed + buf.len(),
            actual: *consumed,
        }
        .into()),
        Err(e) => Err(e.into()),
    }
}
