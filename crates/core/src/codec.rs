//! Compress and decompress orchestration.
//!
//! # Compression
//! 1. Count symbols (first pass over the input)
//! 2. Build the tree and derive the code table
//! 3. Encode (second pass over the input)
//! 4. Write header + packed body
//!
//! # Decompression
//! 1. Read and validate the header
//! 2. Rebuild the same tree from the frequency table
//! 3. Decode the body, writing bytes to the output as they appear
//!
//! The file variants derive their output paths with [`crate::naming`]; the
//! in-memory variants produce and consume the exact same artifact bytes.

use crate::bitio::{BitReader, BitSequence, StreamBitReader, StreamBitWriter};
use crate::codes::CodeTable;
use crate::container;
use crate::decoder::{self, DecodeOutcome};
use crate::encoder;
use crate::error::Result;
use crate::frequency::{build_frequency_map, FrequencyTable, SymbolSource};
use crate::naming;
use crate::tree::HuffmanTree;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a file compression produced.
#[derive(Debug, Clone)]
pub struct CompressReport {
    /// Path of the written artifact
    pub artifact: PathBuf,
    /// Encoded payload, end-of-stream code included
    pub bits: BitSequence,
    /// Frequency table stored in the header
    pub table: FrequencyTable,
    /// Code table used for encoding
    pub codes: CodeTable,
    pub input_bytes: u64,
    pub header_bytes: u64,
    pub body_bytes: u64,
    pub distinct_symbols: usize,
    pub tree_depth: usize,
}

/// What a file decompression produced.
#[derive(Debug, Clone)]
pub struct DecompressReport {
    /// Path of the written output
    pub output: PathBuf,
    pub outcome: DecodeOutcome,
    /// Size of the artifact that was read
    pub input_bytes: u64,
    pub header_bytes: u64,
    pub distinct_symbols: usize,
    pub tree_depth: usize,
}

impl DecompressReport {
    /// Decoded bytes as text, with invalid UTF-8 replaced.
    pub fn decoded_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.outcome.bytes)
    }
}

/// Compress the file at `input` into `input.huf`.
///
/// # Errors
/// - I/O errors opening, reading, or creating files
/// - `HuffmanError::MissingCode` if the file changed between the counting
///   pass and the encoding pass
pub fn compress(input: &Path) -> Result<CompressReport> {
    let mut table = FrequencyTable::new();
    build_frequency_map(SymbolSource::Stream(Box::new(File::open(input)?)), &mut table)?;

    let tree = HuffmanTree::from_frequencies(&table)?;
    let codes = CodeTable::from_tree(&tree);
    debug!(
        "{}: {} distinct symbols, tree depth {}",
        input.display(),
        table.len(),
        tree.depth()
    );

    let bits = encoder::derive_bit_sequence_from_reader(File::open(input)?, &codes)?;

    let artifact = naming::artifact_name(input);
    let mut writer = BufWriter::new(File::create(&artifact)?);
    let (header_bytes, body_bytes) = write_artifact(&mut writer, &table, &bits)?;
    writer.flush()?;

    info!(
        "compressed {} ({} bytes) into {} ({} bytes)",
        input.display(),
        table.literal_total(),
        artifact.display(),
        header_bytes + body_bytes
    );

    Ok(CompressReport {
        artifact,
        input_bytes: table.literal_total(),
        header_bytes: header_bytes as u64,
        body_bytes: body_bytes as u64,
        distinct_symbols: table.len(),
        tree_depth: tree.depth(),
        bits,
        table,
        codes,
    })
}

/// Decompress the artifact at `compressed` into `name_unc.ext`.
///
/// A body that ends before the end-of-stream marker still produces an output
/// file holding everything decoded up to that point; check
/// [`DecodeOutcome::termination`].
///
/// # Errors
/// - I/O errors opening, reading, or creating files
/// - Container errors for a missing or corrupt header
pub fn decompress(compressed: &Path) -> Result<DecompressReport> {
    let output = naming::output_name(compressed);
    let input_bytes = fs::metadata(compressed)?.len();

    let mut reader = BufReader::new(File::open(compressed)?);
    let table = container::read_header(&mut reader)?;
    let tree = HuffmanTree::from_frequencies(&table)?;
    debug!(
        "{}: {} distinct symbols, tree depth {}",
        compressed.display(),
        table.len(),
        tree.depth()
    );

    let mut writer = BufWriter::new(File::create(&output)?);
    let outcome = decoder::decode(&mut StreamBitReader::new(&mut reader), &tree, &mut writer)?;
    writer.flush()?;

    info!(
        "decompressed {} into {} ({} bytes)",
        compressed.display(),
        output.display(),
        outcome.bytes.len()
    );

    Ok(DecompressReport {
        output,
        input_bytes,
        header_bytes: container::header_len(&table) as u64,
        distinct_symbols: table.len(),
        tree_depth: tree.depth(),
        outcome,
    })
}

/// Compress `data` into artifact bytes.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let table = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::from_frequencies(&table)?;
    let codes = CodeTable::from_tree(&tree);
    let bits = encoder::derive_bit_sequence(data.iter().copied(), &codes)?;

    let mut artifact = Vec::with_capacity(container::header_len(&table) + bits.len().div_ceil(8));
    write_artifact(&mut artifact, &table, &bits)?;
    Ok(artifact)
}

/// Decode artifact bytes produced by [`compress_bytes`] or [`compress`].
pub fn decompress_bytes(artifact: &[u8]) -> Result<DecodeOutcome> {
    let mut reader = artifact;
    let table = container::read_header(&mut reader)?;
    let tree = HuffmanTree::from_frequencies(&table)?;
    decoder::decode(&mut BitReader::new(reader), &tree, &mut io::sink())
}

/// Compress the UTF-8 bytes of `text` into artifact bytes.
///
/// Identical to `compress_bytes(text.as_bytes())`, counted through the text
/// symbol source.
pub fn compress_text(text: &str) -> Result<Vec<u8>> {
    let (table, bits) = encode_text_parts(text)?;
    let mut artifact = Vec::with_capacity(container::header_len(&table) + bits.len().div_ceil(8));
    write_artifact(&mut artifact, &table, &bits)?;
    Ok(artifact)
}

/// Encoded bits of `text` without producing an artifact.
pub fn encode_text(text: &str) -> Result<BitSequence> {
    encode_text_parts(text).map(|(_, bits)| bits)
}

fn encode_text_parts(text: &str) -> Result<(FrequencyTable, BitSequence)> {
    let mut table = FrequencyTable::new();
    build_frequency_map(SymbolSource::Text(text), &mut table)?;
    let tree = HuffmanTree::from_frequencies(&table)?;
    let codes = CodeTable::from_tree(&tree);
    let bits = encoder::derive_bit_sequence(text.bytes(), &codes)?;
    Ok((table, bits))
}

/// Write header and packed body, returning their sizes in bytes.
fn write_artifact<W: Write>(writer: &mut W, table: &FrequencyTable, bits: &BitSequence) -> Result<(usize, usize)> {
    let header_bytes = container::write_header(writer, table)?;

    let mut sink = StreamBitWriter::new(&mut *writer);
    encoder::persist(bits, &mut sink)?;
    sink.finish()?;

    Ok((header_bytes, bits.len().div_ceil(8)))
}
