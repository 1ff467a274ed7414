//! Metrics for a compress or decompress run.
//!
//! Collected by the caller from the reports the orchestrators return, then
//! printed as a summary or exported as `key=value` lines.
//!
//! # Thread Safety
//!
//! `Metrics` is a plain struct updated from a single thread.

use crate::codec::{CompressReport, DecompressReport};
use crate::decoder::Termination;
use std::time::{Duration, Instant};

/// Counts, sizes, and timing of one run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Bytes read from the input file
    pub input_bytes: u64,

    /// Bytes written to the output file
    pub output_bytes: u64,

    // === Compression ===
    /// Uncompressed size (input when compressing, output when decompressing)
    pub raw_bytes: u64,

    /// Artifact size (output when compressing, input when decompressing)
    pub compressed_bytes: u64,

    /// Header bytes (serialized frequency table)
    pub header_bytes: u64,

    /// Logical payload bits, end-of-stream code included
    pub payload_bits: u64,

    /// Distinct symbols in the frequency table, end-of-stream included
    pub distinct_symbols: u64,

    /// Longest code length
    pub tree_depth: u64,

    // === Decoding ===
    /// Whether decoding stopped before the end-of-stream marker
    pub truncated: bool,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            raw_bytes: 0,
            compressed_bytes: 0,
            header_bytes: 0,
            payload_bits: 0,
            distinct_symbols: 0,
            tree_depth: 0,
            truncated: false,
        }
    }

    pub fn record_compress(&mut self, report: &CompressReport) {
        self.input_bytes = report.input_bytes;
        self.output_bytes = report.header_bytes + report.body_bytes;
        self.raw_bytes = self.input_bytes;
        self.compressed_bytes = self.output_bytes;
        self.header_bytes = report.header_bytes;
        self.payload_bits = report.bits.len() as u64;
        self.distinct_symbols = report.distinct_symbols as u64;
        self.tree_depth = report.tree_depth as u64;
    }

    pub fn record_decompress(&mut self, report: &DecompressReport) {
        self.input_bytes = report.input_bytes;
        self.output_bytes = report.outcome.bytes.len() as u64;
        self.raw_bytes = self.output_bytes;
        self.compressed_bytes = self.input_bytes;
        self.header_bytes = report.header_bytes;
        self.payload_bits = report.outcome.bits_read;
        self.distinct_symbols = report.distinct_symbols as u64;
        self.tree_depth = report.tree_depth as u64;
        self.truncated = report.outcome.termination == Termination::Truncated;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compressed size over uncompressed size.
    ///
    /// Returns 0.0 when the uncompressed side is empty.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Average payload bits per uncompressed byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.raw_bytes as f64
        }
    }

    /// Uncompressed bytes processed per second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.raw_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes", self.output_bytes);
        println!();
        println!("=== Compression ===");
        println!("Header: {} bytes", self.header_bytes);
        println!("Payload: {} bits ({} bytes)", self.payload_bits, self.payload_bits.div_ceil(8));
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Tree depth: {}", self.tree_depth);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();
        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Print just the final result.
    pub fn print_result(&self) {
        if self.truncated {
            println!(
                "✗ Payload truncated: recovered {} bytes before the end-of-stream marker",
                self.output_bytes
            );
        } else {
            println!(
                "✓ {} -> {} bytes in {} ms",
                self.input_bytes,
                self.output_bytes,
                self.duration().as_millis()
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             header_bytes={}\n\
             payload_bits={}\n\
             distinct_symbols={}\n\
             tree_depth={}\n\
             compression_ratio={:.4}\n\
             truncated={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.header_bytes,
            self.payload_bits,
            self.distinct_symbols,
            self.tree_depth,
            self.compression_ratio(),
            self.truncated,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
