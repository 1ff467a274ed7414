//! huffile-core: Huffman file compression with a self-describing container
//!
//! This library provides the building blocks of a file compressor that:
//! - Counts byte frequencies, plus one end-of-stream marker
//! - Builds a Huffman tree with deterministic tie-breaking
//! - Encodes files into a header (frequency table + CRC) and packed body
//! - Rebuilds the same tree from the header and decodes the body
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `symbol`: Literal bytes and the end-of-stream marker
//! - `bitio`: Low-level bit reading/writing and bit sequences
//! - `frequency`: Frequency tables and the symbol counting pass
//! - `queue`: Stable min-priority queue used to merge nodes
//! - `tree`: Huffman tree construction and inspection
//! - `codes`: Code table derived from the tree
//! - `encoder` / `decoder`: Bit-level encoding and tree-walk decoding
//! - `container`: Artifact header serialization
//! - `naming`: Artifact and output file names
//! - `codec`: File and in-memory compress/decompress orchestration
//! - `metrics`: Observable run behavior
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: The same input always produces the same artifact
//! - **Graceful truncation**: A short body yields a partial result, not an error
//!
//! # Example
//!
//! ```
//! use huffile_core::codec::{compress_bytes, decompress_bytes};
//!
//! let artifact = compress_bytes(b"ab ab ab").unwrap();
//! let outcome = decompress_bytes(&artifact).unwrap();
//! assert_eq!(outcome.bytes, b"ab ab ab");
//! assert!(outcome.is_complete());
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod naming;
pub mod queue;
pub mod symbol;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress, CompressReport, DecompressReport};
pub use codes::CodeTable;
pub use decoder::{DecodeOutcome, Termination};
pub use error::{Error, Result};
pub use frequency::{FrequencyMap, FrequencyTable};
pub use symbol::Symbol;
pub use tree::{HuffmanNode, HuffmanTree};
