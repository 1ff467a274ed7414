//! Integration tests for the full huffile pipeline.
//!
//! These tests verify end-to-end behavior: input file -> count -> tree ->
//! encode -> artifact on disk -> header -> decode -> output file, with
//! verification that output matches input.

use huffile_core::{
    codec::{compress, compress_bytes, decompress, decompress_bytes},
    codes::CodeTable,
    container,
    frequency::{FrequencyMap, FrequencyTable},
    naming::{artifact_name, output_name},
    error::ContainerError,
    Error, HuffmanTree, Symbol, Termination,
};
use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Write `data` to `name` inside a fresh temp dir.
fn write_input(name: &str, data: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, data).expect("write input");
    (dir, path)
}

/// Test a simple round-trip through files on disk.
#[test]
fn test_file_round_trip() {
    let input_data = b"hello world! this is a test of the full pipeline with some repetition: aaaaaaaaaa bbbbbbbbbb cccccccccc";
    let (dir, input) = write_input("message.txt", input_data);

    let compressed = compress(&input).expect("compression failed");
    assert_eq!(compressed.artifact, dir.path().join("message.txt.huf"));
    assert!(compressed.artifact.exists());

    let restored = decompress(&compressed.artifact).expect("decompression failed");
    assert_eq!(restored.output, dir.path().join("message_unc.txt"));
    assert!(restored.outcome.is_complete());

    // Verify
    let output_data = fs::read(&restored.output).expect("read output");
    assert_eq!(output_data, input_data, "output doesn't match input");
}

/// Larger repetitive input actually shrinks.
#[test]
fn test_repetitive_input_compresses() {
    let input_data = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let (_dir, input) = write_input("fox.txt", &input_data);

    let report = compress(&input).expect("compression failed");
    let artifact_len = fs::metadata(&report.artifact).unwrap().len();
    assert!(artifact_len < input_data.len() as u64);
    // 29 distinct bytes: well under the 8 bits of the raw bytes.
    assert!(report.bits.len() < input_data.len() * 5);

    let restored = decompress(&report.artifact).expect("decompression failed");
    assert_eq!(fs::read(&restored.output).unwrap(), input_data);
}

#[test]
fn test_empty_file() {
    let (dir, input) = write_input("empty.dat", b"");

    let report = compress(&input).unwrap();
    assert!(report.bits.is_empty());
    assert_eq!(report.body_bytes, 0);
    assert_eq!(report.tree_depth, 0);

    let restored = decompress(&report.artifact).unwrap();
    assert_eq!(restored.output, dir.path().join("empty_unc.dat"));
    assert!(restored.outcome.is_complete());
    assert_eq!(fs::read(&restored.output).unwrap(), b"");
}

#[test]
fn test_single_symbol_file() {
    let (_dir, input) = write_input("aaaa.txt", b"aaaa");

    let report = compress(&input).unwrap();
    let a = report.codes.get(Symbol::Literal(b'a')).unwrap();
    let eos = report.codes.get(Symbol::EndOfStream).unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(eos.len(), 1);
    assert_ne!(a.get(0), eos.get(0));
    assert_eq!(report.bits.to_string(), "11110");

    let restored = decompress(&report.artifact).unwrap();
    assert_eq!(restored.decoded_text(), "aaaa");
}

#[test]
fn test_example_text() {
    let (_dir, input) = write_input("ab.txt", b"ab ab ab");
    let report = compress(&input).unwrap();

    assert_eq!(report.table.get(Symbol::Literal(b'a')), Some(3));
    assert_eq!(report.table.get(Symbol::Literal(b'b')), Some(3));
    assert_eq!(report.table.get(Symbol::Literal(b' ')), Some(2));
    assert_eq!(report.table.get(Symbol::EndOfStream), Some(1));

    for (_, code) in report.codes.iter() {
        assert!(!code.is_empty());
    }
    let longest = report.codes.iter().map(|(_, c)| c.len()).max().unwrap();
    assert!(report.codes.get(Symbol::EndOfStream).unwrap().len() == longest);

    let restored = decompress(&report.artifact).unwrap();
    assert_eq!(restored.decoded_text(), "ab ab ab");
}

#[test]
fn test_all_byte_values() {
    let input_data: Vec<u8> = (0..=255u8).cycle().take(256 * 4).collect();
    let (_dir, input) = write_input("bytes.bin", &input_data);

    let report = compress(&input).unwrap();
    assert_eq!(report.distinct_symbols, 257);
    assert!(report.codes.is_prefix_free());

    let restored = decompress(&report.artifact).unwrap();
    assert_eq!(fs::read(&restored.output).unwrap(), input_data);
}

#[test]
fn test_artifacts_are_deterministic() {
    let input_data = b"determinism: the same bytes in, the same bytes out".repeat(10);
    let (_dir_a, a) = write_input("a.txt", &input_data);
    let (_dir_b, b) = write_input("b.txt", &input_data);

    let first = fs::read(compress(&a).unwrap().artifact).unwrap();
    let second = fs::read(compress(&b).unwrap().artifact).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_corrupted_header_is_rejected() {
    let (dir, input) = write_input("data.txt", b"some data worth protecting");
    let report = compress(&input).unwrap();

    let mut artifact = fs::read(&report.artifact).unwrap();
    // First entry's count field
    artifact[9] ^= 0xFF;
    fs::write(&report.artifact, &artifact).unwrap();

    let result = decompress(&report.artifact);
    assert!(matches!(result, Err(Error::Crc { .. })), "got {:?}", result);
    assert!(!dir.path().join("data_unc.txt").exists());
}

#[test]
fn test_overflowing_counts_are_rejected() {
    // Valid magic and CRC, but the counts sum past u64::MAX.
    let mut record = Vec::new();
    record.extend_from_slice(&2u16.to_le_bytes());
    for (symbol, count) in [(97u16, u64::MAX), (256u16, 1)] {
        record.extend_from_slice(&symbol.to_le_bytes());
        record.extend_from_slice(&count.to_le_bytes());
    }
    let mut artifact = container::MAGIC.to_vec();
    artifact.extend_from_slice(&record);
    artifact.extend_from_slice(&crc32fast::hash(&record).to_le_bytes());
    artifact.push(0xFF);

    let result = decompress_bytes(&artifact);
    assert!(
        matches!(result, Err(Error::Container(ContainerError::CountOverflow(_)))),
        "got {:?}",
        result
    );
}

#[test]
fn test_not_an_artifact_is_rejected() {
    let (_dir, path) = write_input("plain.txt.huf", b"just some text, no header");
    assert!(matches!(decompress(&path), Err(Error::Container(_))));
}

#[test]
fn test_truncated_body_yields_prefix() {
    let input_data = b"a long enough message that its body spans many bytes of output".repeat(4);
    let (_dir, input) = write_input("long.txt", &input_data);
    let report = compress(&input).unwrap();

    let mut artifact = fs::read(&report.artifact).unwrap();
    artifact.truncate(report.header_bytes as usize + report.body_bytes as usize / 2);
    fs::write(&report.artifact, &artifact).unwrap();

    let restored = decompress(&report.artifact).unwrap();
    assert_eq!(restored.outcome.termination, Termination::Truncated);
    let partial = fs::read(&restored.output).unwrap();
    assert!(!partial.is_empty());
    assert!(input_data.starts_with(&partial));
    assert_eq!(partial, restored.outcome.bytes);
}

#[test]
fn test_artifact_without_extension() {
    let (dir, input) = write_input("README", b"no extension here");
    let report = compress(&input).unwrap();
    assert_eq!(report.artifact, dir.path().join("README.huf"));

    let restored = decompress(&report.artifact).unwrap();
    assert_eq!(restored.output, dir.path().join("README_unc"));
    assert_eq!(restored.decoded_text(), "no extension here");
}

#[test]
fn test_naming_round_trip() {
    for (original, expected) in [
        ("notes.txt", "notes_unc.txt"),
        ("dir/archive.tar.gz", "dir/archive_unc.tar.gz"),
        ("Makefile", "Makefile_unc"),
    ] {
        assert_eq!(output_name(&artifact_name(original.as_ref())), PathBuf::from(expected));
    }
}

#[test]
fn test_header_matches_tree_rebuild() {
    let data = b"frequencies in, identical tree out";
    let artifact = compress_bytes(data).unwrap();

    let table = container::read_header(&mut &artifact[..]).unwrap();
    assert_eq!(table, FrequencyTable::from_bytes(data));

    let rebuilt = CodeTable::from_tree(&HuffmanTree::from_frequencies(&table).unwrap());
    let original = CodeTable::from_tree(&HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap());
    assert_eq!(rebuilt, original);
}

proptest! {
    #[test]
    fn prop_round_trip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let artifact = compress_bytes(&data).unwrap();
        let outcome = decompress_bytes(&artifact).unwrap();
        prop_assert!(outcome.is_complete());
        prop_assert_eq!(outcome.bytes, data);
    }

    #[test]
    fn prop_codes_are_prefix_free(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data)).unwrap();
        prop_assert!(tree.is_balanced());
        prop_assert!(CodeTable::from_tree(&tree).is_prefix_free());
    }

    #[test]
    fn prop_frequency_fidelity(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let table = FrequencyTable::from_bytes(&data);
        for byte in 0..=255u8 {
            let expected = data.iter().filter(|&&b| b == byte).count() as u64;
            prop_assert_eq!(table.get(Symbol::Literal(byte)).unwrap_or(0), expected);
        }
        prop_assert_eq!(table.get(Symbol::EndOfStream), Some(1));
    }

    #[test]
    fn prop_truncation_is_a_prefix(
        data in proptest::collection::vec(any::<u8>(), 1..512),
        keep in 0usize..64,
    ) {
        let artifact = compress_bytes(&data).unwrap();
        let header = container::header_len(&FrequencyTable::from_bytes(&data));
        let cut = (header + keep).min(artifact.len());

        let outcome = decompress_bytes(&artifact[..cut]).unwrap();
        prop_assert!(data.starts_with(&outcome.bytes));
        if cut == artifact.len() {
            prop_assert!(outcome.is_complete());
        }
    }
}
