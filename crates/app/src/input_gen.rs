//! Sample data generation for `huffile demo`.
//!
//! Generated data is meant to make Huffman coding visible: symbol
//! frequencies are skewed on purpose so frequent symbols get short codes.
//!
//! # Design
//!
//! Generated data mixes:
//! - English-like text drawn from a weighted word list (strongly skewed)
//! - Runs of a single byte (one dominant symbol)
//! - Random bytes over the whole alphabet (close to incompressible)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

/// Words and their relative weights.
const WORDS: &[(&str, u32)] = &[
    ("the", 40),
    ("of", 22),
    ("and", 20),
    ("a", 18),
    ("to", 16),
    ("in", 14),
    ("is", 10),
    ("tree", 8),
    ("code", 8),
    ("bit", 6),
    ("symbol", 5),
    ("frequency", 4),
    ("huffman", 3),
    ("stream", 3),
    ("prefix", 2),
    ("zebra", 1),
];

/// Generate sample data with skewed symbol frequencies.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = rng.gen_range(64..=4096).min(size_bytes - data.len());

        match rng.gen_range(0..10u8) {
            // 70% text
            0..=6 => push_text(&mut rng, &mut data, section),

            // 20% runs
            7..=8 => {
                let byte_value: u8 = rng.gen();
                data.extend(std::iter::repeat(byte_value).take(section));
            }

            // 10% random bytes
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }
    }

    data.truncate(size_bytes);
    data
}

/// Append roughly `len` bytes of weighted words separated by spaces and the
/// occasional sentence break.
fn push_text(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, len: usize) {
    let total_weight: u32 = WORDS.iter().map(|(_, w)| w).sum();
    let end = data.len() + len;

    while data.len() < end {
        let mut pick = rng.gen_range(0..total_weight);
        let word = WORDS
            .iter()
            .find(|(_, weight)| {
                if pick < *weight {
                    true
                } else {
                    pick -= weight;
                    false
                }
            })
            .map_or("the", |&(word, _)| word);

        data.extend_from_slice(word.as_bytes());
        data.push(if rng.gen_ratio(1, 12) { b'\n' } else { b' ' });
    }
}

/// Write generated data to a file.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> std::io::Result<()> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_data() {
        let data = generate_sample_data(42, 1000);
        assert_eq!(data.len(), 1000);
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(12345, 5000);
        let data2 = generate_sample_data(12345, 5000);

        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(1, 1000);
        let data2 = generate_sample_data(2, 1000);

        assert_ne!(data1, data2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000, 100000] {
            let data = generate_sample_data(999, size);
            assert_eq!(data.len(), size);
        }
    }

    #[test]
    fn test_sample_compresses() {
        let data = generate_sample_data(7, 32 * 1024);
        let artifact = huffile_core::codec::compress_bytes(&data).unwrap();
        assert!(artifact.len() < data.len());
    }

    #[test]
    fn test_write_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        write_sample_file(&path, 3, 2048).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), generate_sample_data(3, 2048));
    }
}
