//! Symbol frequency counting.
//!
//! The tree builder only needs an associative map with ordered keys, so it is
//! written against [`FrequencyMap`]; [`FrequencyTable`] is the implementation
//! used everywhere else. Keys come back in [`Symbol`] order, which is what
//! makes compressed artifacts reproducible.

use crate::error::Result;
use crate::symbol::Symbol;
use std::collections::BTreeMap;
use std::io::{BufReader, Read};

/// Associative map from symbol to occurrence count.
pub trait FrequencyMap {
    fn contains_key(&self, symbol: Symbol) -> bool;

    /// Count for `symbol`, or `None` if absent.
    fn get(&self, symbol: Symbol) -> Option<u64>;

    /// Insert or overwrite the count for `symbol`.
    fn put(&mut self, symbol: Symbol, count: u64);

    /// All keys, in a deterministic order.
    fn keys(&self) -> Vec<Symbol>;
}

/// Symbol → count table, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the bytes of `data` and add the end-of-stream entry.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.increment(Symbol::Literal(byte));
        }
        table.put(Symbol::EndOfStream, 1);
        table
    }

    /// Count the bytes produced by `reader` and add the end-of-stream entry.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        build_frequency_map(SymbolSource::Stream(Box::new(reader)), &mut table)?;
        Ok(table)
    }

    /// Add one occurrence of `symbol`.
    pub fn increment(&mut self, symbol: Symbol) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Number of distinct symbols, end-of-stream included.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts (input length + 1 for a freshly counted table).
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Sum of literal counts: the length of the counted input.
    pub fn literal_total(&self) -> u64 {
        self.iter()
            .filter(|(symbol, _)| !symbol.is_end_of_stream())
            .map(|(_, count)| count)
            .sum()
    }

    /// `(symbol, count)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FrequencyMap for FrequencyTable {
    fn contains_key(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    fn put(&mut self, symbol: Symbol, count: u64) {
        self.counts.insert(symbol, count);
    }

    fn keys(&self) -> Vec<Symbol> {
        self.counts.keys().copied().collect()
    }
}

/// Where symbols come from when counting.
pub enum SymbolSource<'a> {
    /// In-memory text; its UTF-8 bytes are counted.
    Text(&'a str),
    /// A byte stream positioned at its start.
    Stream(Box<dyn Read + 'a>),
}

/// Count every symbol of `source` into `map`, then put the end-of-stream
/// marker with count 1.
///
/// Empty input leaves `map` holding only the end-of-stream entry.
pub fn build_frequency_map<M: FrequencyMap>(source: SymbolSource<'_>, map: &mut M) -> Result<()> {
    match source {
        SymbolSource::Text(text) => {
            for byte in text.bytes() {
                count_symbol(map, Symbol::Literal(byte));
            }
        }
        SymbolSource::Stream(reader) => {
            for byte in BufReader::new(reader).bytes() {
                count_symbol(map, Symbol::Literal(byte?));
            }
        }
    }

    map.put(Symbol::EndOfStream, 1);
    Ok(())
}

fn count_symbol<M: FrequencyMap>(map: &mut M, symbol: Symbol) {
    let next = map.get(symbol).map_or(1, |count| count + 1);
    map.put(symbol, next);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source() {
        let mut table = FrequencyTable::new();
        build_frequency_map(SymbolSource::Text("ab ab ab"), &mut table).unwrap();

        assert_eq!(table.get(Symbol::Literal(b'a')), Some(3));
        assert_eq!(table.get(Symbol::Literal(b'b')), Some(3));
        assert_eq!(table.get(Symbol::Literal(b' ')), Some(2));
        assert_eq!(table.get(Symbol::EndOfStream), Some(1));
        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), 9);
        assert_eq!(table.literal_total(), 8);
    }

    #[test]
    fn test_stream_source_matches_bytes() {
        let data = b"mississippi river";
        let mut streamed = FrequencyTable::new();
        build_frequency_map(SymbolSource::Stream(Box::new(&data[..])), &mut streamed).unwrap();

        assert_eq!(streamed, FrequencyTable::from_bytes(data));
        assert_eq!(FrequencyTable::from_reader(&data[..]).unwrap(), streamed);
    }

    #[test]
    fn test_empty_input_has_only_end_of_stream() {
        let table = FrequencyTable::from_bytes(b"");
        assert_eq!(table.keys(), vec![Symbol::EndOfStream]);
        assert_eq!(table.get(Symbol::EndOfStream), Some(1));
    }

    #[test]
    fn test_largest_literal_is_not_end_of_stream() {
        let table = FrequencyTable::from_bytes(&[0xFF, 0xFF]);
        assert_eq!(table.get(Symbol::Literal(0xFF)), Some(2));
        assert_eq!(table.get(Symbol::EndOfStream), Some(1));
    }

    #[test]
    fn test_keys_are_ordered() {
        let table = FrequencyTable::from_bytes(b"zyxa");
        assert_eq!(
            table.keys(),
            vec![
                Symbol::Literal(b'a'),
                Symbol::Literal(b'x'),
                Symbol::Literal(b'y'),
                Symbol::Literal(b'z'),
                Symbol::EndOfStream,
            ]
        );
        assert!(table.contains_key(Symbol::Literal(b'x')));
        assert!(!table.contains_key(Symbol::Literal(b'b')));
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).chain(0..=255).collect();
        let table = FrequencyTable::from_bytes(&data);
        assert_eq!(table.len(), 257);
        assert!(table
            .iter()
            .filter(|(symbol, _)| !symbol.is_end_of_stream())
            .all(|(_, count)| count == 2));
    }
}
