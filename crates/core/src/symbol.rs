//! Encodable symbols.
//!
//! A symbol is either a literal byte or the synthetic end-of-stream marker.
//! The marker lives outside the byte range, so it can never collide with real
//! data. Internal tree nodes carry no symbol at all.

use std::fmt;

/// Wire value of [`Symbol::EndOfStream`]: one past the largest byte.
pub const END_OF_STREAM_VALUE: u16 = 256;

/// A literal byte or the end-of-stream marker.
///
/// Ordering puts every literal (ascending) before `EndOfStream`; frequency
/// tables iterate in this order, which fixes the shape of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Literal(u8),
    EndOfStream,
}

impl Symbol {
    /// Numeric value used in the container header (0..=256).
    pub fn to_wire(self) -> u16 {
        match self {
            Symbol::Literal(byte) => byte as u16,
            Symbol::EndOfStream => END_OF_STREAM_VALUE,
        }
    }

    /// Inverse of [`Symbol::to_wire`]. Returns `None` above 256.
    pub fn from_wire(value: u16) -> Option<Self> {
        match value {
            0..=255 => Some(Symbol::Literal(value as u8)),
            END_OF_STREAM_VALUE => Some(Symbol::EndOfStream),
            _ => None,
        }
    }

    pub fn is_end_of_stream(self) -> bool {
        matches!(self, Symbol::EndOfStream)
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Literal(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Literal(byte) if byte.is_ascii_graphic() => write!(f, "'{}'", *byte as char),
            Symbol::Literal(b' ') => write!(f, "' '"),
            Symbol::Literal(byte) => write!(f, "0x{:02x}", byte),
            Symbol::EndOfStream => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(Symbol::Literal(0).to_wire(), 0);
        assert_eq!(Symbol::Literal(255).to_wire(), 255);
        assert_eq!(Symbol::EndOfStream.to_wire(), 256);

        assert_eq!(Symbol::from_wire(97), Some(Symbol::Literal(b'a')));
        assert_eq!(Symbol::from_wire(256), Some(Symbol::EndOfStream));
        assert_eq!(Symbol::from_wire(257), None);
        assert_eq!(Symbol::from_wire(u16::MAX), None);
    }

    #[test]
    fn test_end_of_stream_sorts_last() {
        assert!(Symbol::Literal(255) < Symbol::EndOfStream);
        assert!(Symbol::Literal(0) < Symbol::Literal(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Symbol::Literal(b'a').to_string(), "'a'");
        assert_eq!(Symbol::Literal(b' ').to_string(), "' '");
        assert_eq!(Symbol::Literal(b'\n').to_string(), "0x0a");
        assert_eq!(Symbol::EndOfStream.to_string(), "EOF");
    }
}
