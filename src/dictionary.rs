//! The ticker dictionary: an ordered id↔symbol table with frequency accounting.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use crate::error::CodecError;

/// The literal sentinel that terminates a serialized dictionary.
const END_OF_DICTIONARY: &str = "ENDOFDICTIONARY";

/// One entry in the ticker dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Numeric id assigned to this symbol. Never 0.
    pub id: u16,
    /// The ticker symbol.
    pub symbol: String,
    /// Number of records seen for this symbol so far.
    pub frequency: u16,
}

/// An ordered id↔symbol table, built during compression's first pass or read back from a
/// compressed stream's header during decompression.
#[derive(Debug, Clone, Default)]
pub struct TickerDictionary {
    entries: Vec<DictionaryEntry>,
    by_symbol: HashMap<String, u16>,
}

impl TickerDictionary {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct symbols currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no symbols have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a symbol's id, or 0 if the symbol is not present.
    pub fn id_of(&self, symbol: &str) -> u16 {
        self.by_symbol.get(symbol).copied().unwrap_or(0)
    }

    /// Look up the symbol behind an id.
    pub fn symbol_of(&self, id: u16) -> Option<&str> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.symbol.as_str())
    }

    /// Record one sighting of `symbol`: insert it with frequency 1 if new, otherwise bump its
    /// existing frequency. Returns the symbol's id either way.
    pub fn record(&mut self, symbol: &str) -> Result<u16, CodecError> {
        if let Some(&id) = self.by_symbol.get(symbol) {
            let entry = self.entries.iter_mut().find(|e| e.id == id).expect("index is consistent");
            entry.frequency = entry.frequency.saturating_add(1);
            return Ok(id);
        }

        let next_id = self.entries.len() as u32 + 1;
        if next_id > u16::MAX as u32 {
            return Err(CodecError::DictionaryFull);
        }
        let id = next_id as u16;
        self.entries.push(DictionaryEntry { id, symbol: symbol.to_string(), frequency: 1 });
        self.by_symbol.insert(symbol.to_string(), id);
        Ok(id)
    }

    /// Insert `symbol` under a specific id read from a serialized stream, used by
    /// [`Self::deserialize`]. Does not check for id collisions; the wire format is assumed
    /// well-formed.
    fn insert_with_id(&mut self, id: u16, symbol: String) {
        self.by_symbol.insert(symbol.clone(), id);
        self.entries.push(DictionaryEntry { id, symbol, frequency: 0 });
    }

    /// Write the dictionary to `sink`: each entry as `id (u16 LE) || symbol bytes || 0x00`,
    /// followed by two stray zero bytes and the sentinel `ENDOFDICTIONARY\0`.
    ///
    /// The two zero bytes ahead of the sentinel are not a framing field; they reproduce a
    /// quirk of the reference tool's writer, which the reader tolerates because it discards
    /// whatever id it reads immediately before matching the sentinel string.
    pub fn serialize<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            sink.write_all(&entry.id.to_le_bytes())?;
            sink.write_all(entry.symbol.as_bytes())?;
            sink.write_all(&[0u8])?;
        }
        sink.write_all(&[0u8, 0u8])?;
        sink.write_all(END_OF_DICTIONARY.as_bytes())?;
        sink.write_all(&[0u8])?;
        Ok(())
    }

    /// Read a dictionary from `source`: repeatedly read a `u16` id and a zero-terminated
    /// string until the string matches `ENDOFDICTIONARY`.
    pub fn deserialize<R: Read>(source: &mut R) -> Result<Self, CodecError> {
        let mut dict = TickerDictionary::new();
        loop {
            let mut id_bytes = [0u8; 2];
            source.read_exact(&mut id_bytes)?;
            let id = u16::from_le_bytes(id_bytes);

            let symbol = read_c_string(source)?;
            if symbol == END_OF_DICTIONARY {
                break;
            }
            dict.insert_with_id(id, symbol);
        }
        Ok(dict)
    }
}

fn read_c_string<R: Read>(source: &mut R) -> io::Result<String> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        source.read_exact(&mut byte)?;
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn records_assign_sequential_ids_starting_at_one() {
        let mut dict = TickerDictionary::new();
        assert_eq!(dict.record("AAPL").unwrap(), 1);
        assert_eq!(dict.record("MSFT").unwrap(), 2);
        assert_eq!(dict.record("AAPL").unwrap(), 1);
        assert_eq!(dict.symbol_of(1), Some("AAPL"));
        assert_eq!(dict.symbol_of(2), Some("MSFT"));
    }

    #[test]
    fn repeated_record_bumps_frequency() {
        let mut dict = TickerDictionary::new();
        dict.record("AAPL").unwrap();
        dict.record("AAPL").unwrap();
        dict.record("AAPL").unwrap();
        assert_eq!(dict.entries[0].frequency, 3);
    }

    #[test]
    fn unknown_symbol_has_id_zero() {
        let dict = TickerDictionary::new();
        assert_eq!(dict.id_of("NOPE"), 0);
    }

    #[test]
    fn serialize_round_trips_through_deserialize() {
        let mut dict = TickerDictionary::new();
        dict.record("AAPL").unwrap();
        dict.record("MSFT").unwrap();

        let mut buf = Vec::new();
        dict.serialize(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let restored = TickerDictionary::deserialize(&mut cursor).unwrap();
        assert_eq!(restored.symbol_of(1), Some("AAPL"));
        assert_eq!(restored.symbol_of(2), Some("MSFT"));
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn serialized_bytes_carry_the_two_stray_zero_bytes_before_the_sentinel() {
        let mut dict = TickerDictionary::new();
        dict.record("A").unwrap();

        let mut buf = Vec::new();
        dict.serialize(&mut buf).unwrap();

        // entry: id(2) + "A"(1) + 0x00(1) = 4 bytes, then two stray zero bytes, then sentinel.
        let tail_start = 4;
        assert_eq!(&buf[tail_start..tail_start + 2], &[0u8, 0u8]);
        assert_eq!(
            &buf[tail_start + 2..tail_start + 2 + END_OF_DICTIONARY.len()],
            END_OF_DICTIONARY.as_bytes()
        );
    }

    #[test]
    fn empty_dictionary_serializes_to_just_the_sentinel_block() {
        let dict = TickerDictionary::new();
        let mut buf = Vec::new();
        dict.serialize(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let restored = TickerDictionary::deserialize(&mut cursor).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn dictionary_full_after_65535_symbols() {
        let mut dict = TickerDictionary::new();
        dict.entries.reserve(u16::MAX as usize);
        for i in 0..u16::MAX as u32 {
            dict.insert_with_id((i + 1) as u16, format!("T{i}"));
        }
        assert_eq!(dict.record("ONE_TOO_MANY").unwrap_err().to_string(), CodecError::DictionaryFull.to_string());
    }
}
