//! Two-pass compress and single-pass decompress orchestration.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};

use tracing::info;

use crate::config::Config;
use crate::decoder::DecoderState;
use crate::dictionary::TickerDictionary;
use crate::encoder::EncoderState;
use crate::error::CodecError;
use crate::record::TradeRecord;

/// Compress a CSV stream into the two-pass binary format.
///
/// `input` must support `Seek`: the first pass reads every line to build the ticker
/// dictionary, then the cursor is rewound for the second pass, which re-reads each line and
/// emits its bit-packed encoding. When `config.debug` is set the dictionary is written to an
/// in-memory scratch buffer instead of `output`, so `output` holds only the record stream —
/// the result is not decodable.
pub fn compress<R: Read + Seek, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &Config,
) -> Result<(), CodecError> {
    info!("Pass 1 - building dictionary");
    let mut dictionary = TickerDictionary::new();
    let mut record_count = 0usize;

    {
        let reader = BufReader::new(&mut *input);
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let record = TradeRecord::parse_csv_line(line, idx + 1)?;
            dictionary.record(&record.ticker)?;
            record_count += 1;
        }
    }

    input.seek(SeekFrom::Start(0))?;

    if config.debug {
        let mut scratch = Vec::new();
        dictionary.serialize(&mut scratch)?;
    } else {
        dictionary.serialize(output)?;
    }

    info!("Pass 2 - encoding data");
    let mut state = EncoderState::new();
    {
        let reader = BufReader::new(&mut *input);
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let record = TradeRecord::parse_csv_line(line, idx + 1)?;
            state.encode(&record, &dictionary, output)?;
        }
    }

    info!(
        records = record_count,
        tickers = dictionary.len(),
        "compression complete"
    );
    Ok(())
}

/// Decompress a binary stream produced by [`compress`] back into CSV.
///
/// Reads the dictionary from `input` up to its sentinel, then repeatedly decodes records
/// until `input` is exhausted at a record boundary.
pub fn decompress<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    _config: &Config,
) -> Result<(), CodecError> {
    info!("Decompressing...");
    let dictionary = TickerDictionary::deserialize(input)?;

    let mut state = DecoderState::new();
    let mut record_count = 0usize;
    while let Some(line) = state.decode(input, &dictionary)? {
        output.write_all(line.as_bytes())?;
        record_count += 1;
    }

    info!(
        records = record_count,
        tickers = dictionary.len(),
        "decompression complete"
    );
    Ok(())
}
