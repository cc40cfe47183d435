//! Inverse of [`crate::encoder`]: reconstructs CSV lines from bit-packed binary records.

use std::io::{self, Read};

use crate::dictionary::TickerDictionary;
use crate::error::CodecError;
use crate::price::Price;
use crate::record::{flag_bit, Side};

/// Carries the "previous record" state a decoding pass needs between records.
#[derive(Debug, Default)]
pub struct DecoderState {
    last_time: u32,
    last_exchange: u8,
}

impl DecoderState {
    /// A fresh state, as at the start of a decompression pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one record from `source`, returning its CSV line (terminated with `\r\n`), or
    /// `Ok(None)` if `source` was already at end-of-stream before any bytes of a new record
    /// were read.
    pub fn decode<R: Read>(
        &mut self,
        source: &mut R,
        dictionary: &TickerDictionary,
    ) -> Result<Option<String>, CodecError> {
        let mut head = [0u8; 5];
        match read_exact_or_eof(source, &mut head)? {
            FillResult::Eof => return Ok(None),
            FillResult::Partial(n) => {
                return Err(CodecError::TruncatedInput { expected: 5, got: n })
            }
            FillResult::Full => {}
        }

        let ticker_id = u16::from_le_bytes([head[0], head[1]]);
        let condition = head[2];
        let flags = head[3];
        let mantissa = head[4] as i8;

        let side = Side::from_flag_bits(flags)?;

        let small_price = flags & (1 << flag_bit::PRICE_SMALL) != 0;
        let price_int: i32 = if small_price {
            let mut buf = [0u8; 2];
            require(source, &mut buf)?;
            i16::from_le_bytes(buf) as i32
        } else {
            let mut buf = [0u8; 4];
            require(source, &mut buf)?;
            i32::from_le_bytes(buf)
        };
        let price = Price { integer: price_int, mantissa };

        let small_size = flags & (1 << flag_bit::SIZE_SMALL) != 0;
        let size: u32 = if small_size {
            let mut buf = [0u8; 2];
            require(source, &mut buf)?;
            u16::from_le_bytes(buf) as u32
        } else {
            let mut buf = [0u8; 4];
            require(source, &mut buf)?;
            u32::from_le_bytes(buf)
        };

        let exchange_same = flags & (1 << flag_bit::EXCHANGE_SAME) != 0;
        let exchange: u8 = if exchange_same {
            self.last_exchange
        } else {
            let mut buf = [0u8; 1];
            require(source, &mut buf)?;
            buf[0]
        };

        let use_delta = flags & (1 << flag_bit::SEND_TIME_DELTA) != 0;
        let sendtime: u32 = if use_delta {
            let mut buf = [0u8; 1];
            require(source, &mut buf)?;
            self.last_time + buf[0] as u32
        } else {
            let mut buf = [0u8; 4];
            require(source, &mut buf)?;
            u32::from_le_bytes(buf)
        };

        let send_eq_recv = flags & (1 << flag_bit::SEND_EQ_RECV) != 0;
        let recvtime: u32 = if send_eq_recv {
            sendtime
        } else {
            let mut buf = [0u8; 4];
            require(source, &mut buf)?;
            u32::from_le_bytes(buf)
        };

        let symbol = dictionary
            .symbol_of(ticker_id)
            .ok_or(CodecError::UnknownTicker { id: ticker_id })?;

        let line = format!(
            "{},{},{},{},{},{},{},{}\r\n",
            symbol,
            exchange as char,
            side.to_char(),
            condition as char,
            sendtime,
            recvtime,
            price.format(),
            size,
        );

        self.last_time = sendtime;
        self.last_exchange = exchange;

        Ok(Some(line))
    }
}

enum FillResult {
    Full,
    Partial(usize),
    Eof,
}

fn read_exact_or_eof<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<FillResult> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    if filled == 0 {
        Ok(FillResult::Eof)
    } else if filled == buf.len() {
        Ok(FillResult::Full)
    } else {
        Ok(FillResult::Partial(filled))
    }
}

fn require<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<(), CodecError> {
    match read_exact_or_eof(source, buf)? {
        FillResult::Full => Ok(()),
        FillResult::Partial(n) => Err(CodecError::TruncatedInput { expected: buf.len(), got: n }),
        FillResult::Eof => Err(CodecError::TruncatedInput { expected: buf.len(), got: 0 }),
    }
}
