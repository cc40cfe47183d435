//! Per-record bit-packed binary encoding.

use std::io::{self, Write};

use crate::dictionary::TickerDictionary;
use crate::record::{flag_bit, TradeRecord};

/// Threshold below which a size value is stored as a small 16-bit field.
const SMALL_SIZE_LIMIT: u32 = 65534;
/// Threshold below which a price integer is stored as a small 16-bit field.
const SMALL_PRICE_LIMIT: i32 = 32767;
/// Largest magnitude send-time delta that can be stored as an 8-bit diff.
const MAX_TIME_DELTA: i64 = 254;

/// Carries the "previous record" state an encoding pass needs between records.
#[derive(Debug, Default)]
pub struct EncoderState {
    last_time: u32,
    last_exchange: u8,
}

impl EncoderState {
    /// A fresh state, as at the start of a compression pass (`last_time = 0, last_exchange = 0`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one record against the dictionary and this state, writing its bit-packed bytes
    /// to `sink`, then advance the state.
    pub fn encode<W: Write>(
        &mut self,
        record: &TradeRecord,
        dictionary: &TickerDictionary,
        sink: &mut W,
    ) -> io::Result<()> {
        let ticker_id = dictionary.id_of(&record.ticker);

        let mut flags = record.base_flags();

        let time_diff = record.sendtime as i64 - self.last_time as i64;
        let use_delta = time_diff.abs() <= MAX_TIME_DELTA && self.last_time <= record.sendtime;
        if use_delta {
            flags |= 1 << flag_bit::SEND_TIME_DELTA;
        }

        let exchange_same = record.exchange == self.last_exchange;
        if exchange_same {
            flags |= 1 << flag_bit::EXCHANGE_SAME;
        }

        let small_size = record.size < SMALL_SIZE_LIMIT;
        if small_size {
            flags |= 1 << flag_bit::SIZE_SMALL;
        }

        let small_price = record.price.integer.abs() < SMALL_PRICE_LIMIT;
        if small_price {
            flags |= 1 << flag_bit::PRICE_SMALL;
        }

        sink.write_all(&ticker_id.to_le_bytes())?;
        sink.write_all(&[record.condition])?;
        sink.write_all(&[flags])?;
        sink.write_all(&[record.price.mantissa as u8])?;

        if small_price {
            sink.write_all(&(record.price.integer as i16).to_le_bytes())?;
        } else {
            sink.write_all(&record.price.integer.to_le_bytes())?;
        }

        if small_size {
            sink.write_all(&(record.size as u16).to_le_bytes())?;
        } else {
            sink.write_all(&record.size.to_le_bytes())?;
        }

        if !exchange_same {
            sink.write_all(&[record.exchange])?;
        }

        if use_delta {
            sink.write_all(&[time_diff as u8])?;
        } else {
            sink.write_all(&record.sendtime.to_le_bytes())?;
        }

        if record.sendtime != record.recvtime {
            sink.write_all(&record.recvtime.to_le_bytes())?;
        }

        self.last_time = record.sendtime;
        self.last_exchange = record.exchange;

        Ok(())
    }
}
