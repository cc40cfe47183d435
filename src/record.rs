//! CSV record parsing: the `Side` tagged enum and `TradeRecord`.

use crate::error::CodecError;
use crate::price::Price;

/// Flag bit positions within a record's `flags` byte.
pub mod flag_bit {
    /// Bits 0..2 jointly encode the side (see [`super::Side`]).
    pub const SEND_EQ_RECV: u8 = 3;
    /// Send time is stored as an 8-bit delta from the previous record.
    pub const SEND_TIME_DELTA: u8 = 4;
    /// Exchange is identical to the previous record's and omitted on the wire.
    pub const EXCHANGE_SAME: u8 = 5;
    /// Size fits in 16 bits and is stored small.
    pub const SIZE_SMALL: u8 = 6;
    /// Price integer fits in 16 bits and is stored small.
    pub const PRICE_SMALL: u8 = 7;
}

/// The market side of a trade tick event.
///
/// Interpretation of the five codes is not asserted by the codec; they are opaque tags that
/// round-trip through three flag bits (see `to_flag_bits`/`from_flag_bits`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `A` — ask.
    Ask,
    /// `a` — ask update.
    AskUpdate,
    /// `B` — bid.
    Bid,
    /// `b` — bid update.
    BidUpdate,
    /// `T` — trade.
    Trade,
}

impl Side {
    /// Classify a CSV side character, per the five recognized codes.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Side::Ask),
            'a' => Some(Side::AskUpdate),
            'B' => Some(Side::Bid),
            'b' => Some(Side::BidUpdate),
            'T' => Some(Side::Trade),
            _ => None,
        }
    }

    /// The CSV character this side renders as.
    pub fn to_char(self) -> char {
        match self {
            Side::Ask => 'A',
            Side::AskUpdate => 'a',
            Side::Bid => 'B',
            Side::BidUpdate => 'b',
            Side::Trade => 'T',
        }
    }

    /// Encode into flag bits 0..2, per the table in the wire format specification.
    pub fn to_flag_bits(self) -> u8 {
        match self {
            Side::Ask => 0b001,
            Side::AskUpdate => 0b010,
            Side::Bid => 0b011,
            Side::BidUpdate => 0b100,
            Side::Trade => 0b101,
        }
    }

    /// Decode from flag bits 0..2, rejecting any pattern the encoder never produces.
    pub fn from_flag_bits(bits: u8) -> Result<Self, CodecError> {
        match bits & 0b111 {
            0b001 => Ok(Side::Ask),
            0b010 => Ok(Side::AskUpdate),
            0b011 => Ok(Side::Bid),
            0b100 => Ok(Side::BidUpdate),
            0b101 => Ok(Side::Trade),
            other => Err(CodecError::InvalidSideBits { bits: other }),
        }
    }
}

/// One parsed trade tick record: the in-memory form of a single CSV line.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// Ticker symbol (printable, no commas).
    pub ticker: String,
    /// Single-byte venue code.
    pub exchange: u8,
    /// Market side.
    pub side: Side,
    /// Single-byte vendor-specific trade condition.
    pub condition: u8,
    /// Send-side tick timestamp.
    pub sendtime: u32,
    /// Receive-side tick timestamp.
    pub recvtime: u32,
    /// Execution price.
    pub price: Price,
    /// Executed size/volume.
    pub size: u32,
}

impl TradeRecord {
    /// Parse one CSV line (without its line terminator) into a `TradeRecord`.
    ///
    /// Fields are positional and not trimmed: ticker, exchange, side, condition, sendtime,
    /// recvtime, price, size. Single-character fields take only the first byte of their token.
    pub fn parse_csv_line(line: &str, line_no: usize) -> Result<Self, CodecError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 8 {
            return Err(CodecError::MalformedRecord { line: line_no, fields: fields.len() });
        }

        let ticker = fields[0].to_string();

        let exchange = first_byte(fields[1]);

        let side_ch = fields[2].chars().next().unwrap_or('\0');
        let side = Side::from_char(side_ch)
            .ok_or(CodecError::UnknownSide { line: line_no, ch: side_ch })?;

        let condition = first_byte(fields[3]);

        let sendtime: u32 = fields[4]
            .parse()
            .map_err(|_| CodecError::MalformedRecord { line: line_no, fields: fields.len() })?;
        let recvtime: u32 = fields[5]
            .parse()
            .map_err(|_| CodecError::MalformedRecord { line: line_no, fields: fields.len() })?;

        let price = Price::parse(fields[6])?;

        let size: u32 = fields[7]
            .parse()
            .map_err(|_| CodecError::MalformedRecord { line: line_no, fields: fields.len() })?;

        Ok(TradeRecord {
            ticker,
            exchange,
            side,
            condition,
            sendtime,
            recvtime,
            price,
            size,
        })
    }

    /// The flag bits this record's side contributes (bits 0..2), with bit 3 set iff
    /// `sendtime == recvtime`.
    pub fn base_flags(&self) -> u8 {
        let mut flags = self.side.to_flag_bits();
        if self.sendtime == self.recvtime {
            flags |= 1 << flag_bit::SEND_EQ_RECV;
        }
        flags
    }

    /// Render this record back to one CSV line, terminated with `\r\n`.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}\r\n",
            self.ticker,
            self.exchange as char,
            self.side.to_char(),
            self.condition as char,
            self.sendtime,
            self.recvtime,
            self.price.format(),
            self.size,
        )
    }
}

fn first_byte(field: &str) -> u8 {
    field.bytes().next().unwrap_or(0)
}
