//! Price representation: a (integer, mantissa) pair plus its string parse/format rules.
//!
//! The mantissa is not a mathematical exponent — it is the byte index within the digit
//! sequence at which the decimal point is reinserted when rendering. Multiple pairs can
//! represent the same real number; the codec preserves whatever pair the parse procedure
//! below produces rather than canonicalizing it.

use crate::error::CodecError;

/// A trade price stored as a signed integer digit sequence plus a decimal-point position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// The digits of the price (sign included), with the decimal point removed.
    pub integer: i32,
    /// Byte index at which the decimal point is reinserted when rendering.
    pub mantissa: i8,
}

impl Price {
    /// Parse a decimal string such as `"150.25"`, `"-0.5"`, `"12."`, or `".5"`.
    ///
    /// Leading zeros in the digit sequence shrink the mantissa one position per zero, and a
    /// negative integer discounts the sign byte from the mantissa, matching the reference
    /// tool's `parse_price_from_string`.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let dot_pos = s.find('.').unwrap_or(s.len());
        let mut mantissa: i32 = dot_pos as i32;

        let mut digits = String::with_capacity(s.len());
        digits.push_str(&s[..dot_pos]);
        if dot_pos < s.len() {
            digits.push_str(&s[dot_pos + 1..]);
        }

        let integer: i32 = digits
            .parse()
            .map_err(|_| CodecError::InvalidPrice { text: s.to_string() })?;

        let offset = if integer < 0 { 1 } else { 0 };
        if integer < 0 {
            mantissa -= 1;
        }

        let bytes = digits.as_bytes();
        let shrink = bytes.first() == Some(&b'0')
            || (integer < 0 && bytes.get(1) == Some(&b'0'));
        if shrink {
            let mut i = offset;
            while bytes.get(i) == Some(&b'0') {
                mantissa -= 1;
                i += 1;
            }
        }

        Ok(Price { integer, mantissa: mantissa as i8 })
    }

    /// Render back to decimal text, applying the documented normalization rules.
    pub fn format(&self) -> String {
        let mut b: Vec<u8> = self.integer.to_string().into_bytes();
        let offset = if self.integer < 0 { 1 } else { 0 };
        let mut mantissa = self.mantissa as i32;

        if mantissa < 0 {
            // The sign byte (if any) stays in place; the zero run and the digits that
            // followed the decimal point in the source are inserted after it.
            let m = (-mantissa) as usize;
            let mut padded = Vec::with_capacity(b.len() + m + 1);
            padded.extend_from_slice(&b[..offset]);
            padded.extend(std::iter::repeat(b'0').take(m + 1));
            padded.extend_from_slice(&b[offset..]);
            b = padded;
            mantissa = m as i32;
        }

        let insert_pos = (mantissa as usize) + offset;
        b.insert(insert_pos, b'.');

        let mut s = String::from_utf8(b).expect("price buffer is always ASCII");
        normalize(&mut s);
        s
    }
}

/// Apply the five textual normalization rules, in order, to a freshly dot-inserted buffer.
fn normalize(b: &mut String) {
    if b.starts_with('.') {
        b.insert(0, '0');
    } else if b.starts_with("-.") {
        b.insert(1, '0');
    } else if b.ends_with('.') {
        b.pop();
    }

    if b.starts_with("00.") {
        b.replace_range(0..3, "0.0");
    } else if b.starts_with("-00.") {
        b.replace_range(0..4, "-0.0");
    }

    if b == "0.0" {
        b.replace_range(.., "0");
    }
}
