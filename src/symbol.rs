//! Manchester symbol translation for the ETH Comfort bitstream
//!
//! The protocol uses the G. E. Thomas convention: a logical 0 is transmitted
//! as the chip pair `01`, a logical 1 as `10`. The pairs `00` and `11` never
//! appear in a valid stream and signal a line error.

use crate::error::{CodecError, Result};

/// Pure chip-pair level Manchester codec
pub struct SymbolCodec;

impl SymbolCodec {
    /// Encode a single logical bit into its two-chip line code
    ///
    /// 0 = `01`, 1 = `10` (G. E. Thomas convention)
    pub fn encode_bit(bit: bool) -> &'static str {
        match bit {
            false => "01",
            true => "10",
        }
    }

    /// Decode a Manchester symbol from the low two bits of `pair`
    ///
    /// Returns Ok(bit) for the valid symbols `01`/`10`, Err for `00`/`11`
    pub fn decode_pair(pair: u8) -> Result<bool> {
        match pair & 0x3 {
            0b01 => Ok(false), // logical 0
            0b10 => Ok(true),  // logical 1
            p => Err(CodecError::illegal_symbol(format!(
                "invalid chip pair: {:#04b}",
                p
            ))),
        }
    }
}
