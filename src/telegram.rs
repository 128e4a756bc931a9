//! Telegram-level encoding and decoding
//!
//! A telegram is a character stream of `'0'`/`'1'` symbols with optional
//! `'|'` or newline frame delimiters; anything else is noise and skipped.
//! Frames are processed independently, each with fresh codec state.

use std::fmt;

use crate::channel::ChipEvent;
use crate::spec;
use crate::stuffing::BitStuffer;
use crate::symbol::SymbolCodec;
use crate::sync::DualPhaseSynchronizer;

/// One recovered frame: the sync byte followed by the de-stuffed data bytes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Recovered byte values, sync byte first
    pub bytes: Vec<u8>,
}

impl Frame {
    fn with_sync() -> Self {
        Frame {
            bytes: vec![spec::SYNC_WORD],
        }
    }
}

impl fmt::Display for Frame {
    /// Renders each byte as 8 binary digits, MSB first, with no separators
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:08b}", byte)?;
        }
        Ok(())
    }
}

/// Telegram encoder: logical bit characters to Manchester chip stream
pub struct ManchesterEncoder;

impl ManchesterEncoder {
    /// Encode a telegram of `'0'`/`'1'` characters into its chip stream
    ///
    /// Input bits are collected MSB-first into bytes and serialized
    /// LSB-first, matching the wire's bit order. `'|'` and newlines flush
    /// any partial byte, appear as `'|'` in the output, and reset the
    /// stuffing state; unknown characters are ignored. A trailing partial
    /// byte is encoded from just the bits collected.
    pub fn encode_telegram(telegram: &str) -> String {
        let mut out = String::with_capacity(telegram.len() * spec::CHIPS_PER_BIT);
        let mut stuffer = BitStuffer::new();
        let mut byte = 0u8;
        let mut bit_count = 0u8;

        for c in telegram.chars() {
            match c {
                '|' | '\n' => {
                    if bit_count > 0 {
                        Self::encode_byte(&mut out, &mut stuffer, byte, bit_count);
                    }
                    out.push('|');
                    stuffer.reset();
                    byte = 0;
                    bit_count = 0;
                }
                '0' | '1' => {
                    byte = (byte << 1) | (c == '1') as u8;
                    bit_count += 1;
                    if bit_count == 8 {
                        Self::encode_byte(&mut out, &mut stuffer, byte, 8);
                        byte = 0;
                        bit_count = 0;
                    }
                }
                _ => {}
            }
        }

        if bit_count > 0 {
            Self::encode_byte(&mut out, &mut stuffer, byte, bit_count);
        }
        out
    }

    /// Serialize the low `bit_count` bits of `byte` LSB-first, inserting a
    /// stuffed zero wherever the stuffer calls for one
    fn encode_byte(out: &mut String, stuffer: &mut BitStuffer, mut byte: u8, bit_count: u8) {
        for _ in 0..bit_count {
            let bit = byte & 0x01 != 0;
            byte >>= 1;
            out.push_str(SymbolCodec::encode_bit(bit));
            if stuffer.push_bit(bit) {
                out.push_str(SymbolCodec::encode_bit(false));
            }
        }
    }
}

/// Telegram decoder: raw chip stream to recovered byte frames
pub struct ManchesterDecoder;

impl ManchesterDecoder {
    /// Decode a chip-stream telegram into its recovered frames
    ///
    /// Each detected sync word opens a new frame; bytes recovered by the
    /// synchronized channel are appended to it. `'|'` and newlines reset
    /// both phase channels so the next frame starts from scratch; unknown
    /// characters are skipped with no effect.
    pub fn decode_telegram(telegram: &str) -> Vec<Frame> {
        let mut frames: Vec<Frame> = Vec::new();
        let mut sync = DualPhaseSynchronizer::new();

        for c in telegram.chars() {
            match c {
                '|' | '\n' => sync.reset(),
                '0' | '1' => match sync.push_chip(c == '1') {
                    ChipEvent::SyncFound => frames.push(Frame::with_sync()),
                    ChipEvent::Byte(byte) => {
                        if let Some(frame) = frames.last_mut() {
                            frame.bytes.push(byte);
                        }
                    }
                    ChipEvent::Idle | ChipEvent::LockLost => {}
                },
                _ => {}
            }
        }
        frames
    }

    /// Render frames in the byte-output format: 8 binary digits per byte,
    /// frames separated by a newline, none before the first
    pub fn render(frames: &[Frame]) -> String {
        frames
            .iter()
            .map(Frame::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Decode straight to the rendered digit form
    pub fn decode_to_string(telegram: &str) -> String {
        Self::render(&Self::decode_telegram(telegram))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sync_byte() {
        // First byte of a frame, so no stuffing despite the run of six ones
        assert_eq!(
            ManchesterEncoder::encode_telegram("01111110"),
            spec::SYNC_WORD_CHIPS
        );
    }

    #[test]
    fn test_decode_sync_byte() {
        assert_eq!(
            ManchesterDecoder::decode_to_string(spec::SYNC_WORD_CHIPS),
            "01111110"
        );
    }

    #[test]
    fn test_roundtrip_with_stuffing() {
        // 0x7E 0xFF: the 0xFF payload forces one stuffed zero after five ones
        let telegram = "0111111011111111";
        let chips = ManchesterEncoder::encode_telegram(telegram);
        assert_eq!(
            chips,
            format!("{}{}", spec::SYNC_WORD_CHIPS, "101010101001101010")
        );
        assert_eq!(ManchesterDecoder::decode_to_string(&chips), telegram);
    }

    #[test]
    fn test_roundtrip_mixed_payload() {
        let telegram = "011111101010010100111000";
        let chips = ManchesterEncoder::encode_telegram(telegram);
        assert_eq!(ManchesterDecoder::decode_to_string(&chips), telegram);
    }

    #[test]
    fn test_exactly_one_stuff_per_run() {
        // 0x7E then 0xFF 0xFF: each run of five ones gets exactly one
        // stuffed zero pair
        let telegram = "011111101111111111111111";
        let chips = ManchesterEncoder::encode_telegram(telegram);
        let data = &chips[spec::SYNC_WORD_CHIPS.len()..];
        // 16 payload ones produce exactly 3 stuffed zeros (runs restart
        // after each insertion), and the receiver strips all of them
        assert_eq!(data.len(), (16 + 3) * spec::CHIPS_PER_BIT);
        assert_eq!(ManchesterDecoder::decode_to_string(&chips), telegram);
    }

    #[test]
    fn test_encoder_frame_reset() {
        // Stuffing state starts over after a delimiter: neither first byte
        // is stuffed
        let chips = ManchesterEncoder::encode_telegram("11111111|11111111");
        assert_eq!(chips, format!("{}|{}", "10".repeat(8), "10".repeat(8)));
    }

    #[test]
    fn test_encoder_partial_byte() {
        // Three collected bits, serialized lowest-order first
        assert_eq!(ManchesterEncoder::encode_telegram("011"), "101001");
    }

    #[test]
    fn test_encoder_ignores_noise() {
        assert_eq!(
            ManchesterEncoder::encode_telegram("0 1x11_1110"),
            spec::SYNC_WORD_CHIPS
        );
    }

    #[test]
    fn test_decoder_ignores_noise() {
        let noisy: String = spec::SYNC_WORD_CHIPS
            .chars()
            .flat_map(|c| [c, 'x'])
            .collect();
        assert_eq!(ManchesterDecoder::decode_to_string(&noisy), "01111110");
    }

    #[test]
    fn test_decode_phase_shifted_stream() {
        let chips = ManchesterEncoder::encode_telegram("0111111010100101");
        let shifted = format!("0{}", chips);
        assert_eq!(
            ManchesterDecoder::decode_to_string(&shifted),
            "0111111010100101"
        );
    }

    #[test]
    fn test_decode_multiple_frames() {
        let chips = format!("{}|{}", spec::SYNC_WORD_CHIPS, spec::SYNC_WORD_CHIPS);
        let frames = ManchesterDecoder::decode_telegram(&chips);
        assert_eq!(frames.len(), 2);
        assert_eq!(
            ManchesterDecoder::render(&frames),
            "01111110\n01111110"
        );
    }

    #[test]
    fn test_back_to_back_sync_words_start_new_frame() {
        // A second sync word in the same chip stream opens a new frame
        // rather than being taken as the data byte 0x7E
        let chips = format!("{}{}", spec::SYNC_WORD_CHIPS, spec::SYNC_WORD_CHIPS);
        let frames = ManchesterDecoder::decode_telegram(&chips);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].bytes, vec![spec::SYNC_WORD]);
        assert_eq!(frames[1].bytes, vec![spec::SYNC_WORD]);
    }

    #[test]
    fn test_no_output_without_sync() {
        // Valid symbols, but the sync word never appears
        let frames = ManchesterDecoder::decode_telegram(&"01".repeat(32));
        assert!(frames.is_empty());
    }

    #[test]
    fn test_decoder_delimiter_resets_state() {
        // A delimiter right after the sync word drops the lock; the
        // following data bytes go nowhere until a fresh sync word arrives
        let chips = format!("{}|{}", spec::SYNC_WORD_CHIPS, "1001100101100110");
        let frames = ManchesterDecoder::decode_telegram(&chips);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes, vec![spec::SYNC_WORD]);
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame {
            bytes: vec![0x7E, 0xA5],
        };
        assert_eq!(frame.to_string(), "0111111010100101");
    }
}
