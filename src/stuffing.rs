//! SDLC-style bit stuffing for the encode path
//!
//! The transmitter inserts a zero bit after every run of five one-bits so
//! that frame data can never mimic the sync word 0x7E (six ones in a row).
//! The first 8 bits of a frame carry the sync byte itself and are exempt.

use crate::spec;

/// Per-frame stuffing state for the encoder
///
/// Tracks the running count of encoded bits since the frame start and the
/// current run of one-bits. The caller feeds every logical bit through
/// [`BitStuffer::push_bit`] after emitting its chips and inserts an encoded
/// zero whenever it returns `true`.
#[derive(Debug, Clone)]
pub struct BitStuffer {
    /// Consecutive one-bits since the last zero
    one_run: u8,
    /// Encoded bits since the start of the current frame
    frame_bits: usize,
}

impl BitStuffer {
    /// Create stuffing state for a fresh frame
    pub fn new() -> Self {
        BitStuffer {
            one_run: 0,
            frame_bits: 0,
        }
    }

    /// Reset at a frame delimiter
    pub fn reset(&mut self) {
        self.one_run = 0;
        self.frame_bits = 0;
    }

    /// Account for one encoded data bit; returns true when a stuffed zero
    /// must be inserted immediately after it
    pub fn push_bit(&mut self, bit: bool) -> bool {
        // The sync preamble is never stuffed; runs only start counting once
        // the frame is past it.
        let armed = self.frame_bits >= spec::SYNC_BITS;
        self.frame_bits += 1;

        if bit && armed {
            self.one_run += 1;
            if self.one_run >= spec::STUFF_RUN {
                self.one_run = 0;
                return true;
            }
        } else {
            self.one_run = 0;
        }
        false
    }
}

impl Default for BitStuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_byte_never_stuffed() {
        let mut stuffer = BitStuffer::new();
        for _ in 0..8 {
            assert!(!stuffer.push_bit(true));
        }
    }

    #[test]
    fn test_stuff_after_five_ones() {
        let mut stuffer = BitStuffer::new();
        // Move past the sync preamble with zeros
        for _ in 0..8 {
            assert!(!stuffer.push_bit(false));
        }
        for i in 1..=5 {
            let stuff = stuffer.push_bit(true);
            assert_eq!(stuff, i == 5, "run length {}", i);
        }
        // Run counter restarts after the stuffed zero
        for i in 1..=5 {
            let stuff = stuffer.push_bit(true);
            assert_eq!(stuff, i == 5, "second run length {}", i);
        }
    }

    #[test]
    fn test_zero_resets_run() {
        let mut stuffer = BitStuffer::new();
        for _ in 0..8 {
            stuffer.push_bit(false);
        }
        for _ in 0..4 {
            assert!(!stuffer.push_bit(true));
        }
        assert!(!stuffer.push_bit(false));
        // Four more ones still do not complete a run of five
        for _ in 0..4 {
            assert!(!stuffer.push_bit(true));
        }
    }

    #[test]
    fn test_preamble_ones_do_not_carry_into_data() {
        let mut stuffer = BitStuffer::new();
        // Six ones inside the preamble leave the run counter at zero
        for _ in 0..6 {
            assert!(!stuffer.push_bit(true));
        }
        for _ in 0..2 {
            assert!(!stuffer.push_bit(false));
        }
        // Only now do ones start counting toward a stuffed zero
        for i in 1..=5 {
            let stuff = stuffer.push_bit(true);
            assert_eq!(stuff, i == 5);
        }
    }

    #[test]
    fn test_reset_rearms_preamble_exemption() {
        let mut stuffer = BitStuffer::new();
        for _ in 0..16 {
            stuffer.push_bit(false);
        }
        stuffer.reset();
        for _ in 0..8 {
            assert!(!stuffer.push_bit(true));
        }
    }
}
