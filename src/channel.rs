//! Single-phase decode channel
//!
//! A [`PhaseChannel`] interprets the chip stream under one of the two
//! possible chip-pair alignments. It recovers logical bits from Manchester
//! symbols, hunts for the sync word in a rolling window, strips stuffed
//! zero bits, and packs the surviving data bits into bytes.

use crate::error::{CodecError, Result};
use crate::spec;
use crate::symbol::SymbolCodec;

/// Window reset value: all ones can never roll into the sync word until a
/// genuine zero bit has been shifted in, so a match always starts clean.
const SYNC_WINDOW_RESET: u8 = 0xFF;

/// Synchronization state of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelState {
    /// Hunting for the sync word in the decoded bit stream
    Searching,
    /// Sync word found; recovering data bytes
    Synchronized,
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelState::Searching => write!(f, "Searching"),
            ChannelState::Synchronized => write!(f, "Synchronized"),
        }
    }
}

/// Outcome of delivering one chip to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipEvent {
    /// Nothing to report; state advanced internally
    Idle,
    /// The sync word was detected; the channel now owns the stream
    SyncFound,
    /// A complete de-stuffed data byte was recovered
    Byte(u8),
    /// A line error ended this channel's synchronized run
    LockLost,
}

/// One chip-boundary hypothesis over the incoming stream
///
/// The sync window and the data accumulator are independent shift registers:
/// the window runs over the raw decoded bits (stuffed bits included) while
/// the accumulator only ever sees payload bits.
#[derive(Debug, Clone)]
pub struct PhaseChannel {
    /// Rolling window of the last 8 decoded bits, LSB-first
    sync_window: u8,
    /// Consecutive decoded one-bits since the last zero
    one_run: u8,
    /// Partially assembled output byte, LSB-first
    data: u8,
    /// Bits currently held in `data`
    data_bits: u8,
    state: ChannelState,
}

impl PhaseChannel {
    /// Create a channel in the searching state
    pub fn new() -> Self {
        PhaseChannel {
            sync_window: SYNC_WINDOW_RESET,
            one_run: 0,
            data: 0,
            data_bits: 0,
            state: ChannelState::Searching,
        }
    }

    /// Discard all state, as at a frame boundary
    pub fn reset(&mut self) {
        *self = PhaseChannel::new();
    }

    /// Current synchronization state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Whether this channel currently owns the stream
    pub fn is_synchronized(&self) -> bool {
        self.state == ChannelState::Synchronized
    }

    /// Drop out of the synchronized state because the other channel found a
    /// sync word; the search window keeps its contents so this channel can
    /// contend for the next frame.
    pub fn deactivate(&mut self) {
        self.state = ChannelState::Searching;
    }

    /// Process the chip pair formed by the previous and current chip under
    /// this channel's alignment (low two bits of `pair`).
    pub fn accept(&mut self, pair: u8) -> ChipEvent {
        let (bit, stuffed) = match self.recover_bit(pair) {
            Ok(decoded) => decoded,
            Err(_) => return self.line_error(),
        };

        self.sync_window = (self.sync_window >> 1) | if bit { 0x80 } else { 0 };
        if self.sync_window == spec::SYNC_WORD {
            self.sync_window = SYNC_WINDOW_RESET;
            self.data = 0;
            self.data_bits = 0;
            self.state = ChannelState::Synchronized;
            return ChipEvent::SyncFound;
        }

        if self.state == ChannelState::Synchronized && !stuffed && self.one_run < spec::MAX_ONE_RUN
        {
            self.data = (self.data >> 1) | if bit { 0x80 } else { 0 };
            self.data_bits += 1;
            if self.data_bits == 8 {
                self.data_bits = 0;
                return ChipEvent::Byte(self.data);
            }
        }

        ChipEvent::Idle
    }

    /// Decode one symbol and classify it, tracking the one-run. Returns the
    /// logical bit and whether it is a stuffed zero (window-only, not data).
    fn recover_bit(&mut self, pair: u8) -> Result<(bool, bool)> {
        let bit = SymbolCodec::decode_pair(pair)?;
        if bit {
            self.one_run += 1;
            if self.one_run > spec::MAX_ONE_RUN {
                return Err(CodecError::illegal_run(format!(
                    "{} consecutive one-bits without a stuffing break",
                    self.one_run
                )));
            }
            Ok((true, false))
        } else {
            let stuffed = self.one_run == spec::STUFF_RUN;
            self.one_run = 0;
            Ok((false, stuffed))
        }
    }

    /// Local recovery from an illegal symbol or one-run: throw away the
    /// window and any partial byte and go back to hunting for sync.
    fn line_error(&mut self) -> ChipEvent {
        self.sync_window = SYNC_WINDOW_RESET;
        self.one_run = 0;
        self.data = 0;
        self.data_bits = 0;
        if self.state == ChannelState::Synchronized {
            self.state = ChannelState::Searching;
            ChipEvent::LockLost
        } else {
            ChipEvent::Idle
        }
    }
}

impl Default for PhaseChannel {
    fn default() -> Self {
        Self::new()
    }
}
