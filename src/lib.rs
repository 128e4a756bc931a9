//! # ETH Comfort Bitstream Codec
//!
//! A Rust library for decoding and encoding the low-level RF bitstream of the
//! eQ-3/Technoline ETH Comfort 200/300 home-automation family (radiator valve
//! controllers, room thermostats, remote controls, temperature sensors).
//!
//! The receiver side of this protocol only delivers a raw chip stream with no
//! bit or byte alignment. This library provides:
//!
//! - Manchester decoding (G. E. Thomas convention) with dual-phase stream
//!   synchronization
//! - Sync-word detection and SDLC-style bit de-stuffing
//! - The inverse encoding, from logical bits back to the chip stream
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use ethcomfort_codec::{ManchesterDecoder, ManchesterEncoder};
//!
//! // The sync byte 0x7E, serialized LSB-first and Manchester encoded
//! let chips = ManchesterEncoder::encode_telegram("01111110");
//! assert_eq!(chips, "0110101010101001");
//!
//! let frames = ManchesterDecoder::decode_telegram(&chips);
//! assert_eq!(frames[0].bytes, vec![0x7E]);
//! ```

pub mod channel;
pub mod error;
pub mod stuffing;
pub mod symbol;
pub mod sync;
pub mod telegram;

pub use channel::{ChannelState, ChipEvent, PhaseChannel};
pub use error::{CodecError, Result};
pub use stuffing::BitStuffer;
pub use symbol::SymbolCodec;
pub use sync::DualPhaseSynchronizer;
pub use telegram::{Frame, ManchesterDecoder, ManchesterEncoder};

/// The ETH Comfort bitstream constants
pub mod spec {
    /// Frame sync word, as the decoded byte value
    pub const SYNC_WORD: u8 = 0x7E;

    /// The sync word on the wire: 0x7E serialized LSB-first, Manchester encoded
    pub const SYNC_WORD_CHIPS: &str = "0110101010101001";

    /// Number of encoded bits covered by the sync preamble; bit stuffing only
    /// arms once a frame is past this point
    pub const SYNC_BITS: usize = 8;

    /// Run length of one-bits after which a zero is stuffed
    pub const STUFF_RUN: u8 = 5;

    /// Longest legal run of one-bits on the wire (stuffed streams never carry
    /// more; anything longer is a line error)
    pub const MAX_ONE_RUN: u8 = 6;

    /// Manchester encoding uses 2 chips per logical bit
    pub const CHIPS_PER_BIT: usize = 2;
}
