//! Dual-phase stream synchronization
//!
//! With no prior knowledge of where chip pairs begin, the receiver runs two
//! [`PhaseChannel`]s over the same stream, one half a chip apart from the
//! other. Whichever channel's pairing matches the transmitter's boundary
//! will find the sync word; the other only ever sees noise.

use crate::channel::{ChipEvent, PhaseChannel};

/// Owner and arbiter of the two phase channels
///
/// Each incoming chip is combined with its predecessor into a symbol and
/// handed to the channels in strict alternation, so consecutive chips probe
/// the two possible alignments. At most one channel is synchronized at a
/// time; a sync match on one side deactivates the other.
#[derive(Debug, Clone)]
pub struct DualPhaseSynchronizer {
    /// Even- and odd-aligned interpretations of the stream
    channels: [PhaseChannel; 2],
    /// Index of the channel receiving the next chip
    next: usize,
    /// Rolling register of the last two chips, shared by both phases
    chips: u8,
}

impl DualPhaseSynchronizer {
    /// Create a synchronizer with both channels searching
    pub fn new() -> Self {
        DualPhaseSynchronizer {
            channels: [PhaseChannel::new(), PhaseChannel::new()],
            next: 0,
            chips: 0,
        }
    }

    /// Discard all state, as at a frame boundary
    pub fn reset(&mut self) {
        *self = DualPhaseSynchronizer::new();
    }

    /// Whether either channel currently holds sync
    pub fn is_locked(&self) -> bool {
        self.channels.iter().any(PhaseChannel::is_synchronized)
    }

    /// Feed one chip and surface whatever the receiving channel reports
    ///
    /// The very first chip pairs with a phantom zero; at worst that forms an
    /// illegal symbol, which the searching channel absorbs silently.
    pub fn push_chip(&mut self, chip: bool) -> ChipEvent {
        self.chips = ((self.chips << 1) | chip as u8) & 0x03;

        let idx = self.next;
        self.next ^= 1;

        let event = self.channels[idx].accept(self.chips);
        if event == ChipEvent::SyncFound {
            self.channels[idx ^ 1].deactivate();
        }
        event
    }
}

impl Default for DualPhaseSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
