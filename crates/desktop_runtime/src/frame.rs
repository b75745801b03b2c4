//! Coalesces pointer-move samples so geometry is recomputed at most once per render tick.

use crate::model::PointerPosition;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerCoalescer {
    pending: Option<PointerPosition>,
    frame_requested: bool,
}

impl PointerCoalescer {
    /// Stores the latest sample, replacing any sample not yet flushed.
    ///
    /// Returns `true` when the caller must schedule a flush for the next tick.
    pub fn push(&mut self, pointer: PointerPosition) -> bool {
        self.pending = Some(pointer);
        if self.frame_requested {
            false
        } else {
            self.frame_requested = true;
            true
        }
    }

    /// Called from the scheduled tick; yields the newest sample, if any.
    pub fn flush(&mut self) -> Option<PointerPosition> {
        self.frame_requested = false;
        self.pending.take()
    }

    /// Takes the pending sample outside a tick, e.g. on pointer-up.
    ///
    /// A tick that was already scheduled still fires and finds nothing to do.
    pub fn take_pending(&mut self) -> Option<PointerPosition> {
        self.pending.take()
    }
}
