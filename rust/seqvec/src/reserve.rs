//! Capacity pre-sizing hint for [`SeqVec`](crate::SeqVec) construction.

/// A transient carrier of one requested capacity, consumed by
/// [`SeqVec::with_reserve`](crate::SeqVec::with_reserve) to construct a
/// pre-sized but logically empty sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveHint(usize);

impl ReserveHint {
    /// Returns the requested capacity in slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.0
    }
}

impl From<usize> for ReserveHint {
    fn from(capacity: usize) -> ReserveHint {
        ReserveHint(capacity)
    }
}

/// Wraps a requested capacity into a [`ReserveHint`].
pub fn reserve_hint(capacity: usize) -> ReserveHint {
    ReserveHint(capacity)
}
