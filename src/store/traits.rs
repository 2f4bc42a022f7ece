//! Slot storage backends for ring buffers.
//!
//! A store is a fixed-length persistent sequence of slots. Each slot is either
//! `Some(value)` or `None`, the sentinel meaning "never written" (or cleared by
//! [`RingBuffer::pop`](crate::ds::RingBuffer::pop)). Writes never touch the
//! receiver: they return a new store that shares every unmodified node with
//! the old one.
//!
//! Stores own the physical layout only. Cursor arithmetic, traversal order and
//! equality semantics live in [`RingBuffer`](crate::ds::RingBuffer), which
//! keeps the ring logic independent of how slots are shared.
//!
//! Implementations must provide structural `PartialEq` and `Hash` (slot by
//! slot, in physical order) when the element type supports them.

/// Persistent indexed slot store consumed by [`RingBuffer`](crate::ds::RingBuffer).
pub trait SlotStore: Clone {
    /// Element type held by written slots.
    type Item;

    /// Creates a store of `len` sentinel slots.
    fn vacant(len: usize) -> Self;

    /// Creates a store holding `slots` in order.
    fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<Self::Item>>;

    /// Returns the slot at physical `index`, or `None` if out of bounds.
    fn slot(&self, index: usize) -> Option<&Option<Self::Item>>;

    /// Returns a new store with slot `index` replaced by `value`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn with_slot(&self, index: usize, value: Option<Self::Item>) -> Option<Self>;

    /// Number of slots.
    fn len(&self) -> usize;

    /// Returns `true` if the store has no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a store of at least `len` slots, appending sentinels as needed.
    fn padded(self, len: usize) -> Self;

    /// Iterates slots in physical order.
    fn slots(&self) -> impl Iterator<Item = &Option<Self::Item>> + '_;
}
