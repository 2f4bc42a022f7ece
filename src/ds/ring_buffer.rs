//! Persistent fixed-capacity ring buffer.
//!
//! Every write returns a new buffer that shares all untouched slots with its
//! predecessor. The predecessor stays valid and unchanged, so old snapshots of
//! a rolling history can be handed to other threads without locks or copies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                      RingBuffer (capacity = 3) Layout                       │
//! │                                                                             │
//! │   slots: SlotStore (persistent, Arc-shared nodes)                           │
//! │   cursor: physical slot of the most recent write                            │
//! │                                                                             │
//! │   After pushing: 'a', 'b', 'c', 'd'                                         │
//! │                                                                             │
//! │   Physical:  0     1     2                                                  │
//! │            ┌─────┬─────┬─────┐                                              │
//! │   slots:   │ 'c' │ 'd' │ 'b' │                                              │
//! │            └─────┴─────┴─────┘                                              │
//! │                    ▲                                                        │
//! │                    │                                                        │
//! │                 cursor = 1 (last write went here)                           │
//! │                                                                             │
//! │   Index Mapping                                                             │
//! │   ─────────────                                                             │
//! │                                                                             │
//! │   index(i) = (cursor + i) mod capacity      (Euclidean, never negative)     │
//! │                                                                             │
//! │   get(0)  = slots[1] = 'd'   (peek)                                         │
//! │   get(1)  = slots[2] = 'b'                                                  │
//! │   get(-1) = slots[0] = 'c'                                                  │
//! │                                                                             │
//! │   Push Flow                                                                 │
//! │   ─────────                                                                 │
//! │                                                                             │
//! │   push('e'):                                                                │
//! │     1. next = index(1)                  → 2                                 │
//! │     2. slots' = slots.with_slot(2, 'e') → shares slots 0 and 1              │
//! │     3. cursor' = next                   → 2                                 │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation        | Description                                   | Complexity   |
//! |------------------|-----------------------------------------------|--------------|
//! | [`push`]         | Write after the cursor and advance it         | O(log n)     |
//! | [`set_at`]       | Overwrite a logical slot, cursor unchanged    | O(log n)     |
//! | [`pop`]          | Clear the cursor slot and step the cursor back| O(log n)     |
//! | [`peek`] / [`get`] | Read a logical slot                         | O(log n)     |
//! | [`forward`]      | Newest, then oldest to second-newest          | O(n)         |
//! | [`reverse`]      | Newest to oldest                              | O(n)         |
//! | [`is_empty`]     | Scan for any written slot                     | O(n)         |
//!
//! [`push`]: RingBuffer::push
//! [`set_at`]: RingBuffer::set_at
//! [`pop`]: RingBuffer::pop
//! [`peek`]: RingBuffer::peek
//! [`get`]: RingBuffer::get
//! [`forward`]: RingBuffer::forward
//! [`reverse`]: RingBuffer::reverse
//! [`is_empty`]: RingBuffer::is_empty
//!
//! ## Sentinels
//!
//! A slot that was never written (or was cleared by [`pop`]) reads as `None`.
//! Traversals yield `Option<&T>` for every slot, sentinels included; use
//! `.flatten()` to keep only written values.
//!
//! ## Equality
//!
//! Equality and hashing are structural: two buffers are equal iff their slots
//! are equal in physical order and their raw cursors are equal. Metadata never
//! takes part. Two logically empty buffers with different cursors are *not*
//! equal.
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::ds::RingBuffer;
//!
//! let empty = RingBuffer::new(3);
//! let full = empty.push('a').push('b').push('c');
//!
//! // Newest first, then oldest onward.
//! let forward: Vec<_> = full.forward().flatten().copied().collect();
//! assert_eq!(forward, vec!['c', 'a', 'b']);
//!
//! // Newest to oldest.
//! let reverse: Vec<_> = full.reverse().flatten().copied().collect();
//! assert_eq!(reverse, vec!['c', 'b', 'a']);
//!
//! // Older versions are untouched.
//! assert!(empty.is_empty());
//! assert_eq!(full.push('d').peek(), Some(&'d'));
//! assert_eq!(full.peek(), Some(&'c'));
//! ```
//!
//! ## Thread Safety
//!
//! `RingBuffer<T>` is `Send + Sync` when `T` is. Cached hashes are filled in
//! lazily with relaxed atomics; racing first readers compute the same value.
//!
//! ## Implementation Notes
//!
//! - Zero capacity: writes are no-ops, reads return `None`, traversals are empty
//! - The raw cursor may go negative after [`pop`]; it is normalised on read
//! - `debug_validate_invariants()` available in debug/test builds

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::Index;
use std::sync::OnceLock;

use rpds::RedBlackTreeMapSync;
use rustc_hash::FxHasher;
use tracing::{debug, trace};

use crate::ds::hash_cell::HashCell;
use crate::error::RingError;
use crate::store::shared::SharedSlots;
use crate::store::traits::SlotStore;

/// Immutable metadata attached to a buffer. Never compared or hashed.
pub type Metadata = RedBlackTreeMapSync<String, String>;

const VACANT_SLOT_HASH: u64 = 0x9E37_79B9_7F4A_7C15;

/// Persistent ring buffer of `capacity` slots.
///
/// # Type Parameters
///
/// - `T`: element type
/// - `S`: slot store, [`SharedSlots`] by default
///
/// # Example
///
/// ```
/// use ringkit::ds::RingBuffer;
///
/// let ring = RingBuffer::new(2).push(10).push(20);
/// assert_eq!(ring.peek(), Some(&20));
/// assert_eq!(ring.get(-1), Some(&10));
///
/// // Full: the next push overwrites the oldest slot.
/// let next = ring.push(30);
/// assert_eq!(next.reverse().flatten().copied().collect::<Vec<_>>(), vec![30, 20]);
/// assert_eq!(ring.reverse().flatten().copied().collect::<Vec<_>>(), vec![20, 10]);
/// ```
pub struct RingBuffer<T, S = SharedSlots<T>> {
    slots: S,
    capacity: usize,
    cursor: i64,
    metadata: Option<Metadata>,
    hash: HashCell,
    structural_hash: HashCell,
    emptied: OnceLock<Box<RingBuffer<T, S>>>,
    _marker: PhantomData<T>,
}

impl<T> RingBuffer<T, SharedSlots<T>> {
    /// Creates a buffer of `capacity` sentinel slots with the cursor at 0.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::<u64>::new(4);
    /// assert_eq!(ring.capacity(), 4);
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.peek(), None);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::vacant_in(capacity, None)
    }

    /// Creates an empty buffer carrying `metadata`.
    pub fn new_with_metadata(capacity: usize, metadata: Metadata) -> Self {
        Self::vacant_in(capacity, Some(metadata))
    }

    /// Creates a buffer from pre-populated slots, cursor at 0.
    ///
    /// Fewer slots than `capacity` are padded with sentinels.
    ///
    /// # Errors
    ///
    /// [`RingError::SizeMismatch`] if there are more slots than `capacity`.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::try_from_slots([Some('x'), None], 3).unwrap();
    /// assert_eq!(ring.forward().collect::<Vec<_>>(), vec![Some(&'x'), None, None]);
    ///
    /// assert!(RingBuffer::try_from_slots([Some(1), Some(2)], 1).is_err());
    /// ```
    pub fn try_from_slots<I>(slots: I, capacity: usize) -> Result<Self, RingError>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        Self::try_from_parts(SharedSlots::from_slots(slots), capacity, 0, None)
    }
}

impl<T, S> RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    /// Creates an empty buffer over store type `S`.
    pub fn vacant_in(capacity: usize, metadata: Option<Metadata>) -> Self {
        Self::from_raw(S::vacant(capacity), capacity, 0, metadata)
    }

    /// Creates a buffer from an existing store, cursor and metadata.
    ///
    /// The store is padded with sentinels up to `capacity`. Any cursor value is
    /// accepted and reduced into `0..capacity`.
    ///
    /// # Errors
    ///
    /// [`RingError::SizeMismatch`] if `slots` is longer than `capacity`.
    pub fn try_from_parts(
        slots: S,
        capacity: usize,
        cursor: i64,
        metadata: Option<Metadata>,
    ) -> Result<Self, RingError> {
        let len = slots.len();
        if len > capacity {
            debug!(len, capacity, "rejected slot store longer than capacity");
            return Err(RingError::SizeMismatch { len, capacity });
        }
        let cursor = if capacity == 0 {
            0
        } else {
            cursor.rem_euclid(capacity as i64)
        };
        Ok(Self::from_raw(
            slots.padded(capacity),
            capacity,
            cursor,
            metadata,
        ))
    }

    fn from_raw(slots: S, capacity: usize, cursor: i64, metadata: Option<Metadata>) -> Self {
        Self {
            slots,
            capacity,
            cursor,
            metadata,
            hash: HashCell::new(),
            structural_hash: HashCell::new(),
            emptied: OnceLock::new(),
            _marker: PhantomData,
        }
    }

    /// Returns a sibling with new slots and cursor; metadata carries over.
    fn derive(&self, slots: S, cursor: i64) -> Self {
        Self::from_raw(slots, self.capacity, cursor, self.metadata.clone())
    }

    fn write(&self, physical: usize, value: Option<T>) -> S {
        self.slots
            .with_slot(physical, value)
            .expect("physical slot within capacity")
    }

    /// Returns the number of slots. Fixed for the whole lineage of a buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of slots (always equal to [`capacity`](Self::capacity)).
    ///
    /// Sentinel slots are counted; see [`is_empty`](Self::is_empty) for the
    /// logical emptiness check.
    #[inline]
    pub fn len(&self) -> usize {
        self.capacity
    }

    /// Returns the raw cursor. May be negative after [`pop`](Self::pop).
    #[inline]
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Maps logical index `i` to a physical slot.
    ///
    /// Uses Euclidean modulo, so negative indices wrap to the top of the range.
    /// Always 0 for a zero-capacity buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(3).push("a"); // cursor = 1
    /// assert_eq!(ring.physical_index(0), 1);
    /// assert_eq!(ring.physical_index(-1), 0);
    /// assert_eq!(ring.physical_index(5), 0);
    /// ```
    #[inline]
    pub fn physical_index(&self, i: i64) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        let cap = self.capacity as i64;
        ((self.cursor.rem_euclid(cap) + i.rem_euclid(cap)).rem_euclid(cap)) as usize
    }

    /// Writes `value` right after the cursor and moves the cursor there.
    ///
    /// Whatever occupied that slot is overwritten in the new buffer only.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let b1 = RingBuffer::new(2).push(1);
    /// let b2 = b1.push(2);
    /// assert_eq!(b1.peek(), Some(&1));
    /// assert_eq!(b2.peek(), Some(&2));
    /// ```
    pub fn push(&self, value: T) -> Self {
        if self.capacity == 0 {
            trace!("push ignored on zero-capacity ring buffer");
            return self.clone();
        }
        let next = self.physical_index(1);
        self.derive(self.write(next, Some(value)), next as i64)
    }

    /// Pushes every value of `values` in order.
    pub fn push_all<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .fold(self.clone(), |ring, value| ring.push(value))
    }

    /// Overwrites logical slot `i` without moving the cursor.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(3).push(1).push(2);
    /// let fixed = ring.set_at(-1, 10);
    /// assert_eq!(fixed.peek(), Some(&2));
    /// assert_eq!(fixed.get(-1), Some(&10));
    /// assert_eq!(fixed.cursor(), ring.cursor());
    /// ```
    pub fn set_at(&self, i: i64, value: T) -> Self {
        if self.capacity == 0 {
            trace!("set_at ignored on zero-capacity ring buffer");
            return self.clone();
        }
        self.derive(self.write(self.physical_index(i), Some(value)), self.cursor)
    }

    /// Clears the cursor slot to the sentinel and steps the cursor back.
    ///
    /// This does not restore a value overwritten by an earlier push.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(2).push(1).push(2);
    /// let undone = ring.pop();
    /// assert_eq!(undone.peek(), Some(&1));
    /// assert_eq!(undone.get(1), None);
    ///
    /// // Popping is always allowed.
    /// let drained = undone.pop().pop().pop();
    /// assert!(drained.is_empty());
    /// ```
    pub fn pop(&self) -> Self {
        if self.capacity == 0 {
            trace!("pop ignored on zero-capacity ring buffer");
            return self.clone();
        }
        self.derive(self.write(self.physical_index(0), None), self.cursor - 1)
    }

    /// Returns the most recently written value, or `None` for a sentinel.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the value at logical index `i`, or `None` for a sentinel.
    ///
    /// Every integer is a valid index: `get(i) == get(j)` whenever
    /// `i ≡ j (mod capacity)`.
    #[inline]
    pub fn get(&self, i: i64) -> Option<&T> {
        self.slot(i).and_then(Option::as_ref)
    }

    /// Returns the raw slot at logical index `i`.
    ///
    /// `None` only for a zero-capacity buffer; otherwise `Some(None)` marks a
    /// sentinel.
    #[inline]
    pub fn slot(&self, i: i64) -> Option<&Option<T>> {
        self.slots.slot(self.physical_index(i))
    }

    /// Like [`get`](Self::get), but returns `default` when no slot exists.
    ///
    /// Only a zero-capacity buffer lacks slots, so `default` is never used
    /// otherwise.
    pub fn get_or<'a>(&'a self, i: i64, default: Option<&'a T>) -> Option<&'a T> {
        match self.slot(i) {
            Some(slot) => slot.as_ref(),
            None => default,
        }
    }

    /// Returns `true` if every slot holds the sentinel. Scans all slots.
    pub fn is_empty(&self) -> bool {
        self.slots.slots().all(Option::is_none)
    }

    /// Returns `true` if any slot holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.forward().any(|slot| slot == Some(value))
    }

    /// Returns `true` if every item of `values` is [`contained`](Self::contains).
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Materialises the forward order into a `Vec`, sentinels as `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(3).push(1).push(2);
    /// assert_eq!(ring.to_snapshot(), vec![Some(2), None, Some(1)]);
    /// ```
    pub fn to_snapshot(&self) -> Vec<Option<T>>
    where
        T: Clone,
    {
        self.forward().map(|slot| slot.cloned()).collect()
    }

    /// Copies the forward order into `dest`, returning the number of slots
    /// written (`min(dest.len(), capacity)`).
    pub fn copy_into(&self, dest: &mut [Option<T>]) -> usize
    where
        T: Clone,
    {
        let mut written = 0;
        for (out, slot) in dest.iter_mut().zip(self.forward()) {
            *out = slot.cloned();
            written += 1;
        }
        written
    }

    /// Returns the attached metadata, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Returns the same buffer with `metadata` attached instead.
    ///
    /// Slots, cursor and cached hashes are shared with `self`.
    pub fn with_metadata(&self, metadata: Option<Metadata>) -> Self {
        let mut next = self.clone();
        next.metadata = metadata;
        next
    }

    /// Returns a fresh buffer of the same capacity (cursor 0, no metadata).
    ///
    /// Built once per instance; later calls return the same value.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(2).push(1);
    /// let reset = ring.emptied();
    /// assert!(reset.is_empty());
    /// assert_eq!(reset.capacity(), 2);
    /// assert!(std::ptr::eq(reset, ring.emptied()));
    /// ```
    pub fn emptied(&self) -> &Self {
        self.emptied
            .get_or_init(|| Box::new(Self::vacant_in(self.capacity, None)))
    }

    /// Iterates logical indices `0, 1, …, capacity - 1`.
    ///
    /// For a full buffer this is the newest value followed by the remaining
    /// values from oldest to second-newest.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(3).push('a').push('b').push('c').push('d');
    /// let order: Vec<_> = ring.forward().flatten().copied().collect();
    /// assert_eq!(order, vec!['d', 'b', 'c']);
    /// ```
    pub fn forward(&self) -> Forward<'_, T, S> {
        Forward {
            ring: self,
            front: 0,
            back: self.capacity,
        }
    }

    /// Iterates logical indices `0, -1, …, -(capacity - 1)` (newest to oldest).
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(3).push('a').push('b').push('c').push('d');
    /// let order: Vec<_> = ring.reverse().flatten().copied().collect();
    /// assert_eq!(order, vec!['d', 'c', 'b']);
    /// ```
    pub fn reverse(&self) -> Reverse<'_, T, S> {
        Reverse {
            ring: self,
            front: 0,
            back: self.capacity,
        }
    }

    /// General-purpose hash of slots and cursor, cached after the first call.
    pub fn hash_code(&self) -> u64
    where
        T: Hash,
        S: Hash,
    {
        self.hash.get_or_compute(|| {
            let mut hasher = FxHasher::default();
            self.slots.hash(&mut hasher);
            self.cursor.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Value-semantics hash used by [`Hash`], cached after the first call.
    ///
    /// Combines an ordered hash of the slots (in physical order) with a mixed
    /// hash of the raw cursor. Equal buffers always agree.
    pub fn structural_hash(&self) -> u64
    where
        T: Hash,
    {
        self.structural_hash.get_or_compute(|| {
            let mut acc: u64 = 1;
            let mut count: u64 = 0;
            for slot in self.slots.slots() {
                acc = acc.wrapping_mul(31).wrapping_add(slot_hash(slot));
                count += 1;
            }
            hash_combine(mix_collection(acc, count), fmix64(self.cursor as u64))
        })
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns the slots in physical order.
    pub fn debug_snapshot_slots(&self) -> Vec<Option<&T>> {
        self.slots.slots().map(Option::as_ref).collect()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.slots.len(), self.capacity);
        if self.capacity == 0 {
            assert!(self.is_empty());
            assert_eq!(self.physical_index(self.cursor), 0);
        } else {
            assert!(self.physical_index(0) < self.capacity);
            assert_eq!(self.physical_index(0), self.physical_index(self.capacity as i64));
        }
    }
}

fn slot_hash<T: Hash>(slot: &Option<T>) -> u64 {
    match slot {
        None => VACANT_SLOT_HASH,
        Some(value) => {
            let mut hasher = FxHasher::default();
            value.hash(&mut hasher);
            hasher.finish()
        },
    }
}

// murmur3 64-bit finaliser
#[inline]
fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

#[inline]
fn mix_collection(hash: u64, count: u64) -> u64 {
    fmix64(hash ^ count.rotate_left(32))
}

#[inline]
fn hash_combine(seed: u64, hash: u64) -> u64 {
    seed ^ hash
        .wrapping_add(0x9E37_79B9)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

// ---------------------------------------------------------------------------
// Clone, Debug, Index
// ---------------------------------------------------------------------------

impl<T, S> Clone for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    /// Shares slots, metadata and cached hashes. The emptied memo is per instance.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            capacity: self.capacity,
            cursor: self.cursor,
            metadata: self.metadata.clone(),
            hash: self.hash.clone(),
            structural_hash: self.structural_hash.clone(),
            emptied: OnceLock::new(),
            _marker: PhantomData,
        }
    }
}

impl<T, S> fmt::Debug for RingBuffer<T, S>
where
    T: fmt::Debug,
    S: SlotStore<Item = T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .field("forward", &self.forward().collect::<Vec<_>>())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl<T, S> Index<i64> for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    type Output = Option<T>;

    /// Returns the raw slot at logical index `i`.
    ///
    /// # Panics
    ///
    /// Panics on a zero-capacity buffer, which has no slot to return.
    fn index(&self, i: i64) -> &Option<T> {
        match self.slot(i) {
            Some(slot) => slot,
            None => panic!("cannot index into a zero-capacity ring buffer"),
        }
    }
}

// ---------------------------------------------------------------------------
// PartialEq, Eq, Hash: raw cursor + physical slots; metadata excluded
// ---------------------------------------------------------------------------

impl<T, S> PartialEq for RingBuffer<T, S>
where
    S: SlotStore<Item = T> + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.cursor == other.cursor && self.slots == other.slots)
    }
}

impl<T, S> Eq for RingBuffer<T, S> where S: SlotStore<Item = T> + Eq {}

impl<T, S> Hash for RingBuffer<T, S>
where
    T: Hash,
    S: SlotStore<Item = T>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

// ---------------------------------------------------------------------------
// Iterator types (C-ITER-TY: names match the methods that produce them)
// ---------------------------------------------------------------------------

/// Forward traversal of a [`RingBuffer`]: logical indices `0, 1, …`.
///
/// Created by [`RingBuffer::forward`].
pub struct Forward<'a, T, S = SharedSlots<T>> {
    ring: &'a RingBuffer<T, S>,
    front: usize,
    back: usize,
}

impl<'a, T, S> Iterator for Forward<'a, T, S>
where
    S: SlotStore<Item = T>,
{
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.ring.get(self.front as i64);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, S> DoubleEndedIterator for Forward<'_, T, S>
where
    S: SlotStore<Item = T>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.ring.get(self.back as i64))
    }
}

impl<T, S> ExactSizeIterator for Forward<'_, T, S> where S: SlotStore<Item = T> {}

impl<T, S> FusedIterator for Forward<'_, T, S> where S: SlotStore<Item = T> {}

impl<T, S> Clone for Forward<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T, S> fmt::Debug for Forward<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forward")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}

/// Reverse traversal of a [`RingBuffer`]: logical indices `0, -1, …`.
///
/// Created by [`RingBuffer::reverse`].
pub struct Reverse<'a, T, S = SharedSlots<T>> {
    ring: &'a RingBuffer<T, S>,
    front: usize, // yields get(-front)
    back: usize,
}

impl<'a, T, S> Iterator for Reverse<'a, T, S>
where
    S: SlotStore<Item = T>,
{
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.ring.get(-(self.front as i64));
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, S> DoubleEndedIterator for Reverse<'_, T, S>
where
    S: SlotStore<Item = T>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.ring.get(-(self.back as i64)))
    }
}

impl<T, S> ExactSizeIterator for Reverse<'_, T, S> where S: SlotStore<Item = T> {}

impl<T, S> FusedIterator for Reverse<'_, T, S> where S: SlotStore<Item = T> {}

impl<T, S> Clone for Reverse<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T, S> fmt::Debug for Reverse<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reverse")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}

/// Owning forward traversal of a [`RingBuffer`], yielding cloned values.
///
/// Created by calling [`IntoIterator::into_iter`] on a `RingBuffer`.
pub struct IntoIter<T, S = SharedSlots<T>> {
    ring: RingBuffer<T, S>,
    front: usize,
}

impl<T, S> Iterator for IntoIter<T, S>
where
    T: Clone,
    S: SlotStore<Item = T>,
{
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.ring.capacity {
            return None;
        }
        let item = self.ring.get(self.front as i64).cloned();
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.capacity - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, S> ExactSizeIterator for IntoIter<T, S>
where
    T: Clone,
    S: SlotStore<Item = T>,
{
}

impl<T, S> FusedIterator for IntoIter<T, S>
where
    T: Clone,
    S: SlotStore<Item = T>,
{
}

// ---------------------------------------------------------------------------
// IntoIterator impls (C-ITER: iter, into_iter)
// ---------------------------------------------------------------------------

impl<T, S> IntoIterator for RingBuffer<T, S>
where
    T: Clone,
    S: SlotStore<Item = T>,
{
    type Item = Option<T>;
    type IntoIter = IntoIter<T, S>;

    /// Consumes the buffer, yielding cloned slots in forward order.
    ///
    /// # Example
    ///
    /// ```
    /// use ringkit::ds::RingBuffer;
    ///
    /// let ring = RingBuffer::new(2).push(String::from("x"));
    /// let slots: Vec<_> = ring.into_iter().collect();
    /// assert_eq!(slots, vec![Some("x".to_string()), None]);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            ring: self,
            front: 0,
        }
    }
}

impl<'a, T, S> IntoIterator for &'a RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    type Item = Option<&'a T>;
    type IntoIter = Forward<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // =============================================================================
    // Property Tests - Push and Read
    // =============================================================================

    proptest! {
        /// Property: peek() is always the last pushed value
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_peek_is_last_pushed(
            capacity in 1usize..16,
            values in prop::collection::vec(any::<u32>(), 1..64)
        ) {
            let mut ring = RingBuffer::new(capacity);
            for &value in &values {
                ring = ring.push(value);
                prop_assert_eq!(ring.peek(), Some(&value));
                prop_assert_eq!(ring.get(0), ring.peek());
            }
        }

        /// Property: indices congruent modulo capacity read the same slot
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_index_aliasing(
            capacity in 1usize..12,
            values in prop::collection::vec(any::<u8>(), 0..30),
            i in -1000i64..1000,
            k in -50i64..50
        ) {
            let ring = RingBuffer::new(capacity).push_all(values);
            let j = i + k * capacity as i64;
            prop_assert_eq!(ring.get(i), ring.get(j));
            prop_assert!(ring.physical_index(i) < capacity);
        }

        /// Property: reverse order is newest-to-oldest for a full buffer
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_reverse_is_newest_first(
            capacity in 1usize..10,
            values in prop::collection::vec(any::<u16>(), 10..40)
        ) {
            let ring = RingBuffer::new(capacity).push_all(values.iter().copied());
            let expected: Vec<u16> = values.iter().rev().take(capacity).copied().collect();
            let reverse: Vec<u16> = ring.reverse().flatten().copied().collect();
            prop_assert_eq!(reverse, expected);
        }

        /// Property: forward order is newest, then oldest to second-newest
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_forward_is_newest_then_chronological(
            capacity in 1usize..10,
            values in prop::collection::vec(any::<u16>(), 10..40)
        ) {
            let ring = RingBuffer::new(capacity).push_all(values.iter().copied());
            let window = &values[values.len() - capacity..];
            let mut expected = vec![window[capacity - 1]];
            expected.extend_from_slice(&window[..capacity - 1]);
            let forward: Vec<u16> = ring.forward().flatten().copied().collect();
            prop_assert_eq!(forward, expected);
        }
    }

    // =============================================================================
    // Property Tests - Persistence
    // =============================================================================

    proptest! {
        /// Property: deriving a buffer never changes the original
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_derivations_leave_original_intact(
            capacity in 0usize..8,
            seed in prop::collection::vec(any::<i32>(), 0..20),
            value in any::<i32>(),
            i in any::<i64>()
        ) {
            let original = RingBuffer::new(capacity).push_all(seed);
            let before = original.to_snapshot();
            let cursor = original.cursor();

            let _ = original.push(value);
            let _ = original.set_at(i, value);
            let _ = original.pop();

            prop_assert_eq!(original.to_snapshot(), before);
            prop_assert_eq!(original.cursor(), cursor);
            original.debug_validate_invariants();
        }

        /// Property: capacity pops leave only sentinels
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_capacity_pops_empty_the_buffer(
            capacity in 1usize..10,
            values in prop::collection::vec(any::<u8>(), 0..30)
        ) {
            let mut ring = RingBuffer::new(capacity).push_all(values);
            let cursor = ring.cursor();
            for _ in 0..capacity {
                ring = ring.pop();
            }
            prop_assert!(ring.is_empty());
            prop_assert_eq!(ring.cursor(), cursor - capacity as i64);
        }
    }

    // =============================================================================
    // Property Tests - Equality and Hash
    // =============================================================================

    proptest! {
        /// Property: identical operation sequences give equal, hash-equal buffers
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_same_history_same_hash(
            capacity in 0usize..8,
            values in prop::collection::vec(any::<u64>(), 0..30)
        ) {
            let a = RingBuffer::new(capacity).push_all(values.iter().copied());
            let b = RingBuffer::new(capacity).push_all(values.iter().copied());
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.hash_code(), b.hash_code());
            prop_assert_eq!(a.structural_hash(), b.structural_hash());
        }

        /// Property: equality matches a reference model of (slots, cursor)
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_equality_matches_model(
            ops_a in prop::collection::vec(0u8..3, 0..20),
            ops_b in prop::collection::vec(0u8..3, 0..20)
        ) {
            let run = |ops: &[u8]| {
                ops.iter().fold(RingBuffer::new(3), |ring, op| match op {
                    0 => ring.push(1u8),
                    1 => ring.push(2u8),
                    _ => ring.pop(),
                })
            };
            let a = run(&ops_a);
            let b = run(&ops_b);
            let model_equal = a.cursor() == b.cursor()
                && a.debug_snapshot_slots() == b.debug_snapshot_slots();
            prop_assert_eq!(a == b, model_equal);
            if model_equal {
                prop_assert_eq!(a.structural_hash(), b.structural_hash());
            }
        }
    }

    // =============================================================================
    // Property Tests - Reference Implementation Equivalence
    // =============================================================================

    proptest! {
        /// Property: behaviour matches a plain Vec with an explicit cursor
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_implementation(
            capacity in 1usize..9,
            ops in prop::collection::vec((0u8..3, any::<i16>(), -20i64..20), 0..60)
        ) {
            let cap = capacity as i64;
            let mut ring = RingBuffer::new(capacity);
            let mut slots: Vec<Option<i16>> = vec![None; capacity];
            let mut cursor: i64 = 0;

            for (op, value, i) in ops {
                match op {
                    0 => {
                        ring = ring.push(value);
                        cursor = (cursor + 1).rem_euclid(cap);
                        slots[cursor as usize] = Some(value);
                    }
                    1 => {
                        ring = ring.set_at(i, value);
                        slots[(cursor + i).rem_euclid(cap) as usize] = Some(value);
                    }
                    _ => {
                        ring = ring.pop();
                        slots[cursor.rem_euclid(cap) as usize] = None;
                        cursor -= 1;
                    }
                }

                prop_assert_eq!(ring.cursor(), cursor);
                let expected: Vec<Option<&i16>> = slots.iter().map(Option::as_ref).collect();
                prop_assert_eq!(ring.debug_snapshot_slots(), expected);
                prop_assert_eq!(ring.is_empty(), slots.iter().all(Option::is_none));
            }
        }
    }
}
