//! Configuration builder for ring buffers.
//!
//! Collects capacity, optional pre-populated slots, a starting cursor and
//! metadata, then validates everything in one place.
//!
//! ## Example
//!
//! ```rust
//! use ringkit::builder::RingBufferBuilder;
//!
//! let ring = RingBufferBuilder::new(4)
//!     .slots([Some("warm"), Some("start")])
//!     .cursor(1)
//!     .meta_entry("source", "replay")
//!     .try_build()
//!     .unwrap();
//!
//! assert_eq!(ring.peek(), Some(&"start"));
//! assert_eq!(ring.get(-1), Some(&"warm"));
//! assert_eq!(ring.metadata().and_then(|m| m.get("source")).map(String::as_str), Some("replay"));
//! ```

use tracing::trace;

use crate::ds::ring_buffer::{Metadata, RingBuffer};
use crate::error::RingError;
use crate::store::shared::SharedSlots;
use crate::store::traits::SlotStore;

/// Builder for [`RingBuffer`] instances.
#[derive(Debug, Clone)]
pub struct RingBufferBuilder<T> {
    capacity: usize,
    slots: Vec<Option<T>>,
    cursor: i64,
    metadata: Option<Metadata>,
}

impl<T> RingBufferBuilder<T> {
    /// Create a new builder for a buffer of `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::new(),
            cursor: 0,
            metadata: None,
        }
    }

    /// Replace the attached metadata.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add a single metadata entry, creating the map if needed.
    pub fn meta_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let map = self.metadata.take().unwrap_or_else(Metadata::new_sync);
        self.metadata = Some(map.insert(key.into(), value.into()));
        self
    }

    /// Pre-populate physical slots `0..n` (the rest stay sentinels).
    pub fn slots<I>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        self.slots = slots.into_iter().collect();
        self
    }

    /// Set the starting cursor. Any value is accepted and reduced into
    /// `0..capacity` on build.
    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Build the buffer.
    ///
    /// # Errors
    ///
    /// [`RingError::SizeMismatch`] if more slots were given than `capacity`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ringkit::builder::RingBufferBuilder;
    ///
    /// let err = RingBufferBuilder::new(1)
    ///     .slots([Some(1), Some(2)])
    ///     .try_build()
    ///     .unwrap_err();
    /// assert!(err.is_size_mismatch());
    /// ```
    pub fn try_build(self) -> Result<RingBuffer<T>, RingError> {
        trace!(
            capacity = self.capacity,
            slots = self.slots.len(),
            cursor = self.cursor,
            "building ring buffer"
        );
        RingBuffer::try_from_parts(
            SharedSlots::from_slots(self.slots),
            self.capacity,
            self.cursor,
            self.metadata,
        )
    }
}
