//! `Arc`-shared slot store backed by a persistent vector trie.
//!
//! Wraps [`rpds::VectorSync`], a bitmapped vector trie whose nodes are held
//! behind `Arc`. A write copies only the path from the root to the touched
//! leaf; every other node is shared with the previous version.
//!
//! ```text
//!   before: root ──► [n0] [n1] [n2]          after with_slot(5, x):
//!                                             root' ──► [n0] [n1'] [n2]
//!                                                         ▲         ▲
//!                                             shared ─────┘         └──── shared
//! ```
//!
//! ## Performance
//! - `slot` / `with_slot`: O(log32 n)
//! - `vacant` / `from_slots`: O(n)
//!
//! Stores are `Send + Sync` whenever `T` is.

use rpds::VectorSync;

use crate::store::traits::SlotStore;

/// Default [`SlotStore`] used by [`RingBuffer`](crate::ds::RingBuffer).
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SharedSlots<T> {
    inner: VectorSync<Option<T>>,
}

impl<T> Clone for SharedSlots<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> SlotStore for SharedSlots<T> {
    type Item = T;

    fn vacant(len: usize) -> Self {
        Self::from_slots(std::iter::repeat_with(|| None).take(len))
    }

    fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut inner = VectorSync::new_sync();
        for slot in slots {
            inner.push_back_mut(slot);
        }
        Self { inner }
    }

    #[inline]
    fn slot(&self, index: usize) -> Option<&Option<T>> {
        self.inner.get(index)
    }

    #[inline]
    fn with_slot(&self, index: usize, value: Option<T>) -> Option<Self> {
        self.inner.set(index, value).map(|inner| Self { inner })
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn padded(mut self, len: usize) -> Self {
        while self.inner.len() < len {
            self.inner.push_back_mut(None);
        }
        self
    }

    fn slots(&self) -> impl Iterator<Item = &Option<T>> + '_ {
        self.inner.iter()
    }
}
