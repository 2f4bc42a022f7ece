//! # Capability Traits
//!
//! A closed set of collection capabilities implemented by
//! [`RingBuffer`](crate::ds::RingBuffer). Each trait is a thin call-through to
//! the buffer's inherent operations, so generic code can ask for exactly the
//! capability it needs.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//!   │    Indexable<T>      │   │   Associative<T>     │   │    Invocable<T>      │
//!   │                      │   │                      │   │                      │
//!   │  slot_count()        │   │  contains_key(&K)    │   │  invoke(&K)          │
//!   │  nth(i64)            │   │  entry_at(&K)        │   │   → Result<…>        │
//!   │  nth_or(i64, dflt)   │   │  value_at(&K)        │   │                      │
//!   │                      │   │  value_at_or(&K, d)  │   │  InvalidKey for      │
//!   │                      │   │  assoc(&K, T)        │   │  non-integer keys    │
//!   └──────────────────────┘   └──────────────────────┘   └──────────────────────┘
//!
//!   ┌──────────────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//!   │   ForwardIterable    │   │   ReverseIterable    │   │ MutableCollection<T> │
//!   │                      │   │                      │   │                      │
//!   │  iter_forward()      │   │  iter_reverse()      │   │  add / remove / …    │
//!   │  newest, oldest, …   │   │  newest → oldest     │   │  always rejected     │
//!   └──────────────────────┘   └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Keys
//!
//! Associative and function-call style access take any [`LookupKey`]. Every
//! primitive integer is a valid key and is reduced modulo the capacity.
//! Floats, `bool`, `char` and strings are not keys; they are reported as
//! [`RingError::InvalidKey`] or as "no such key" depending on the operation.
//!
//! | Trait               | Purpose                                           |
//! |---------------------|---------------------------------------------------|
//! | `Indexable`         | Positional reads by logical index                 |
//! | `Associative`       | Map-like view keyed by integers                   |
//! | `Invocable`         | Function-call style lookup that errors on bad keys|
//! | `ForwardIterable`   | Forward traversal                                 |
//! | `ReverseIterable`   | Reverse traversal                                 |
//! | `MutableCollection` | In-place mutation, rejected with an error         |
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::ds::RingBuffer;
//! use ringkit::traits::{Associative, Invocable};
//!
//! let ring = RingBuffer::new(3).push("a").push("b");
//!
//! assert!(ring.contains_key(&-7_i32));
//! assert!(!ring.contains_key("0"));
//!
//! assert_eq!(ring.invoke(&0_u8), Ok(Some(&"b")));
//! assert!(ring.invoke(&1.0_f64).is_err());
//! ```

use tracing::{debug, trace};

use crate::ds::ring_buffer::{Forward, Reverse, RingBuffer};
use crate::error::RingError;
use crate::store::traits::SlotStore;

// ---------------------------------------------------------------------------
// LookupKey
// ---------------------------------------------------------------------------

/// A dynamically typed key that may or may not denote an integer index.
pub trait LookupKey: std::fmt::Debug {
    /// Returns `self mod modulus` (Euclidean) for integer keys, `None` for
    /// anything else. `modulus` is never zero.
    fn reduce(&self, modulus: u64) -> Option<u64>;
}

macro_rules! integer_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LookupKey for $ty {
                #[inline]
                fn reduce(&self, modulus: u64) -> Option<u64> {
                    Some((*self as i128).rem_euclid(i128::from(modulus)) as u64)
                }
            }
        )*
    };
}

integer_keys!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl LookupKey for u128 {
    #[inline]
    fn reduce(&self, modulus: u64) -> Option<u64> {
        Some((*self % u128::from(modulus)) as u64)
    }
}

macro_rules! non_integer_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LookupKey for $ty {
                #[inline]
                fn reduce(&self, _modulus: u64) -> Option<u64> {
                    None
                }
            }
        )*
    };
}

non_integer_keys!(f32, f64, bool, char, str, String);

impl<K: LookupKey + ?Sized> LookupKey for &K {
    #[inline]
    fn reduce(&self, modulus: u64) -> Option<u64> {
        (**self).reduce(modulus)
    }
}

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// Positional reads by logical index.
pub trait Indexable<T> {
    /// Number of addressable slots.
    fn slot_count(&self) -> usize;

    /// Value at logical index `i`; `None` for a sentinel.
    fn nth(&self, i: i64) -> Option<&T>;

    /// Like [`nth`](Self::nth), returning `default` when no slot exists at all.
    fn nth_or<'a>(&'a self, i: i64, default: Option<&'a T>) -> Option<&'a T>;
}

/// Map-like view whose keys are all integers.
pub trait Associative<T> {
    /// `true` for every integer key, `false` for anything else.
    fn contains_key<K: LookupKey + ?Sized>(&self, key: &K) -> bool;

    /// `(index, slot value)` for integer keys, `None` otherwise.
    ///
    /// The returned index is the key normalised into `0..capacity` (0 for an
    /// empty capacity), not the caller's key: keys wider than `i64` have no
    /// other faithful representation. `entry_at(&-1)` on a buffer of capacity 3
    /// yields index `2`.
    fn entry_at<K: LookupKey + ?Sized>(&self, key: &K) -> Option<(i64, Option<&T>)>;

    /// `Some(slot value)` for integer keys, `None` for non-integer keys.
    fn value_at<K: LookupKey + ?Sized>(&self, key: &K) -> Option<Option<&T>>;

    /// Slot value for integer keys, `default` for non-integer keys.
    fn value_at_or<'a, K: LookupKey + ?Sized>(
        &'a self,
        key: &K,
        default: Option<&'a T>,
    ) -> Option<&'a T>;

    /// Returns a new collection with `value` written under `key`.
    ///
    /// # Errors
    ///
    /// [`RingError::InvalidKey`] for non-integer keys.
    fn assoc<K: LookupKey + ?Sized>(&self, key: &K, value: T) -> Result<Self, RingError>
    where
        Self: Sized;
}

/// Function-call style lookup.
pub trait Invocable<T> {
    /// Looks up `key`.
    ///
    /// # Errors
    ///
    /// [`RingError::InvalidKey`] for non-integer keys.
    fn invoke<K: LookupKey + ?Sized>(&self, key: &K) -> Result<Option<&T>, RingError>;
}

/// Forward traversal (see [`RingBuffer::forward`]).
pub trait ForwardIterable {
    type Item;
    type Iter<'a>: Iterator<Item = Option<&'a Self::Item>>
    where
        Self: 'a;

    fn iter_forward(&self) -> Self::Iter<'_>;
}

/// Reverse traversal (see [`RingBuffer::reverse`]).
pub trait ReverseIterable {
    type Item;
    type Iter<'a>: Iterator<Item = Option<&'a Self::Item>>
    where
        Self: 'a;

    fn iter_reverse(&self) -> Self::Iter<'_>;
}

/// In-place mutation surface of a generic mutable collection.
///
/// Persistent collections implement it only to reject every call with
/// [`RingError::UnsupportedMutation`]; nothing is ever partially applied.
pub trait MutableCollection<T> {
    fn add(&mut self, value: T) -> Result<bool, RingError>;

    fn remove(&mut self, value: &T) -> Result<bool, RingError>;

    fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<bool, RingError>;

    fn remove_all(&mut self, values: &[T]) -> Result<bool, RingError>;

    fn retain_all(&mut self, values: &[T]) -> Result<bool, RingError>;

    fn clear(&mut self) -> Result<(), RingError>;
}

// ---------------------------------------------------------------------------
// RingBuffer implementations
// ---------------------------------------------------------------------------

impl<T, S> RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    fn integer_key<K: LookupKey + ?Sized>(&self, key: &K) -> Option<i64> {
        let modulus = self.capacity().max(1) as u64;
        key.reduce(modulus).map(|i| i as i64)
    }

    fn require_integer_key<K: LookupKey + ?Sized>(&self, key: &K) -> Result<i64, RingError> {
        self.integer_key(key).ok_or_else(|| {
            debug!(?key, "rejected non-integer key");
            RingError::invalid_key(key)
        })
    }
}

impl<T, S> Indexable<T> for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    #[inline]
    fn slot_count(&self) -> usize {
        self.capacity()
    }

    #[inline]
    fn nth(&self, i: i64) -> Option<&T> {
        self.get(i)
    }

    #[inline]
    fn nth_or<'a>(&'a self, i: i64, default: Option<&'a T>) -> Option<&'a T> {
        self.get_or(i, default)
    }
}

impl<T, S> Associative<T> for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    fn contains_key<K: LookupKey + ?Sized>(&self, key: &K) -> bool {
        key.reduce(1).is_some()
    }

    fn entry_at<K: LookupKey + ?Sized>(&self, key: &K) -> Option<(i64, Option<&T>)> {
        let i = self.integer_key(key)?;
        Some((i, self.get(i)))
    }

    fn value_at<K: LookupKey + ?Sized>(&self, key: &K) -> Option<Option<&T>> {
        self.integer_key(key).map(|i| self.get(i))
    }

    fn value_at_or<'a, K: LookupKey + ?Sized>(
        &'a self,
        key: &K,
        default: Option<&'a T>,
    ) -> Option<&'a T> {
        match self.integer_key(key) {
            Some(i) => self.get(i),
            None => default,
        }
    }

    fn assoc<K: LookupKey + ?Sized>(&self, key: &K, value: T) -> Result<Self, RingError> {
        let i = self.require_integer_key(key)?;
        Ok(self.set_at(i, value))
    }
}

impl<T, S> Invocable<T> for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    fn invoke<K: LookupKey + ?Sized>(&self, key: &K) -> Result<Option<&T>, RingError> {
        let i = self.require_integer_key(key)?;
        Ok(self.get(i))
    }
}

impl<T, S> ForwardIterable for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    type Item = T;
    type Iter<'a>
        = Forward<'a, T, S>
    where
        Self: 'a;

    fn iter_forward(&self) -> Self::Iter<'_> {
        self.forward()
    }
}

impl<T, S> ReverseIterable for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    type Item = T;
    type Iter<'a>
        = Reverse<'a, T, S>
    where
        Self: 'a;

    fn iter_reverse(&self) -> Self::Iter<'_> {
        self.reverse()
    }
}

fn reject<R>(operation: &'static str) -> Result<R, RingError> {
    trace!(operation, "rejected in-place mutation");
    Err(RingError::unsupported(operation))
}

impl<T, S> MutableCollection<T> for RingBuffer<T, S>
where
    S: SlotStore<Item = T>,
{
    fn add(&mut self, _value: T) -> Result<bool, RingError> {
        reject("add")
    }

    fn remove(&mut self, _value: &T) -> Result<bool, RingError> {
        reject("remove")
    }

    fn add_all<I: IntoIterator<Item = T>>(&mut self, _values: I) -> Result<bool, RingError> {
        reject("add_all")
    }

    fn remove_all(&mut self, _values: &[T]) -> Result<bool, RingError> {
        reject("remove_all")
    }

    fn retain_all(&mut self, _values: &[T]) -> Result<bool, RingError> {
        reject("retain_all")
    }

    fn clear(&mut self) -> Result<(), RingError> {
        reject("clear")
    }
}
