//! Error types for the ringkit library.
//!
//! ## Key Components
//!
//! - [`RingError::InvalidKey`]: a non-integer key was passed to associative or
//!   function-call style access.
//! - [`RingError::SizeMismatch`]: a pre-populated slot store is longer than
//!   the declared capacity.
//! - [`RingError::UnsupportedMutation`]: an in-place mutation was requested
//!   through [`MutableCollection`](crate::traits::MutableCollection).
//!
//! Every error is a caller contract violation reported at the offending call.
//! Buffers are immutable, so no error ever leaves a partially applied change.
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::ds::RingBuffer;
//! use ringkit::error::RingError;
//!
//! let slots = vec![Some(1), Some(2), Some(3)];
//! let err = RingBuffer::try_from_slots(slots, 2).unwrap_err();
//! assert_eq!(err, RingError::SizeMismatch { len: 3, capacity: 2 });
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

/// Error returned by fallible ring buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// A key that is not an integer was used as a logical index.
    InvalidKey {
        /// Debug rendering of the rejected key.
        key: String,
    },
    /// A slot store of `len` entries cannot back a buffer of `capacity` slots.
    SizeMismatch { len: usize, capacity: usize },
    /// An in-place mutation was attempted on an immutable buffer.
    UnsupportedMutation { operation: &'static str },
}

impl RingError {
    /// Creates an [`InvalidKey`](Self::InvalidKey) error for `key`.
    #[inline]
    pub fn invalid_key(key: impl fmt::Debug) -> Self {
        Self::InvalidKey {
            key: format!("{key:?}"),
        }
    }

    /// Creates an [`UnsupportedMutation`](Self::UnsupportedMutation) error.
    #[inline]
    pub fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedMutation { operation }
    }

    /// Returns `true` for [`InvalidKey`](Self::InvalidKey).
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }

    /// Returns `true` for [`SizeMismatch`](Self::SizeMismatch).
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }

    /// Returns `true` for [`UnsupportedMutation`](Self::UnsupportedMutation).
    pub fn is_unsupported_mutation(&self) -> bool {
        matches!(self, Self::UnsupportedMutation { .. })
    }
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey { key } => write!(f, "key must be an integer, got {key}"),
            Self::SizeMismatch { len, capacity } => write!(
                f,
                "slot store of length {len} exceeds buffer capacity {capacity}"
            ),
            Self::UnsupportedMutation { operation } => {
                write!(f, "`{operation}` is not supported on an immutable ring buffer")
            },
        }
    }
}

impl std::error::Error for RingError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
