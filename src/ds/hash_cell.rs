use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free memo cell for a derived hash value.
///
/// `0` means "not computed yet". The cached value must be a pure function of
/// the owning (immutable) value, so concurrent first calls may each compute
/// it and store the same result; the last store wins and nothing is lost.
/// A computed value of `0` is never cached and is recomputed on every call.
#[repr(transparent)]
#[derive(Debug, Default)]
pub(crate) struct HashCell(AtomicU64);

impl HashCell {
    #[inline]
    pub(crate) fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Creates a cell already holding `value` (or empty if `value == 0`).
    #[inline]
    pub(crate) fn with_value(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    /// Returns the cached value, if any.
    #[inline]
    pub(crate) fn cached(&self) -> Option<u64> {
        match self.0.load(Ordering::Relaxed) {
            0 => None,
            value => Some(value),
        }
    }

    #[inline]
    pub(crate) fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        if let Some(value) = self.cached() {
            return value;
        }
        let value = compute();
        self.0.store(value, Ordering::Relaxed);
        value
    }
}

impl Clone for HashCell {
    fn clone(&self) -> Self {
        Self::with_value(self.0.load(Ordering::Relaxed))
    }
}
