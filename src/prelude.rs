pub use crate::builder::RingBufferBuilder;
pub use crate::ds::{Forward, IntoIter, Metadata, Reverse, RingBuffer};
pub use crate::error::RingError;
pub use crate::store::{SharedSlots, SlotStore};
pub use crate::traits::{
    Associative, ForwardIterable, Indexable, Invocable, LookupKey, MutableCollection,
    ReverseIterable,
};
