pub(crate) mod hash_cell;
pub mod ring_buffer;

pub use ring_buffer::{Forward, IntoIter, Metadata, Reverse, RingBuffer};
