//! ringkit: persistent fixed-capacity ring buffers.
//!
//! Every write returns a new buffer that shares untouched slots with the old
//! one, so historical snapshots stay valid and can be shared across threads.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod prelude;
pub mod store;
pub mod traits;
