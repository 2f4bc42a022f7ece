pub mod shared;
pub mod traits;

pub use shared::SharedSlots;
pub use traits::SlotStore;
