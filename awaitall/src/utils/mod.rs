//! Small helpers shared by the runtime and the join core.

mod panic;
mod waker_slot;

pub(crate) use panic::panic_message;
pub(crate) use waker_slot::WakerSlot;
