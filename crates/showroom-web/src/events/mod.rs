pub mod keyboard;
pub mod pointer;
pub mod scroll;

pub use keyboard::wire_keyboard;
pub use pointer::{wire_pointer_handlers, wire_wheel};
pub use scroll::wire_scroll;
