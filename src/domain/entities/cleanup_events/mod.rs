pub mod cleanup_event;
pub mod event_parts;

pub use cleanup_event::*;
pub use event_parts::*;
