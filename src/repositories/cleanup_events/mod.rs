pub mod cleanup_event_repo;
pub mod take_part_repo;

pub use cleanup_event_repo::*;
pub use take_part_repo::*;
