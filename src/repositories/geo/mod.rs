pub mod settlement_repo;

pub use settlement_repo::*;
