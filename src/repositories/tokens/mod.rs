pub mod blacklist_token_repo;

pub use blacklist_token_repo::*;
