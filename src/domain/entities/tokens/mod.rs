pub mod blacklist_token;

pub use blacklist_token::*;
