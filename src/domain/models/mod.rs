pub mod auth;
pub mod token;
pub mod geocoding;

pub use auth::*;
pub use token::*;
pub use geocoding::*;
