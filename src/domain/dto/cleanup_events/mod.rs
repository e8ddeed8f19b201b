pub mod request;
pub mod query;
pub mod response;

pub use request::*;
pub use query::*;
pub use response::*;
