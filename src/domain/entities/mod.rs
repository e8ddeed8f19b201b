pub mod users;
pub mod tokens;
pub mod otp;
pub mod cleanup_events;
pub mod geo;
