pub mod otp;

pub use otp::Otp;
