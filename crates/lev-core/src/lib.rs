pub mod booking;
pub mod config;
pub mod email;
pub mod error;
pub mod waitlist;

pub use email::Email;
pub use error::{LevError, Result};
