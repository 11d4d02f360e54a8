pub mod booking;
pub mod health;
pub mod site;
pub mod waitlist;
