pub mod booking;
pub mod events;
pub mod health;
pub mod room;
pub mod stats;
