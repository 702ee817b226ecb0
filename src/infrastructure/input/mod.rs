//! Global keyboard input adapters

pub mod keycodes;
mod rdev_listener;

pub use rdev_listener::spawn_listener;
