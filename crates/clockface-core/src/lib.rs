pub mod adapters;
pub mod config;
pub mod event_bus;
pub mod face;
pub mod face_context;
pub mod timer;

mod test_utils;
