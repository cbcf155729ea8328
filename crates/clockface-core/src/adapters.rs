//! Concrete implementations of the ports declared in `clockface_proto::ports`.

pub mod system_clock;
