//! Port definitions consumed by the clock face.
//!
//! The component never talks to a renderer or to the operating system clock
//! directly; hosts hand it implementations of these contracts instead.

pub mod surface;
pub mod wall_clock;
