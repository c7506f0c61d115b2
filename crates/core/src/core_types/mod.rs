//! Core types and utilities

pub mod fuel;
pub mod indices;
pub mod units;
pub mod weather;

pub use fuel::*;
pub use indices::*;
pub use units::*;
pub use weather::*;
