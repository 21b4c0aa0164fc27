//! Alert decision logic
//!
//! Each evaluator is a pure function over already-decoded readings. Missing
//! or unparseable inputs yield no alert, never an error.

pub mod climate;
pub mod tide;
pub mod typhoon;

pub use climate::*;
pub use tide::*;
pub use typhoon::*;
