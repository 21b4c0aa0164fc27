//! Domain models for the dive safety assistant

mod alert;
mod health;
mod thresholds;
mod tide;
mod typhoon;
mod weather;

pub use alert::*;
pub use health::*;
pub use thresholds::*;
pub use tide::*;
pub use typhoon::*;
pub use weather::*;
