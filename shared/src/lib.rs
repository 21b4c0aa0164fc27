//! Shared decision core for the dive safety assistant
//!
//! Pure, synchronous classification of location, weather, tide, typhoon and
//! vital-sign readings into alert decisions. Fetching, rendering and
//! notification delivery live outside this crate.

pub mod cooldown;
pub mod evaluators;
pub mod geo;
pub mod models;
pub mod types;
pub mod validation;

pub use cooldown::*;
pub use evaluators::*;
pub use geo::*;
pub use models::*;
pub use types::*;
pub use validation::*;
