//! Domain types shared by the persistence and HTTP layers.

pub mod example_model;
pub mod macros;

pub use example_model::*;
