//! World Setup
//!
//! World initialization and entity spawning.

pub mod population;

pub use population::*;
