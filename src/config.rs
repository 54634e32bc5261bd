//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive the engine,
//! the library scanner, logging and the player screen.

mod load;
mod schema;

pub use schema::*;
