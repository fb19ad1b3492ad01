//! CLI command implementations

pub mod startapp;

pub use startapp::{EntityArgs, StartAppCommand};
