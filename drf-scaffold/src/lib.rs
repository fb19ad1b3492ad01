//! drf-scaffold library
//!
//! Creates a Django REST Framework app from a template directory, optionally
//! generates a model with its serializer, viewset and routes, and registers
//! the app in the project's route table and `LOCAL_APPS`.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod templates;

pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use scaffold::{EntitySpec, ModuleDescriptor, Placement, ScaffoldPlan};
