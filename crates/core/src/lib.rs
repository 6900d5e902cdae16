//! Core business logic for pairly.

pub mod services;

pub use services::*;
