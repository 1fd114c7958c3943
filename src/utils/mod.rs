//! # Utilities Module
//!
//! Graph analysis helpers for checking the structure of a carved grid.

pub mod connectivity;

pub use connectivity::*;
