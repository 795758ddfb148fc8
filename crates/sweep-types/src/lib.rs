//! Shared types for the sweep settlement engine.
//!
//! This crate defines the signed sweep authorization (`SweepIntent`), the
//! settlement record emitted on success, the full error taxonomy of the
//! engine, and the TOML configuration validation utilities used by the
//! pluggable components.

pub mod errors;
pub mod intent;
pub mod record;
pub mod validation;

pub use errors::*;
pub use intent::*;
pub use record::*;
pub use validation::*;
