//! # Storage Module
//!
//! Persistence for participants, the region hierarchy, academic records,
//! contributions and event settings.
//!
//! Services depend on the traits in [`traits`]; the only backend is a
//! directory of CSV files plus one YAML document, see [`csv`].

pub mod csv;
pub mod traits;

pub use traits::*;
