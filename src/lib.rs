//! # Sophorolipid Energy
//!
//! Batch-level electrical and thermal energy balance of a sophorolipid
//! (biosurfactant) production process.
//!
//! ## Crate layout
//!
//! - [`models`]: The batch balance and its [`twine_core::Model`] adapter.
//! - [`support`]: Numeric constraints, unit extensions and the energy
//!   arithmetic the balance is built from.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: stage totals and table updates
//! at `debug`, failed validation checks at `warn`. No logger is installed.

pub mod models;
pub mod support;
