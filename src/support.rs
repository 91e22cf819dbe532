//! Supporting utilities used by the balance models.
//!
//! - [`constraint`]: construction-time numeric invariants
//! - [`energy`]: first-law arithmetic (sensible, latent, metabolic heat; COP and efficiency duties)
//! - [`units`]: extensions to [`uom`]

pub mod constraint;
pub mod energy;
pub mod units;
