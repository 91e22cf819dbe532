//! Public models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the computation and domain logic live. The `core` module is an
//! implementation detail; the parent module re-exports the types callers need.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that delegates to
//! the model's core API.

pub mod bioprocess;
