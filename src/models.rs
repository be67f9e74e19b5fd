//! Public models.
//!
//! A model wraps an engine from [`crate::support`] behind validated,
//! unit-aware inputs and a single derived snapshot of results.
//!
//! Each model has an internal `core` submodule holding its aggregate, config
//! and result types, which the model module re-exports. Its
//! [`twine_core::Model`] implementation only forwards to that core.

pub mod thermal;
