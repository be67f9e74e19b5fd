//! # Tubesheet Layout
//!
//! Tube field packing for shell-and-tube heat exchanger tubesheets.
//!
//! Given a tube outer diameter, a pitch ratio and the diametrical clearance
//! between the outer tube limit (OTL) and the shell, this crate either counts
//! the tubes that fit a given shell or solves for the smallest shell that
//! holds a target number of tubes.
//! Five pitch layouts are supported: 30°, 45°, 60° and 90° grids, plus a
//! single radial ring.
//!
//! ## Crate layout
//!
//! - [`models`]: The tubesheet layout aggregate and its [`twine_core::Model`] adapter.
//! - [`support`]: The layout engine, rounding and formatting helpers, and the
//!   vector drawing model used to export layouts.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
