//! Tubesheet layout and packing engine.
//!
//! This module places tubes of a given outer diameter inside a circular shell
//! and answers two questions:
//!
//! - How many tubes fit in a shell of a given diameter?
//! - What is the smallest shell that holds at least `N` tubes?
//!
//! # Overview
//!
//! The outer tube limit (OTL) is the smallest centred circle containing every
//! tube. A shell must leave a diametrical `clearance` beyond it, so tubes may
//! only be placed where `2·r + tube OD ≤ shell ID − clearance`.
//!
//! Four grid patterns ([`LayoutPattern::Triangular30`],
//! [`LayoutPattern::RotatedSquare45`], [`LayoutPattern::RotatedTriangular60`],
//! [`LayoutPattern::Square90`]) tile the shell and are generated from one
//! quadrant by reflection. [`LayoutPattern::Radial`] places a single ring.
//!
//! All lengths are plain `f64` millimetres. Shell diameters are compared on
//! an 8 decimal place grid ([`DIAMETER_DECIMAL_PLACES`]) and OTLs on an 11
//! decimal place grid ([`OTL_DECIMAL_PLACES`]).
//!
//! # Example
//!
//! ```
//! use tubesheet_layout::support::{
//!     constraint::StrictlyPositive,
//!     tubesheet::{
//!         LayoutEngine, LayoutPattern, MinIdConfig, OffsetMode, TubeGeometry,
//!         outer_tube_limit,
//!     },
//! };
//!
//! let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
//! let engine = LayoutEngine::memoized();
//! let pattern = LayoutPattern::Square90;
//!
//! let min_id = engine
//!     .min_shell_id(
//!         StrictlyPositive::new(20).unwrap(),
//!         &geometry,
//!         pattern,
//!         OffsetMode::Auto,
//!         &MinIdConfig::default(),
//!     )
//!     .unwrap();
//!
//! let field = engine.tube_field(min_id, &geometry, pattern, OffsetMode::Auto).unwrap();
//! assert!(field.len() >= 20);
//!
//! let otl = outer_tube_limit(&field, geometry.tube_od()).unwrap();
//! assert!(otl + geometry.clearance() <= min_id + 1e-8);
//! ```

mod cache;
mod error;
mod field;
pub mod geometry;
mod layout;
mod min_id;
mod offset;
mod otl;
mod tube;

pub use cache::{FieldCache, FieldKey, FieldOutcome, MemoCache, NoCache};
pub use error::LayoutError;
pub use field::LayoutEngine;
pub use geometry::{
    DIAMETER_DECIMAL_PLACES, FIT_TOLERANCE, NoOverlap, PitchRatio, TubeGeometry,
    pitch_ratio_from_ligament,
};
pub use layout::{LayoutConstants, LayoutPattern};
pub use min_id::{MinIdConfig, MinIdError};
pub use offset::OffsetMode;
pub use otl::{OTL_DECIMAL_PLACES, outer_tube_limit};
pub use tube::{Tube, TubeField};
