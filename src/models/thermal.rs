//! Thermal systems models.
//!
//! This module contains models for thermal equipment, currently the tubesheet
//! layout of shell-and-tube heat exchangers.

pub mod tubesheet;
