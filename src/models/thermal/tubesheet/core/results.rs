use std::sync::Arc;

use uom::si::f64::Length;

use crate::support::tubesheet::TubeField;

/// Derived quantities of a tubesheet layout.
///
/// Every field is empty when the config has no driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TubeSheetResults {
    /// Smallest shell inner diameter holding the target count.
    pub min_id: Option<Length>,

    /// Number of tubes in the tube field.
    pub num_tubes: usize,

    /// Tube centres, in millimetres from the shell centre.
    pub tube_field: Option<Arc<TubeField>>,

    /// Outer tube limit of the tube field.
    pub otl: Option<Length>,
}
