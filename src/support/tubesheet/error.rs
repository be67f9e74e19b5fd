use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while generating or measuring a tube field.
///
/// All lengths are in millimetres.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An input violated its numeric precondition.
    ///
    /// Raised before any field generation or iteration begins.
    #[error("invalid {parameter}: {source}")]
    InvalidParameter {
        /// Name of the offending input.
        parameter: &'static str,

        /// The violated constraint.
        #[source]
        source: ConstraintError,
    },

    /// The layout pattern is not recognised or has no grid step.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A single tube does not fit inside the maximum OTL of the shell.
    #[error("tube OD {tube_od} exceeds the maximum OTL {max_otl}")]
    GeometryInfeasible {
        /// Tube outer diameter.
        tube_od: f64,

        /// Shell diameter less the OTL clearance.
        max_otl: f64,
    },

    /// The radial ring cannot place two tubes a pitch apart.
    #[error("radial ring needs a pitch of at most {span}, got {pitch}")]
    RadialInfeasible {
        /// Centre-to-centre tube pitch.
        pitch: f64,

        /// Largest ring diameter available to tube centres.
        span: f64,
    },

    /// The field is empty or degenerate, so it has no OTL.
    #[error("tube field is empty or degenerate")]
    InvalidField,
}
