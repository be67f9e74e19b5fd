//! Validated tube geometry shared by every layout computation.
//!
//! All lengths are in millimetres.

use std::cmp::Ordering;

use crate::support::constraint::{
    Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive,
};

use super::LayoutError;

/// Decimal places kept for shell diameters.
pub const DIAMETER_DECIMAL_PLACES: i32 = 8;

/// Slack allowed when testing whether a tube fits inside an OTL.
///
/// Ten times finer than the shell diameter grid, so a diameter rebuilt from a
/// field's OTL always holds that same field.
pub const FIT_TOLERANCE: f64 = 1e-9;

/// Marker type enforcing a pitch ratio of at least one.
///
/// A pitch ratio below one would overlap adjacent tubes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NoOverlap;

impl Constraint<f64> for NoOverlap {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        match value.partial_cmp(&1.0) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::BelowMinimum),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// A pitch ratio of at least one.
pub type PitchRatio = Constrained<f64, NoOverlap>;

/// Tube size, spacing and shell clearance.
///
/// Construction checks every precondition up front so layout and solver code
/// can rely on a strictly positive tube OD, a pitch ratio of at least one and
/// a non-negative clearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeGeometry {
    tube_od: f64,
    pitch_ratio: f64,
    clearance: f64,
}

impl TubeGeometry {
    /// Validates and bundles the tube geometry.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if the tube OD is not strictly
    /// positive, the pitch ratio is below one, or the clearance is negative.
    pub fn new(tube_od: f64, pitch_ratio: f64, clearance: f64) -> Result<Self, LayoutError> {
        let tube_od = StrictlyPositive::new(tube_od).map_err(invalid("tube OD"))?;
        let pitch_ratio = PitchRatio::new(pitch_ratio).map_err(invalid("pitch ratio"))?;
        let clearance = NonNegative::new(clearance).map_err(invalid("OTL clearance"))?;
        Ok(Self::from_constrained(tube_od, pitch_ratio, clearance))
    }

    /// Bundles pre-validated values.
    #[must_use]
    pub fn from_constrained(
        tube_od: Constrained<f64, StrictlyPositive>,
        pitch_ratio: PitchRatio,
        clearance: Constrained<f64, NonNegative>,
    ) -> Self {
        Self {
            tube_od: tube_od.into_inner(),
            pitch_ratio: pitch_ratio.into_inner(),
            clearance: clearance.into_inner(),
        }
    }

    /// Tube outer diameter.
    #[must_use]
    pub fn tube_od(&self) -> f64 {
        self.tube_od
    }

    /// Ratio of pitch to tube outer diameter.
    #[must_use]
    pub fn pitch_ratio(&self) -> f64 {
        self.pitch_ratio
    }

    /// Diametrical clearance between the OTL and the shell.
    #[must_use]
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Centre-to-centre spacing of adjacent tubes.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.tube_od * self.pitch_ratio
    }

    /// Gap between the walls of adjacent tubes.
    #[must_use]
    pub fn ligament(&self) -> f64 {
        self.pitch() - self.tube_od
    }

    /// Returns the largest OTL a shell of `shell_id` allows.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] for a non-positive shell ID and
    /// [`LayoutError::GeometryInfeasible`] when not even one tube fits.
    pub fn max_otl(&self, shell_id: f64) -> Result<f64, LayoutError> {
        let shell_id = StrictlyPositive::new(shell_id).map_err(invalid("shell ID"))?;
        let max_otl = shell_id.into_inner() - self.clearance;

        if self.tube_od > max_otl + FIT_TOLERANCE {
            return Err(LayoutError::GeometryInfeasible {
                tube_od: self.tube_od,
                max_otl,
            });
        }
        Ok(max_otl)
    }
}

/// Converts a ligament (wall-to-wall gap) into a pitch ratio.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidParameter`] if the tube OD is not strictly
/// positive or the ligament is negative.
pub fn pitch_ratio_from_ligament(ligament: f64, tube_od: f64) -> Result<f64, LayoutError> {
    let tube_od = StrictlyPositive::new(tube_od).map_err(invalid("tube OD"))?;
    let ligament = NonNegative::new(ligament).map_err(invalid("ligament"))?;
    Ok(1.0 + ligament.into_inner() / tube_od.into_inner())
}

pub(super) fn invalid(parameter: &'static str) -> impl Fn(ConstraintError) -> LayoutError {
    move |source| LayoutError::InvalidParameter { parameter, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn derived_lengths() {
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        assert_relative_eq!(geometry.pitch(), 23.8125);
        assert_relative_eq!(geometry.ligament(), 4.7625, epsilon = 1e-12);
        assert_relative_eq!(geometry.max_otl(500.0).unwrap(), 496.8);
    }

    #[test]
    fn rejects_bad_inputs() {
        let err = TubeGeometry::new(0.0, 1.25, 3.2).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidParameter {
                parameter: "tube OD",
                source: ConstraintError::Zero,
            }
        );

        assert!(matches!(
            TubeGeometry::new(19.05, 0.9, 3.2),
            Err(LayoutError::InvalidParameter {
                parameter: "pitch ratio",
                source: ConstraintError::BelowMinimum,
            })
        ));

        assert!(matches!(
            TubeGeometry::new(19.05, 1.25, -1.0),
            Err(LayoutError::InvalidParameter {
                parameter: "OTL clearance",
                ..
            })
        ));

        assert!(TubeGeometry::new(19.05, f64::NAN, 0.0).is_err());
        assert!(TubeGeometry::new(19.05, 1.0, 0.0).is_ok());
    }

    #[test]
    fn infeasible_shell() {
        let geometry = TubeGeometry::new(25.0, 1.25, 5.0).unwrap();

        assert!(matches!(
            geometry.max_otl(29.0),
            Err(LayoutError::GeometryInfeasible { .. })
        ));
        assert_relative_eq!(geometry.max_otl(30.0).unwrap(), 25.0);
        assert!(matches!(
            geometry.max_otl(-30.0),
            Err(LayoutError::InvalidParameter {
                parameter: "shell ID",
                ..
            })
        ));
    }

    #[test]
    fn ligament_round_trip() {
        let ratio = pitch_ratio_from_ligament(6.35, 25.4).unwrap();
        assert_relative_eq!(ratio, 1.25);

        let geometry = TubeGeometry::new(25.4, ratio, 0.0).unwrap();
        assert_relative_eq!(geometry.ligament(), 6.35, epsilon = 1e-12);

        assert!(pitch_ratio_from_ligament(-1.0, 25.4).is_err());
    }
}
