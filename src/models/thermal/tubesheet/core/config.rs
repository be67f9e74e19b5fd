use uom::si::{f64::Length, length::millimeter};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    tubesheet::{LayoutError, LayoutPattern, TubeGeometry, pitch_ratio_from_ligament},
};

/// Inputs to a tubesheet layout.
///
/// The tube geometry is always required. The computation is driven by a
/// target tube count, a fixed shell diameter, or both:
///
/// - With only `min_tubes`, the shell is sized to hold at least that many tubes.
/// - With only `shell_id`, the shell is filled with as many tubes as fit.
/// - With both, the shell fixes the tube field and `min_tubes` still sizes
///   the reported minimum diameter.
/// - With neither, every result is empty.
///
/// Every setter validates its input, so a config can never hold an invalid value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSheetConfig {
    geometry: TubeGeometry,
    pattern: LayoutPattern,
    min_tubes: Option<Constrained<usize, StrictlyPositive>>,
    shell_id: Option<Constrained<Length, StrictlyPositive>>,
}

impl TubeSheetConfig {
    /// Creates a config with no driver set.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if the clearance is negative,
    /// the tube OD is not strictly positive, or the pitch ratio is below one.
    pub fn new(
        clearance: Length,
        tube_od: Length,
        pitch_ratio: f64,
        pattern: LayoutPattern,
    ) -> Result<Self, LayoutError> {
        let geometry = TubeGeometry::new(mm(tube_od), pitch_ratio, mm(clearance))?;
        Ok(Self {
            geometry,
            pattern,
            min_tubes: None,
            shell_id: None,
        })
    }

    /// Sets the target tube count.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if `min_tubes` is zero.
    pub fn with_min_tubes(self, min_tubes: usize) -> Result<Self, LayoutError> {
        let min_tubes = StrictlyPositive::new(min_tubes).map_err(|source| {
            LayoutError::InvalidParameter {
                parameter: "minimum tube count",
                source,
            }
        })?;
        Ok(Self {
            min_tubes: Some(min_tubes),
            ..self
        })
    }

    /// Sets a fixed shell inner diameter.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if `shell_id` is not strictly positive.
    pub fn with_shell_id(self, shell_id: Length) -> Result<Self, LayoutError> {
        let shell_id =
            StrictlyPositive::new(shell_id).map_err(|source| LayoutError::InvalidParameter {
                parameter: "shell ID",
                source,
            })?;
        Ok(Self {
            shell_id: Some(shell_id),
            ..self
        })
    }

    /// Clears the target tube count.
    #[must_use]
    pub fn without_min_tubes(self) -> Self {
        Self {
            min_tubes: None,
            ..self
        }
    }

    /// Clears the fixed shell diameter.
    #[must_use]
    pub fn without_shell_id(self) -> Self {
        Self {
            shell_id: None,
            ..self
        }
    }

    #[must_use]
    pub fn with_pattern(self, pattern: LayoutPattern) -> Self {
        Self { pattern, ..self }
    }

    /// Sets the OTL clearance.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if `clearance` is negative.
    pub fn with_clearance(self, clearance: Length) -> Result<Self, LayoutError> {
        let geometry = TubeGeometry::new(
            self.geometry.tube_od(),
            self.geometry.pitch_ratio(),
            mm(clearance),
        )?;
        Ok(Self { geometry, ..self })
    }

    /// Sets the tube outer diameter, keeping the pitch ratio.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if `tube_od` is not strictly positive.
    pub fn with_tube_od(self, tube_od: Length) -> Result<Self, LayoutError> {
        let geometry = TubeGeometry::new(
            mm(tube_od),
            self.geometry.pitch_ratio(),
            self.geometry.clearance(),
        )?;
        Ok(Self { geometry, ..self })
    }

    /// Sets the pitch ratio.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if `pitch_ratio` is below one.
    pub fn with_pitch_ratio(self, pitch_ratio: f64) -> Result<Self, LayoutError> {
        let geometry = TubeGeometry::new(
            self.geometry.tube_od(),
            pitch_ratio,
            self.geometry.clearance(),
        )?;
        Ok(Self { geometry, ..self })
    }

    /// Sets the pitch through the ligament, the gap between adjacent tubes.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] if `ligament` is negative.
    pub fn with_ligament(self, ligament: Length) -> Result<Self, LayoutError> {
        let pitch_ratio = pitch_ratio_from_ligament(mm(ligament), self.geometry.tube_od())?;
        self.with_pitch_ratio(pitch_ratio)
    }

    /// Validated geometry in millimetres.
    #[must_use]
    pub fn geometry(&self) -> &TubeGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn pattern(&self) -> LayoutPattern {
        self.pattern
    }

    #[must_use]
    pub fn min_tubes(&self) -> Option<usize> {
        self.min_tubes.map(Constrained::into_inner)
    }

    #[must_use]
    pub fn shell_id(&self) -> Option<Length> {
        self.shell_id.map(Constrained::into_inner)
    }

    #[must_use]
    pub fn clearance(&self) -> Length {
        length(self.geometry.clearance())
    }

    #[must_use]
    pub fn tube_od(&self) -> Length {
        length(self.geometry.tube_od())
    }

    #[must_use]
    pub fn pitch_ratio(&self) -> f64 {
        self.geometry.pitch_ratio()
    }

    #[must_use]
    pub fn pitch(&self) -> Length {
        length(self.geometry.pitch())
    }

    #[must_use]
    pub fn ligament(&self) -> Length {
        length(self.geometry.ligament())
    }

    pub(super) fn min_tubes_constrained(&self) -> Option<Constrained<usize, StrictlyPositive>> {
        self.min_tubes
    }

    pub(super) fn shell_id_mm(&self) -> Option<f64> {
        self.shell_id().map(mm)
    }
}

pub(super) fn mm(length: Length) -> f64 {
    length.get::<millimeter>()
}

pub(super) fn length(mm: f64) -> Length {
    Length::new::<millimeter>(mm)
}
