//! Bracketing search for the smallest shell holding a target tube count.
//!
//! Every guess is snapped down to `OTL + clearance` of the field it produced,
//! which is the smallest shell that still holds that field. The search then
//! widens, narrows or bisects between guesses until it holds a field of at
//! least the target size, and finally walks down the diameter grid from there
//! until one more step would drop under the target.

use tracing::trace;

use crate::support::{
    rounding::round_up,
    tubesheet::{
        FieldCache, LayoutEngine, LayoutError, LayoutPattern, OffsetMode, TubeGeometry,
        otl::outer_tube_limit,
    },
};

use super::{MinIdConfig, MinIdError};

/// Packing density assumed when seeding triangular layouts.
const TRIANGULAR_DENSITY: f64 = 0.84;

/// Packing density assumed when seeding square layouts.
const SQUARE_DENSITY: f64 = 0.61;

/// Margin added to the smallest plausible seed diameter, in millimetres.
const SEED_MARGIN: f64 = 0.1;

/// One evaluated shell diameter.
#[derive(Debug, Clone, Copy)]
struct Guess {
    /// Diameter the field was generated at.
    diameter: f64,

    /// `OTL + clearance` of the field, or `diameter` for an empty field.
    shell: f64,

    /// Tubes in the field.
    tubes: usize,
}

/// A fixed-offset grid search over one geometry.
pub(super) struct Search<'a, C> {
    engine: &'a LayoutEngine<C>,
    geometry: &'a TubeGeometry,
    pattern: LayoutPattern,
    offset: OffsetMode,
    config: &'a MinIdConfig,
}

impl<'a, C: FieldCache> Search<'a, C> {
    pub(super) fn new(
        engine: &'a LayoutEngine<C>,
        geometry: &'a TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
        config: &'a MinIdConfig,
    ) -> Self {
        Self {
            engine,
            geometry,
            pattern,
            offset,
            config,
        }
    }

    /// Finds the smallest grid diameter holding at least `target` tubes.
    pub(super) fn run(&self, target: usize) -> Result<f64, MinIdError> {
        let beta = self.config.beta;
        let mut old = self.first_feasible(target)?;
        let mut new = self.evaluate(old.shell * beta)?;
        let mut best: Option<Guess> = None;

        for iteration in 0..self.config.max_iterations {
            if let Some(exact) = [old, new].into_iter().find(|guess| guess.tubes == target) {
                return self.descend(exact.shell, target);
            }

            for guess in [old, new] {
                if guess.tubes > target && best.is_none_or(|best| guess.shell < best.shell) {
                    best = Some(guess);
                }
            }

            if iteration > 0 {
                if let Some(over) = best {
                    return self.descend(over.shell, target);
                }
            }

            trace!(
                iteration,
                target,
                old_diameter = old.diameter,
                old_tubes = old.tubes,
                new_diameter = new.diameter,
                new_tubes = new.tubes,
                best = ?best.map(|best| best.shell),
                "min ID search step"
            );

            (old, new) = match (old.tubes < target, new.tubes < target) {
                (true, true) => {
                    let larger = if new.diameter >= old.diameter { new } else { old };
                    (larger, self.evaluate(larger.diameter * beta)?)
                }
                (false, false) => {
                    let smaller = best.unwrap_or(if new.shell <= old.shell { new } else { old });
                    (smaller, self.evaluate(smaller.shell / beta)?)
                }
                _ => {
                    let (under, over) = if old.tubes < target { (old, new) } else { (new, old) };
                    let over = best.filter(|best| best.shell < over.shell).unwrap_or(over);
                    let mid = self.evaluate((under.diameter + over.shell) / 2.0)?;
                    if mid.tubes < target { (mid, over) } else { (under, mid) }
                }
            };
        }

        Err(MinIdError::MaxIterationsExceeded {
            target,
            iterations: self.config.max_iterations,
            best: best.map(|best| self.round(best.shell)),
        })
    }

    /// Seeds from a packing-density estimate and grows until a tube fits.
    fn first_feasible(&self, target: usize) -> Result<Guess, MinIdError> {
        let mut diameter = self.seed(target);

        for _ in 0..=self.config.max_iterations {
            let guess = self.evaluate(diameter)?;
            if guess.tubes > 0 {
                return Ok(guess);
            }
            diameter *= self.config.beta;
        }

        Err(MinIdError::MaxIterationsExceeded {
            target,
            iterations: self.config.max_iterations,
            best: None,
        })
    }

    fn seed(&self, target: usize) -> f64 {
        let pitch = self.geometry.pitch();
        let tube_od = self.geometry.tube_od();
        let clearance = self.geometry.clearance();

        let triangular = matches!(
            self.pattern,
            LayoutPattern::Triangular30 | LayoutPattern::RotatedTriangular60
        );
        let density = if triangular {
            TRIANGULAR_DENSITY
        } else {
            SQUARE_DENSITY
        };

        let smallest = match (self.offset, triangular) {
            (OffsetMode::Offset, true) => 2.0 * pitch,
            (OffsetMode::Offset, false) => 2.0 * pitch.hypot(pitch / 2.0),
            _ => tube_od,
        };

        #[allow(clippy::cast_precision_loss)]
        let estimate = pitch * (target as f64 / density).sqrt() + clearance;
        estimate.max(smallest + clearance + SEED_MARGIN)
    }

    /// Walks down the diameter grid from `round(shell)` to the smallest point
    /// that still holds `target` tubes.
    ///
    /// `shell` must hold at least `target` tubes. Each step either lands on a
    /// strictly smaller field or stops, so the walk always terminates.
    fn descend(&self, shell: f64, target: usize) -> Result<f64, MinIdError> {
        let step = self.config.step();
        let mut candidate = self.round(shell);

        loop {
            let next = self.round(candidate - step);
            if next <= 0.0 || next >= candidate {
                return Ok(candidate);
            }

            let below = self.evaluate(next)?;
            if below.tubes < target {
                return Ok(candidate);
            }

            trace!(target, candidate, next, tubes = below.tubes, "min ID descent step");

            // The snapped shell can round back up to `candidate` when it sits
            // within the fit tolerance above `next`.
            candidate = self.round(below.shell).min(next);
        }
    }

    fn evaluate(&self, diameter: f64) -> Result<Guess, MinIdError> {
        let empty = Guess {
            diameter,
            shell: diameter,
            tubes: 0,
        };

        match self
            .engine
            .try_tube_field(diameter, self.geometry, self.pattern, self.offset)
        {
            Ok(field) if field.is_empty() => Ok(empty),
            Ok(field) => {
                let otl = outer_tube_limit(&field, self.geometry.tube_od())?;
                Ok(Guess {
                    diameter,
                    shell: otl + self.geometry.clearance(),
                    tubes: field.len(),
                })
            }
            Err(LayoutError::GeometryInfeasible { .. }) => Ok(empty),
            Err(error) => Err(error.into()),
        }
    }

    fn round(&self, diameter: f64) -> f64 {
        round_up(diameter, self.config.decimal_places)
    }
}
