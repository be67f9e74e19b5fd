//! Minimum shell diameter for a target tube count.

mod config;
mod error;
mod search;

pub use config::MinIdConfig;
pub use error::MinIdError;

use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    rounding::round_up,
};

use super::{FieldCache, LayoutEngine, LayoutPattern, OffsetMode, TubeGeometry};

use search::Search;

impl<C: FieldCache> LayoutEngine<C> {
    /// Solves for the smallest shell diameter holding at least `min_tubes` tubes.
    ///
    /// A single tube needs `tube OD + clearance`, rounded up to the configured
    /// precision. Radial rings use the closed form
    /// `pitch / sin(π / N) + tube OD + clearance`, unrounded. Grid patterns run
    /// a bracketing search; if it fails, the search is retried with the target
    /// raised by one, up to `config.max_retries` times, so the result may hold
    /// more tubes than requested. Fields grow in steps of two or four, so that
    /// surplus can exceed the retry count. [`OffsetMode::Auto`] solves both
    /// fixed offsets and returns the smaller diameter.
    ///
    /// # Errors
    ///
    /// Returns [`MinIdError::SolverExhausted`] when every retry of a fixed-offset
    /// search fails, [`MinIdError::NoFeasibleLayout`] when both offsets fail
    /// under [`OffsetMode::Auto`], and [`MinIdError::Layout`] for layout errors
    /// other than an undersized shell.
    ///
    /// # Example
    ///
    /// ```
    /// use tubesheet_layout::support::{
    ///     constraint::StrictlyPositive,
    ///     tubesheet::{LayoutEngine, LayoutPattern, MinIdConfig, OffsetMode, TubeGeometry},
    /// };
    ///
    /// let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
    /// let engine = LayoutEngine::memoized();
    ///
    /// let min_id = engine
    ///     .min_shell_id(
    ///         StrictlyPositive::new(100).unwrap(),
    ///         &geometry,
    ///         LayoutPattern::Triangular30,
    ///         OffsetMode::Auto,
    ///         &MinIdConfig::default(),
    ///     )
    ///     .unwrap();
    ///
    /// let tubes = engine.tube_count(min_id, &geometry, LayoutPattern::Triangular30, OffsetMode::Auto);
    /// assert!(tubes >= 100);
    /// ```
    pub fn min_shell_id(
        &self,
        min_tubes: Constrained<usize, StrictlyPositive>,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
        config: &MinIdConfig,
    ) -> Result<f64, MinIdError> {
        let requested = min_tubes.into_inner();

        if requested == 1 {
            return Ok(round_up(
                geometry.tube_od() + geometry.clearance(),
                config.decimal_places,
            ));
        }

        if pattern.is_radial() {
            #[allow(clippy::cast_precision_loss)]
            let sides = requested as f64;
            return Ok(geometry.pitch() / (PI / sides).sin()
                + geometry.tube_od()
                + geometry.clearance());
        }

        if offset != OffsetMode::Auto {
            return self.search_with_retries(requested, geometry, pattern, offset, config);
        }

        let [no_offset, offset] = OffsetMode::FIXED
            .map(|fixed| self.search_with_retries(requested, geometry, pattern, fixed, config));

        match (offset, no_offset) {
            (Ok(with), Ok(without)) => {
                debug!(requested, %pattern, with, without, "solved both offsets");
                Ok(with.min(without))
            }
            (Ok(diameter), Err(_)) | (Err(_), Ok(diameter)) => Ok(diameter),
            (Err(offset), Err(no_offset)) => Err(MinIdError::NoFeasibleLayout {
                offset: Box::new(offset),
                no_offset: Box::new(no_offset),
            }),
        }
    }

    fn search_with_retries(
        &self,
        requested: usize,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
        config: &MinIdConfig,
    ) -> Result<f64, MinIdError> {
        let search = Search::new(self, geometry, pattern, offset, config);

        let mut last = match search.run(requested) {
            Ok(diameter) => return Ok(diameter),
            Err(error) => error,
        };

        for retry in 1..=config.max_retries {
            let target = requested + retry;
            warn!(
                error = %last,
                requested,
                target,
                %pattern,
                %offset,
                "min ID search failed, retrying with a larger target"
            );
            match search.run(target) {
                Ok(diameter) => return Ok(diameter),
                Err(error) => last = error,
            }
        }

        Err(MinIdError::SolverExhausted {
            requested,
            retries: config.max_retries,
            last: Box::new(last),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn tubes(n: usize) -> Constrained<usize, StrictlyPositive> {
        StrictlyPositive::new(n).unwrap()
    }

    fn grid_patterns() -> impl Iterator<Item = LayoutPattern> {
        LayoutPattern::ALL.into_iter().filter(|p| !p.is_radial())
    }

    #[test]
    fn single_tube_needs_its_own_diameter() {
        let engine = LayoutEngine::new();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();

        for pattern in LayoutPattern::ALL {
            let min_id = engine
                .min_shell_id(tubes(1), &geometry, pattern, OffsetMode::Auto, &MinIdConfig::default())
                .unwrap();
            assert_relative_eq!(min_id, 22.25);
        }

        let field = engine
            .try_tube_field(22.25, &geometry, LayoutPattern::Triangular30, OffsetMode::Auto)
            .unwrap();
        assert_eq!(field.len(), 1);
        assert_eq!(field[0], crate::support::tubesheet::Tube::new(0.0, 0.0));
    }

    #[test]
    fn radial_uses_the_closed_form() {
        let engine = LayoutEngine::new();
        let geometry = TubeGeometry::new(10.0, 1.25, 2.0).unwrap();

        let min_id = engine
            .min_shell_id(
                tubes(6),
                &geometry,
                LayoutPattern::Radial,
                OffsetMode::Auto,
                &MinIdConfig::default(),
            )
            .unwrap();

        assert_eq!(min_id, 12.5 / (PI / 6.0).sin() + 10.0 + 2.0);
        assert!(engine.tube_count(min_id, &geometry, LayoutPattern::Radial, OffsetMode::Auto) >= 6);
    }

    #[test]
    fn radial_pair_fits_at_its_minimum() {
        let engine = LayoutEngine::new();
        let geometry = TubeGeometry::new(10.0, 1.5, 1.0).unwrap();

        let min_id = engine
            .min_shell_id(
                tubes(2),
                &geometry,
                LayoutPattern::Radial,
                OffsetMode::Auto,
                &MinIdConfig::default(),
            )
            .unwrap();

        assert_relative_eq!(min_id, 26.0);
        assert_eq!(
            engine.tube_count(min_id, &geometry, LayoutPattern::Radial, OffsetMode::Auto),
            2
        );
    }

    /// Asserts that `min_id` holds `target` tubes and one grid step less does not.
    fn assert_minimal<C: FieldCache>(
        engine: &LayoutEngine<C>,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
        target: usize,
        min_id: f64,
    ) {
        let below = round_up(min_id - 1e-8, 8);

        assert!(
            engine.tube_count(min_id, geometry, pattern, offset) >= target,
            "{pattern} {offset} {target}: too few tubes at {min_id}"
        );
        assert!(
            engine.tube_count(below, geometry, pattern, offset) < target,
            "{pattern} {offset} {target}: {below} also holds enough tubes"
        );
    }

    #[test]
    fn results_are_minimal() {
        let config = MinIdConfig::default();

        for geometry in [
            TubeGeometry::new(19.05, 1.25, 3.2).unwrap(),
            TubeGeometry::new(25.4, 1.3, 6.0).unwrap(),
        ] {
            let engine = LayoutEngine::memoized();
            for pattern in grid_patterns() {
                for offset in [OffsetMode::NoOffset, OffsetMode::Offset, OffsetMode::Auto] {
                    for target in 2..=160 {
                        let min_id = engine
                            .min_shell_id(tubes(target), &geometry, pattern, offset, &config)
                            .unwrap_or_else(|error| {
                                panic!("{pattern} {offset} {target}: {error}")
                            });
                        assert_minimal(&engine, &geometry, pattern, offset, target, min_id);
                    }
                }
            }
        }
    }

    #[test]
    fn fifty_tube_square_shell_without_offset() {
        let engine = LayoutEngine::new();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        let (pattern, offset) = (LayoutPattern::Square90, OffsetMode::NoOffset);

        // The 57-tube field's limit sits just above 218.61290541, which holds
        // only 49 tubes.
        let min_id = engine
            .min_shell_id(tubes(50), &geometry, pattern, offset, &MinIdConfig::default())
            .unwrap();

        assert_relative_eq!(min_id, 218.612_905_42, epsilon = 1e-9);
        assert_eq!(engine.tube_count(min_id, &geometry, pattern, offset), 57);
        assert_eq!(engine.tube_count(218.612_905_41, &geometry, pattern, offset), 49);
    }

    #[test]
    fn auto_square_shell_is_minimal() {
        let engine = LayoutEngine::memoized();
        let geometry = TubeGeometry::new(25.4, 1.3, 6.0).unwrap();
        let (pattern, offset) = (LayoutPattern::Square90, OffsetMode::Auto);

        let min_id = engine
            .min_shell_id(tubes(130), &geometry, pattern, offset, &MinIdConfig::default())
            .unwrap();

        assert_relative_eq!(min_id, 454.262_324_64, epsilon = 1e-8);
        assert_minimal(&engine, &geometry, pattern, offset, 130, min_id);
    }

    #[test]
    fn auto_takes_the_smaller_offset_result() {
        let engine = LayoutEngine::memoized();
        let geometry = TubeGeometry::new(25.4, 1.3, 6.0).unwrap();
        let config = MinIdConfig::default();

        for pattern in grid_patterns() {
            let solve = |offset| {
                engine
                    .min_shell_id(tubes(30), &geometry, pattern, offset, &config)
                    .unwrap()
            };
            let expected = solve(OffsetMode::Offset).min(solve(OffsetMode::NoOffset));
            assert_eq!(solve(OffsetMode::Auto), expected);
        }
    }

    #[test]
    fn hundred_tube_triangular_shell() {
        let engine = LayoutEngine::memoized();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        let pattern = LayoutPattern::Triangular30;

        let min_id = engine
            .min_shell_id(tubes(100), &geometry, pattern, OffsetMode::Auto, &MinIdConfig::default())
            .unwrap();

        let count = engine.tube_count(min_id, &geometry, pattern, OffsetMode::Auto);
        let otl = engine
            .outer_tube_limit(min_id, &geometry, pattern, OffsetMode::Auto)
            .unwrap();

        assert!(count >= 100);
        assert!(otl < min_id);
        assert_relative_eq!(min_id - otl, 3.2, epsilon = 1e-6);
    }

    #[test]
    fn exhausted_search_reports_every_retry() {
        let engine = LayoutEngine::new();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        let config = MinIdConfig {
            max_iterations: 0,
            ..MinIdConfig::default()
        };

        let error = engine
            .min_shell_id(
                tubes(50),
                &geometry,
                LayoutPattern::Square90,
                OffsetMode::NoOffset,
                &config,
            )
            .unwrap_err();

        match error {
            MinIdError::SolverExhausted {
                requested,
                retries,
                last,
            } => {
                assert_eq!((requested, retries), (50, 5));
                assert!(matches!(
                    *last,
                    MinIdError::MaxIterationsExceeded { target: 55, .. }
                ));
            }
            other => panic!("expected an exhausted solver, got {other:?}"),
        }

        let auto = engine.min_shell_id(
            tubes(50),
            &geometry,
            LayoutPattern::Square90,
            OffsetMode::Auto,
            &config,
        );
        assert!(matches!(auto, Err(MinIdError::NoFeasibleLayout { .. })));
    }

    #[test]
    fn retry_with_a_larger_target_succeeds() {
        let engine = LayoutEngine::memoized();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        let (pattern, offset) = (LayoutPattern::Square90, OffsetMode::NoOffset);
        // A single iteration only succeeds when a starting guess holds the
        // target exactly, and the first centred square fields hold 1 and 5 tubes.
        let config = MinIdConfig {
            max_iterations: 1,
            ..MinIdConfig::default()
        };

        let search = Search::new(&engine, &geometry, pattern, offset, &config);
        for target in 2..=4 {
            assert!(matches!(
                search.run(target),
                Err(MinIdError::MaxIterationsExceeded { .. })
            ));
        }

        let min_id = engine
            .min_shell_id(tubes(2), &geometry, pattern, offset, &config)
            .unwrap();

        assert_eq!(min_id, search.run(5).unwrap());
        assert_relative_eq!(min_id, 69.875);
        assert_eq!(engine.tube_count(min_id, &geometry, pattern, offset), 5);
    }

    #[test]
    fn retried_result_can_exceed_the_retry_allowance() {
        let engine = LayoutEngine::memoized();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        let (pattern, offset) = (LayoutPattern::RotatedSquare45, OffsetMode::Offset);
        let config = MinIdConfig {
            max_iterations: 2,
            ..MinIdConfig::default()
        };

        let search = Search::new(&engine, &geometry, pattern, offset, &config);
        for target in 5..=7 {
            assert!(search.run(target).is_err(), "target {target} solved");
        }

        let min_id = engine
            .min_shell_id(tubes(5), &geometry, pattern, offset, &config)
            .unwrap();
        let count = engine.tube_count(min_id, &geometry, pattern, offset);

        // Offset fields grow in fours, so the smallest field holding 8 tubes holds 12.
        assert_eq!(min_id, search.run(8).unwrap());
        assert_eq!(count, 12);
        assert!(count > 5 + config.max_retries);
        assert_minimal(&engine, &geometry, pattern, offset, 8, min_id);
    }

    #[test]
    fn filled_shells_round_trip_through_the_minimum() {
        let engine = LayoutEngine::memoized();
        let geometry = TubeGeometry::new(19.05, 1.25, 3.2).unwrap();
        let config = MinIdConfig::default();

        for step in 0..=150 {
            let shell = 25.0 + 2.5 * f64::from(step);
            for pattern in LayoutPattern::ALL {
                for offset in [OffsetMode::NoOffset, OffsetMode::Offset, OffsetMode::Auto] {
                    let count = engine.tube_count(shell, &geometry, pattern, offset);
                    let Ok(count) = StrictlyPositive::new(count) else {
                        continue;
                    };

                    let min_id = engine
                        .min_shell_id(count, &geometry, pattern, offset, &config)
                        .unwrap();
                    assert!(min_id <= shell + 1e-8, "{pattern} {offset}: {min_id} > {shell}");
                    assert!(
                        engine.tube_count(min_id, &geometry, pattern, offset) >= count.into_inner()
                    );
                }
            }
        }
    }
}
