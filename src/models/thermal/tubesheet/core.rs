//! Tubesheet layout aggregate.
//!
//! [`TubeSheet`] binds a [`TubeSheetConfig`] to the results derived from it.
//! Results are recomputed whenever an input changes, so the two can never
//! disagree.

mod comparison;
mod config;
mod drawing;
mod error;
mod results;

use std::sync::Arc;

use tracing::debug;
use uom::si::f64::Length;

use crate::support::{
    constraint::StrictlyPositive,
    drawing::{Circle, Line, Point, Scene, Shape, Style},
    tubesheet::{
        FieldCache, LayoutEngine, LayoutPattern, MemoCache, MinIdConfig, OffsetMode, TubeField,
        outer_tube_limit,
    },
};

pub use comparison::{LayoutComparison, compare_layouts};
pub use config::TubeSheetConfig;
pub use drawing::DrawingSummary;
pub use error::TubeSheetError;
pub use results::TubeSheetResults;

use config::{length, mm};
use drawing::{CROSSHAIR_EXTENT, DRAWING_TITLE};

const SHELL_STYLE: Style = Style::solid(2.0);
const OTL_STYLE: Style = Style::dashed(0.5, 8.0, 4.0);
const TUBE_STYLE: Style = Style::solid(1.0);
const CROSSHAIR_STYLE: Style = Style::dashed(0.5, 8.0, 4.0);

/// A tubesheet layout and its derived results.
///
/// Every `with_*` method returns a new layout with the results recomputed.
/// Layouts derived from one another share a memoized [`LayoutEngine`], so
/// revisiting a shell diameter does not regenerate its tube field.
///
/// # Example
///
/// ```
/// use tubesheet_layout::{
///     models::thermal::tubesheet::{TubeSheet, TubeSheetConfig},
///     support::tubesheet::LayoutPattern,
/// };
/// use uom::si::{f64::Length, length::millimeter};
///
/// let config = TubeSheetConfig::new(
///     Length::new::<millimeter>(3.2),
///     Length::new::<millimeter>(19.05),
///     1.25,
///     LayoutPattern::Triangular30,
/// )
/// .unwrap()
/// .with_min_tubes(100)
/// .unwrap();
///
/// let sheet = TubeSheet::new(config).unwrap();
/// assert!(sheet.num_tubes() >= 100);
/// assert!(sheet.to_svg().contains("Number of Tubes"));
/// ```
#[derive(Debug, Clone)]
pub struct TubeSheet {
    config: TubeSheetConfig,
    solver: MinIdConfig,
    engine: Arc<LayoutEngine<MemoCache>>,
    results: TubeSheetResults,
}

impl TubeSheet {
    /// Derives a layout with the default solver settings.
    ///
    /// # Errors
    ///
    /// Returns a [`TubeSheetError`] if the minimum shell diameter search fails
    /// or the generated field is malformed.
    pub fn new(config: TubeSheetConfig) -> Result<Self, TubeSheetError> {
        Self::with_solver(config, MinIdConfig::default())
    }

    /// Derives a layout with custom solver settings.
    ///
    /// # Errors
    ///
    /// See [`TubeSheet::new`].
    pub fn with_solver(config: TubeSheetConfig, solver: MinIdConfig) -> Result<Self, TubeSheetError> {
        Self::derive(config, solver, Arc::new(LayoutEngine::memoized()))
    }

    fn derive(
        config: TubeSheetConfig,
        solver: MinIdConfig,
        engine: Arc<LayoutEngine<MemoCache>>,
    ) -> Result<Self, TubeSheetError> {
        let results = derive_results(&config, engine.as_ref(), &solver)?;
        Ok(Self {
            config,
            solver,
            engine,
            results,
        })
    }

    /// Replaces the config and recomputes the results.
    ///
    /// # Errors
    ///
    /// See [`TubeSheet::new`].
    pub fn with_config(&self, config: TubeSheetConfig) -> Result<Self, TubeSheetError> {
        Self::derive(config, self.solver, Arc::clone(&self.engine))
    }

    /// # Errors
    ///
    /// Returns an error if `min_tubes` is zero or the layout cannot be derived.
    pub fn with_min_tubes(&self, min_tubes: usize) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_min_tubes(min_tubes)?)
    }

    /// # Errors
    ///
    /// Returns an error if `shell_id` is not strictly positive or the layout
    /// cannot be derived.
    pub fn with_shell_id(&self, shell_id: Length) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_shell_id(shell_id)?)
    }

    /// # Errors
    ///
    /// Returns an error if the layout cannot be derived.
    pub fn with_pattern(&self, pattern: LayoutPattern) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_pattern(pattern))
    }

    /// # Errors
    ///
    /// Returns an error if `clearance` is negative or the layout cannot be derived.
    pub fn with_clearance(&self, clearance: Length) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_clearance(clearance)?)
    }

    /// # Errors
    ///
    /// Returns an error if `tube_od` is not strictly positive or the layout
    /// cannot be derived.
    pub fn with_tube_od(&self, tube_od: Length) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_tube_od(tube_od)?)
    }

    /// # Errors
    ///
    /// Returns an error if `pitch_ratio` is below one or the layout cannot be derived.
    pub fn with_pitch_ratio(&self, pitch_ratio: f64) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_pitch_ratio(pitch_ratio)?)
    }

    /// # Errors
    ///
    /// Returns an error if `ligament` is negative or the layout cannot be derived.
    pub fn with_ligament(&self, ligament: Length) -> Result<Self, TubeSheetError> {
        self.with_config(self.config.with_ligament(ligament)?)
    }

    #[must_use]
    pub fn config(&self) -> &TubeSheetConfig {
        &self.config
    }

    #[must_use]
    pub fn results(&self) -> &TubeSheetResults {
        &self.results
    }

    #[must_use]
    pub fn min_id(&self) -> Option<Length> {
        self.results.min_id
    }

    #[must_use]
    pub fn num_tubes(&self) -> usize {
        self.results.num_tubes
    }

    #[must_use]
    pub fn tube_field(&self) -> Option<&TubeField> {
        self.results.tube_field.as_deref()
    }

    #[must_use]
    pub fn otl(&self) -> Option<Length> {
        self.results.otl
    }

    /// Shell diameter to draw: the fixed shell ID if set, else the minimum ID.
    #[must_use]
    pub fn shell_diameter(&self) -> Option<Length> {
        self.config.shell_id().or(self.results.min_id)
    }

    /// Headline figures for the drawing, or `None` if there is nothing to draw.
    #[must_use]
    pub fn drawing_summary(&self) -> Option<DrawingSummary> {
        let shell = self.shell_diameter()?;
        let otl = self.results.otl?;
        Some(DrawingSummary::new(
            mm(shell),
            mm(otl),
            self.config.geometry().tube_od(),
            self.config.pitch_ratio(),
            self.config.pattern(),
            self.results.num_tubes,
        ))
    }

    /// Builds the layout drawing in millimetres.
    ///
    /// Shapes are drawn shell first, then the OTL, the tubes numbered from one,
    /// and finally the centre crosshairs. The scene is empty when there is no
    /// tube field, shell diameter or OTL.
    #[must_use]
    pub fn scene(&self) -> Scene {
        let (Some(field), Some(summary), Some(shell), Some(otl)) = (
            self.tube_field(),
            self.drawing_summary(),
            self.shell_diameter(),
            self.results.otl,
        ) else {
            return Scene::empty();
        };

        let shell = mm(shell);
        let tube_od = self.config.geometry().tube_od();

        let mut scene = Scene::new(DRAWING_TITLE, summary.to_string());
        scene.push(Shape::Circle(Circle::new(Point::ORIGIN, shell, SHELL_STYLE)));
        scene.push(Shape::Circle(Circle::new(Point::ORIGIN, mm(otl), OTL_STYLE)));
        scene.extend(field.iter().enumerate().map(|(i, tube)| {
            Shape::Circle(Circle::new(Point::new(tube.x, tube.y), tube_od, TUBE_STYLE).with_id(i + 1))
        }));

        let half = shell / 2.0 * CROSSHAIR_EXTENT;
        scene.extend([
            Shape::Line(Line {
                from: Point::new(-half, 0.0),
                to: Point::new(half, 0.0),
                style: CROSSHAIR_STYLE,
            }),
            Shape::Line(Line {
                from: Point::new(0.0, -half),
                to: Point::new(0.0, half),
                style: CROSSHAIR_STYLE,
            }),
        ]);
        scene
    }

    /// Renders the layout drawing as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.scene().to_svg()
    }
}

/// Derives every result from `config`.
///
/// With a fixed shell ID, the tube field, count and OTL describe that shell.
/// Otherwise they describe the minimum shell. The minimum ID is solved for
/// `min_tubes` when given, else for the count that fits the fixed shell.
pub(super) fn derive_results<C: FieldCache>(
    config: &TubeSheetConfig,
    engine: &LayoutEngine<C>,
    solver: &MinIdConfig,
) -> Result<TubeSheetResults, TubeSheetError> {
    let geometry = config.geometry();
    let pattern = config.pattern();
    let min_id_for = |min_tubes| {
        engine.min_shell_id(min_tubes, geometry, pattern, OffsetMode::Auto, solver)
    };

    let (shell_id, min_id) = match (config.shell_id_mm(), config.min_tubes_constrained()) {
        (None, None) => return Ok(TubeSheetResults::default()),
        (None, Some(min_tubes)) => {
            let min_id = min_id_for(min_tubes)?;
            (min_id, Some(min_id))
        }
        (Some(shell_id), Some(min_tubes)) => (shell_id, Some(min_id_for(min_tubes)?)),
        (Some(shell_id), None) => {
            let fitted = engine.tube_count(shell_id, geometry, pattern, OffsetMode::Auto);
            let min_id = match StrictlyPositive::new(fitted) {
                Ok(fitted) => Some(min_id_for(fitted)?),
                Err(_) => None,
            };
            (shell_id, min_id)
        }
    };

    let tube_field = engine.tube_field(shell_id, geometry, pattern, OffsetMode::Auto);
    let otl = match tube_field.as_deref() {
        Some(field) if !field.is_empty() => Some(outer_tube_limit(field, geometry.tube_od())?),
        _ => None,
    };
    let num_tubes = tube_field.as_ref().map_or(0, |field| field.len());

    debug!(
        %pattern,
        shell_id,
        min_id = ?min_id,
        num_tubes,
        otl = ?otl,
        "derived tubesheet layout"
    );

    Ok(TubeSheetResults {
        min_id: min_id.map(length),
        num_tubes,
        tube_field,
        otl: otl.map(length),
    })
}
