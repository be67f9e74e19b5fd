//! Tube field generation.

mod grid;
mod radial;
mod symmetry;

use std::sync::Arc;

use tracing::debug;

use crate::support::{constraint::StrictlyPositive, rounding::round_up};

use super::{
    DIAMETER_DECIMAL_PLACES, FieldCache, FieldKey, FieldOutcome, LayoutError, LayoutPattern,
    MemoCache, NoCache, OffsetMode, TubeField, TubeGeometry, geometry::invalid,
    layout::LayoutConstants, otl::outer_tube_limit,
};

/// Generates tube fields, consulting a [`FieldCache`] first.
///
/// The engine is stateless apart from its cache, so results never depend on
/// which cache is used.
///
/// # Example
///
/// ```
/// use tubesheet_layout::support::tubesheet::{
///     LayoutEngine, LayoutPattern, OffsetMode, TubeGeometry,
/// };
///
/// let geometry = TubeGeometry::new(10.0, 1.25, 0.0).unwrap();
/// let engine = LayoutEngine::new();
///
/// let field = engine
///     .try_tube_field(30.0, &geometry, LayoutPattern::Square90, OffsetMode::NoOffset)
///     .unwrap();
/// assert_eq!(field.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LayoutEngine<C = NoCache> {
    cache: C,
}

impl LayoutEngine {
    /// Creates an engine without memoization.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutEngine<MemoCache> {
    /// Creates an engine that remembers every field it generates.
    #[must_use]
    pub fn memoized() -> Self {
        Self::with_cache(MemoCache::new())
    }
}

impl<C: FieldCache> LayoutEngine<C> {
    /// Creates an engine backed by `cache`.
    pub fn with_cache(cache: C) -> Self {
        Self { cache }
    }

    /// Returns the engine's cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Generates the tube field for a shell of diameter `shell_id`.
    ///
    /// The shell diameter is first rounded up to [`DIAMETER_DECIMAL_PLACES`].
    /// Grid fields are sorted by `(y, x)`; radial fields ignore `offset`.
    /// [`OffsetMode::Auto`] generates both fixed offsets and keeps the offset
    /// field only if it holds strictly more tubes.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] for a non-positive shell ID,
    /// [`LayoutError::GeometryInfeasible`] when a single tube cannot fit, and
    /// [`LayoutError::RadialInfeasible`] when a radial ring cannot hold two
    /// tubes.
    pub fn try_tube_field(
        &self,
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
    ) -> FieldOutcome {
        let shell_id = StrictlyPositive::new(shell_id).map_err(invalid("shell ID"))?;
        let shell_id = round_up(shell_id.into_inner(), DIAMETER_DECIMAL_PLACES);

        if pattern.is_radial() {
            return self.cached(shell_id, geometry, pattern, OffsetMode::NoOffset);
        }

        match offset {
            OffsetMode::Auto => self.resolve_auto(shell_id, geometry, pattern),
            fixed => self.cached(shell_id, geometry, pattern, fixed),
        }
    }

    /// Generates a tube field, or `None` if the inputs admit no layout.
    ///
    /// The reason for a `None` is logged at debug level.
    pub fn tube_field(
        &self,
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
    ) -> Option<Arc<TubeField>> {
        match self.try_tube_field(shell_id, geometry, pattern, offset) {
            Ok(field) => Some(field),
            Err(error) => {
                debug!(error = %error, shell_id, %pattern, %offset, "no tube field");
                None
            }
        }
    }

    /// Number of tubes that fit, or zero if the inputs admit no layout.
    pub fn tube_count(
        &self,
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
    ) -> usize {
        self.tube_field(shell_id, geometry, pattern, offset)
            .map_or(0, |field| field.len())
    }

    /// Outer tube limit of the field generated for `shell_id`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::try_tube_field`], or
    /// [`LayoutError::InvalidField`] if the field is empty.
    pub fn outer_tube_limit(
        &self,
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
    ) -> Result<f64, LayoutError> {
        let field = self.try_tube_field(shell_id, geometry, pattern, offset)?;
        outer_tube_limit(&field, geometry.tube_od())
    }

    fn resolve_auto(
        &self,
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
    ) -> FieldOutcome {
        let count = |outcome: &FieldOutcome| outcome.as_ref().map_or(0, |field| field.len());

        let no_offset = self.cached(shell_id, geometry, pattern, OffsetMode::NoOffset);
        let offset = self.cached(shell_id, geometry, pattern, OffsetMode::Offset);

        if count(&offset) > count(&no_offset) {
            debug!(shell_id, %pattern, tubes = count(&offset), "auto offset chose offset");
            offset
        } else {
            debug!(shell_id, %pattern, tubes = count(&no_offset), "auto offset chose no offset");
            no_offset
        }
    }

    fn cached(
        &self,
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
    ) -> FieldOutcome {
        let key = FieldKey::new(shell_id, geometry, pattern, offset);
        if let Some(outcome) = self.cache.get(&key) {
            return outcome;
        }

        let outcome = generate(shell_id, geometry, pattern, offset).map(Arc::new);
        self.cache.insert(key, outcome.clone());
        outcome
    }
}

fn generate(
    shell_id: f64,
    geometry: &TubeGeometry,
    pattern: LayoutPattern,
    offset: OffsetMode,
) -> Result<TubeField, LayoutError> {
    let max_otl = geometry.max_otl(shell_id)?;

    if pattern.is_radial() {
        return radial::ring(geometry, max_otl).map(TubeField::new);
    }

    let constants = LayoutConstants::new(geometry.pitch(), pattern)?;
    let shift = offset.shift(&constants).ok_or_else(|| {
        LayoutError::InvalidLayout("grid offset must be resolved before generation".into())
    })?;

    let upper = grid::upper_rows(&constants, shift, geometry.tube_od(), max_otl);
    Ok(TubeField::new(symmetry::reflect_quadrants(&upper)))
}
