//! Tubesheet layout models.
//!
//! [`TubeSheetModel`] is the [`twine_core::Model`] implementation. The
//! computational core, including the [`TubeSheet`] aggregate, is in the
//! internal `core` module.

pub(crate) mod core;

use twine_core::Model;

use crate::support::tubesheet::{LayoutEngine, MemoCache, MinIdConfig};

pub use self::core::{
    DrawingSummary, LayoutComparison, TubeSheet, TubeSheetConfig, TubeSheetError,
    TubeSheetResults, compare_layouts,
};

/// Derives tubesheet results from a [`TubeSheetConfig`].
///
/// The model keeps a memoized layout engine, so repeated calls with nearby
/// configs reuse the tube fields already generated.
#[derive(Debug, Default)]
pub struct TubeSheetModel {
    solver: MinIdConfig,
    engine: LayoutEngine<MemoCache>,
}

impl TubeSheetModel {
    /// Creates a model that solves minimum shell IDs with `solver`.
    #[must_use]
    pub fn new(solver: MinIdConfig) -> Self {
        Self {
            solver,
            engine: LayoutEngine::memoized(),
        }
    }

    /// Returns the minimum shell ID solver settings.
    #[must_use]
    pub fn solver(&self) -> &MinIdConfig {
        &self.solver
    }
}

impl Model for TubeSheetModel {
    type Input = TubeSheetConfig;
    type Output = TubeSheetResults;
    type Error = TubeSheetError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::derive_results(input, &self.engine, &self.solver)
    }
}
