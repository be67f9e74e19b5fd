use thiserror::Error;

use crate::support::tubesheet::LayoutError;

/// Errors that can occur while solving for a minimum shell diameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MinIdError {
    /// Field generation failed for a reason other than an undersized shell.
    #[error("layout failed")]
    Layout(#[from] LayoutError),

    /// Neither offset produced a minimum diameter.
    #[error("no feasible layout with or without offset")]
    NoFeasibleLayout {
        /// Failure of the offset search.
        offset: Box<MinIdError>,

        /// Failure of the search without offset.
        no_offset: Box<MinIdError>,
    },

    /// The bracketing search hit its iteration limit.
    #[error("no diameter holding {target} tubes found after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Tube count being searched for.
        target: usize,

        /// Iterations performed.
        iterations: usize,

        /// Smallest diameter seen that holds more than `target` tubes.
        best: Option<f64>,
    },

    /// Every attempt, including retries with larger targets, failed.
    #[error("minimum diameter for {requested} tubes not found after {retries} retries")]
    SolverExhausted {
        /// Tube count originally requested.
        requested: usize,

        /// Retries performed after the first attempt.
        retries: usize,

        /// Failure of the final attempt.
        #[source]
        last: Box<MinIdError>,
    },
}
