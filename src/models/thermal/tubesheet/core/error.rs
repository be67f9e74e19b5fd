use thiserror::Error;

use crate::support::tubesheet::{LayoutError, MinIdError};

/// Errors that can occur while deriving a tubesheet layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TubeSheetError {
    /// The geometry or shell could not produce a tube field.
    #[error("invalid tubesheet layout")]
    Layout(#[from] LayoutError),

    /// No shell diameter holding the requested tube count was found.
    #[error("minimum shell diameter search failed")]
    Solver(#[from] MinIdError),
}
