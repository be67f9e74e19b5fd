use crate::support::tubesheet::DIAMETER_DECIMAL_PLACES;

/// Solver configuration for the minimum shell diameter search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinIdConfig {
    /// Maximum bracketing iterations per attempt.
    pub max_iterations: usize,

    /// Attempts made after the first, each with the target raised by one.
    pub max_retries: usize,

    /// Growth factor applied while the answer is not yet bracketed.
    ///
    /// Must be greater than one.
    pub beta: f64,

    /// Decimal places of the returned diameter.
    pub decimal_places: i32,
}

impl Default for MinIdConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_retries: 5,
            beta: 1.1,
            decimal_places: DIAMETER_DECIMAL_PLACES,
        }
    }
}

impl MinIdConfig {
    /// Smallest diameter increment at the configured precision.
    pub(super) fn step(&self) -> f64 {
        10_f64.powi(-self.decimal_places)
    }
}
