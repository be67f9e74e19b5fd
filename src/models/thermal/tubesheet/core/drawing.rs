use std::fmt;

use crate::support::{rounding::round_to, tubesheet::LayoutPattern};

const SUMMARY_DECIMAL_PLACES: i32 = 2;

/// Title of every tubesheet drawing.
pub(super) const DRAWING_TITLE: &str = "Tubesheet layout";

/// Crosshair half-length, as a multiple of the shell radius.
pub(super) const CROSSHAIR_EXTENT: f64 = 1.1;

/// Headline figures of a drawn layout, in millimetres rounded to two places.
///
/// Its `Display` form is the drawing description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingSummary {
    pub shell_id: f64,
    pub otl: f64,
    pub tube_od: f64,
    pub pitch: f64,
    pub ligament: f64,
    pub pitch_ratio: f64,
    pub pattern: LayoutPattern,
    pub num_tubes: usize,
}

impl DrawingSummary {
    /// Rounds every length for presentation.
    pub(super) fn new(
        shell_id: f64,
        otl: f64,
        tube_od: f64,
        pitch_ratio: f64,
        pattern: LayoutPattern,
        num_tubes: usize,
    ) -> Self {
        let pitch = tube_od * pitch_ratio;
        Self {
            shell_id: round_to(shell_id, SUMMARY_DECIMAL_PLACES),
            otl: round_to(otl, SUMMARY_DECIMAL_PLACES),
            tube_od: round_to(tube_od, SUMMARY_DECIMAL_PLACES),
            pitch: round_to(pitch, SUMMARY_DECIMAL_PLACES),
            ligament: round_to(pitch - tube_od, SUMMARY_DECIMAL_PLACES),
            pitch_ratio: round_to(pitch_ratio, SUMMARY_DECIMAL_PLACES),
            pattern,
            num_tubes,
        }
    }
}

impl fmt::Display for DrawingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shell ID: {} mm; OTL: {} mm; Tube OD: {} mm; Pitch: {} mm; Ligament: {} mm; \
             Pitch Ratio: {}; Pitch Layout: {}; Number of Tubes: {};",
            self.shell_id,
            self.otl,
            self.tube_od,
            self.pitch,
            self.ligament,
            self.pitch_ratio,
            self.pattern,
            self.num_tubes,
        )
    }
}
