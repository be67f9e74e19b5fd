use std::fmt;

use super::layout::LayoutConstants;

/// Horizontal staggering applied to the whole grid before admission.
///
/// Shifting every column by half a step centres the grid on a gap instead of
/// a tube, which can pack more tubes into some shells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OffsetMode {
    /// Shift columns by half a horizontal step.
    Offset,

    /// Leave a tube on the vertical centreline.
    NoOffset,

    /// Try both and keep whichever packs more tubes.
    #[default]
    Auto,
}

impl OffsetMode {
    /// Returns the explicit modes `Auto` resolves between, in tie-break order.
    pub(crate) const FIXED: [Self; 2] = [Self::NoOffset, Self::Offset];

    /// Horizontal shift for a fixed mode, or `None` for [`OffsetMode::Auto`].
    #[must_use]
    pub fn shift(self, constants: &LayoutConstants) -> Option<f64> {
        match self {
            Self::Offset => Some(constants.dx / 2.0),
            Self::NoOffset => Some(0.0),
            Self::Auto => None,
        }
    }
}

impl From<bool> for OffsetMode {
    fn from(offset: bool) -> Self {
        if offset { Self::Offset } else { Self::NoOffset }
    }
}

impl fmt::Display for OffsetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Offset => "offset",
            Self::NoOffset => "no offset",
            Self::Auto => "auto",
        })
    }
}
