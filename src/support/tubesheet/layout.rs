use std::{fmt, str::FromStr};

use super::LayoutError;

/// Tube pitch layout pattern.
///
/// The four angular patterns tile the tubesheet with a triangular or square
/// grid at the named included angle. [`LayoutPattern::Radial`] instead places
/// a single ring of tubes and is generated by a separate algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutPattern {
    /// 30° triangular pitch.
    Triangular30,
    /// 45° rotated square pitch.
    RotatedSquare45,
    /// 60° rotated triangular pitch.
    RotatedTriangular60,
    /// 90° square pitch.
    Square90,
    /// One ring of tubes around the shell centre.
    Radial,
}

impl LayoutPattern {
    /// Every supported pattern, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Triangular30,
        Self::RotatedSquare45,
        Self::RotatedTriangular60,
        Self::Square90,
        Self::Radial,
    ];

    /// Returns the included grid angle in degrees, or `None` for radial layouts.
    #[must_use]
    pub const fn angle(self) -> Option<u16> {
        match self {
            Self::Triangular30 => Some(30),
            Self::RotatedSquare45 => Some(45),
            Self::RotatedTriangular60 => Some(60),
            Self::Square90 => Some(90),
            Self::Radial => None,
        }
    }

    /// Returns `true` for the radial ring pattern.
    #[must_use]
    pub const fn is_radial(self) -> bool {
        matches!(self, Self::Radial)
    }
}

impl fmt::Display for LayoutPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(angle) => write!(f, "{angle}"),
            None => f.write_str("radial"),
        }
    }
}

impl TryFrom<u16> for LayoutPattern {
    type Error = LayoutError;

    fn try_from(angle: u16) -> Result<Self, Self::Error> {
        match angle {
            30 => Ok(Self::Triangular30),
            45 => Ok(Self::RotatedSquare45),
            60 => Ok(Self::RotatedTriangular60),
            90 => Ok(Self::Square90),
            other => Err(LayoutError::InvalidLayout(format!(
                "unsupported pitch angle {other}°"
            ))),
        }
    }
}

impl FromStr for LayoutPattern {
    type Err = LayoutError;

    /// Parses `"30"`, `"45"`, `"60"`, `"90"` (optionally suffixed with `°`) or `"radial"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("radial") {
            return Ok(Self::Radial);
        }

        tag.trim_end_matches('°')
            .parse::<u16>()
            .map_err(|_| LayoutError::InvalidLayout(format!("unrecognised layout {tag:?}")))
            .and_then(Self::try_from)
    }
}

/// Grid step vector for an angular layout pattern.
///
/// Rows sit `dy` apart and tubes within a row sit `dx` apart. Odd rows are
/// shifted right by `row_shift` so alternating rows interleave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstants {
    /// Horizontal step between adjacent tubes in a row.
    pub dx: f64,

    /// Vertical step between rows.
    pub dy: f64,

    /// Horizontal shift applied to odd rows.
    pub row_shift: f64,
}

impl LayoutConstants {
    /// Computes the grid step for `pattern` at the given centre-to-centre `pitch`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidLayout`] for [`LayoutPattern::Radial`],
    /// which has no grid step.
    pub fn new(pitch: f64, pattern: LayoutPattern) -> Result<Self, LayoutError> {
        let sin60 = 3_f64.sqrt() / 2.0;
        let cos45 = 1.0 / 2_f64.sqrt();

        let constants = match pattern {
            LayoutPattern::Triangular30 => Self {
                dx: pitch,
                dy: pitch * sin60,
                row_shift: pitch / 2.0,
            },
            LayoutPattern::RotatedTriangular60 => {
                let dx = pitch * sin60 * 2.0;
                Self {
                    dx,
                    dy: pitch / 2.0,
                    row_shift: dx / 2.0,
                }
            }
            LayoutPattern::Square90 => Self {
                dx: pitch,
                dy: pitch,
                row_shift: 0.0,
            },
            LayoutPattern::RotatedSquare45 => {
                let dx = pitch / cos45;
                Self {
                    dx,
                    dy: dx / 2.0,
                    row_shift: dx / 2.0,
                }
            }
            LayoutPattern::Radial => {
                return Err(LayoutError::InvalidLayout(
                    "radial layouts have no grid step".into(),
                ));
            }
        };

        Ok(constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn grid_steps() {
        let pitch = 10.0;
        let sin60 = 3_f64.sqrt() / 2.0;

        let tri30 = LayoutConstants::new(pitch, LayoutPattern::Triangular30).unwrap();
        assert_relative_eq!(tri30.dx, 10.0);
        assert_relative_eq!(tri30.dy, 10.0 * sin60);
        assert_relative_eq!(tri30.row_shift, 5.0);

        let tri60 = LayoutConstants::new(pitch, LayoutPattern::RotatedTriangular60).unwrap();
        assert_relative_eq!(tri60.dx, 20.0 * sin60);
        assert_relative_eq!(tri60.dy, 5.0);
        assert_relative_eq!(tri60.row_shift, 10.0 * sin60);

        let sq90 = LayoutConstants::new(pitch, LayoutPattern::Square90).unwrap();
        assert_relative_eq!(sq90.dx, 10.0);
        assert_relative_eq!(sq90.dy, 10.0);
        assert_relative_eq!(sq90.row_shift, 0.0);

        let sq45 = LayoutConstants::new(pitch, LayoutPattern::RotatedSquare45).unwrap();
        assert_relative_eq!(sq45.dx, 10.0 * 2_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(sq45.dy, 5.0 * 2_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(sq45.row_shift, sq45.dy);
    }

    #[test]
    fn neighbours_are_one_pitch_apart() {
        let pitch = 7.5;
        for pattern in [
            LayoutPattern::Triangular30,
            LayoutPattern::RotatedSquare45,
            LayoutPattern::RotatedTriangular60,
        ] {
            let c = LayoutConstants::new(pitch, pattern).unwrap();
            let diagonal = c.row_shift.hypot(c.dy);
            assert_relative_eq!(diagonal, pitch, max_relative = 1e-12);
        }
    }

    #[test]
    fn radial_has_no_grid() {
        assert!(matches!(
            LayoutConstants::new(10.0, LayoutPattern::Radial),
            Err(LayoutError::InvalidLayout(_))
        ));
    }

    #[test]
    fn parses_and_prints_tags() {
        for pattern in LayoutPattern::ALL {
            let tag = pattern.to_string();
            assert_eq!(tag.parse::<LayoutPattern>().unwrap(), pattern);
        }

        assert_eq!("60°".parse::<LayoutPattern>().unwrap(), LayoutPattern::RotatedTriangular60);
        assert_eq!(" Radial ".parse::<LayoutPattern>().unwrap(), LayoutPattern::Radial);
        assert!(matches!(
            "75".parse::<LayoutPattern>(),
            Err(LayoutError::InvalidLayout(_))
        ));
        assert!(matches!(
            "hex".parse::<LayoutPattern>(),
            Err(LayoutError::InvalidLayout(_))
        ));
        assert_eq!(LayoutPattern::try_from(45_u16).unwrap(), LayoutPattern::RotatedSquare45);
    }
}
