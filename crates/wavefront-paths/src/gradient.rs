use std::fmt;

/// One cell of a distance field.
///
/// Variants are declared in ascending order, so the derived `PartialOrd`
/// ranks every real distance below every marker:
/// `Dist(_) < Unreached < Wall < Dark`. Greedy descent relies on this.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gradient {
    /// Weighted distance to the nearest goal. Goals hold their own value.
    Dist(f64),
    /// Open floor that no scan has assigned yet.
    #[default]
    Unreached,
    /// Terrain wall or occupied cell. Never entered, never relaxed.
    Wall,
    /// Open cell a finished scan could not reach.
    Dark,
}

impl Gradient {
    pub const GOAL: Gradient = Gradient::Dist(0.0);

    /// The distance, if this cell holds one.
    #[inline]
    pub fn dist(self) -> Option<f64> {
        match self {
            Gradient::Dist(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == Gradient::Wall
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gradient::Dist(d) => write!(f, "{d}"),
            Gradient::Unreached => f.write_str("unreached"),
            Gradient::Wall => f.write_str("wall"),
            Gradient::Dark => f.write_str("dark"),
        }
    }
}
