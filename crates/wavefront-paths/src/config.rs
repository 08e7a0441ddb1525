use crate::measurement::Measurement;

/// Tunables for a [`DijkstraMap`](crate::DijkstraMap).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub measurement: Measurement,
    /// How many of the two orthogonal cells beside a diagonal step must be
    /// blocked for the diagonal to be refused. 0 allows every diagonal,
    /// 1 forbids cutting any corner, 2 only forbids squeezing between two
    /// blocked cells. Values above 2 act as 2.
    pub blocking_requirement: u8,
    /// Steps one path extraction may take, across all retries, before it
    /// gives up with a truncated path.
    pub frustration_limit: usize,
    /// Step limit for [`find_path_prescanned`](crate::DijkstraMap::find_path_prescanned).
    pub prescanned_limit: usize,
    /// How often a path extraction re-plans after its budget runs out on
    /// an `only_passable` cell.
    pub max_retries: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            measurement: Measurement::Manhattan,
            blocking_requirement: 2,
            frustration_limit: 500,
            prescanned_limit: 2000,
            max_retries: 32,
        }
    }
}

impl MapConfig {
    /// Default configuration with a different metric.
    pub fn with_measurement(measurement: Measurement) -> Self {
        Self {
            measurement,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn blocking(&self) -> u8 {
        self.blocking_requirement.min(2)
    }
}
