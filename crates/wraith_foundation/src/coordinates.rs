//! Star system coordinates.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Highest orbit number a system can have.
pub const MAX_ORBIT: i64 = 10;

/// A location in the cluster.
///
/// `orbit` is 0 when the order names a system rather than a planet in it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
    /// Z coordinate.
    pub z: i64,
    /// Orbit within the system, 0 for "no orbit".
    pub orbit: i64,
}

impl Coordinates {
    /// Creates coordinates for a whole system (orbit 0).
    #[must_use]
    pub const fn system(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z, orbit: 0 }
    }

    /// Creates coordinates for an orbit within a system.
    ///
    /// # Errors
    /// Returns an error if `orbit` is outside `0..=MAX_ORBIT`.
    pub fn new(x: i64, y: i64, z: i64, orbit: i64) -> crate::Result<Self> {
        if !(0..=MAX_ORBIT).contains(&orbit) {
            return Err(Error::orbit_out_of_range(orbit));
        }
        Ok(Self { x, y, z, orbit })
    }

    /// Returns true if these coordinates name a specific orbit.
    #[must_use]
    pub const fn has_orbit(&self) -> bool {
        self.orbit != 0
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_orbit() {
            write!(f, "({},{},{},{})", self.x, self.y, self.z, self.orbit)
        } else {
            write!(f, "({},{},{})", self.x, self.y, self.z)
        }
    }
}
