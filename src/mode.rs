//! Operator-selected operation mode.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PropertyError;

/// The control strategy currently governing the pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pool pump follows the timer window; solar follows the temperatures.
    #[default]
    Auto,
    /// No automatic commands; pumps are switched by hand.
    Manual,
    /// Pool pump follows the timer window; solar is kept off.
    Timer,
    /// Pool pump is left alone; solar heats whenever it can.
    Boost,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Auto, Mode::Manual, Mode::Timer, Mode::Boost];

    /// Wire name used on the property and status surfaces.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
            Self::Timer => "timer",
            Self::Boost => "boost",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(PropertyError::UnknownMode)
    }
}
