use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! quantity {
    ($name:ident, $unit:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }
    };
}

quantity!(Picoseconds, "ps", "A duration in picoseconds of simulated time.");
quantity!(Femtoseconds, "fs", "A duration in femtoseconds of simulated time.");
quantity!(Nanometers, "nm", "A length in nanometers.");
quantity!(Kelvin, "K", "A temperature in Kelvin.");

impl Picoseconds {
    /// Number of integrator steps this duration spans at the given timestep,
    /// rounded down.
    pub fn steps_at(self, timestep: Femtoseconds) -> u64 {
        if timestep.0 <= 0.0 {
            return 0;
        }
        (self.0 * 1000.0 / timestep.0) as u64
    }
}
