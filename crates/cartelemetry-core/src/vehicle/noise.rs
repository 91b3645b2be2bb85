//! Noise sources feeding the vehicle model

use rand::Rng;
use std::collections::VecDeque;

/// Random draws needed by the vehicle model
///
/// Any [`rand::Rng`] is a noise source, so a seeded `StdRng` gives
/// reproducible trips.
pub trait NoiseSource {
    /// Uniform integer in `low..high` (upper bound exclusive)
    fn int_below(&mut self, low: i64, high: i64) -> i64;

    /// Uniform real in `[0, 1)`
    fn unit(&mut self) -> f64;
}

impl<R: Rng> NoiseSource for R {
    fn int_below(&mut self, low: i64, high: i64) -> i64 {
        self.gen_range(low..high)
    }

    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed script of draws
///
/// Integer draws are clamped into the requested range and unit draws into
/// `[0, 1)`. Once a queue runs dry it keeps answering with the lower bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    ints: VecDeque<i64>,
    units: VecDeque<f64>,
}

impl ScriptedNoise {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue integer draws
    pub fn with_ints(mut self, ints: impl IntoIterator<Item = i64>) -> Self {
        self.ints.extend(ints);
        self
    }

    /// Queue unit draws
    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }
}

impl NoiseSource for ScriptedNoise {
    fn int_below(&mut self, low: i64, high: i64) -> i64 {
        let value = self.ints.pop_front().unwrap_or(low);
        value.clamp(low, (high - 1).max(low))
    }

    fn unit(&mut self) -> f64 {
        let value = self.units.pop_front().unwrap_or(0.0);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
