//! Rounded per-tick readings

use super::model::Step;

/// Decimal places used for transmitted values
pub const TRANSMIT_DECIMALS: i32 = 2;

/// Round `value` to `decimals` places, halves away from zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// The four telemetry values produced by one tick, ready to publish
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Vehicle speed (km/h)
    pub speed: f64,
    /// Engine RPM
    pub rpm: f64,
    /// Fuel level (%)
    pub fuel: f64,
    /// Engine temperature (°C)
    pub temp: f64,
}

impl Reading {
    /// Build a reading, rounding each value for transmission
    pub fn new(speed: f64, rpm: f64, fuel: f64, temp: f64) -> Self {
        Self {
            speed: round_to(speed, TRANSMIT_DECIMALS),
            rpm: round_to(rpm, TRANSMIT_DECIMALS),
            fuel: round_to(fuel, TRANSMIT_DECIMALS),
            temp: round_to(temp, TRANSMIT_DECIMALS),
        }
    }
}

impl From<&Step> for Reading {
    fn from(step: &Step) -> Self {
        Reading::new(
            step.state.speed(),
            step.state.rpm(),
            step.state.fuel(),
            step.engine_temp,
        )
    }
}
