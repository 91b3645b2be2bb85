//! Vehicle Simulation
//!
//! Generates speed, RPM, fuel and engine temperature for a simulated trip.
//! The car accelerates from standstill, cruises between 30 and 90 km/h and
//! backs off when it gets faster than that.

mod model;
mod noise;
mod reading;

pub use model::{
    engine_temp, fuel_burn_rate, rpm_for_speed, Phase, Step, VehicleState, FULL_TANK, IDLE_RPM,
    MAX_FUEL_CONSUMPTION_PER_SECOND, MAX_RPM, MAX_SPEED, MIN_SPEED,
};
pub use noise::{NoiseSource, ScriptedNoise};
pub use reading::{round_to, Reading, TRANSMIT_DECIMALS};
