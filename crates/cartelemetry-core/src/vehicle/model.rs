//! Vehicle state evolution
//!
//! One call to [`VehicleState::advance`] is one tick: pick the phase from the
//! current speed, nudge the speed, then derive RPM, fuel burn and an engine
//! temperature sample from the new speed.

use super::noise::NoiseSource;

/// Engine speed with the vehicle standing still
pub const IDLE_RPM: f64 = 800.0;
/// Engine speed at top speed
pub const MAX_RPM: f64 = 6000.0;
/// Lowest allowed vehicle speed (km/h)
pub const MIN_SPEED: f64 = 0.0;
/// Highest allowed vehicle speed (km/h)
pub const MAX_SPEED: f64 = 120.0;
/// Fuel percentage burned per second at full load
pub const MAX_FUEL_CONSUMPTION_PER_SECOND: f64 = 0.005;
/// Fuel level of a full tank (%)
pub const FULL_TANK: f64 = 100.0;

const CRUISE_FROM_SPEED: f64 = 30.0;
const DECELERATE_FROM_SPEED: f64 = 90.0;
const SPEED_STEP_MIN: i64 = 2;
const SPEED_STEP_MAX: i64 = 5; // exclusive

const BASE_ENGINE_TEMP: f64 = 85.0;
const MIN_ENGINE_TEMP: f64 = 80.0;
const MAX_ENGINE_TEMP: f64 = 110.0;
const ENGINE_TEMP_NOISE: i64 = 15; // exclusive

/// Kinematic regime, derived from speed on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Below 30 km/h, speeding up in whole km/h steps
    Accelerating,
    /// 30 to 90 km/h, drifting by less than 1 km/h
    Cruising,
    /// 90 km/h and above, slowing down in whole km/h steps
    Decelerating,
}

impl Phase {
    /// Phase for a given speed. Boundaries belong to the higher band.
    pub fn for_speed(speed: f64) -> Self {
        if speed < CRUISE_FROM_SPEED {
            Phase::Accelerating
        } else if speed < DECELERATE_FROM_SPEED {
            Phase::Cruising
        } else {
            Phase::Decelerating
        }
    }

    fn speed_delta<N: NoiseSource + ?Sized>(self, noise: &mut N) -> f64 {
        match self {
            Phase::Accelerating => noise.int_below(SPEED_STEP_MIN, SPEED_STEP_MAX) as f64,
            Phase::Cruising => noise.unit() * 2.0 - 1.0,
            Phase::Decelerating => -(noise.int_below(SPEED_STEP_MIN, SPEED_STEP_MAX) as f64),
        }
    }
}

/// Engine RPM for a vehicle speed
///
/// Idle below 1 km/h, otherwise linear between idle and max RPM.
pub fn rpm_for_speed(speed: f64) -> f64 {
    if speed < 1.0 {
        IDLE_RPM
    } else {
        IDLE_RPM + (speed / MAX_SPEED) * (MAX_RPM - IDLE_RPM)
    }
}

/// Fuel burned per second (percent of tank) at the given speed and RPM
pub fn fuel_burn_rate(speed: f64, rpm: f64) -> f64 {
    (speed / MAX_SPEED) * (rpm / MAX_RPM) * MAX_FUEL_CONSUMPTION_PER_SECOND
}

/// Engine temperature sample for the given speed
///
/// Memoryless: only the current speed and one noise draw go into it.
pub fn engine_temp<N: NoiseSource + ?Sized>(speed: f64, noise: &mut N) -> f64 {
    let factor = speed / MAX_SPEED;
    let temp = BASE_ENGINE_TEMP + factor * noise.int_below(0, ENGINE_TEMP_NOISE) as f64;
    temp.clamp(MIN_ENGINE_TEMP, MAX_ENGINE_TEMP)
}

/// Vehicle state carried from tick to tick
///
/// RPM is always derived from speed, so there is no way to set it directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    speed: f64,
    rpm: f64,
    fuel: f64,
}

/// Result of advancing the vehicle by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Phase chosen from the speed before the tick
    pub phase: Phase,
    /// State after the tick
    pub state: VehicleState,
    /// Engine temperature sampled for this tick
    pub engine_temp: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::parked()
    }
}

impl VehicleState {
    /// Standing still with a full tank
    pub fn parked() -> Self {
        Self::new(MIN_SPEED, FULL_TANK)
    }

    /// Create a state from speed and fuel, both clamped to their domains
    pub fn new(speed: f64, fuel: f64) -> Self {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        Self {
            speed,
            rpm: rpm_for_speed(speed),
            fuel: fuel.clamp(0.0, FULL_TANK),
        }
    }

    /// Speed in km/h
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Engine RPM
    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Fuel level in percent
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Phase the next tick will run in
    pub fn phase(&self) -> Phase {
        Phase::for_speed(self.speed)
    }

    /// Advance the vehicle by one tick of `tick_secs` seconds
    pub fn advance<N: NoiseSource + ?Sized>(self, tick_secs: f64, noise: &mut N) -> Step {
        let phase = self.phase();
        let speed = (self.speed + phase.speed_delta(noise)).clamp(MIN_SPEED, MAX_SPEED);
        let rpm = rpm_for_speed(speed);
        let fuel = (self.fuel - fuel_burn_rate(speed, rpm) * tick_secs).max(0.0);
        let engine_temp = engine_temp(speed, noise);

        Step {
            phase,
            state: Self { speed, rpm, fuel },
            engine_temp,
        }
    }
}
