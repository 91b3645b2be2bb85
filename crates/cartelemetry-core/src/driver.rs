//! Trip Tick Driver
//!
//! Advances the vehicle once per interval until the trip duration has
//! elapsed, handing every reading to the presentation layer and the
//! channel publisher.
//!
//! The deadline is only checked between ticks: a tick that starts before
//! the deadline always runs to completion and is reported. Publish failures
//! are logged and the trip carries on with the next tick.

use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::feed::{FeedError, Publisher};
use crate::vehicle::{NoiseSource, Phase, Reading, VehicleState};

/// Tick interval and total trip length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripPlan {
    /// Wait between ticks; also the time step used for fuel burn
    pub interval: Duration,
    /// Wall-clock length of the trip
    pub duration: Duration,
}

impl TripPlan {
    /// Number of ticks a trip runs when publishing takes no time
    pub fn expected_ticks(&self) -> u64 {
        if self.interval.is_zero() {
            return 0;
        }
        let duration = self.duration.as_nanos();
        let interval = self.interval.as_nanos();
        duration.div_ceil(interval) as u64
    }
}

/// What happened on one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u32,
    /// Time since the trip started, measured after the state update
    pub elapsed: Duration,
    /// Phase the tick ran in
    pub phase: Phase,
    /// Rounded values sent to the channel
    pub reading: Reading,
}

/// Outcome of a finished trip
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    /// Identifier used in log output for this trip
    pub trip_id: Uuid,
    /// Ticks run
    pub ticks: u32,
    /// Readings the channel accepted
    pub published: u32,
    /// Readings that failed to publish
    pub failed: u32,
    /// Vehicle state after the last tick
    pub final_state: VehicleState,
    /// Total trip time
    pub elapsed: Duration,
}

/// Receives trip progress for display
pub trait TripObserver {
    /// Called once before the first tick
    fn trip_started(&mut self, _plan: &TripPlan) {}

    /// Called for every tick, before its reading is published
    fn tick(&mut self, report: &TickReport);

    /// Called when a tick's reading could not be published
    fn publish_failed(&mut self, _tick: u32, _error: &FeedError) {}

    /// Called once after the last tick
    fn trip_finished(&mut self, _summary: &TripSummary) {}
}

/// Fixed-interval trip loop
pub struct TickDriver<P, N> {
    plan: TripPlan,
    publisher: P,
    noise: N,
    state: VehicleState,
}

impl<P: Publisher, N: NoiseSource> TickDriver<P, N> {
    /// Create a driver starting from a parked vehicle with a full tank
    pub fn new(plan: TripPlan, publisher: P, noise: N) -> Self {
        Self {
            plan,
            publisher,
            noise,
            state: VehicleState::parked(),
        }
    }

    /// Start from a different vehicle state
    pub fn with_state(mut self, state: VehicleState) -> Self {
        self.state = state;
        self
    }

    /// Current vehicle state
    pub fn state(&self) -> VehicleState {
        self.state
    }

    /// The publisher readings are sent to
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Run the trip to completion
    pub async fn run<O: TripObserver>(&mut self, observer: &mut O) -> TripSummary {
        let trip_id = Uuid::new_v4();
        let tick_secs = self.plan.interval.as_secs_f64();
        info!(
            %trip_id,
            interval_secs = tick_secs,
            duration_secs = self.plan.duration.as_secs_f64(),
            planned_ticks = self.plan.expected_ticks(),
            "trip started"
        );
        observer.trip_started(&self.plan);

        let start = Instant::now();
        let mut ticks = 0u32;
        let mut published = 0u32;
        let mut failed = 0u32;

        while start.elapsed() < self.plan.duration {
            let step = self.state.advance(tick_secs, &mut self.noise);
            self.state = step.state;
            ticks += 1;

            let report = TickReport {
                tick: ticks,
                elapsed: start.elapsed(),
                phase: step.phase,
                reading: Reading::from(&step),
            };
            debug!(tick = ticks, phase = ?step.phase, reading = ?report.reading, "tick");
            observer.tick(&report);

            match self.publisher.publish(&report.reading).await {
                Ok(()) => published += 1,
                Err(e) => {
                    failed += 1;
                    warn!(%trip_id, tick = ticks, error = %e, "failed to publish reading");
                    observer.publish_failed(ticks, &e);
                }
            }

            sleep(self.plan.interval).await;
        }

        let summary = TripSummary {
            trip_id,
            ticks,
            published,
            failed,
            final_state: self.state,
            elapsed: start.elapsed(),
        };
        info!(
            %trip_id,
            ticks,
            published,
            failed,
            fuel = self.state.fuel(),
            "trip finished"
        );
        observer.trip_finished(&summary);
        summary
    }
}
