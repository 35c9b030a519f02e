//! Descent physics
//!
//! A 1-D drag-limited fall integrated with Heun's predictor-corrector
//! method, plus the fuel/burn model and bounce/landing detection. All
//! state lives in [`LanderState`]; every update is an explicit method
//! taking the timestep, so the whole module runs the same under the real
//! clock and the test fake.

use crate::consts::*;

/// Net downward acceleration (m/s²) for a given velocity and burn rate.
///
/// Positive velocity is toward the surface; the burn opposes gravity
/// directly in acceleration units.
pub fn acceleration(v: f64, burn_rate: f64) -> f64 {
    GRAVITY - DRAG_COEFF * (v + DRAG_SHAPE * (v / V_MAX).powi(3)) - burn_rate
}

/// One predictor-corrector velocity update of size `dt` seconds.
pub fn heun_step(v: f64, burn_rate: f64, dt: f64) -> f64 {
    let a0 = acceleration(v, burn_rate);
    let predicted = v + a0 * dt;
    let a1 = acceleration(predicted, burn_rate);
    v + (a0 + a1) / 2.0 * dt
}

/// What a single integration step concluded about the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still falling (or climbing after a bounce)
    Descending,
    /// Hit the surface too fast; velocity reversed
    Bounced,
    /// Touched down inside the safe-speed band; descent over
    Landed,
}

/// Full state of one descent. Owned by the session loop and discarded
/// when the descent ends.
#[derive(Debug, Clone)]
pub struct LanderState {
    /// Descent speed (m/s), positive toward the surface
    pub velocity: f64,
    /// Height above the surface (m); may go transiently negative around
    /// a bounce, which is deliberate
    pub height: f64,
    /// Current burn rate (fuel units/s)
    pub burn_rate: f64,
    /// Remaining fuel (units)
    pub fuel_reserve: f64,
    /// Display clock, rolls at 60
    pub minutes: f64,
    /// Display clock, rolls at 60
    pub seconds: f64,
    /// Display clock, rolls at 1000
    pub millis: f64,
    /// Surface impacts survived so far
    pub bounces: u32,
}

impl Default for LanderState {
    fn default() -> Self {
        Self::new()
    }
}

impl LanderState {
    /// Fresh state at the moment of release from the mother ship.
    pub fn new() -> Self {
        Self {
            velocity: 0.0,
            height: RELEASE_HEIGHT,
            burn_rate: 0.0,
            fuel_reserve: FUEL_RESERVE,
            minutes: 0.0,
            seconds: 0.0,
            millis: 0.0,
            bounces: 0,
        }
    }

    /// Advance the cosmetic min/sec/ms counters by a wall-clock delta.
    ///
    /// The millisecond counter resets to zero at the 1000 boundary rather
    /// than carrying the remainder; physics uses the raw delta, so the
    /// drift is display-only.
    pub fn advance_clock(&mut self, delta_ms: f64) {
        self.millis += delta_ms;
        if self.millis >= 1000.0 {
            self.millis = 0.0;
            self.seconds += 1.0;
        }
        if self.seconds >= 60.0 {
            self.seconds = 0.0;
            self.minutes += 1.0;
        }
    }

    /// Elapsed time figure recorded on the scoreboard.
    pub fn elapsed_seconds(&self) -> f64 {
        self.minutes * 60.0 + self.seconds + self.millis / 1000.0
    }

    /// Raise the burn by one unit. No effect on an empty reserve.
    pub fn increase_burn(&mut self) {
        if self.fuel_reserve > 0.0 {
            self.burn_rate += BURN_STEP;
        }
    }

    /// Lower the burn by one unit. No effect when already at zero.
    pub fn decrease_burn(&mut self) {
        if self.burn_rate > 0.0 {
            self.burn_rate -= BURN_STEP;
        }
    }

    /// Deplete the reserve for one tick of burning.
    ///
    /// Exhaustion kills the burn outright; the partial burn of the tick
    /// that empties the tank is not pro-rated.
    pub fn consume_fuel(&mut self, dt: f64) {
        if self.burn_rate > 0.0 {
            self.fuel_reserve -= self.burn_rate * dt;
        }
        if self.fuel_reserve <= 0.0 {
            self.burn_rate = 0.0;
            self.fuel_reserve = 0.0;
        }
    }

    /// One integrator step of `dt` seconds, then bounce/landing checks.
    ///
    /// Bounce wins over landing: the landing band only fires when the
    /// impact speed is at or below the bounce threshold. A velocity of
    /// exactly zero or negative near the surface triggers neither, and
    /// the descent keeps ticking.
    pub fn step(&mut self, dt: f64) -> StepOutcome {
        let v = heun_step(self.velocity, self.burn_rate, dt);
        self.velocity = v;
        self.height -= v * dt;

        if self.height < SURFACE_BAND && v > SAFE_SPEED {
            self.bounces += 1;
            self.velocity = -v; // elastic reversal; height not clamped
            StepOutcome::Bounced
        } else if self.height < SURFACE_BAND && v > 0.0 && v < SAFE_SPEED {
            StepOutcome::Landed
        } else {
            StepOutcome::Descending
        }
    }
}
