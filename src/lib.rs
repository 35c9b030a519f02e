//! Lander TUI - a Martian descent simulator for the terminal
//!
//! Core modules:
//! - `sim`: descent physics (Heun predictor-corrector step, fuel model,
//!   bounce/landing detection)
//! - `platform`: clock, sleep and non-blocking key polling behind a small
//!   trait so the session loop runs against a fake in tests
//! - `session`: the interactive tick loop that drives one descent
//! - `scores`: the flat-text scoreboard

pub mod platform;
pub mod scores;
pub mod session;
pub mod sim;

pub use scores::{ScoreFile, ScoreRecord};
pub use sim::LanderState;

/// Simulation constants (fixed, not tunable at runtime)
pub mod consts {
    /// Gravitational acceleration at the surface (m/s²)
    pub const GRAVITY: f64 = 3.7;
    /// Linear drag coefficient (1/s)
    pub const DRAG_COEFF: f64 = 0.13;
    /// Cubic drag shape constant (dimensionless)
    pub const DRAG_SHAPE: f64 = 8.3;
    /// Reference velocity for the cubic drag term (m/s)
    pub const V_MAX: f64 = 46.0;

    /// Release altitude above the surface (m)
    pub const RELEASE_HEIGHT: f64 = 1000.0;
    /// Fuel on board at release (units)
    pub const FUEL_RESERVE: f64 = 100.0;
    /// Burn rate change per keypress (units/s)
    pub const BURN_STEP: f64 = 1.0;

    /// Height below which bounce/landing checks engage (m)
    pub const SURFACE_BAND: f64 = 1.0;
    /// Touchdown is safe below this descent speed (m/s)
    pub const SAFE_SPEED: f64 = 1.0;

    /// Default session tick cadence (ms)
    pub const TICK_MS: u64 = 200;
}
