//! Shrimp Jump - an endless vertical platformer simulation
//!
//! Core modules:
//! - `config`: scale-derived tuning, validated at session start
//! - `sim`: deterministic simulation (generation, physics, collisions, session state)
//!
//! The crate is headless. Rendering, input plumbing, and the frame clock
//! belong to the embedding presentation layer, which calls [`sim::tick`]
//! once per rendered frame and reads state back through accessors between
//! ticks. Runs are deterministic for a given seed, config, and input/clock
//! sequence.

pub mod config;
pub mod sim;

pub use config::{Config, ConfigError};
pub use sim::{Direction, GameState, Pickup, Platform, PlatformKind, Player, Pose, Screen, tick};

/// Base tuning constants, expressed at the reference resolution.
/// [`Config::new`] scales these to the actual canvas size.
pub mod consts {
    /// Reference canvas the scale factor is computed against
    pub const BASE_W: f32 = 400.0;
    pub const BASE_H: f32 = 800.0;

    /// Player spawn point and sprite size
    pub const START_X: f32 = 200.0;
    pub const START_Y: f32 = 700.0;
    pub const PLAYER_SIZE: f32 = 75.0;

    /// Motion
    pub const GRAVITY: f32 = 0.12;
    pub const JUMP_POWER: f32 = -8.0;
    pub const MOVE_SPEED: f32 = 6.0;
    /// Spring platforms bounce this much harder than the base jump
    pub const SPRING_BOUNCE_FACTOR: f32 = 1.25;
    /// Downward speed above which the sprite reads as falling
    pub const FALL_POSE_THRESHOLD: f32 = 2.0;

    /// Platform geometry (all kinds share the base footprint)
    pub const PLATFORM_W: f32 = 100.0;
    pub const PLATFORM_H: f32 = 25.0;
    pub const PLATFORM_COUNT: usize = 5;

    /// Scrolling
    pub const SCROLL_THRESHOLD: f32 = 160.0;
    pub const SCROLL_SPEED: f32 = 5.0;
    pub const SCROLL_SPEED_INCREASE: f32 = 0.10;
    /// Scroll speed steps up once per this many points
    pub const SCORE_BRACKET: u32 = 12;

    /// Generation
    pub const MAX_JUMP_DISTANCE: f32 = 220.0;
    pub const MOVING_PLATFORM_SPEED: f32 = 0.9;
    pub const P_MOVING: f64 = 0.22;
    pub const P_SPRING: f64 = 0.08;
    pub const P_SPIKED: f64 = 0.05;
    pub const P_DISAPPEAR: f64 = 0.12;
    pub const MIN_X_GAP: f32 = 80.0;
    pub const STEP_MIN: f32 = 70.0;
    pub const GEN_PER_TICK_CAP: u32 = 4;
    pub const PLACEMENT_TRIES: u32 = 25;

    /// Pickups (shrimp)
    pub const SHRIMP_SIZE: f32 = 40.0;
    pub const SHRIMP_VALUE: u32 = 1;
    pub const SHRIMP_CAP: usize = 30;
    pub const SHRIMP_INTERVAL_MS: u64 = 900;
    pub const SHRIMP_JITTER_MS: u64 = 600;
    pub const SHRIMP_MARGIN: f32 = 20.0;
    /// Pickups spawn this fraction of the canvas height above the player
    pub const SHRIMP_BAND_MIN: f32 = 0.25;
    pub const SHRIMP_BAND_MAX: f32 = 0.65;

    /// Collision tolerance below a platform's top surface
    pub const LANDING_TOLERANCE: f32 = 8.0;
    /// Pickups survive this far below the bottom edge before pruning
    pub const PICKUP_PRUNE_SLACK: f32 = 40.0;
}
