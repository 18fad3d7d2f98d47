//! Session configuration
//!
//! Every tunable is derived from a single scale factor computed from the
//! actual canvas size against the reference resolution, so the simulation
//! behaves identically at any window size.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::PlatformKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas {width}x{height} yields non-positive scale factor")]
    NonPositiveScale { width: f32, height: f32 },
    #[error("max jump distance must be positive, got {0}")]
    NonPositiveJumpDistance(f32),
}

/// Immutable per-session tuning, fully resolved at construction.
///
/// The scroll and jump-distance fields here are the defaults; the live
/// session keeps its own mutable copies that [`reset`](crate::GameState::reset)
/// restores from this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Actual canvas size in pixels
    pub canvas: Vec2,
    /// min(canvas.x / 400, canvas.y / 800)
    pub scale: f32,

    // Player
    pub player_start: Vec2,
    pub player_size: Vec2,
    pub gravity: f32,
    pub jump_power: f32,
    pub move_speed: f32,
    pub fall_pose_threshold: f32,

    // Platforms, sized per kind
    pub normal_size: Vec2,
    pub spring_size: Vec2,
    pub spiked_size: Vec2,
    pub disappearing_size: Vec2,
    pub platform_count: usize,

    // Scrolling
    pub scroll_threshold: f32,
    pub scroll_speed: f32,
    pub scroll_speed_increase: f32,
    pub score_bracket: u32,

    // Generation
    pub max_jump_distance: f32,
    pub moving_platform_speed: f32,
    pub p_moving: f64,
    pub p_spring: f64,
    pub p_spiked: f64,
    pub p_disappear: f64,
    pub min_x_gap: f32,
    pub step_min: f32,
    /// Slack over `step_min` below which the step range is shrunk
    pub step_min_slack: f32,
    /// Lower bound the shrunk `step_min` never goes under
    pub step_min_floor: f32,
    pub gen_per_tick_cap: u32,
    pub placement_tries: u32,
    /// Starting platform sits this far above the player's feet
    pub start_platform_inset: f32,
    /// Starting platform never sits closer than this to the bottom edge
    pub start_platform_floor: f32,

    // Pickups
    pub pickup_size: Vec2,
    pub pickup_value: u32,
    pub pickup_cap: usize,
    pub pickup_interval_ms: u64,
    pub pickup_jitter_ms: u64,
    pub pickup_margin: f32,
    pub pickup_band_min: f32,
    pub pickup_band_max: f32,

    // Collision
    pub spring_bounce_factor: f32,
    pub landing_tolerance: f32,
    pub pickup_prune_slack: f32,
}

impl Config {
    /// Derive a full configuration for the given canvas size.
    ///
    /// Fails fast on degenerate geometry; the simulation assumes a valid
    /// config everywhere else.
    pub fn new(canvas_w: f32, canvas_h: f32) -> Result<Self, ConfigError> {
        // Validate the raw inputs: f32::min returns its non-NaN operand, so
        // a NaN axis would otherwise slip past a check on the scale alone
        if !(canvas_w.is_finite() && canvas_h.is_finite() && canvas_w > 0.0 && canvas_h > 0.0) {
            return Err(ConfigError::NonPositiveScale {
                width: canvas_w,
                height: canvas_h,
            });
        }
        let scale = (canvas_w / BASE_W).min(canvas_h / BASE_H);
        let px = |v: f32| (v * scale).round();

        let max_jump_distance = px(MAX_JUMP_DISTANCE);
        if max_jump_distance <= 0.0 {
            return Err(ConfigError::NonPositiveJumpDistance(max_jump_distance));
        }

        let platform_size = Vec2::new(px(PLATFORM_W), px(PLATFORM_H));

        Ok(Self {
            canvas: Vec2::new(canvas_w, canvas_h),
            scale,

            player_start: Vec2::new(px(START_X), px(START_Y)),
            player_size: Vec2::splat(px(PLAYER_SIZE)),
            gravity: GRAVITY * scale,
            jump_power: JUMP_POWER * scale,
            move_speed: MOVE_SPEED * scale,
            fall_pose_threshold: FALL_POSE_THRESHOLD * scale,

            normal_size: platform_size,
            spring_size: platform_size,
            spiked_size: platform_size,
            disappearing_size: platform_size,
            platform_count: PLATFORM_COUNT,

            scroll_threshold: px(SCROLL_THRESHOLD),
            scroll_speed: SCROLL_SPEED * scale,
            scroll_speed_increase: SCROLL_SPEED_INCREASE * scale,
            score_bracket: SCORE_BRACKET,

            max_jump_distance,
            moving_platform_speed: MOVING_PLATFORM_SPEED * scale,
            p_moving: P_MOVING,
            p_spring: P_SPRING,
            p_spiked: P_SPIKED,
            p_disappear: P_DISAPPEAR,
            min_x_gap: px(MIN_X_GAP),
            step_min: px(STEP_MIN),
            step_min_slack: px(5.0),
            step_min_floor: px(30.0),
            gen_per_tick_cap: GEN_PER_TICK_CAP,
            placement_tries: PLACEMENT_TRIES,
            start_platform_inset: px(6.0),
            start_platform_floor: px(10.0),

            pickup_size: Vec2::splat(px(SHRIMP_SIZE)),
            pickup_value: SHRIMP_VALUE,
            pickup_cap: SHRIMP_CAP,
            pickup_interval_ms: SHRIMP_INTERVAL_MS,
            pickup_jitter_ms: SHRIMP_JITTER_MS,
            pickup_margin: px(SHRIMP_MARGIN),
            pickup_band_min: SHRIMP_BAND_MIN,
            pickup_band_max: SHRIMP_BAND_MAX,

            spring_bounce_factor: SPRING_BOUNCE_FACTOR,
            landing_tolerance: px(LANDING_TOLERANCE),
            pickup_prune_slack: px(PICKUP_PRUNE_SLACK),
        })
    }

    /// Footprint for a platform of the given kind.
    pub fn platform_size(&self, kind: PlatformKind) -> Vec2 {
        match kind {
            PlatformKind::Normal => self.normal_size,
            PlatformKind::Spring => self.spring_size,
            PlatformKind::Spiked => self.spiked_size,
            PlatformKind::Disappearing => self.disappearing_size,
        }
    }
}
