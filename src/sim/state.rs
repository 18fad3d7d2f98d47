//! Session state and core simulation types
//!
//! The whole mutable session lives in [`GameState`]; presentation code reads
//! it between ticks through accessors and never mutates it directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generation;
use crate::config::Config;

/// Which screen the session is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    HowToPlay,
    Playing,
}

/// Player sprite pose, recomputed from vertical velocity every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Jump,
    Fall,
}

/// Platform behavior. Kinds are mutually exclusive; a spiked platform can
/// never also be disappearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    Spring,
    Spiked,
    Disappearing,
}

/// A platform entity. `pos` is the top-left corner; the footprint comes from
/// the per-kind lookup in [`Config::platform_size`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub kind: PlatformKind,
    /// Oscillates horizontally when set
    pub moving: bool,
    /// Horizontal travel direction, +1 or -1
    pub direction: f32,
    /// Reserved; written at spawn, never read
    pub scored: bool,
}

/// A collectible shrimp. Collected pickups are pruned at the next tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub collected: bool,
}

/// The player sprite. Single instance, owned by the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub pose: Pose,
}

impl Player {
    fn at_start(config: &Config) -> Self {
        Self {
            pos: config.player_start,
            vel: Vec2::ZERO,
            size: config.player_size,
            pose: Pose::Idle,
        }
    }
}

/// Horizontal input directions exposed to the embedder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Latched key flags, updated by [`GameState::set_input`]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InputState {
    pub left: bool,
    pub right: bool,
}

/// Complete session state.
///
/// Entity stores are public so the presentation layer can iterate them;
/// score and lifecycle flags go through accessors so they can only change
/// via the simulation itself.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    /// Session seed, for reproducing a run
    pub seed: u64,
    pub(crate) rng: Pcg32,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub pickups: Vec<Pickup>,

    score: u32,
    game_over: bool,
    screen: Screen,
    paused: bool,
    pub(crate) input: InputState,

    // Session copies of config defaults, restored by reset()
    pub scroll_threshold: f32,
    pub scroll_speed: f32,
    pub max_jump_distance: f32,
    pub moving_platform_speed: f32,

    pub(crate) next_pickup_at_ms: u64,
}

impl GameState {
    /// Create a fresh session on the menu screen with platforms initialized.
    ///
    /// `now_ms` is the embedder's clock at session start; the same clock must
    /// be passed to every subsequent [`tick`](super::tick).
    pub fn new(config: Config, seed: u64, now_ms: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::at_start(&config),
            platforms: Vec::new(),
            pickups: Vec::new(),
            score: 0,
            game_over: false,
            screen: Screen::Menu,
            paused: false,
            input: InputState::default(),
            scroll_threshold: config.scroll_threshold,
            scroll_speed: config.scroll_speed,
            max_jump_distance: config.max_jump_distance,
            moving_platform_speed: config.moving_platform_speed,
            next_pickup_at_ms: 0,
            config,
        };
        generation::init_platforms(&mut state);
        state.schedule_next_pickup(now_ms);
        state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// True while ticks actually advance the world
    pub(crate) fn is_running(&self) -> bool {
        self.screen == Screen::Playing && !self.paused && !self.game_over
    }

    /// Latch a horizontal input flag. Left wins when both are held.
    pub fn set_input(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.input.left = pressed,
            Direction::Right => self.input.right = pressed,
        }
    }

    /// Confirm action: menu -> playing, how-to-play -> menu, and after a
    /// game over a full reset straight into playing.
    pub fn confirm(&mut self, now_ms: u64) {
        match self.screen {
            Screen::Menu => {
                self.screen = Screen::Playing;
                self.schedule_next_pickup(now_ms);
            }
            Screen::HowToPlay => self.screen = Screen::Menu,
            Screen::Playing if self.game_over => {
                self.reset(now_ms);
                self.screen = Screen::Playing;
                self.schedule_next_pickup(now_ms);
            }
            Screen::Playing => {}
        }
    }

    /// Open the how-to-play screen (only reachable from the menu)
    pub fn how_to_play(&mut self) {
        if self.screen == Screen::Menu {
            self.screen = Screen::HowToPlay;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.screen == Screen::Playing && !self.game_over {
            self.paused = !self.paused;
        }
    }

    pub fn set_pause(&mut self, paused: bool) {
        if self.screen == Screen::Playing && !self.game_over {
            self.paused = paused;
        }
    }

    /// Restore the session to its initial menu state: player back at start,
    /// score zeroed, stores cleared and regenerated, scroll parameters back
    /// to config defaults.
    pub fn reset(&mut self, now_ms: u64) {
        self.player = Player::at_start(&self.config);

        self.score = 0;
        self.platforms.clear();
        self.pickups.clear();
        self.scroll_threshold = self.config.scroll_threshold;
        self.scroll_speed = self.config.scroll_speed;
        self.max_jump_distance = self.config.max_jump_distance;
        self.moving_platform_speed = self.config.moving_platform_speed;

        self.game_over = false;
        self.paused = false;
        self.screen = Screen::Menu;

        generation::init_platforms(self);
        self.schedule_next_pickup(now_ms);
    }

    pub(crate) fn award(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn trigger_game_over(&mut self) {
        if !self.game_over {
            self.game_over = true;
            log::info!("game over at score {}", self.score);
        }
    }

    pub(crate) fn schedule_next_pickup(&mut self, now_ms: u64) {
        let jitter = self.rng.random_range(0..self.config.pickup_jitter_ms);
        self.next_pickup_at_ms = now_ms + self.config.pickup_interval_ms + jitter;
    }
}
