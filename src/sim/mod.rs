//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical tick per frame, driven by the embedder's clock
//! - Seeded RNG only
//! - Stable entity order (store order is spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generation;
pub mod state;
pub mod tick;

pub use collision::{lands_on, overlaps};
pub use state::{
    Direction, GameState, Pickup, Platform, PlatformKind, Player, Pose, Screen,
};
pub use tick::tick;
