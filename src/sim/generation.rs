//! Procedural platform and pickup generation
//!
//! All placement uses bounded-retry-then-clamp: sampling never loops forever
//! and falls back to a deterministic in-bounds position at exactly the
//! minimum gap.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Pickup, Platform, PlatformKind, Screen};
use crate::config::Config;

/// Uniform x in `[0, canvas_w - width]`, at least `min_x_gap` away from
/// `reference`. After the retry budget is spent, clamps to the nearest valid
/// position at exactly the gap, stepping toward whichever half of the screen
/// the reference is not in.
pub(crate) fn place_far_from(rng: &mut Pcg32, reference: f32, width: f32, cfg: &Config) -> f32 {
    let span = cfg.canvas.x - width;
    for _ in 0..cfg.placement_tries {
        let x = rng.random::<f32>() * span;
        if (x - reference).abs() >= cfg.min_x_gap {
            return x;
        }
    }
    if reference < cfg.canvas.x / 2.0 {
        (reference + cfg.min_x_gap).min(span)
    } else {
        (reference - cfg.min_x_gap).max(0.0)
    }
}

/// Like [`place_far_from`], but unconstrained when there is no predecessor.
pub(crate) fn place_with_gap(
    rng: &mut Pcg32,
    prev_x: Option<f32>,
    width: f32,
    cfg: &Config,
) -> f32 {
    match prev_x {
        Some(px) => place_far_from(rng, px, width, cfg),
        None => rng.random::<f32>() * (cfg.canvas.x - width),
    }
}

/// Sample a platform with independently rolled kind flags. Exclusivity is
/// resolved with priority spiked > spring > disappearing.
fn roll_platform(rng: &mut Pcg32, cfg: &Config, x: f32, y: f32) -> Platform {
    let moving = rng.random_bool(cfg.p_moving);
    let direction = if rng.random::<f32>() > 0.5 { 1.0 } else { -1.0 };
    let disappearing = rng.random_bool(cfg.p_disappear);
    let spiked = rng.random_bool(cfg.p_spiked);
    let spring = rng.random_bool(cfg.p_spring);

    let kind = if spiked {
        PlatformKind::Spiked
    } else if spring {
        PlatformKind::Spring
    } else if disappearing {
        PlatformKind::Disappearing
    } else {
        PlatformKind::Normal
    };

    Platform {
        pos: Vec2::new(x, y),
        kind,
        moving,
        direction,
        scored: false,
    }
}

/// Companion for a spiked platform: same height, far from the hazard, never
/// itself hazardous or disappearing. Spring and moving rolls still apply.
fn companion_for(rng: &mut Pcg32, cfg: &Config, spiked_x: f32, y: f32) -> Platform {
    let width = cfg.platform_size(PlatformKind::Normal).x;
    let x = place_far_from(rng, spiked_x, width, cfg);
    let moving = rng.random_bool(cfg.p_moving);
    let direction = if rng.random::<f32>() > 0.5 { 1.0 } else { -1.0 };
    let kind = if rng.random_bool(cfg.p_spring) {
        PlatformKind::Spring
    } else {
        PlatformKind::Normal
    };

    Platform {
        pos: Vec2::new(x, y),
        kind,
        moving,
        direction,
        scored: false,
    }
}

/// Clear both stores and lay out the initial field: a safe starting platform
/// directly beneath the player, then `platform_count - 1` more climbing
/// upward at evenly spaced bands.
pub(crate) fn init_platforms(state: &mut GameState) {
    let cfg = state.config.clone();
    let width = cfg.platform_size(PlatformKind::Normal).x;

    state.platforms.clear();
    state.pickups.clear();

    let start_x = (state.player.pos.x - width / 2.0).clamp(0.0, cfg.canvas.x - width);
    let start_y = (state.player.pos.y + state.player.size.y - cfg.start_platform_inset)
        .min(cfg.canvas.y - cfg.start_platform_floor);
    state.platforms.push(Platform {
        pos: Vec2::new(start_x, start_y),
        kind: PlatformKind::Normal,
        moving: false,
        direction: 1.0,
        scored: false,
    });
    let mut last_x = start_x;

    for i in 1..cfg.platform_count {
        let x = place_far_from(&mut state.rng, last_x, width, &cfg);
        last_x = x;
        let y = cfg.canvas.y - i as f32 * (cfg.canvas.y / cfg.platform_count as f32);

        let plat = roll_platform(&mut state.rng, &cfg, x, y);
        let needs_companion = plat.kind == PlatformKind::Spiked;
        let spiked_x = plat.pos.x;
        state.platforms.push(plat);

        if needs_companion {
            let buddy = companion_for(&mut state.rng, &cfg, spiked_x, y);
            state.platforms.push(buddy);
        }
    }
}

/// Keep the platform supply ahead of the player. Force-spawns one platform
/// just above the top edge if the store ran empty, then steps upward by a
/// randomized delta until the highest platform is within jumping range,
/// bounded per tick to cap frame cost.
pub(crate) fn ensure_supply(state: &mut GameState) {
    let cfg = state.config.clone();
    let width = cfg.platform_size(PlatformKind::Normal).x;

    if state.platforms.is_empty() {
        let x = state.rng.random::<f32>() * (cfg.canvas.x - width);
        let y = -cfg.platform_size(PlatformKind::Normal).y;
        let plat = roll_platform(&mut state.rng, &cfg, x, y);
        log::debug!("platform supply exhausted, respawning at top");
        state.platforms.push(plat);
    }

    // Shrink the minimum step when the jump distance is too small to leave a
    // positive sampling range
    let mut step_min = cfg.step_min;
    if state.max_jump_distance <= step_min + cfg.step_min_slack {
        step_min = cfg
            .step_min_floor
            .max((state.max_jump_distance * 0.6).floor());
    }

    let mut highest = state
        .platforms
        .iter()
        .map(|p| p.pos.y)
        .fold(f32::INFINITY, f32::min);
    let mut last_x = state.platforms.last().map(|p| p.pos.x);
    let mut generated = 0;

    while highest > -state.max_jump_distance && generated < cfg.gen_per_tick_cap {
        let delta = state.rng.random::<f32>() * (state.max_jump_distance - step_min) + step_min;
        let y = highest - delta;

        let x = place_with_gap(&mut state.rng, last_x, width, &cfg);
        last_x = Some(x);

        let plat = roll_platform(&mut state.rng, &cfg, x, y);
        let needs_companion = plat.kind == PlatformKind::Spiked;
        let spiked_x = plat.pos.x;
        state.platforms.push(plat);

        if needs_companion {
            let buddy = companion_for(&mut state.rng, &cfg, spiked_x, y);
            state.platforms.push(buddy);
        }

        highest = highest.min(y);
        generated += 1;
    }
}

/// Spawn a pickup if its schedule came due: random x within margins, random
/// height in the configured band above the player. Skipped silently at the
/// concurrency cap; either way the next spawn is rescheduled.
pub(crate) fn spawn_due_pickup(state: &mut GameState, now_ms: u64) {
    if state.screen() != Screen::Playing || now_ms < state.next_pickup_at_ms {
        return;
    }
    let cfg = state.config.clone();

    let min_above = (cfg.canvas.y * cfg.pickup_band_min).round();
    let max_above = (cfg.canvas.y * cfg.pickup_band_max).round();
    let above = (min_above + state.rng.random::<f32>() * (max_above - min_above)).round();
    let y = state.player.pos.y - above;

    let span = cfg.canvas.x - cfg.pickup_size.x - cfg.pickup_margin * 2.0;
    let x = (cfg.pickup_margin + state.rng.random::<f32>() * span).round();

    if state.pickups.len() < cfg.pickup_cap {
        state.pickups.push(Pickup {
            pos: Vec2::new(x, y),
            collected: false,
        });
    }
    state.schedule_next_pickup(now_ms);
}
