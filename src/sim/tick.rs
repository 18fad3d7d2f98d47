//! Per-frame simulation advance
//!
//! One logical tick per rendered frame, driven by the embedder's clock.
//! A tick is a synchronous transformation of the session state: physics,
//! scrolling, generation, collisions, then terminal checks, in that order.

use super::collision;
use super::generation;
use super::state::{GameState, PlatformKind, Pose};

/// Advance the session by one tick. No-op unless the session is actively
/// playing (not paused, not over). `now_ms` is the embedder's clock, used
/// only for the pickup spawn schedule.
pub fn tick(state: &mut GameState, now_ms: u64) {
    if !state.is_running() {
        return;
    }
    let cfg = state.config.clone();

    // Scroll speed steps up once per score bracket
    let scroll_speed = state.scroll_speed
        + (state.score() / cfg.score_bracket) as f32 * cfg.scroll_speed_increase;

    // Gravity, then horizontal input. Left wins when both keys are held.
    state.player.vel.y += cfg.gravity;
    state.player.pos.y += state.player.vel.y;

    state.player.vel.x = if state.input.left {
        -cfg.move_speed
    } else if state.input.right {
        cfg.move_speed
    } else {
        0.0
    };
    state.player.pos.x += state.player.vel.x;

    // Wraparound on the bounding box, not the center
    if state.player.pos.x + state.player.size.x < 0.0 {
        state.player.pos.x = cfg.canvas.x;
    }
    if state.player.pos.x > cfg.canvas.x {
        state.player.pos.x = -state.player.size.x;
    }

    // Auto-scroll everything down while the player holds above the threshold
    if state.player.pos.y < state.scroll_threshold {
        for p in &mut state.platforms {
            p.pos.y += scroll_speed;
        }
        for s in &mut state.pickups {
            s.pos.y += scroll_speed;
        }
        state.player.pos.y += scroll_speed;
    }

    // Moving platforms oscillate between the screen edges
    for p in &mut state.platforms {
        if p.moving {
            let width = cfg.platform_size(p.kind).x;
            p.pos.x += p.direction * state.moving_platform_speed;
            if p.pos.x <= 0.0 {
                p.direction = 1.0;
            }
            if p.pos.x + width >= cfg.canvas.x {
                p.direction = -1.0;
            }
        }
    }

    // Prune what fell past the bottom edge, then top the supply back up
    state.platforms.retain(|p| p.pos.y < cfg.canvas.y);
    state
        .pickups
        .retain(|s| !s.collected && s.pos.y < cfg.canvas.y + cfg.pickup_prune_slack);

    generation::ensure_supply(state);
    generation::spawn_due_pickup(state, now_ms);

    // Landing: first hit in store order wins
    let landed = state.platforms.iter().position(|p| {
        collision::lands_on(
            state.player.pos,
            state.player.size,
            state.player.vel.y,
            p.pos,
            cfg.platform_size(p.kind),
            cfg.landing_tolerance,
        )
    });
    if let Some(i) = landed {
        match state.platforms[i].kind {
            PlatformKind::Spiked => {
                // Hazard landing ends the tick immediately
                state.trigger_game_over();
                return;
            }
            PlatformKind::Spring => {
                state.player.vel.y = cfg.jump_power * cfg.spring_bounce_factor;
            }
            PlatformKind::Disappearing => {
                state.player.vel.y = cfg.jump_power;
                state.platforms.remove(i);
            }
            PlatformKind::Normal => {
                state.player.vel.y = cfg.jump_power;
            }
        }
    }

    // Pickup collection is independent of landing
    let (player_pos, player_size) = (state.player.pos, state.player.size);
    let mut collected = 0u32;
    for s in &mut state.pickups {
        if !s.collected && collision::overlaps(player_pos, player_size, s.pos, cfg.pickup_size) {
            s.collected = true;
            collected += 1;
        }
    }
    if collected > 0 {
        state.award(collected * cfg.pickup_value);
        log::debug!(
            "collected {collected} pickup(s), score now {}",
            state.score()
        );
    }

    // Pose is derived from velocity every tick, never stored stale
    state.player.pose = if state.player.vel.y < 0.0 {
        Pose::Jump
    } else if state.player.vel.y > cfg.fall_pose_threshold {
        Pose::Fall
    } else {
        Pose::Idle
    };

    // Fell off the bottom edge
    if state.player.pos.y > cfg.canvas.y {
        state.trigger_game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::{Direction, Pickup, Platform, Screen};
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let config = Config::new(400.0, 800.0).unwrap();
        let mut state = GameState::new(config, seed, 0);
        state.confirm(0);
        state
    }

    fn platform(kind: PlatformKind, x: f32, y: f32) -> Platform {
        Platform {
            pos: Vec2::new(x, y),
            kind,
            moving: false,
            direction: 1.0,
            scored: false,
        }
    }

    /// Player parked so one tick of gravity drops its feet into the landing
    /// band of a platform at (100, 500), below the scroll threshold.
    fn park_player_over(state: &mut GameState) {
        state.player.pos = Vec2::new(110.0, 430.0);
        state.player.vel = Vec2::ZERO;
    }

    #[test]
    fn test_ticks_are_noops_outside_play() {
        let mut state = playing_state(1);
        state.set_pause(true);
        let before = state.player.pos;
        tick(&mut state, 16);
        assert_eq!(state.player.pos, before);

        let mut menu = GameState::new(Config::new(400.0, 800.0).unwrap(), 1, 0);
        let before = menu.player.pos;
        tick(&mut menu, 16);
        assert_eq!(menu.player.pos, before);
    }

    #[test]
    fn test_normal_landing_bounces_at_jump_power() {
        let mut state = playing_state(2);
        state.platforms = vec![platform(PlatformKind::Normal, 100.0, 500.0)];
        park_player_over(&mut state);

        tick(&mut state, 0);
        assert_eq!(state.player.vel.y, state.config.jump_power);
        assert_eq!(state.player.pose, Pose::Jump);
        assert!(!state.game_over());
    }

    #[test]
    fn test_spring_landing_bounces_higher() {
        let mut state = playing_state(3);
        state.platforms = vec![platform(PlatformKind::Spring, 100.0, 500.0)];
        park_player_over(&mut state);

        tick(&mut state, 0);
        assert_eq!(
            state.player.vel.y,
            state.config.jump_power * state.config.spring_bounce_factor
        );
        assert!(state.player.vel.y.abs() > state.config.jump_power.abs());
    }

    #[test]
    fn test_disappearing_platform_removed_on_landing() {
        let mut state = playing_state(4);
        state.platforms = vec![platform(PlatformKind::Disappearing, 100.0, 500.0)];
        park_player_over(&mut state);

        tick(&mut state, 0);
        assert_eq!(state.player.vel.y, state.config.jump_power);
        // Gone this very tick; supply generation only adds platforms well
        // above the landing height
        assert!(state.platforms.iter().all(|p| p.pos.y != 500.0));
    }

    #[test]
    fn test_spiked_landing_aborts_tick() {
        let mut state = playing_state(5);
        state.platforms = vec![platform(PlatformKind::Spiked, 100.0, 500.0)];
        park_player_over(&mut state);
        // A pickup dead on the player: a completed tick would collect it
        state.pickups = vec![Pickup {
            pos: state.player.pos,
            collected: false,
        }];

        tick(&mut state, 0);
        assert!(state.game_over());
        assert_eq!(state.screen(), Screen::Playing);
        assert_eq!(state.score(), 0);
        assert!(!state.pickups[0].collected);
    }

    #[test]
    fn test_pickup_at_player_coords_collected_once() {
        let mut state = playing_state(6);
        state.platforms.clear();
        state.player.pos = Vec2::new(200.0, 400.0);
        state.player.vel = Vec2::ZERO;
        state.pickups = vec![Pickup {
            pos: Vec2::new(200.0, 400.0),
            collected: false,
        }];

        tick(&mut state, 0);
        assert!(state.pickups[0].collected);
        assert_eq!(state.score(), state.config.pickup_value);

        // Collected pickups are pruned and never score twice
        tick(&mut state, 16);
        assert_eq!(state.score(), state.config.pickup_value);
        assert!(state.pickups.iter().all(|s| !s.collected));
    }

    #[test]
    fn test_falling_off_bottom_ends_game() {
        let mut state = playing_state(7);
        state.platforms.clear();

        for _ in 0..500 {
            tick(&mut state, 0);
            if state.game_over() {
                break;
            }
        }
        assert!(state.game_over());
        assert_eq!(state.screen(), Screen::Playing);

        // Further ticks are no-ops until reset
        let pos = state.player.pos;
        let count = state.platforms.len();
        tick(&mut state, 16);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.platforms.len(), count);

        state.confirm(32);
        assert!(!state.game_over());
        assert_eq!(state.screen(), Screen::Playing);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_left_input_wins_over_right() {
        let mut state = playing_state(8);
        state.set_input(Direction::Left, true);
        state.set_input(Direction::Right, true);

        tick(&mut state, 0);
        assert_eq!(state.player.vel.x, -state.config.move_speed);

        state.set_input(Direction::Left, false);
        tick(&mut state, 16);
        assert_eq!(state.player.vel.x, state.config.move_speed);
    }

    #[test]
    fn test_wraparound_uses_bounding_box() {
        let mut state = playing_state(9);
        state.platforms.clear();

        // Fully off the left edge reappears at the right
        state.player.pos = Vec2::new(-state.player.size.x - 10.0, 400.0);
        state.player.vel = Vec2::ZERO;
        tick(&mut state, 0);
        assert_eq!(state.player.pos.x, state.config.canvas.x);

        // Past the right edge reappears just off the left
        state.player.pos = Vec2::new(state.config.canvas.x + 10.0, 400.0);
        tick(&mut state, 16);
        assert_eq!(state.player.pos.x, -state.player.size.x);
    }

    #[test]
    fn test_scroll_shifts_world_and_speeds_up_with_score() {
        let mut state = playing_state(10);
        state.platforms = vec![platform(PlatformKind::Normal, 100.0, 700.0)];
        state.player.pos = Vec2::new(200.0, 100.0);
        state.player.vel = Vec2::ZERO;

        tick(&mut state, 0);
        let shifted = state.platforms[0].pos.y - 700.0;
        assert_eq!(shifted, state.config.scroll_speed);

        // One full score bracket later the scroll is one increment faster
        let mut fast = playing_state(10);
        fast.platforms = vec![platform(PlatformKind::Normal, 100.0, 700.0)];
        fast.player.pos = Vec2::new(200.0, 100.0);
        fast.player.vel = Vec2::ZERO;
        fast.award(fast.config.score_bracket);

        tick(&mut fast, 0);
        // The shift is recovered from a position that already absorbed the
        // add, so compare within an epsilon rather than bit-exact
        let fast_shift = fast.platforms[0].pos.y - 700.0;
        let expected = state.config.scroll_speed + state.config.scroll_speed_increase;
        assert!(
            (fast_shift - expected).abs() < 1e-3,
            "expected shift {expected}, got {fast_shift}"
        );
    }

    #[test]
    fn test_moving_platform_reverses_at_edges() {
        let mut state = playing_state(11);
        let mut p = platform(PlatformKind::Normal, 0.5, 700.0);
        p.moving = true;
        p.direction = -1.0;
        state.platforms = vec![p];
        state.player.pos = Vec2::new(200.0, 400.0);
        state.player.vel = Vec2::ZERO;

        tick(&mut state, 0);
        assert_eq!(state.platforms[0].direction, 1.0);

        state.platforms[0].pos.x =
            state.config.canvas.x - state.config.normal_size.x - 0.5;
        tick(&mut state, 16);
        assert_eq!(state.platforms[0].direction, -1.0);
    }

    #[test]
    fn test_pickup_count_never_exceeds_cap() {
        let mut state = playing_state(12);
        let mut now = 0u64;
        for _ in 0..10_000 {
            tick(&mut state, now);
            now += 16;
            assert!(state.pickups.len() <= state.config.pickup_cap);
            if state.game_over() {
                state.confirm(now);
            }
        }
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut state = playing_state(13);
        let mut last = state.score();
        let mut now = 0u64;
        for i in 0..5_000 {
            state.set_input(Direction::Left, i % 60 < 20);
            state.set_input(Direction::Right, i % 60 >= 40);
            tick(&mut state, now);
            now += 16;
            assert!(state.score() >= last);
            last = state.score();
            if state.game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = Config::new(400.0, 800.0).unwrap();
        let mut a = GameState::new(config.clone(), 99_999, 0);
        let mut b = GameState::new(config, 99_999, 0);
        a.confirm(0);
        b.confirm(0);

        let mut now = 0u64;
        for i in 0..2_000 {
            let left = (i / 45) % 2 == 0;
            a.set_input(Direction::Left, left);
            b.set_input(Direction::Left, left);
            tick(&mut a, now);
            tick(&mut b, now);
            now += 16;
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.game_over(), b.game_over());
        assert_eq!(a.platforms.len(), b.platforms.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.kind, pb.kind);
        }
    }
}
