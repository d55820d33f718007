use crate::card::CardState;
use crate::geometry::{max_origin, Size, Vec2};

/// Frame rate the friction constant is tuned for.
pub const FRICTION_BASE_FPS: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    pub friction: f32,
    pub max_dt: f32,
}

/// Which axes hit a viewport bound during a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClampHits {
    pub x: bool,
    pub y: bool,
}

pub fn apply_friction(value: f32, dt: f32, friction: f32) -> f32 {
    value * friction.powf(dt * FRICTION_BASE_FPS)
}

/// Advances the card by `dt` seconds (capped at `params.max_dt`) and keeps
/// it inside the viewport.
pub fn integrate(
    card: &mut CardState,
    gravity: Vec2,
    viewport: Size,
    dt: f32,
    params: PhysicsParams,
) -> ClampHits {
    let dt = dt.clamp(0.0, params.max_dt);

    card.velocity.x += gravity.x * dt;
    card.velocity.y += gravity.y * dt;
    card.velocity.x = apply_friction(card.velocity.x, dt, params.friction);
    card.velocity.y = apply_friction(card.velocity.y, dt, params.friction);

    card.position.x += card.velocity.x * dt;
    card.position.y += card.velocity.y * dt;

    clamp_card(card, viewport)
}

/// Pins the card to `[0, viewport - size]` per axis, zeroing velocity on
/// each axis that was pinned.
pub fn clamp_card(card: &mut CardState, viewport: Size) -> ClampHits {
    let max = max_origin(viewport, card.size);
    let mut hits = ClampHits::default();

    if card.position.x < 0.0 {
        card.position.x = 0.0;
        card.velocity.x = 0.0;
        hits.x = true;
    } else if card.position.x > max.x {
        card.position.x = max.x;
        card.velocity.x = 0.0;
        hits.x = true;
    }

    if card.position.y < 0.0 {
        card.position.y = 0.0;
        card.velocity.y = 0.0;
        hits.y = true;
    } else if card.position.y > max.y {
        card.position.y = max.y;
        card.velocity.y = 0.0;
        hits.y = true;
    }

    hits
}

/// Converts animation-frame timestamps into capped step durations.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameTimer {
    last_ms: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous tick, `0` on the first tick after a reset.
    pub fn tick(&mut self, timestamp_ms: f64, max_dt_ms: f64) -> f32 {
        let dt_ms = match self.last_ms {
            Some(prev) => (timestamp_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        (dt_ms.min(max_dt_ms) / 1000.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: PhysicsParams = PhysicsParams {
        friction: 0.98,
        max_dt: 0.05,
    };

    #[test]
    fn friction_is_identity_at_zero_dt() {
        assert_eq!(apply_friction(120.0, 0.0, 0.98), 120.0);
    }

    #[test]
    fn friction_matches_one_frame_at_60fps() {
        let damped = apply_friction(100.0, 1.0 / 60.0, 0.98);
        assert!((damped - 98.0).abs() < 1e-3, "got {damped}");
    }

    #[test]
    fn frame_timer_caps_and_ignores_backwards_time() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.tick(1000.0, 50.0), 0.0);
        assert_eq!(timer.tick(1016.0, 50.0), 0.016);
        assert_eq!(timer.tick(9000.0, 50.0), 0.05);
        assert_eq!(timer.tick(8000.0, 50.0), 0.0);
        timer.reset();
        assert_eq!(timer.tick(20000.0, 50.0), 0.0);
    }

    #[test]
    fn clamp_zeroes_only_the_pinned_axis() {
        let mut card = CardState {
            position: Vec2::new(-5.0, 40.0),
            velocity: Vec2::new(-30.0, 12.0),
            size: Size::new(100.0, 100.0),
            visible: true,
        };
        let hits = clamp_card(&mut card, Size::new(300.0, 300.0));
        assert_eq!(hits, ClampHits { x: true, y: false });
        assert_eq!(card.velocity, Vec2::new(0.0, 12.0));
        assert_eq!(card.position, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn integrate_accelerates_along_gravity() {
        let mut card = CardState {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
            size: Size::new(50.0, 50.0),
            visible: true,
        };
        integrate(
            &mut card,
            Vec2::new(2400.0, 0.0),
            Size::new(1000.0, 1000.0),
            0.016,
            PARAMS,
        );
        assert!(card.velocity.x > 0.0);
        assert!(card.position.x > 100.0);
        assert_eq!(card.velocity.y, 0.0);
        assert_eq!(card.position.y, 100.0);
    }
}
