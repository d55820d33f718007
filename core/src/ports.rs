//! Platform seams the controller talks to. The browser binding lives in the
//! `tiltcard` binary; tests substitute recording fakes.
//!
//! Implementations must not call back into the controller synchronously.
//! Anything that produces events (frames, timers, sensor readings) delivers
//! them later through the controller's `on_*` methods.

use crate::card::CardChoice;
use crate::drag::PointerId;
use crate::geometry::{Rect, Size, Vec2};

/// Delivers `deviceorientation` readings to `WidgetController::on_tilt`.
pub trait TiltSource {
    /// Starts listening, requesting sensor permission first where the
    /// platform requires it. Failures leave the source silent.
    fn start(&mut self);
}

/// Delivers `devicemotion` readings to `WidgetController::on_motion`.
pub trait MotionSource {
    fn start(&mut self);
}

/// Schedules one `WidgetController::on_frame` call per request.
pub trait FrameClock {
    fn request_frame(&mut self);
}

pub trait PointerInput {
    fn capture(&mut self, pointer: PointerId);
    fn release(&mut self, pointer: PointerId);
}

/// The card element and the page chrome around it.
pub trait CardSurface {
    fn viewport(&self) -> Size;
    fn card_rect(&self) -> Rect;
    /// Moves the card, or clears its inline position with `None`.
    fn place(&mut self, position: Option<Vec2>);
    fn set_card_visible(&mut self, visible: bool);
    fn hide_hint(&mut self);
    fn hide_overlay(&mut self);
    fn apply_choice(&mut self, choice: &CardChoice);
    fn lock_orientation(&mut self);
    fn matches_landscape(&self) -> bool;
    fn set_landscape(&mut self, landscape: bool);
}

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

pub trait Navigator {
    fn replace(&mut self, url: &str);
}

/// Schedules one `WidgetController::on_redirect_timer` call.
pub trait DelayTimer {
    fn schedule(&mut self, delay_ms: u32);
}

pub struct Ports {
    pub tilt: Box<dyn TiltSource>,
    pub motion: Box<dyn MotionSource>,
    pub clock: Box<dyn FrameClock>,
    pub pointer: Box<dyn PointerInput>,
    pub surface: Box<dyn CardSurface>,
    pub session: Box<dyn SessionStore>,
    pub navigator: Box<dyn Navigator>,
    pub timer: Box<dyn DelayTimer>,
}
