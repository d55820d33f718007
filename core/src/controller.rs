use crate::card::{CardChoice, CardState};
use crate::config::WidgetConfig;
use crate::drag::{DragController, DragMove, PointerId};
use crate::geometry::{centered_origin, clamp_to_viewport, Vec2};
use crate::physics::{integrate, FrameTimer, PhysicsParams};
use crate::ports::Ports;
use crate::redirect::RedirectGate;
use crate::reveal::RevealPhase;
use crate::shake::{AccelSample, ShakeDetector, ShakeParams};
use crate::tilt::{gravity_from_tilt, TiltParams, TiltSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootOutcome {
    /// The session already redirected once; navigation has been requested
    /// and nothing else should be set up.
    Redirected,
    Ready,
}

/// Owns all widget state for one page load and reacts to platform events.
pub struct WidgetController {
    config: WidgetConfig,
    ports: Ports,
    card: CardState,
    gravity: Vec2,
    frame_timer: FrameTimer,
    frame_pending: bool,
    drag: DragController,
    shake: ShakeDetector,
    gate: RedirectGate,
    phase: RevealPhase,
    tilt_started: bool,
    motion_started: bool,
}

impl WidgetController {
    pub fn new(config: WidgetConfig, ports: Ports) -> Self {
        let drag = DragController::new(config.exit_threshold);
        let shake = ShakeDetector::new(ShakeParams {
            threshold: config.shake_threshold,
            cooldown_ms: config.shake_cooldown_ms,
        });
        let gate = RedirectGate::new(
            config.redirect_url.clone(),
            config.redirect_key.clone(),
            config.redirect_delay_ms,
        );
        Self {
            config,
            ports,
            card: CardState::default(),
            gravity: Vec2::ZERO,
            frame_timer: FrameTimer::new(),
            frame_pending: false,
            drag,
            shake,
            gate,
            phase: RevealPhase::default(),
            tilt_started: false,
            motion_started: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn card(&self) -> &CardState {
        &self.card
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn redirect_pending(&self) -> bool {
        self.gate.is_pending()
    }

    pub fn boot(&mut self) -> BootOutcome {
        if self
            .gate
            .check_on_load(&*self.ports.session, &mut *self.ports.navigator)
        {
            return BootOutcome::Redirected;
        }
        self.on_orientation_change();
        BootOutcome::Ready
    }

    pub fn select_card(&mut self, choice: &CardChoice) -> bool {
        if !self.phase.select() {
            return false;
        }
        self.ports.surface.apply_choice(choice);
        self.ports.surface.hide_overlay();
        if !self.motion_started {
            self.motion_started = true;
            self.ports.motion.start();
        }
        true
    }

    /// Any click on the page after a card has been chosen.
    pub fn tap(&mut self) -> bool {
        self.trigger_reveal()
    }

    pub fn on_motion(&mut self, sample: AccelSample) -> bool {
        let armed = self.phase.awaiting_reveal();
        if self.shake.sample(sample, armed) {
            return self.trigger_reveal();
        }
        false
    }

    pub fn on_tilt(&mut self, sample: TiltSample) {
        let params = TiltParams {
            max_tilt_deg: self.config.max_tilt_deg,
            gravity_scale: self.config.gravity_scale,
        };
        if let Some(gravity) = gravity_from_tilt(sample, params) {
            self.gravity = gravity;
        }
    }

    pub fn on_frame(&mut self, timestamp_ms: f64) {
        self.frame_pending = false;
        if !self.card.visible {
            return;
        }

        let dt = self.frame_timer.tick(timestamp_ms, self.config.max_dt_ms);
        if !self.drag.is_dragging() {
            let viewport = self.ports.surface.viewport();
            let params = PhysicsParams {
                friction: self.config.friction,
                max_dt: self.config.max_dt_secs(),
            };
            integrate(&mut self.card, self.gravity, viewport, dt, params);
            self.ports.surface.place(Some(self.card.position));
        }

        self.frame_pending = true;
        self.ports.clock.request_frame();
    }

    pub fn pointer_down(&mut self, pointer: PointerId, client: Vec2) -> bool {
        if !self.card.visible {
            return false;
        }
        let rect = self.ports.surface.card_rect();
        self.card.size = rect.size();
        self.card.stop();
        self.drag.begin(pointer, client, rect);
        self.ports.pointer.capture(pointer);
        true
    }

    pub fn pointer_move(&mut self, client: Vec2) -> DragMove {
        let viewport = self.ports.surface.viewport();
        let outcome = self.drag.update(client, self.card.size, viewport);
        match outcome {
            DragMove::Idle => {}
            DragMove::Moved(position) => {
                self.card.position = position;
                self.ports.surface.place(Some(position));
            }
            DragMove::ForcedExit(pointer) => {
                self.ports.pointer.release(pointer);
                self.hide_card(true);
            }
        }
        outcome
    }

    /// Pointer up or cancel.
    pub fn pointer_up(&mut self) -> bool {
        let Some(pointer) = self.drag.end() else {
            return false;
        };
        self.ports.pointer.release(pointer);
        self.card.stop();
        true
    }

    pub fn on_resize(&mut self) {
        if !self.card.visible {
            return;
        }
        self.card.size = self.ports.surface.card_rect().size();
        let viewport = self.ports.surface.viewport();
        self.card.position = clamp_to_viewport(self.card.position, viewport, self.card.size);
        self.ports.surface.place(Some(self.card.position));
    }

    pub fn on_orientation_change(&mut self) {
        let landscape =
            self.ports.surface.matches_landscape() || self.ports.surface.viewport().is_landscape();
        self.ports.surface.set_landscape(landscape);
    }

    pub fn on_redirect_timer(&mut self) {
        if !self.gate.is_pending() {
            return;
        }
        self.gate
            .fire(&mut *self.ports.session, &mut *self.ports.navigator);
    }

    fn trigger_reveal(&mut self) -> bool {
        if !self.phase.reveal() {
            return false;
        }
        self.ports.surface.lock_orientation();
        if !self.tilt_started {
            self.tilt_started = true;
            self.ports.tilt.start();
        }
        self.reveal_card();
        true
    }

    fn reveal_card(&mut self) {
        self.ports.surface.hide_hint();
        self.ports.surface.set_card_visible(true);
        self.card.visible = true;
        self.center_card();
        self.start_physics();
    }

    fn center_card(&mut self) {
        self.card.size = self.ports.surface.card_rect().size();
        let viewport = self.ports.surface.viewport();
        self.card.position = centered_origin(viewport, self.card.size);
        self.ports.surface.place(Some(self.card.position));
    }

    fn start_physics(&mut self) {
        if self.frame_pending {
            return;
        }
        self.frame_timer.reset();
        self.frame_pending = true;
        self.ports.clock.request_frame();
    }

    fn hide_card(&mut self, redirect: bool) {
        self.drag.end();
        self.card.hide();
        self.ports.surface.set_card_visible(false);
        self.ports.surface.place(None);
        if redirect {
            self.gate.arm(&mut *self.ports.timer);
        }
    }
}
