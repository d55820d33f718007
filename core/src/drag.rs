use crate::geometry::{clamp_to_viewport, Rect, Size, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub pointer: PointerId,
    /// Grab point relative to the card's top-left corner.
    pub offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragMove {
    /// No drag in progress.
    Idle,
    /// New clamped top-left for the card.
    Moved(Vec2),
    /// The card was pulled past the exit threshold; the drag has ended.
    ForcedExit(PointerId),
}

/// True when a candidate top-left lies more than `threshold` pixels beyond
/// any viewport edge.
pub fn is_forced_exit(raw: Vec2, card: Size, viewport: Size, threshold: f32) -> bool {
    raw.x < -threshold
        || raw.y < -threshold
        || raw.x > viewport.width - card.width + threshold
        || raw.y > viewport.height - card.height + threshold
}

#[derive(Clone, Debug)]
pub struct DragController {
    session: Option<DragSession>,
    exit_threshold: f32,
}

impl DragController {
    pub fn new(exit_threshold: f32) -> Self {
        Self {
            session: None,
            exit_threshold,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn begin(&mut self, pointer: PointerId, client: Vec2, card_rect: Rect) -> DragSession {
        let session = DragSession {
            pointer,
            offset: Vec2::new(client.x - card_rect.left, client.y - card_rect.top),
        };
        self.session = Some(session);
        session
    }

    pub fn update(&mut self, client: Vec2, card: Size, viewport: Size) -> DragMove {
        let Some(session) = self.session else {
            return DragMove::Idle;
        };
        let raw = Vec2::new(client.x - session.offset.x, client.y - session.offset.y);
        if is_forced_exit(raw, card, viewport, self.exit_threshold) {
            self.session = None;
            return DragMove::ForcedExit(session.pointer);
        }
        DragMove::Moved(clamp_to_viewport(raw, viewport, card))
    }

    /// Ends the drag, returning the pointer that held capture.
    pub fn end(&mut self) -> Option<PointerId> {
        self.session.take().map(|session| session.pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(400.0, 800.0);
    const CARD: Size = Size::new(200.0, 300.0);

    fn card_rect(left: f32, top: f32) -> Rect {
        Rect {
            left,
            top,
            width: CARD.width,
            height: CARD.height,
        }
    }

    #[test]
    fn exit_threshold_is_exclusive() {
        assert!(!is_forced_exit(Vec2::new(-48.0, 0.0), CARD, VIEWPORT, 48.0));
        assert!(is_forced_exit(Vec2::new(-48.5, 0.0), CARD, VIEWPORT, 48.0));
        assert!(!is_forced_exit(Vec2::new(248.0, 548.0), CARD, VIEWPORT, 48.0));
        assert!(is_forced_exit(Vec2::new(0.0, 548.5), CARD, VIEWPORT, 48.0));
    }

    #[test]
    fn move_keeps_grab_offset_and_clamps() {
        let mut drag = DragController::new(48.0);
        drag.begin(PointerId(3), Vec2::new(150.0, 160.0), card_rect(100.0, 100.0));

        let moved = drag.update(Vec2::new(170.0, 200.0), CARD, VIEWPORT);
        assert_eq!(moved, DragMove::Moved(Vec2::new(120.0, 140.0)));

        let pinned = drag.update(Vec2::new(20.0, 60.0), CARD, VIEWPORT);
        assert_eq!(pinned, DragMove::Moved(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn forced_exit_ends_the_drag() {
        let mut drag = DragController::new(48.0);
        drag.begin(PointerId(1), Vec2::new(10.0, 10.0), card_rect(0.0, 0.0));
        assert_eq!(
            drag.update(Vec2::new(-60.0, 10.0), CARD, VIEWPORT),
            DragMove::ForcedExit(PointerId(1))
        );
        assert!(!drag.is_dragging());
        assert_eq!(
            drag.update(Vec2::new(-80.0, 10.0), CARD, VIEWPORT),
            DragMove::Idle
        );
        assert_eq!(drag.end(), None);
    }
}
