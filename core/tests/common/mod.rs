#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tiltcard_core::{
    CardChoice, CardSurface, DelayTimer, FrameClock, MotionSource, Navigator, PointerId,
    PointerInput, Ports, Rect, SessionStore, Size, TiltSource, Vec2, WidgetConfig,
    WidgetController,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    TiltStart,
    MotionStart,
    Frame,
    Capture(PointerId),
    Release(PointerId),
    Place(Option<Vec2>),
    CardVisible(bool),
    HideHint,
    HideOverlay,
    Choice(CardChoice),
    LockOrientation,
    Landscape(bool),
    SessionSet(String, String),
    Navigate(String),
    Schedule(u32),
}

#[derive(Default)]
pub struct World {
    pub viewport: Size,
    pub card_size: Size,
    pub card_origin: Vec2,
    pub landscape_query: bool,
    pub session: HashMap<String, String>,
    pub calls: Vec<Call>,
}

impl World {
    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|seen| *seen == call).count()
    }

    pub fn count_where(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn last_place(&self) -> Option<Option<Vec2>> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Place(position) => Some(*position),
            _ => None,
        })
    }
}

pub type Shared = Rc<RefCell<World>>;

struct Fake(Shared);

impl Fake {
    fn push(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }
}

impl TiltSource for Fake {
    fn start(&mut self) {
        self.push(Call::TiltStart);
    }
}

struct FakeMotion(Shared);

impl MotionSource for FakeMotion {
    fn start(&mut self) {
        self.0.borrow_mut().calls.push(Call::MotionStart);
    }
}

impl FrameClock for Fake {
    fn request_frame(&mut self) {
        self.push(Call::Frame);
    }
}

impl PointerInput for Fake {
    fn capture(&mut self, pointer: PointerId) {
        self.push(Call::Capture(pointer));
    }

    fn release(&mut self, pointer: PointerId) {
        self.push(Call::Release(pointer));
    }
}

impl CardSurface for Fake {
    fn viewport(&self) -> Size {
        self.0.borrow().viewport
    }

    fn card_rect(&self) -> Rect {
        let world = self.0.borrow();
        Rect {
            left: world.card_origin.x,
            top: world.card_origin.y,
            width: world.card_size.width,
            height: world.card_size.height,
        }
    }

    fn place(&mut self, position: Option<Vec2>) {
        let mut world = self.0.borrow_mut();
        if let Some(position) = position {
            world.card_origin = position;
        }
        world.calls.push(Call::Place(position));
    }

    fn set_card_visible(&mut self, visible: bool) {
        self.push(Call::CardVisible(visible));
    }

    fn hide_hint(&mut self) {
        self.push(Call::HideHint);
    }

    fn hide_overlay(&mut self) {
        self.push(Call::HideOverlay);
    }

    fn apply_choice(&mut self, choice: &CardChoice) {
        self.push(Call::Choice(choice.clone()));
    }

    fn lock_orientation(&mut self) {
        self.push(Call::LockOrientation);
    }

    fn matches_landscape(&self) -> bool {
        self.0.borrow().landscape_query
    }

    fn set_landscape(&mut self, landscape: bool) {
        self.push(Call::Landscape(landscape));
    }
}

impl SessionStore for Fake {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().session.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut world = self.0.borrow_mut();
        world.session.insert(key.to_string(), value.to_string());
        world
            .calls
            .push(Call::SessionSet(key.to_string(), value.to_string()));
    }
}

impl Navigator for Fake {
    fn replace(&mut self, url: &str) {
        self.push(Call::Navigate(url.to_string()));
    }
}

impl DelayTimer for Fake {
    fn schedule(&mut self, delay_ms: u32) {
        self.push(Call::Schedule(delay_ms));
    }
}

pub fn portrait_world() -> Shared {
    Rc::new(RefCell::new(World {
        viewport: Size::new(400.0, 800.0),
        card_size: Size::new(200.0, 300.0),
        ..World::default()
    }))
}

pub fn controller(world: &Shared) -> WidgetController {
    controller_with(world, WidgetConfig::default())
}

pub fn controller_with(world: &Shared, config: WidgetConfig) -> WidgetController {
    let ports = Ports {
        tilt: Box::new(Fake(world.clone())),
        motion: Box::new(FakeMotion(world.clone())),
        clock: Box::new(Fake(world.clone())),
        pointer: Box::new(Fake(world.clone())),
        surface: Box::new(Fake(world.clone())),
        session: Box::new(Fake(world.clone())),
        navigator: Box::new(Fake(world.clone())),
        timer: Box::new(Fake(world.clone())),
    };
    WidgetController::new(config, ports)
}

/// Boots, selects a card and taps so the card is on screen.
pub fn revealed_controller(world: &Shared) -> WidgetController {
    let mut controller = controller(world);
    controller.boot();
    assert!(controller.select_card(&CardChoice::new("cards/a.png")));
    assert!(controller.tap());
    controller
}
