use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Event, PointerEvent};

use tiltcard_core::{BootOutcome, DelayTimer, FrameClock, Ports, WidgetConfig, WidgetController};

use crate::dom::{DomSurface, WidgetDom};
use crate::input::{self, PointerCapture};
use crate::sensors::{MotionSensor, OrientationSensor};
use crate::session::{BrowserSession, LocationNavigator};
use crate::settings;

thread_local! {
    static RUNTIME: RefCell<Option<Rc<WidgetRuntime>>> = RefCell::new(None);
}

/// Page-lifetime owner of the controller and every browser handle that
/// feeds it.
pub(crate) struct WidgetRuntime {
    controller: RefCell<WidgetController>,
    frame: RefCell<Option<AnimationFrame>>,
    redirect_timer: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl WidgetRuntime {
    fn new(config: WidgetConfig, dom: &WidgetDom) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<WidgetRuntime>| {
            let ports = Ports {
                tilt: Box::new(OrientationSensor::new(weak.clone())),
                motion: Box::new(MotionSensor::new(weak.clone())),
                clock: Box::new(AnimationFrameClock {
                    runtime: weak.clone(),
                }),
                pointer: Box::new(PointerCapture::new(dom.card.clone())),
                surface: Box::new(DomSurface::new(dom.clone())),
                session: Box::new(BrowserSession::new(&dom.window)),
                navigator: Box::new(LocationNavigator::new(dom.window.clone())),
                timer: Box::new(RedirectTimer {
                    runtime: weak.clone(),
                }),
            };
            Self {
                controller: RefCell::new(WidgetController::new(config, ports)),
                frame: RefCell::new(None),
                redirect_timer: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }
        })
    }

    /// Runs `action` against the controller. Events that arrive while the
    /// controller is already borrowed are dropped.
    pub(crate) fn dispatch<R>(
        &self,
        action: impl FnOnce(&mut WidgetController) -> R,
    ) -> Option<R> {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            gloo::console::warn!("runtime: dropped re-entrant event");
            return None;
        };
        Some(action(&mut controller))
    }

    pub(crate) fn keep_listener(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn install_listeners(self: &Rc<Self>, dom: &WidgetDom) {
        let active = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };
        let mut listeners = Vec::new();

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &dom.overlay,
            "click",
            active,
            move |event: &Event| {
                let Some(choice) = input::card_choice_from_event(event) else {
                    return;
                };
                event.prevent_default();
                event.stop_propagation();
                if let Some(runtime) = runtime.upgrade() {
                    runtime.dispatch(|controller| controller.select_card(&choice));
                }
            },
        ));

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(&dom.document, "click", move |_event| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.dispatch(|controller| controller.tap());
            }
        }));

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(
            &dom.card,
            "pointerdown",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let pointer = input::pointer_id(event);
                let client = input::client_position(event);
                if let Some(runtime) = runtime.upgrade() {
                    runtime.dispatch(|controller| controller.pointer_down(pointer, client));
                }
            },
        ));

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(
            &dom.window,
            "pointermove",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let client = input::client_position(event);
                if let Some(runtime) = runtime.upgrade() {
                    runtime.dispatch(|controller| controller.pointer_move(client));
                }
            },
        ));

        for event_type in ["pointerup", "pointercancel"] {
            let runtime = Rc::downgrade(self);
            listeners.push(EventListener::new(&dom.window, event_type, move |_event| {
                if let Some(runtime) = runtime.upgrade() {
                    runtime.dispatch(|controller| controller.pointer_up());
                }
            }));
        }

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(&dom.window, "resize", move |_event| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.dispatch(|controller| controller.on_resize());
            }
        }));

        let runtime = Rc::downgrade(self);
        listeners.push(EventListener::new(
            &dom.window,
            "orientationchange",
            move |_event| {
                if let Some(runtime) = runtime.upgrade() {
                    runtime.dispatch(|controller| controller.on_orientation_change());
                }
            },
        ));

        listeners.push(EventListener::new_with_options(
            &dom.stage,
            "dragstart",
            active,
            |event: &Event| {
                event.prevent_default();
            },
        ));

        self.listeners.borrow_mut().extend(listeners);
    }
}

struct AnimationFrameClock {
    runtime: Weak<WidgetRuntime>,
}

impl FrameClock for AnimationFrameClock {
    fn request_frame(&mut self) {
        let Some(runtime) = self.runtime.upgrade() else {
            return;
        };
        let weak = Rc::downgrade(&runtime);
        let handle = request_animation_frame(move |timestamp| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            runtime.frame.borrow_mut().take();
            runtime.dispatch(|controller| controller.on_frame(timestamp));
        });
        *runtime.frame.borrow_mut() = Some(handle);
    }
}

struct RedirectTimer {
    runtime: Weak<WidgetRuntime>,
}

impl DelayTimer for RedirectTimer {
    fn schedule(&mut self, delay_ms: u32) {
        let Some(runtime) = self.runtime.upgrade() else {
            return;
        };
        let weak = Rc::downgrade(&runtime);
        let timer = Timeout::new(delay_ms, move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.dispatch(|controller| controller.on_redirect_timer());
            }
        });
        *runtime.redirect_timer.borrow_mut() = Some(timer);
    }
}

pub(crate) fn start() -> Result<(), String> {
    let window = web_sys::window().ok_or("window unavailable")?;
    let dom = WidgetDom::find(window)?;
    let config = settings::load_config(&dom.document);
    let runtime = WidgetRuntime::new(config, &dom);

    let outcome = runtime
        .dispatch(|controller| controller.boot())
        .ok_or("controller busy during boot")?;
    if outcome == BootOutcome::Redirected {
        gloo::console::log!("boot: session already redirected");
        return Ok(());
    }

    runtime.install_listeners(&dom);
    RUNTIME.with(|slot| {
        *slot.borrow_mut() = Some(runtime);
    });
    gloo::console::log!("boot: ready");
    Ok(())
}
