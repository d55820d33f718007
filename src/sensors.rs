use std::rc::Weak;

use gloo::events::EventListener;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DeviceMotionEvent, DeviceOrientationEvent, Event, Window};

use tiltcard_core::{AccelSample, MotionSource, TiltSample, TiltSource};

use crate::runtime::WidgetRuntime;

const PERMISSION_GRANTED: &str = "granted";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SensorKind {
    Orientation,
    Motion,
}

impl SensorKind {
    fn constructor(self) -> &'static str {
        match self {
            SensorKind::Orientation => "DeviceOrientationEvent",
            SensorKind::Motion => "DeviceMotionEvent",
        }
    }

    fn event_type(self) -> &'static str {
        match self {
            SensorKind::Orientation => "deviceorientation",
            SensorKind::Motion => "devicemotion",
        }
    }
}

pub(crate) struct OrientationSensor {
    runtime: Weak<WidgetRuntime>,
}

impl OrientationSensor {
    pub(crate) fn new(runtime: Weak<WidgetRuntime>) -> Self {
        Self { runtime }
    }
}

impl TiltSource for OrientationSensor {
    fn start(&mut self) {
        enable(SensorKind::Orientation, self.runtime.clone());
    }
}

pub(crate) struct MotionSensor {
    runtime: Weak<WidgetRuntime>,
}

impl MotionSensor {
    pub(crate) fn new(runtime: Weak<WidgetRuntime>) -> Self {
        Self { runtime }
    }
}

impl MotionSource for MotionSensor {
    fn start(&mut self) {
        enable(SensorKind::Motion, self.runtime.clone());
    }
}

/// Starts delivering sensor events, going through `requestPermission` on
/// platforms that gate motion sensors behind it.
fn enable(kind: SensorKind, runtime: Weak<WidgetRuntime>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(constructor) = Reflect::get(&window, &JsValue::from_str(kind.constructor())) else {
        return;
    };
    if constructor.is_undefined() || constructor.is_null() {
        gloo::console::log!("sensors: unsupported", kind.event_type());
        return;
    }
    let request = Reflect::get(&constructor, &JsValue::from_str("requestPermission"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(request) = request else {
        listen(kind, &window, runtime);
        return;
    };
    let promise = match request.call0(&constructor) {
        Ok(value) => value.dyn_into::<Promise>(),
        Err(err) => {
            gloo::console::warn!("sensors: permission request failed", kind.event_type(), err);
            return;
        }
    };
    let Ok(promise) = promise else {
        return;
    };
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(state) if state.as_string().as_deref() == Some(PERMISSION_GRANTED) => {
                listen(kind, &window, runtime);
            }
            Ok(state) => {
                gloo::console::log!("sensors: permission not granted", kind.event_type(), state);
            }
            Err(err) => {
                gloo::console::warn!("sensors: permission request failed", kind.event_type(), err);
            }
        }
    });
}

fn listen(kind: SensorKind, window: &Window, runtime: Weak<WidgetRuntime>) {
    let Some(owner) = runtime.upgrade() else {
        return;
    };
    let listener = EventListener::new(window, kind.event_type(), move |event: &Event| {
        let Some(runtime) = runtime.upgrade() else {
            return;
        };
        match kind {
            SensorKind::Orientation => {
                let Some(event) = event.dyn_ref::<DeviceOrientationEvent>() else {
                    return;
                };
                let sample = tilt_sample(event);
                runtime.dispatch(|controller| controller.on_tilt(sample));
            }
            SensorKind::Motion => {
                let Some(sample) = event.dyn_ref::<DeviceMotionEvent>().and_then(accel_sample)
                else {
                    return;
                };
                runtime.dispatch(|controller| controller.on_motion(sample));
            }
        }
    });
    owner.keep_listener(listener);
}

fn tilt_sample(event: &DeviceOrientationEvent) -> TiltSample {
    TiltSample {
        beta: event.beta().map(|value| value as f32),
        gamma: event.gamma().map(|value| value as f32),
        screen_angle: web_sys::window()
            .map(|window| screen_angle(&window))
            .unwrap_or(0),
    }
}

fn accel_sample(event: &DeviceMotionEvent) -> Option<AccelSample> {
    let accel = event.acceleration_including_gravity()?;
    let stamp = event.time_stamp();
    let timestamp_ms = if stamp > 0.0 { stamp } else { js_sys::Date::now() };
    Some(AccelSample {
        x: accel.x(),
        y: accel.y(),
        z: accel.z(),
        timestamp_ms,
    })
}

fn js_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    let mut value = root.clone();
    for key in path {
        if value.is_undefined() || value.is_null() {
            return None;
        }
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
    }
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// `screen.orientation.angle`, falling back to the legacy
/// `window.orientation`.
pub(crate) fn screen_angle(window: &Window) -> i32 {
    js_path(window, &["screen", "orientation", "angle"])
        .or_else(|| js_path(window, &["orientation"]))
        .and_then(|value| value.as_f64())
        .map(|angle| angle as i32)
        .unwrap_or(0)
}

/// Requests a portrait lock. Unsupported or rejected locks are ignored.
pub(crate) fn lock_portrait(window: &Window) {
    let Some(orientation) = js_path(window, &["screen", "orientation"]) else {
        return;
    };
    let Some(lock) = js_path(&orientation, &["lock"]).and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return;
    };
    let Ok(result) = lock.call1(&orientation, &JsValue::from_str("portrait")) else {
        return;
    };
    if let Ok(promise) = result.dyn_into::<Promise>() {
        spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }
}
