//! Platform-independent logic for the tilt card widget: kinematics, tilt
//! and shake input, drag handling and the one-shot redirect.

pub mod card;
pub mod config;
pub mod controller;
pub mod drag;
pub mod geometry;
pub mod physics;
pub mod ports;
pub mod redirect;
pub mod reveal;
pub mod shake;
pub mod tilt;

pub use card::{CardChoice, CardState};
pub use config::{ConfigError, WidgetConfig};
pub use controller::{BootOutcome, WidgetController};
pub use drag::{DragMove, PointerId};
pub use geometry::{Rect, Size, Vec2};
pub use ports::{
    CardSurface, DelayTimer, FrameClock, MotionSource, Navigator, PointerInput, Ports,
    SessionStore, TiltSource,
};
pub use reveal::RevealPhase;
pub use shake::AccelSample;
pub use tilt::{ScreenRotation, TiltSample};
