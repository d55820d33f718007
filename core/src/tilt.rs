use crate::geometry::{clamp, Vec2};

/// Screen rotation as reported by `screen.orientation.angle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenRotation {
    Upright,
    Clockwise90,
    UpsideDown,
    Clockwise270,
    /// Any angle outside the table; tilt axes pass through unchanged.
    Unmapped(i32),
}

impl ScreenRotation {
    pub fn from_degrees(angle: i32) -> Self {
        match angle {
            0 => ScreenRotation::Upright,
            90 => ScreenRotation::Clockwise90,
            180 => ScreenRotation::UpsideDown,
            270 | -90 => ScreenRotation::Clockwise270,
            other => ScreenRotation::Unmapped(other),
        }
    }

    /// Rotates device-frame tilt into screen-frame axes.
    pub fn remap(self, x: f32, y: f32) -> (f32, f32) {
        match self {
            ScreenRotation::Clockwise90 => (y, -x),
            ScreenRotation::Clockwise270 => (-y, x),
            ScreenRotation::UpsideDown => (-x, -y),
            ScreenRotation::Upright | ScreenRotation::Unmapped(_) => (x, y),
        }
    }
}

/// One `deviceorientation` reading. Browsers report `null` angles when the
/// sensor is unavailable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltSample {
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
    pub screen_angle: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltParams {
    pub max_tilt_deg: f32,
    pub gravity_scale: f32,
}

/// Gravity in px/s² for a tilt reading, or `None` when either angle is
/// missing.
pub fn gravity_from_tilt(sample: TiltSample, params: TiltParams) -> Option<Vec2> {
    let (Some(beta), Some(gamma)) = (sample.beta, sample.gamma) else {
        return None;
    };
    let max_tilt = params.max_tilt_deg;
    let x = clamp(gamma, -max_tilt, max_tilt);
    let y = clamp(beta, -max_tilt, max_tilt);

    let (mapped_x, mapped_y) = ScreenRotation::from_degrees(sample.screen_angle).remap(x, y);

    Some(Vec2::new(
        mapped_x / max_tilt * params.gravity_scale,
        mapped_y / max_tilt * params.gravity_scale,
    ))
}
