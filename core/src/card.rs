use crate::geometry::{Size, Vec2};

/// Position, velocity and measured size of the card, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Size,
    pub visible: bool,
}

impl CardState {
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.stop();
    }
}

/// Image choice made on the selection overlay. Width and height are CSS
/// lengths copied verbatim onto the card element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardChoice {
    pub src: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl CardChoice {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    /// Source to load, skipping empty attribute values.
    pub fn image_src(&self) -> Option<&str> {
        self.src.as_deref().filter(|src| !src.is_empty())
    }

    pub fn explicit_width(&self) -> Option<&str> {
        self.width.as_deref().filter(|value| !value.is_empty())
    }

    pub fn explicit_height(&self) -> Option<&str> {
        self.height.as_deref().filter(|value| !value.is_empty())
    }
}
