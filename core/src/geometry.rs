#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// Client-space rectangle as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Largest top-left coordinate that keeps `card` inside `viewport`.
pub fn max_origin(viewport: Size, card: Size) -> Vec2 {
    Vec2::new(
        (viewport.width - card.width).max(0.0),
        (viewport.height - card.height).max(0.0),
    )
}

pub fn clamp_to_viewport(position: Vec2, viewport: Size, card: Size) -> Vec2 {
    let max = max_origin(viewport, card);
    Vec2::new(clamp(position.x, 0.0, max.x), clamp(position.y, 0.0, max.y))
}

pub fn centered_origin(viewport: Size, card: Size) -> Vec2 {
    Vec2::new(
        (viewport.width - card.width) / 2.0,
        (viewport.height - card.height) / 2.0,
    )
}
