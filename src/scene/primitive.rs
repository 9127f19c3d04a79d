use crate::scene::style::{FontSize, ShadowMetrics};
use crate::scene::{BorderSide, ImageFormat};

/// An animated object placed on a render surface by a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub x: i32,
    pub width: u32,
    pub height: u32,
    pub anim: Animation,
    pub shape: Shape,
}

impl Primitive {
    pub fn y_at(&self, elapsed_ms: u64) -> i32 {
        self.anim.value_at(elapsed_ms)
    }
}

/// Linear, endlessly repeating animation of the vertical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub from: i32,
    pub to: i32,
    pub period_ms: u32,
}

impl Animation {
    pub fn value_at(&self, elapsed_ms: u64) -> i32 {
        if self.period_ms == 0 {
            return self.to;
        }
        let t = (elapsed_ms % self.period_ms as u64) as i64;
        let span = (self.to - self.from) as i64;
        self.from + (span * t / self.period_ms as i64) as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(RectStyle),
    Image(ImageStyle),
    Text(TextStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectStyle {
    pub radius: u32,
    pub bg_color: [u8; 4],
    pub bg_opa: u8,
    pub border_color: [u8; 4],
    pub border_opa: u8,
    pub border_width: u32,
    pub border_side: BorderSide,
    pub shadow_color: [u8; 4],
    pub shadow_opa: u8,
    pub shadow: ShadowMetrics,
}

impl RectStyle {
    /// Pixels the shadow reaches beyond the object on its widest side.
    pub fn shadow_extent(&self) -> u32 {
        if self.shadow.width == 0 || self.shadow_opa == 0 {
            return 0;
        }
        self.shadow.width / 2
            + self.shadow.spread
            + self.shadow.ofs_x.unsigned_abs().max(self.shadow.ofs_y.unsigned_abs())
            + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageStyle {
    pub format: ImageFormat,
    pub opa: u8,
    pub recolor: [u8; 4],
    pub recolor_opa: u8,
    /// Rotation in 0.1 degree units.
    pub angle: u32,
    /// Scale in 1/256 units.
    pub zoom: u32,
    pub antialias: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub font: FontSize,
    pub color: [u8; 4],
    pub opa: u8,
    pub text: &'static str,
}
