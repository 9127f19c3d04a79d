use crate::error::{BenchError, BenchResult};
use crate::scene::Pass;
use serde::{Deserialize, Serialize};

pub const OPA_TRANSP: u8 = 0;
pub const OPA_50: u8 = 127;
pub const OPA_80: u8 = 204;
pub const OPA_COVER: u8 = 255;

/// Objects created by rectangle and text scenes.
pub const OBJ_NUM: u32 = 8;

pub const IMG_WIDTH: u32 = 100;
pub const IMG_HEIGHT: u32 = 100;
/// Zoom factors in 1/256 units; 256 is the original size.
pub const IMG_ZOOM_MIN: u32 = 128;
pub const IMG_ZOOM_MAX: u32 = 256 + 64;
/// Rotation upper bound in 0.1 degree units.
pub const IMG_ANGLE_MAX: u32 = 3599;

/// Largest accepted display width or height.
pub const MAX_DIMENSION: u32 = 16384;

/// Largest value handed out for random colors.
pub const COLOR_MAX: u32 = 0xFFFFF0;

pub const TXT: &str =
    "hello world\nit is a multi line text to test\nthe performance of text rendering";

/// Physical description of the display the benchmark runs on.
///
/// All object sizes derive from it the same way a toolkit theme would scale
/// with resolution and pixel density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl DisplayMetrics {
    pub fn new(width: u32, height: u32, dpi: u32) -> BenchResult<Self> {
        let metrics = Self { width, height, dpi };
        metrics.validate()?;
        Ok(metrics)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.dpi == 0 {
            return Err(BenchError::invalid_display("dpi must be greater than 0"));
        }
        if self.height == 0 {
            return Err(BenchError::invalid_display("height must be greater than 0"));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(BenchError::invalid_display(format!(
                "{}x{} exceeds the {} pixel limit",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        if self.obj_size_max() <= self.obj_size_min() {
            return Err(BenchError::invalid_display(format!(
                "width {} too small for {} dpi (need more than {})",
                self.width,
                self.dpi,
                self.obj_size_min() * 2 + 1
            )));
        }
        Ok(())
    }

    /// Pixel count used to normalize FPS.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn obj_size_min(&self) -> u32 {
        (self.dpi / 20).max(5)
    }

    pub fn obj_size_max(&self) -> u32 {
        self.width / 2
    }

    pub fn radius(&self) -> u32 {
        (self.dpi / 15).max(2)
    }

    pub fn border_width(&self) -> u32 {
        (self.dpi / 40).max(1)
    }

    pub fn shadow(&self, size: ShadowSize, offset: bool) -> ShadowMetrics {
        let (width, ofs, spread) = match size {
            ShadowSize::Small => (
                (self.dpi / 15).max(5),
                (self.dpi / 20).max(2),
                (self.dpi / 30).max(2),
            ),
            ShadowSize::Large => (
                (self.dpi / 5).max(10),
                (self.dpi / 10).max(5),
                (self.dpi / 30).max(2),
            ),
        };

        if offset {
            ShadowMetrics {
                width,
                ofs_x: ofs as i32,
                ofs_y: ofs as i32,
                spread,
            }
        } else {
            ShadowMetrics {
                width,
                ofs_x: 0,
                ofs_y: 0,
                spread: 0,
            }
        }
    }

    /// Images needed to cover roughly a quarter of the display.
    pub fn image_count(&self) -> u32 {
        let per_image = (IMG_WIDTH * IMG_HEIGHT) as u64;
        (self.area() / 4 / per_image).max(1).min(u32::MAX as u64) as u32
    }

    pub fn anim_time_min(&self) -> u32 {
        (2 * SCENE_TIME_MS) / 10
    }

    pub fn anim_time_max(&self) -> u32 {
        SCENE_TIME_MS
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            dpi: 130,
        }
    }
}

/// Length of one measured pass.
pub const SCENE_TIME_MS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowSize {
    Small,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowMetrics {
    pub width: u32,
    pub ofs_x: i32,
    pub ofs_y: i32,
    pub spread: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Radius {
    Square,
    Rounded,
    Circle,
}

impl Radius {
    /// Corner radius in pixels for an object of the given size.
    pub fn resolve(self, metrics: &DisplayMetrics, width: u32, height: u32) -> u32 {
        let max = width.min(height) / 2;
        match self {
            Radius::Square => 0,
            Radius::Rounded => metrics.radius().min(max),
            Radius::Circle => max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Glyph cell as `(advance, line height)`.
    pub fn cell(self) -> (u32, u32) {
        match self {
            FontSize::Small => (7, 15),
            FontSize::Medium => (10, 20),
            FontSize::Large => (13, 27),
        }
    }

    /// Bounding box of a multi line label.
    pub fn text_extent(self, text: &str) -> (u32, u32) {
        let (advance, line_height) = self.cell();
        let columns = text
            .lines()
            .map(|line| line.chars().count() as u32)
            .max()
            .unwrap_or(0);
        let rows = text.lines().count() as u32;
        (columns * advance, rows * line_height)
    }
}

/// Main opacity of a primitive for the given pass.
pub fn pass_opa(pass: Pass) -> u8 {
    match pass {
        Pass::Normal => OPA_COVER,
        Pass::Opa => OPA_50,
    }
}

/// Shadows use a lighter reduction than the rest of the primitives.
pub fn shadow_opa(pass: Pass) -> u8 {
    match pass {
        Pass::Normal => OPA_COVER,
        Pass::Opa => OPA_80,
    }
}

/// `0xRRGGBB` to an opaque RGBA quadruple.
pub fn color_hex(hex: u32) -> [u8; 4] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255]
}
