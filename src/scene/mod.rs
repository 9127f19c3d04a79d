pub mod populate;
pub mod primitive;
pub mod style;

pub use populate::RenderSurface;
pub use primitive::{Animation, Primitive, Shape};
pub use style::DisplayMetrics;

use crate::error::{BenchError, BenchResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use style::{FontSize, Radius, ShadowSize};

/// One of the two measurements taken per scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Primitives drawn fully covered.
    Normal,
    /// Primitives drawn with reduced opacity (50 %, 80 % for shadows).
    Opa,
}

impl Pass {
    /// Suffix appended to the scene name in status text.
    pub fn suffix(self) -> &'static str {
        match self {
            Pass::Normal => "",
            Pass::Opa => " + opa",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Normal => f.write_str("normal"),
            Pass::Opa => f.write_str("opa"),
        }
    }
}

/// Accumulated measurements of a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassMetrics {
    pub pixels: u64,
    pub millis: u64,
    pub fps: u32,
}

impl PassMetrics {
    pub fn record(&mut self, millis: u32, pixels: u32) {
        self.pixels += pixels as u64;
        self.millis += millis as u64;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BorderSide: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const FULL = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Pixel layout of the image used by image scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Opaque true color.
    Rgb,
    /// True color with per-pixel alpha.
    Argb,
    /// Opaque, one key color treated as transparent.
    ChromaKeyed,
    /// 16 color palette.
    Indexed,
    /// Only an alpha channel, drawn in the recolor color.
    AlphaOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageTransform {
    None,
    Rotate { antialias: bool },
    Zoom { antialias: bool },
}

/// What a scene draws. Each variant knows how to populate a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneKind {
    Rectangle {
        radius: Radius,
    },
    Border {
        radius: Radius,
        sides: BorderSide,
    },
    Shadow {
        size: ShadowSize,
        offset: bool,
    },
    Image {
        format: ImageFormat,
        recolor: bool,
        transform: ImageTransform,
    },
    Text {
        font: FontSize,
    },
}

/// One named test case with its weight and measured results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    name: String,
    kind: SceneKind,
    weight: u32,
    pub normal: PassMetrics,
    pub opa: PassMetrics,
}

impl Scene {
    pub fn new(name: impl Into<String>, kind: SceneKind, weight: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            weight,
            normal: PassMetrics::default(),
            opa: PassMetrics::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Weight applied to the opa pass in the final score.
    pub fn opa_weight(&self) -> u32 {
        (self.weight / 2).max(1)
    }

    pub fn metrics(&self, pass: Pass) -> &PassMetrics {
        match pass {
            Pass::Normal => &self.normal,
            Pass::Opa => &self.opa,
        }
    }

    pub fn metrics_mut(&mut self, pass: Pass) -> &mut PassMetrics {
        match pass {
            Pass::Normal => &mut self.normal,
            Pass::Opa => &mut self.opa,
        }
    }
}

/// Ordered, fixed list of scenes. Indexing one past the end yields `None`,
/// which marks the end of the run.
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    scenes: Vec<Scene>,
}

impl SceneRegistry {
    pub fn new(scenes: Vec<Scene>) -> BenchResult<Self> {
        if scenes.is_empty() {
            return Err(BenchError::EmptyRegistry);
        }
        if let Some(scene) = scenes.iter().find(|s| s.weight == 0) {
            return Err(BenchError::ZeroWeight(scene.name.clone()));
        }
        Ok(Self { scenes })
    }

    /// The scenes compiled into this build.
    pub fn builtin() -> Self {
        use ImageFormat::*;
        use ImageTransform::{Rotate, Zoom};

        let rect = |radius| SceneKind::Rectangle { radius };
        let border = |radius, sides| SceneKind::Border { radius, sides };
        let shadow = |size, offset| SceneKind::Shadow { size, offset };
        let image = |format, recolor, transform| SceneKind::Image {
            format,
            recolor,
            transform,
        };
        let text = |font| SceneKind::Text { font };

        let scenes = vec![
            Scene::new("Rectangle", rect(Radius::Square), 30),
            Scene::new("Rectangle rounded", rect(Radius::Rounded), 20),
            Scene::new("Circle", rect(Radius::Circle), 10),
            Scene::new("Border", border(Radius::Square, BorderSide::FULL), 20),
            Scene::new("Border rounded", border(Radius::Rounded, BorderSide::FULL), 30),
            Scene::new("Circle border", border(Radius::Circle, BorderSide::FULL), 10),
            Scene::new("Border top", border(Radius::Rounded, BorderSide::TOP), 3),
            Scene::new("Border left", border(Radius::Rounded, BorderSide::LEFT), 3),
            Scene::new(
                "Border top + left",
                border(Radius::Rounded, BorderSide::TOP | BorderSide::LEFT),
                3,
            ),
            Scene::new(
                "Border left + right",
                border(Radius::Rounded, BorderSide::LEFT | BorderSide::RIGHT),
                3,
            ),
            Scene::new(
                "Border top + bottom",
                border(Radius::Rounded, BorderSide::TOP | BorderSide::BOTTOM),
                3,
            ),
            Scene::new("Shadow small", shadow(ShadowSize::Small, false), 3),
            Scene::new("Shadow small offset", shadow(ShadowSize::Small, true), 5),
            Scene::new("Shadow large", shadow(ShadowSize::Large, false), 5),
            Scene::new("Shadow large offset", shadow(ShadowSize::Large, true), 3),
            Scene::new("Image RGB", image(Rgb, false, ImageTransform::None), 20),
            Scene::new("Image ARGB", image(Argb, false, ImageTransform::None), 20),
            Scene::new("Image chroma keyed", image(ChromaKeyed, false, ImageTransform::None), 5),
            Scene::new("Image indexed", image(Indexed, false, ImageTransform::None), 5),
            Scene::new("Image alpha only", image(AlphaOnly, false, ImageTransform::None), 5),
            Scene::new("Image RGB recolor", image(Rgb, true, ImageTransform::None), 5),
            Scene::new("Image ARGB recolor", image(Argb, true, ImageTransform::None), 20),
            Scene::new(
                "Image chroma keyed recolor",
                image(ChromaKeyed, true, ImageTransform::None),
                3,
            ),
            Scene::new("Image indexed recolor", image(Indexed, true, ImageTransform::None), 3),
            Scene::new("Image RGB rotate", image(Rgb, false, Rotate { antialias: false }), 3),
            Scene::new(
                "Image RGB rotate anti aliased",
                image(Rgb, false, Rotate { antialias: true }),
                3,
            ),
            Scene::new("Image ARGB rotate", image(Argb, false, Rotate { antialias: false }), 5),
            Scene::new(
                "Image ARGB rotate anti aliased",
                image(Argb, false, Rotate { antialias: true }),
                5,
            ),
            Scene::new("Image RGB zoom", image(Rgb, false, Zoom { antialias: false }), 3),
            Scene::new(
                "Image RGB zoom anti aliased",
                image(Rgb, false, Zoom { antialias: true }),
                3,
            ),
            Scene::new("Image ARGB zoom", image(Argb, false, Zoom { antialias: false }), 5),
            Scene::new(
                "Image ARGB zoom anti aliased",
                image(Argb, false, Zoom { antialias: true }),
                5,
            ),
            Scene::new("Text small", text(FontSize::Small), 20),
            Scene::new("Text medium", text(FontSize::Medium), 30),
            Scene::new("Text large", text(FontSize::Large), 20),
        ];

        Self { scenes }
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scene> {
        self.scenes.iter()
    }
}

impl<'a> IntoIterator for &'a SceneRegistry {
    type Item = &'a Scene;
    type IntoIter = std::slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}
