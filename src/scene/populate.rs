use crate::rng::RandomSequencer;
use crate::scene::primitive::{Animation, ImageStyle, Primitive, RectStyle, Shape, TextStyle};
use crate::scene::style::{
    self, DisplayMetrics, Radius, ShadowMetrics, COLOR_MAX, IMG_ANGLE_MAX, IMG_HEIGHT, IMG_WIDTH,
    IMG_ZOOM_MAX, IMG_ZOOM_MIN, OBJ_NUM, OPA_50, OPA_COVER, OPA_TRANSP, TXT,
};
use crate::scene::{BorderSide, ImageTransform, Pass, SceneKind};

/// Surface that scene objects are placed on. Owned by the host.
pub trait RenderSurface {
    /// Area available to scene objects as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Remove every primitive added so far.
    fn clear(&mut self);

    fn add(&mut self, primitive: Primitive);
}

const NO_SHADOW: ShadowMetrics = ShadowMetrics {
    width: 0,
    ofs_x: 0,
    ofs_y: 0,
    spread: 0,
};

/// Upper bound for a random draw that must stay above `min`.
fn bound(min: u32, max: u32) -> u32 {
    max.max(min + 1)
}

impl SceneKind {
    /// Fill `surface` with this scene's objects, styled for `pass`.
    ///
    /// Random draws happen in a fixed order, so the same sequencer position
    /// always produces the same layout.
    pub fn populate(
        &self,
        surface: &mut dyn RenderSurface,
        pass: Pass,
        rng: &mut RandomSequencer,
        metrics: &DisplayMetrics,
    ) {
        match *self {
            SceneKind::Rectangle { radius } => {
                let template = RectTemplate {
                    radius,
                    bg_opa: style::pass_opa(pass),
                    border_opa: OPA_TRANSP,
                    border_width: 0,
                    border_side: BorderSide::FULL,
                    shadow_opa: OPA_TRANSP,
                    shadow: NO_SHADOW,
                };
                rect_create(surface, &template, rng, metrics);
            }
            SceneKind::Border { radius, sides } => {
                let template = RectTemplate {
                    radius,
                    bg_opa: OPA_TRANSP,
                    border_opa: style::pass_opa(pass),
                    border_width: metrics.border_width(),
                    border_side: sides,
                    shadow_opa: OPA_TRANSP,
                    shadow: NO_SHADOW,
                };
                rect_create(surface, &template, rng, metrics);
            }
            SceneKind::Shadow { size, offset } => {
                let template = RectTemplate {
                    radius: Radius::Rounded,
                    bg_opa: OPA_COVER,
                    border_opa: OPA_TRANSP,
                    border_width: 0,
                    border_side: BorderSide::FULL,
                    shadow_opa: style::shadow_opa(pass),
                    shadow: metrics.shadow(size, offset),
                };
                rect_create(surface, &template, rng, metrics);
            }
            SceneKind::Image {
                format,
                recolor,
                transform,
            } => {
                let template = ImageStyle {
                    format,
                    opa: style::pass_opa(pass),
                    recolor: [0, 0, 0, 255],
                    recolor_opa: if recolor { OPA_50 } else { OPA_TRANSP },
                    angle: 0,
                    zoom: 256,
                    antialias: false,
                };
                img_create(surface, template, transform, rng, metrics);
            }
            SceneKind::Text { font } => {
                let template = TextStyle {
                    font,
                    color: [0, 0, 0, 255],
                    opa: style::pass_opa(pass),
                    text: TXT,
                };
                txt_create(surface, &template, rng, metrics);
            }
        }
    }
}

struct RectTemplate {
    radius: Radius,
    bg_opa: u8,
    border_opa: u8,
    border_width: u32,
    border_side: BorderSide,
    shadow_opa: u8,
    shadow: ShadowMetrics,
}

fn falling(
    rng: &mut RandomSequencer,
    metrics: &DisplayMetrics,
    height: u32,
    scene_h: u32,
) -> Animation {
    Animation {
        from: -(height as i32),
        to: (scene_h + height) as i32,
        period_ms: rng.next(metrics.anim_time_min(), metrics.anim_time_max()),
    }
}

fn rect_create(
    surface: &mut dyn RenderSurface,
    template: &RectTemplate,
    rng: &mut RandomSequencer,
    metrics: &DisplayMetrics,
) {
    let (scene_w, scene_h) = surface.size();
    let size_min = metrics.obj_size_min();
    let size_max = bound(size_min, metrics.obj_size_max());

    for _ in 0..OBJ_NUM {
        let bg_color = style::color_hex(rng.next(0, COLOR_MAX));
        let border_color = style::color_hex(rng.next(0, COLOR_MAX));
        let shadow_color = style::color_hex(rng.next(0, COLOR_MAX));

        let width = rng.next(size_min, size_max);
        let height = rng.next(size_min, size_max);
        let x = rng.next(0, bound(0, scene_w.saturating_sub(width))) as i32;
        let anim = falling(rng, metrics, height, scene_h);

        let rect = RectStyle {
            radius: template.radius.resolve(metrics, width, height),
            bg_color,
            bg_opa: template.bg_opa,
            border_color,
            border_opa: template.border_opa,
            border_width: template.border_width,
            border_side: template.border_side,
            shadow_color,
            shadow_opa: template.shadow_opa,
            shadow: template.shadow,
        };

        surface.add(Primitive {
            x,
            width,
            height,
            anim,
            shape: Shape::Rect(rect),
        });
    }
}

fn img_create(
    surface: &mut dyn RenderSurface,
    template: ImageStyle,
    transform: ImageTransform,
    rng: &mut RandomSequencer,
    metrics: &DisplayMetrics,
) {
    let (scene_w, scene_h) = surface.size();

    for _ in 0..metrics.image_count() {
        let mut img = template;
        img.recolor = style::color_hex(rng.next(0, COLOR_MAX));

        match transform {
            ImageTransform::None => {}
            ImageTransform::Rotate { antialias } => {
                img.angle = rng.next(0, IMG_ANGLE_MAX);
                img.antialias = antialias;
            }
            ImageTransform::Zoom { antialias } => {
                img.zoom = rng.next(IMG_ZOOM_MIN, IMG_ZOOM_MAX);
                img.antialias = antialias;
            }
        }

        let x = rng.next(0, bound(0, scene_w.saturating_sub(IMG_WIDTH))) as i32;
        let anim = falling(rng, metrics, IMG_HEIGHT, scene_h);

        surface.add(Primitive {
            x,
            width: IMG_WIDTH,
            height: IMG_HEIGHT,
            anim,
            shape: Shape::Image(img),
        });
    }
}

fn txt_create(
    surface: &mut dyn RenderSurface,
    template: &TextStyle,
    rng: &mut RandomSequencer,
    metrics: &DisplayMetrics,
) {
    let (scene_w, scene_h) = surface.size();
    let (width, height) = template.font.text_extent(template.text);

    for _ in 0..OBJ_NUM {
        let mut label = template.clone();
        label.color = style::color_hex(rng.next(0, COLOR_MAX));

        let x = rng.next(0, bound(0, scene_w.saturating_sub(width))) as i32;
        let anim = falling(rng, metrics, height, scene_h);

        surface.add(Primitive {
            x,
            width,
            height,
            anim,
            shape: Shape::Text(label),
        });
    }
}
