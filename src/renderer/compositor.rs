use crate::renderer::texture::{Texture, TextureSet};
use crate::renderer::{Area, FrameBuffer};
use crate::scene::primitive::{ImageStyle, RectStyle, TextStyle};
use crate::scene::{BorderSide, ImageFormat, Primitive, Shape};

/// Software rasterizer for scene primitives.
///
/// Every draw call is clipped to `clip`, the area being refreshed.
pub struct Compositor;

impl Compositor {
    /// Blend a solid rectangle
    pub fn fill_rect(
        buffer: &mut FrameBuffer,
        clip: &Area,
        area: &Area,
        color: [u8; 4],
        opa: u8,
    ) {
        let Some(area) = area
            .intersect(clip)
            .and_then(|a| a.intersect(&buffer.bounds()))
        else {
            return;
        };

        if opa == 255 {
            buffer.fill_area(&area, color);
            return;
        }
        for y in area.y1..area.y2 {
            for x in area.x1..area.x2 {
                buffer.blend_pixel(x as u32, y as u32, color, opa);
            }
        }
    }

    /// Area touched when drawing `primitive` at vertical position `y`.
    pub fn primitive_bounds(primitive: &Primitive, y: i32) -> Area {
        let obj = Area::new(primitive.x, y, primitive.width, primitive.height);
        match &primitive.shape {
            Shape::Rect(style) => obj.grow(style.shadow_extent() as i32),
            Shape::Image(style) => Self::image_bounds(&obj, style),
            Shape::Text(_) => obj,
        }
    }

    pub fn draw_primitive(
        buffer: &mut FrameBuffer,
        clip: &Area,
        primitive: &Primitive,
        y: i32,
        textures: &TextureSet,
    ) {
        let obj = Area::new(primitive.x, y, primitive.width, primitive.height);
        match &primitive.shape {
            Shape::Rect(style) => Self::draw_rect(buffer, clip, &obj, style),
            Shape::Image(style) => {
                Self::draw_image(buffer, clip, &obj, style, textures.get(style.format))
            }
            Shape::Text(style) => Self::draw_text(buffer, clip, &obj, style),
        }
    }

    /// Shadow, then background, then border.
    pub fn draw_rect(buffer: &mut FrameBuffer, clip: &Area, obj: &Area, style: &RectStyle) {
        if style.shadow.width > 0 && style.shadow_opa > 0 {
            Self::draw_shadow(buffer, clip, obj, style);
        }

        if style.bg_opa > 0 {
            if style.radius == 0 {
                Self::fill_rect(buffer, clip, obj, style.bg_color, style.bg_opa);
            } else {
                for_each_pixel(buffer, clip, obj, |buffer, x, y| {
                    let cov = coverage(obj, style.radius, x, y);
                    buffer.blend_pixel(x as u32, y as u32, style.bg_color, scale(style.bg_opa, cov));
                });
            }
        }

        if style.border_opa > 0 && style.border_width > 0 && !style.border_side.is_empty() {
            Self::draw_border(buffer, clip, obj, style);
        }
    }

    fn draw_border(buffer: &mut FrameBuffer, clip: &Area, obj: &Area, style: &RectStyle) {
        let bw = style.border_width as i32;
        // Sides without a border push the inner edge past the object.
        let gap = style.radius as i32 + 1;
        let sides = style.border_side;
        let inner = Area {
            x1: obj.x1 + if sides.contains(BorderSide::LEFT) { bw } else { -gap },
            y1: obj.y1 + if sides.contains(BorderSide::TOP) { bw } else { -gap },
            x2: obj.x2 - if sides.contains(BorderSide::RIGHT) { bw } else { -gap },
            y2: obj.y2 - if sides.contains(BorderSide::BOTTOM) { bw } else { -gap },
        };
        let inner_radius = style.radius.saturating_sub(style.border_width);

        for_each_pixel(buffer, clip, obj, |buffer, x, y| {
            let outer = coverage(obj, style.radius, x, y);
            if outer <= 0.0 {
                return;
            }
            let hole = if inner.is_empty() {
                0.0
            } else {
                coverage(&inner, inner_radius, x, y)
            };
            let cov = outer * (1.0 - hole);
            if cov > 0.0 {
                buffer.blend_pixel(
                    x as u32,
                    y as u32,
                    style.border_color,
                    scale(style.border_opa, cov),
                );
            }
        });
    }

    fn draw_shadow(buffer: &mut FrameBuffer, clip: &Area, obj: &Area, style: &RectStyle) {
        let shadow = &style.shadow;
        let core = obj
            .translate(shadow.ofs_x, shadow.ofs_y)
            .grow(shadow.spread as i32);
        let half = (shadow.width as f32 / 2.0).max(0.5);
        let reach = core.grow(shadow.width as i32 / 2 + 1);
        let radius = style.radius + shadow.spread;

        for_each_pixel(buffer, clip, &reach, |buffer, x, y| {
            let d = signed_distance(&core, radius, x, y);
            let falloff = ((half - d) / (2.0 * half)).clamp(0.0, 1.0);
            if falloff > 0.0 {
                buffer.blend_pixel(
                    x as u32,
                    y as u32,
                    style.shadow_color,
                    scale(style.shadow_opa, falloff),
                );
            }
        });
    }

    /// Bounding box of the image after zoom and rotation around its center.
    pub fn image_bounds(obj: &Area, style: &ImageStyle) -> Area {
        if style.angle == 0 && style.zoom == 256 {
            return *obj;
        }
        let (sin, cos) = angle_radians(style.angle).sin_cos();
        let zoom = style.zoom as f32 / 256.0;
        let hw = obj.width() as f32 / 2.0;
        let hh = obj.height() as f32 / 2.0;
        let ex = (hw * cos.abs() + hh * sin.abs()) * zoom;
        let ey = (hw * sin.abs() + hh * cos.abs()) * zoom;
        let cx = obj.x1 as f32 + hw;
        let cy = obj.y1 as f32 + hh;

        Area {
            x1: (cx - ex).floor() as i32 - 1,
            y1: (cy - ey).floor() as i32 - 1,
            x2: (cx + ex).ceil() as i32 + 1,
            y2: (cy + ey).ceil() as i32 + 1,
        }
    }

    /// Draw `texture` into `obj`, rotated and zoomed around the center.
    pub fn draw_image(
        buffer: &mut FrameBuffer,
        clip: &Area,
        obj: &Area,
        style: &ImageStyle,
        texture: &Texture,
    ) {
        if style.opa == 0 || style.zoom == 0 {
            return;
        }
        let bounds = Self::image_bounds(obj, style);
        let (sin, cos) = angle_radians(style.angle).sin_cos();
        let inv_zoom = 256.0 / style.zoom as f32;
        let cx = obj.x1 as f32 + obj.width() as f32 / 2.0;
        let cy = obj.y1 as f32 + obj.height() as f32 / 2.0;
        let tw = texture.width as f32 / 2.0;
        let th = texture.height as f32 / 2.0;

        for_each_pixel(buffer, clip, &bounds, |buffer, x, y| {
            let rx = x as f32 + 0.5 - cx;
            let ry = y as f32 + 0.5 - cy;
            let u = (rx * cos + ry * sin) * inv_zoom + tw;
            let v = (-rx * sin + ry * cos) * inv_zoom + th;

            let texel = if style.antialias {
                texture.sample_bilinear(u, v)
            } else {
                texture.sample_nearest(u, v)
            };
            let Some(texel) = texel else {
                return;
            };
            if texel[3] == 0 {
                return;
            }

            let color = match texture.format {
                ImageFormat::AlphaOnly => style.recolor,
                _ if style.recolor_opa > 0 => mix(texel, style.recolor, style.recolor_opa),
                _ => texel,
            };
            buffer.blend_pixel(x as u32, y as u32, color, mul_opa(texel[3], style.opa));
        });
    }

    /// Glyph cell placeholders: one block per visible character.
    pub fn draw_text(buffer: &mut FrameBuffer, clip: &Area, obj: &Area, style: &TextStyle) {
        if style.opa == 0 {
            return;
        }
        let (advance, line_height) = style.font.cell();
        let descent = line_height as i32 / 5;

        for (row, line) in style.text.lines().enumerate() {
            let top = obj.y1 + row as i32 * line_height as i32;
            for (col, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let left = obj.x1 + col as i32 * advance as i32;
                let ascent = if ch.is_uppercase() || ch.is_ascii_digit() {
                    line_height as i32 / 5
                } else {
                    line_height as i32 * 2 / 5
                };
                let glyph = Area {
                    x1: left + 1,
                    y1: top + ascent,
                    x2: left + advance as i32 - 1,
                    y2: top + line_height as i32 - descent,
                };
                Self::fill_rect(buffer, clip, &glyph, style.color, style.opa);
            }
        }
    }
}

fn for_each_pixel<F>(buffer: &mut FrameBuffer, clip: &Area, area: &Area, mut f: F)
where
    F: FnMut(&mut FrameBuffer, i32, i32),
{
    let Some(area) = area
        .intersect(clip)
        .and_then(|a| a.intersect(&buffer.bounds()))
    else {
        return;
    };
    for y in area.y1..area.y2 {
        for x in area.x1..area.x2 {
            f(buffer, x, y);
        }
    }
}

/// Distance from the pixel center to the rounded rectangle edge, negative inside.
fn signed_distance(area: &Area, radius: u32, x: i32, y: i32) -> f32 {
    let hw = area.width() as f32 / 2.0;
    let hh = area.height() as f32 / 2.0;
    let r = (radius as f32).min(hw).min(hh);
    let cx = area.x1 as f32 + hw;
    let cy = area.y1 as f32 + hh;

    let qx = (x as f32 + 0.5 - cx).abs() - (hw - r);
    let qy = (y as f32 + 0.5 - cy).abs() - (hh - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Fraction of the pixel covered by the shape, with a one pixel soft edge.
fn coverage(area: &Area, radius: u32, x: i32, y: i32) -> f32 {
    (0.5 - signed_distance(area, radius, x, y)).clamp(0.0, 1.0)
}

fn scale(opa: u8, coverage: f32) -> u8 {
    (opa as f32 * coverage).round() as u8
}

fn mul_opa(a: u8, b: u8) -> u8 {
    (a as u32 * b as u32 / 255) as u8
}

fn mix(base: [u8; 4], over: [u8; 4], opa: u8) -> [u8; 4] {
    let a = opa as u32;
    let mut out = base;
    for c in 0..3 {
        out[c] = ((over[c] as u32 * a + base[c] as u32 * (255 - a)) / 255) as u8;
    }
    out
}

/// 0.1 degree units to radians.
fn angle_radians(angle: u32) -> f32 {
    (angle as f32 / 10.0).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::style::{FontSize, ShadowMetrics};

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn black_buffer(w: u32, h: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        fb.clear(BLACK);
        fb
    }

    fn plain_rect() -> RectStyle {
        RectStyle {
            radius: 0,
            bg_color: RED,
            bg_opa: 255,
            border_color: [0, 0, 255, 255],
            border_opa: 0,
            border_width: 0,
            border_side: BorderSide::FULL,
            shadow_color: [0, 255, 0, 255],
            shadow_opa: 0,
            shadow: ShadowMetrics::default(),
        }
    }

    #[test]
    fn test_fill_rect() {
        let mut fb = black_buffer(100, 100);
        let clip = fb.bounds();

        Compositor::fill_rect(&mut fb, &clip, &Area::new(10, 10, 20, 20), RED, 255);

        // Inside rectangle should be red
        assert_eq!(fb.get_pixel(15, 15), Some(RED));

        // Outside should be black
        assert_eq!(fb.get_pixel(5, 5), Some(BLACK));
    }

    #[test]
    fn test_fill_rect_respects_clip() {
        let mut fb = black_buffer(50, 50);
        let clip = Area::new(0, 0, 20, 50);

        Compositor::fill_rect(&mut fb, &clip, &Area::new(10, 10, 30, 5), RED, 255);

        assert_eq!(fb.get_pixel(19, 12), Some(RED));
        assert_eq!(fb.get_pixel(20, 12), Some(BLACK));
    }

    #[test]
    fn test_half_opacity_rect_blends() {
        let mut fb = black_buffer(20, 20);
        let clip = fb.bounds();
        let mut style = plain_rect();
        style.bg_opa = 127;

        Compositor::draw_rect(&mut fb, &clip, &Area::new(0, 0, 10, 10), &style);

        let pixel = fb.get_pixel(5, 5).unwrap();
        assert_eq!(pixel[0], 127);
        assert_eq!(pixel[1], 0);
    }

    #[test]
    fn test_rounded_rect_leaves_corners() {
        let mut fb = black_buffer(40, 40);
        let clip = fb.bounds();
        let mut style = plain_rect();
        style.radius = 10;

        Compositor::draw_rect(&mut fb, &clip, &Area::new(0, 0, 40, 40), &style);

        assert_eq!(fb.get_pixel(0, 0), Some(BLACK));
        assert_eq!(fb.get_pixel(20, 20), Some(RED));
        assert_eq!(fb.get_pixel(20, 0), Some(RED));
    }

    #[test]
    fn test_border_only_on_requested_side() {
        let mut fb = black_buffer(40, 40);
        let clip = fb.bounds();
        let mut style = plain_rect();
        style.bg_opa = 0;
        style.border_opa = 255;
        style.border_width = 3;
        style.border_side = BorderSide::LEFT;

        Compositor::draw_rect(&mut fb, &clip, &Area::new(0, 0, 40, 40), &style);

        assert_eq!(fb.get_pixel(1, 20), Some([0, 0, 255, 255]));
        assert_eq!(fb.get_pixel(3, 20), Some(BLACK));
        assert_eq!(fb.get_pixel(20, 1), Some(BLACK));
        assert_eq!(fb.get_pixel(38, 20), Some(BLACK));
    }

    #[test]
    fn test_full_border_keeps_center_clear() {
        let mut fb = black_buffer(40, 40);
        let clip = fb.bounds();
        let mut style = plain_rect();
        style.bg_opa = 0;
        style.border_opa = 255;
        style.border_width = 2;

        Compositor::draw_rect(&mut fb, &clip, &Area::new(0, 0, 40, 40), &style);

        for (x, y) in [(0, 20), (39, 20), (20, 0), (20, 39)] {
            assert_eq!(fb.get_pixel(x, y), Some([0, 0, 255, 255]));
        }
        assert_eq!(fb.get_pixel(20, 20), Some(BLACK));
    }

    #[test]
    fn test_shadow_reaches_past_the_object() {
        let mut fb = black_buffer(60, 60);
        let clip = fb.bounds();
        let mut style = plain_rect();
        style.shadow_opa = 255;
        style.shadow = ShadowMetrics {
            width: 10,
            ofs_x: 0,
            ofs_y: 0,
            spread: 0,
        };
        let obj = Area::new(20, 20, 20, 20);

        Compositor::draw_rect(&mut fb, &clip, &obj, &style);

        // Just outside the object the shadow is visible.
        assert!(fb.get_pixel(18, 30).unwrap()[1] > 0);
        // Beyond the falloff it is not.
        assert_eq!(fb.get_pixel(5, 30), Some(BLACK));
        let bounds = Compositor::primitive_bounds(
            &Primitive {
                x: 20,
                width: 20,
                height: 20,
                anim: crate::scene::Animation {
                    from: 20,
                    to: 20,
                    period_ms: 0,
                },
                shape: Shape::Rect(style),
            },
            20,
        );
        assert_eq!(bounds, obj.grow(6));
    }

    fn image_style(format: ImageFormat) -> ImageStyle {
        ImageStyle {
            format,
            opa: 255,
            recolor: [255, 255, 0, 255],
            recolor_opa: 0,
            angle: 0,
            zoom: 256,
            antialias: false,
        }
    }

    #[test]
    fn test_image_copy_matches_texture() {
        let mut fb = black_buffer(120, 120);
        let clip = fb.bounds();
        let texture = Texture::cogwheel(ImageFormat::Rgb);
        let obj = Area::new(10, 10, 100, 100);

        Compositor::draw_image(&mut fb, &clip, &obj, &image_style(ImageFormat::Rgb), &texture);

        assert_eq!(fb.get_pixel(10, 10), Some(texture.texel(0, 0)));
        assert_eq!(fb.get_pixel(60, 30), Some(texture.texel(50, 20)));
        assert_eq!(fb.get_pixel(5, 5), Some(BLACK));
    }

    #[test]
    fn test_alpha_only_image_uses_recolor() {
        let mut fb = black_buffer(100, 100);
        let clip = fb.bounds();
        let texture = Texture::cogwheel(ImageFormat::AlphaOnly);

        Compositor::draw_image(
            &mut fb,
            &clip,
            &Area::new(0, 0, 100, 100),
            &image_style(ImageFormat::AlphaOnly),
            &texture,
        );

        assert_eq!(fb.get_pixel(50, 20), Some([255, 255, 0, 255]));
        assert_eq!(fb.get_pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn test_rotated_image_bounds_grow() {
        let obj = Area::new(0, 0, 100, 100);
        let mut style = image_style(ImageFormat::Argb);
        assert_eq!(Compositor::image_bounds(&obj, &style), obj);

        style.angle = 450;
        let rotated = Compositor::image_bounds(&obj, &style);
        assert!(rotated.width() > 140);

        style.angle = 0;
        style.zoom = 128;
        let shrunk = Compositor::image_bounds(&obj, &style);
        assert!(shrunk.width() < 60);
    }

    #[test]
    fn test_zoomed_image_stays_in_bounds() {
        let mut fb = black_buffer(300, 300);
        let clip = fb.bounds();
        let texture = Texture::cogwheel(ImageFormat::Rgb);
        let obj = Area::new(100, 100, 100, 100);
        let mut style = image_style(ImageFormat::Rgb);
        style.zoom = 320;
        style.angle = 300;
        style.antialias = true;

        Compositor::draw_image(&mut fb, &clip, &obj, &style, &texture);

        let bounds = Compositor::image_bounds(&obj, &style);
        for (x, y) in [(bounds.x1 - 1, 150), (150, bounds.y2)] {
            assert_eq!(fb.get_pixel(x as u32, y as u32), Some(BLACK));
        }
        assert_ne!(fb.get_pixel(150, 150), Some(BLACK));
    }

    #[test]
    fn test_text_draws_glyph_cells() {
        let mut fb = black_buffer(100, 40);
        let clip = fb.bounds();
        let style = TextStyle {
            font: FontSize::Medium,
            color: RED,
            opa: 255,
            text: "A b",
        };

        Compositor::draw_text(&mut fb, &clip, &Area::new(0, 0, 30, 20), &style);

        // 'A' cell
        assert_eq!(fb.get_pixel(5, 10), Some(RED));
        // space cell stays empty
        assert_eq!(fb.get_pixel(15, 10), Some(BLACK));
        // 'b' cell
        assert_eq!(fb.get_pixel(25, 12), Some(RED));
    }
}
