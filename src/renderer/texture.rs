use crate::scene::style::{IMG_HEIGHT, IMG_WIDTH};
use crate::scene::ImageFormat;

/// Key color of the chroma keyed texture.
pub const CHROMA_KEY: [u8; 4] = [0, 255, 0, 255];

const PALETTE_SIZE: usize = 16;

/// Decoded RGBA texture sampled by the compositor.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pixels: Vec<[u8; 4]>,
}

impl Texture {
    /// Procedural cogwheel in the given pixel layout.
    pub fn cogwheel(format: ImageFormat) -> Self {
        let (width, height) = (IMG_WIDTH, IMG_HEIGHT);
        let mut pixels = Vec::with_capacity((width * height) as usize);

        for y in 0..height {
            for x in 0..width {
                let texel = cog_texel(x, y, width, height);
                pixels.push(encode(format, texel));
            }
        }

        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest neighbour lookup, `None` outside the texture.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Option<[u8; 4]> {
        if u < 0.0 || v < 0.0 {
            return None;
        }
        let (x, y) = (u as u32, v as u32);
        (x < self.width && y < self.height).then(|| self.texel(x, y))
    }

    /// Bilinear lookup; texels beyond the edge count as transparent.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Option<[u8; 4]> {
        let u = u - 0.5;
        let v = v - 0.5;
        if u < -1.0 || v < -1.0 || u >= self.width as f32 || v >= self.height as f32 {
            return None;
        }

        let x0 = u.floor() as i32;
        let y0 = v.floor() as i32;
        let fx = u - x0 as f32;
        let fy = v - y0 as f32;

        let fetch = |x: i32, y: i32| -> [f32; 4] {
            if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return [0.0; 4];
            }
            let t = self.texel(x as u32, y as u32);
            [t[0] as f32, t[1] as f32, t[2] as f32, t[3] as f32]
        };

        let p00 = fetch(x0, y0);
        let p10 = fetch(x0 + 1, y0);
        let p01 = fetch(x0, y0 + 1);
        let p11 = fetch(x0 + 1, y0 + 1);

        let weights = [
            (1.0 - fx) * (1.0 - fy),
            fx * (1.0 - fy),
            (1.0 - fx) * fy,
            fx * fy,
        ];

        // Color is averaged over the opaque contributions only.
        let alpha = p00[3] * weights[0]
            + p10[3] * weights[1]
            + p01[3] * weights[2]
            + p11[3] * weights[3];
        if alpha <= 0.0 {
            return Some([0, 0, 0, 0]);
        }
        let mut out = [0u8; 4];
        for c in 0..3 {
            let sum = p00[c] * p00[3] * weights[0]
                + p10[c] * p10[3] * weights[1]
                + p01[c] * p01[3] * weights[2]
                + p11[c] * p11[3] * weights[3];
            out[c] = (sum / alpha).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = alpha.round().clamp(0.0, 255.0) as u8;
        Some(out)
    }
}

/// One texture per image format, built once per display.
#[derive(Debug, Clone)]
pub struct TextureSet {
    textures: Vec<Texture>,
}

impl TextureSet {
    pub fn new() -> Self {
        let textures = [
            ImageFormat::Rgb,
            ImageFormat::Argb,
            ImageFormat::ChromaKeyed,
            ImageFormat::Indexed,
            ImageFormat::AlphaOnly,
        ]
        .into_iter()
        .map(Texture::cogwheel)
        .collect();
        Self { textures }
    }

    pub fn get(&self, format: ImageFormat) -> &Texture {
        let index = match format {
            ImageFormat::Rgb => 0,
            ImageFormat::Argb => 1,
            ImageFormat::ChromaKeyed => 2,
            ImageFormat::Indexed => 3,
            ImageFormat::AlphaOnly => 4,
        };
        &self.textures[index]
    }
}

impl Default for TextureSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Straight alpha cogwheel: 8 teeth, a hub hole and a radial gradient.
fn cog_texel(x: u32, y: u32, width: u32, height: u32) -> [u8; 4] {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let dx = x as f32 + 0.5 - cx;
    let dy = y as f32 + 0.5 - cy;
    let r = (dx * dx + dy * dy).sqrt();
    let theta = dy.atan2(dx);

    let scale = cx.min(cy);
    let outer = if (theta * 8.0).sin() > 0.0 {
        scale * 0.94
    } else {
        scale * 0.78
    };
    let hole = scale * 0.3;

    // One pixel wide soft edge on both rims.
    let coverage = (outer - r + 0.5).clamp(0.0, 1.0) * (r - hole + 0.5).clamp(0.0, 1.0);
    let shade = (r / scale).clamp(0.0, 1.0);
    [
        (70.0 + 120.0 * shade) as u8,
        (90.0 + 80.0 * (1.0 - shade)) as u8,
        (150.0 + 60.0 * (theta.cos() * 0.5 + 0.5)) as u8,
        (coverage * 255.0).round() as u8,
    ]
}

fn encode(format: ImageFormat, texel: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = texel;
    match format {
        // Opaque: the soft edge is flattened onto a light backdrop.
        ImageFormat::Rgb => {
            let mix = |c: u8| ((c as u32 * a as u32 + 230 * (255 - a as u32)) / 255) as u8;
            [mix(r), mix(g), mix(b), 255]
        }
        ImageFormat::Argb => texel,
        ImageFormat::ChromaKeyed => {
            if a < 128 {
                // Keyed pixels carry no alpha once decoded.
                [CHROMA_KEY[0], CHROMA_KEY[1], CHROMA_KEY[2], 0]
            } else {
                [r, g, b, 255]
            }
        }
        ImageFormat::Indexed => {
            let index = palette_index(texel);
            if a < 128 {
                [0, 0, 0, 0]
            } else {
                palette_color(index)
            }
        }
        ImageFormat::AlphaOnly => [0, 0, 0, a],
    }
}

fn palette_index(texel: [u8; 4]) -> usize {
    let luma = (texel[0] as u32 * 3 + texel[1] as u32 * 6 + texel[2] as u32) / 10;
    (luma as usize * PALETTE_SIZE / 256).min(PALETTE_SIZE - 1)
}

fn palette_color(index: usize) -> [u8; 4] {
    let step = (255 / (PALETTE_SIZE - 1)) as u8;
    let level = step * index as u8;
    [level, level / 2 + 60, 255 - level / 2, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_texture_is_opaque() {
        let texture = Texture::cogwheel(ImageFormat::Rgb);
        assert_eq!((texture.width, texture.height), (100, 100));
        assert!(texture.pixels.iter().all(|p| p[3] == 255));
    }

    #[test]
    fn test_argb_texture_has_transparent_corners_and_opaque_body() {
        let texture = Texture::cogwheel(ImageFormat::Argb);
        assert_eq!(texture.texel(0, 0)[3], 0);
        // Between hub hole and tooth root.
        assert_eq!(texture.texel(50, 20)[3], 255);
        // Hub hole.
        assert_eq!(texture.texel(50, 50)[3], 0);
    }

    #[test]
    fn test_chroma_keyed_corners_are_keyed() {
        let texture = Texture::cogwheel(ImageFormat::ChromaKeyed);
        let corner = texture.texel(0, 0);
        assert_eq!(corner[..3], CHROMA_KEY[..3]);
        assert_eq!(corner[3], 0);
    }

    #[test]
    fn test_indexed_texture_uses_small_palette() {
        let texture = Texture::cogwheel(ImageFormat::Indexed);
        let mut colors: Vec<[u8; 4]> = texture.pixels.clone();
        colors.sort();
        colors.dedup();
        assert!(colors.len() <= PALETTE_SIZE + 1);
    }

    #[test]
    fn test_alpha_only_texture_has_no_color() {
        let texture = Texture::cogwheel(ImageFormat::AlphaOnly);
        assert!(texture.pixels.iter().all(|p| p[..3] == [0, 0, 0]));
        assert_eq!(texture.texel(50, 20)[3], 255);
    }

    #[test]
    fn test_sampling_outside_is_none() {
        let texture = Texture::cogwheel(ImageFormat::Argb);
        assert_eq!(texture.sample_nearest(-0.5, 10.0), None);
        assert_eq!(texture.sample_nearest(100.0, 10.0), None);
        assert_eq!(texture.sample_bilinear(150.0, 10.0), None);
    }

    #[test]
    fn test_bilinear_matches_nearest_on_texel_centers() {
        let texture = Texture::cogwheel(ImageFormat::Rgb);
        assert_eq!(
            texture.sample_bilinear(30.5, 40.5),
            texture.sample_nearest(30.5, 40.5)
        );
    }

    #[test]
    fn test_texture_set_lookup() {
        let set = TextureSet::new();
        assert_eq!(set.get(ImageFormat::Indexed).format, ImageFormat::Indexed);
        assert_eq!(set.get(ImageFormat::AlphaOnly).format, ImageFormat::AlphaOnly);
    }
}
