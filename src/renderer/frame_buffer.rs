use crate::renderer::Area;
use anyhow::{Context, Result};
use std::path::Path;

/// RGBA frame buffer for rendering
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA, 4 bytes per pixel
}

impl FrameBuffer {
    /// Create new frame buffer with given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height * 4) as usize;
        Self {
            width,
            height,
            pixels: vec![0; size],
        }
    }

    /// Clear buffer with color
    pub fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    /// Fill an area (clipped to the buffer) with a solid color
    pub fn fill_area(&mut self, area: &Area, color: [u8; 4]) {
        let Some(area) = area.intersect(&self.bounds()) else {
            return;
        };
        for y in area.y1..area.y2 {
            let row = (y as u32 * self.width) as usize * 4;
            let start = row + area.x1 as usize * 4;
            let end = row + area.x2 as usize * 4;
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&color);
            }
        }
    }

    /// Set pixel at position
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            self.pixels[idx..idx + 4].copy_from_slice(&color);
        }
    }

    /// Get pixel at position
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            let mut pixel = [0u8; 4];
            pixel.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(pixel)
        } else {
            None
        }
    }

    /// Blend `color` onto the pixel with the given opacity (0..=255)
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4], opa: u8) {
        if opa == 0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        if opa == 255 {
            self.pixels[idx..idx + 3].copy_from_slice(&color[0..3]);
            self.pixels[idx + 3] = 255;
            return;
        }

        let alpha = opa as u32;
        let inv_alpha = 255 - alpha;
        for c in 0..3 {
            let bg = self.pixels[idx + c] as u32;
            self.pixels[idx + c] = ((color[c] as u32 * alpha + bg * inv_alpha) / 255) as u8;
        }
        // Output alpha is always opaque
        self.pixels[idx + 3] = 255;
    }

    /// Get buffer dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bounds(&self) -> Area {
        Area::new(0, 0, self.width, self.height)
    }

    /// Save as PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .context("frame buffer size does not match its dimensions")?;
        image
            .save(path)
            .with_context(|| format!("Failed to write screenshot: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_buffer_creation() {
        let fb = FrameBuffer::new(800, 480);
        assert_eq!(fb.dimensions(), (800, 480));
        assert_eq!(fb.pixels.len(), 800 * 480 * 4);
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new(100, 100);
        fb.clear([255, 0, 0, 255]); // Red

        assert_eq!(fb.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(fb.get_pixel(50, 50), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = FrameBuffer::new(100, 100);
        fb.set_pixel(10, 20, [100, 150, 200, 255]);

        assert_eq!(fb.get_pixel(10, 20), Some([100, 150, 200, 255]));
        assert_eq!(fb.get_pixel(100, 100), None); // Out of bounds
    }

    #[test]
    fn test_fill_area_is_clipped() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.fill_area(&Area::new(-5, 8, 20, 20), [0, 0, 255, 255]);

        assert_eq!(fb.get_pixel(0, 8), Some([0, 0, 255, 255]));
        assert_eq!(fb.get_pixel(9, 9), Some([0, 0, 255, 255]));
        assert_eq!(fb.get_pixel(9, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_alpha_blending() {
        let mut fb = FrameBuffer::new(100, 100);
        fb.clear([255, 255, 255, 255]); // White background

        // Blend 50% red
        fb.blend_pixel(50, 50, [255, 0, 0, 255], 128);

        let pixel = fb.get_pixel(50, 50).unwrap();
        // Should be approximately pink (255, 127, 127, 255)
        assert!(pixel[0] == 255);
        assert!(pixel[1] > 120 && pixel[1] < 135);
        assert!(pixel[2] > 120 && pixel[2] < 135);
    }

    #[test]
    fn test_transparent_blend_is_noop() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear([1, 2, 3, 255]);
        fb.blend_pixel(1, 1, [200, 200, 200, 255], 0);
        assert_eq!(fb.get_pixel(1, 1), Some([1, 2, 3, 255]));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut fb = FrameBuffer::new(8, 4);
        fb.clear([10, 20, 30, 255]);
        fb.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(loaded.get_pixel(3, 2).0, [10, 20, 30, 255]);
    }
}
