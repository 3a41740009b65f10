//! In-memory monochrome display backed by a grayscale image

use crate::drivers::Display;
use crate::error::Result;
use image::{GrayImage, Luma};
use std::path::Path;

const BACKGROUND: Luma<u8> = Luma([255]);
const INK: Luma<u8> = Luma([0]);

/// Raster display with Bresenham lines and a list of status lines.
///
/// Text is kept as strings rather than rasterised; it is printed alongside
/// the ASCII dump and ignored by the PNG export.
pub struct RasterDisplay {
    pixels: GrayImage,
    text: Vec<String>,
}

impl RasterDisplay {
    /// Create a blank display
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, BACKGROUND),
            text: Vec::new(),
        }
    }

    /// Whether the pixel at (x, y) is lit; false outside the raster
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.pixels.get_pixel(x as u32, y as u32) == &INK
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.pixels.pixels().filter(|p| **p == INK).count()
    }

    /// Status line text, if any was written
    pub fn text_line(&self, line: usize) -> Option<&str> {
        self.text
            .get(line)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Write the raster as PNG.
    ///
    /// Row 0 of the raster is the bottom row of the image, so +Y points up.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::imageops::flip_vertical(&self.pixels).save(path)?;
        Ok(())
    }

    /// Render status lines and the raster as text, `#` for lit pixels.
    ///
    /// Rows are printed top-down with +Y up, matching [`Self::save_png`].
    pub fn to_ascii(&self) -> String {
        let (width, height) = self.pixels.dimensions();
        let mut out = String::with_capacity(((width + 1) * height) as usize);

        for line in self.text.iter().filter(|s| !s.is_empty()) {
            out.push_str(line);
            out.push('\n');
        }
        for y in (0..height).rev() {
            for x in 0..width {
                let lit = self.pixels.get_pixel(x, y) == &INK;
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.pixels.width() && (y as u32) < self.pixels.height()
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.pixels.put_pixel(x as u32, y as u32, INK);
        }
    }
}

/// Liang-Barsky clip of `[x0, y0, x1, y1]` to `[0, x_max] x [0, y_max]`.
///
/// Returns the clipped endpoints rounded to pixels, or `None` when the
/// segment misses the raster.
fn clip_segment(seg: [f64; 4], x_max: f64, y_max: f64) -> Option<(i64, i64, i64, i64)> {
    let [x0, y0, x1, y1] = seg;
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let px = |t: f64| (x0 + t * dx).round().clamp(0.0, x_max) as i64;
    let py = |t: f64| (y0 + t * dy).round().clamp(0.0, y_max) as i64;
    Some((px(t0), py(t0), px(t1), py(t1)))
}

impl Display for RasterDisplay {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = BACKGROUND;
        }
        self.text.clear();
    }

    /// Bresenham line over the part of the segment inside the raster
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (width, height) = self.pixels.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = clip_segment(
            [x0 as f64, y0 as f64, x1 as f64, y1 as f64],
            (width - 1) as f64,
            (height - 1) as f64,
        ) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let mut x = x0;
        let mut y = y0;
        let mut err = dx - dy;

        loop {
            self.plot(x as i32, y as i32);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;

            if e2 > -dy {
                err -= dy;
                x += sx;
            }

            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn write_text(&mut self, line: usize, text: &str) {
        if self.text.len() <= line {
            self.text.resize(line + 1, String::new());
        }
        self.text[line] = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut display = RasterDisplay::new(10, 5);
        display.draw_line(1, 2, 6, 2);

        assert_eq!(display.lit_count(), 6);
        for x in 1..=6 {
            assert!(display.is_set(x, 2));
        }
        assert!(!display.is_set(0, 2));
        assert!(!display.is_set(7, 2));
    }

    #[test]
    fn test_diagonal_line_endpoints() {
        let mut display = RasterDisplay::new(20, 20);
        display.draw_line(15, 2, 3, 11);

        assert!(display.is_set(15, 2));
        assert!(display.is_set(3, 11));
        // One pixel per step along the major axis
        assert_eq!(display.lit_count(), 13);
    }

    #[test]
    fn test_single_point() {
        let mut display = RasterDisplay::new(4, 4);
        display.draw_line(2, 2, 2, 2);
        assert_eq!(display.lit_count(), 1);
        assert!(display.is_set(2, 2));
    }

    #[test]
    fn test_clipping() {
        let mut display = RasterDisplay::new(5, 5);
        display.draw_line(-10, 2, 10, 2);

        assert_eq!(display.lit_count(), 5);
        assert!(!display.is_set(-1, 2));
        assert!(!display.is_set(5, 2));
    }

    #[test]
    fn test_full_range_line_is_clipped() {
        let mut display = RasterDisplay::new(5, 5);
        display.draw_line(0, i32::MIN, 0, i32::MAX);
        display.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX);

        for i in 0..5 {
            assert!(display.is_set(0, i));
            assert!(display.is_set(i, i));
        }
        assert_eq!(display.lit_count(), 9);
    }

    #[test]
    fn test_line_missing_raster() {
        let mut display = RasterDisplay::new(5, 5);
        display.draw_line(i32::MAX, i32::MIN, i32::MAX, i32::MAX);
        display.draw_line(-3, -1, -1, -3);

        assert_eq!(display.lit_count(), 0);
    }

    #[test]
    fn test_partial_diagonal_keeps_slope() {
        let mut display = RasterDisplay::new(10, 10);
        display.draw_line(-5, -5, 20, 20);

        for i in 0..10 {
            assert!(display.is_set(i, i));
        }
        assert_eq!(display.lit_count(), 10);
    }

    #[test]
    fn test_clear_and_text() {
        let mut display = RasterDisplay::new(5, 5);
        display.draw_line(0, 0, 4, 4);
        display.write_text(1, "hello");

        assert_eq!(display.text_line(0), None);
        assert_eq!(display.text_line(1), Some("hello"));

        display.clear();
        assert_eq!(display.lit_count(), 0);
        assert_eq!(display.text_line(1), None);
    }

    #[test]
    fn test_ascii_dump() {
        let mut display = RasterDisplay::new(3, 2);
        display.write_text(0, "map");
        display.draw_line(0, 0, 2, 0);

        assert_eq!(display.to_ascii(), "map\n...\n###\n");
    }

    #[test]
    fn test_png_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");

        let mut display = RasterDisplay::new(8, 6);
        display.draw_line(0, 0, 7, 5);
        display.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded.dimensions(), (8, 6));
        // Raster row 0 lands on the bottom image row
        assert_eq!(loaded.get_pixel(0, 5).0[0], 0);
        assert_eq!(loaded.get_pixel(0, 0).0[0], 255);
    }
}
