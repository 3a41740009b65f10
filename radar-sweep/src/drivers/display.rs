//! Display driver trait

/// Fixed-size monochrome raster with line drawing and status text.
///
/// Coordinates are integer pixels; anything outside the raster is clipped by
/// the implementation.
pub trait Display {
    /// Raster width in pixels
    fn width(&self) -> u32;

    /// Raster height in pixels
    fn height(&self) -> u32;

    /// Erase the whole raster and all status text
    fn clear(&mut self);

    /// Draw a one-pixel line between two points, endpoints included
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Write a status line, replacing whatever was on that line
    fn write_text(&mut self, line: usize, text: &str);
}
