//! Pixel rectangles and coordinate handling.
//!
//! Rectangles produced by detection are frame-relative; they only become
//! screen-absolute once a capture offset is applied (`click_point`).

/// Fraction of the button height at which the click lands. The button
/// label sits below the vertical center, so clicking dead-center misses.
pub const CLICK_HEIGHT_FRACTION: f32 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the rectangle by `padding` pixels on all sides, clamped to a
    /// `frame_width` x `frame_height` frame.
    pub fn padded(&self, padding: u32, frame_width: u32, frame_height: u32) -> Rect {
        let x0 = self.x.saturating_sub(padding);
        let y0 = self.y.saturating_sub(padding);
        let x1 = (self.x + self.width + padding).min(frame_width);
        let y1 = (self.y + self.height + padding).min(frame_height);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Screen-absolute click target for this button rectangle: horizontal
    /// center, `CLICK_HEIGHT_FRACTION` of the height down from the top.
    pub fn click_point(&self, offset_x: i32, offset_y: i32) -> (i32, i32) {
        let x = offset_x + (self.x + self.width / 2) as i32;
        let y = offset_y + self.y as i32 + (self.height as f32 * CLICK_HEIGHT_FRACTION) as i32;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_expands_on_all_sides() {
        let rect = Rect::new(100, 50, 40, 20);
        assert_eq!(rect.padded(10, 200, 100), Rect::new(90, 40, 60, 40));
    }

    #[test]
    fn padded_clamps_to_frame_origin() {
        let rect = Rect::new(2, 3, 30, 20);
        let padded = rect.padded(10, 200, 100);
        assert_eq!(padded, Rect::new(0, 0, 42, 33));
    }

    #[test]
    fn padded_clamps_to_frame_extent() {
        let rect = Rect::new(170, 85, 25, 12);
        let padded = rect.padded(10, 200, 100);
        assert_eq!(padded, Rect::new(160, 75, 40, 25));
    }

    #[test]
    fn click_point_applies_offset_and_height_fraction() {
        let button = Rect::new(10, 20, 30, 100);
        assert_eq!(button.click_point(5, 7), (5 + 10 + 15, 7 + 20 + 66));
        assert_eq!(button.click_point(0, 0), (25, 86));
    }
}
