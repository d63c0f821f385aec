//! Annotated debug screenshots of successful detections.

use crate::detect::{CLICK_HEIGHT_FRACTION, Rect};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as DrawRect;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const LINE_AREA_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const BUTTON_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CLICK_POINT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const OFFSET_LINE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Save a copy of the frame with the line area, the detected button and
/// the click point marked. Failures are logged, never propagated; a
/// missing output directory falls back to /tmp.
pub fn save_annotated(frame: &DynamicImage, line_area: Rect, button: Rect, output_dir: &Path) {
    let mut canvas = frame.to_rgb8();
    draw_marks(&mut canvas, line_area, button);

    let dir = if std::fs::create_dir_all(output_dir).is_ok() {
        output_dir
    } else {
        log::error!("Failed to create debug output directory {}", output_dir.display());
        Path::new("/tmp")
    };

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let filename = dir.join(format!("debug_screenshot_{timestamp}.png"));

    match canvas.save(&filename) {
        Ok(()) => log::info!("Debug screenshot saved to: {}", filename.display()),
        Err(e) => {
            log::error!("Failed to save debug screenshot to {}: {e}", filename.display());
            let fallback = Path::new("/tmp").join(format!("debug_screenshot_{timestamp}.png"));
            match canvas.save(&fallback) {
                Ok(()) => {
                    log::info!("Debug screenshot saved to fallback location: {}", fallback.display())
                }
                Err(e) => log::error!("Failed to save debug screenshot to fallback location: {e}"),
            }
        }
    }
}

fn draw_marks(canvas: &mut RgbImage, line_area: Rect, button: Rect) {
    draw_hollow_rect_mut(
        canvas,
        DrawRect::at(line_area.x as i32, line_area.y as i32)
            .of_size(line_area.width, line_area.height),
        LINE_AREA_COLOR,
    );
    log::info!(
        "Line area coordinates: x={}, y={}, width={}, height={}",
        line_area.x,
        line_area.y,
        line_area.width,
        line_area.height
    );

    draw_hollow_rect_mut(
        canvas,
        DrawRect::at(button.x as i32, button.y as i32).of_size(button.width, button.height),
        BUTTON_COLOR,
    );

    // Click point at the same height fraction the clicker uses.
    let click_x = (button.x + button.width / 2) as i32;
    let click_y = button.y as i32 + (button.height as f32 * CLICK_HEIGHT_FRACTION) as i32;
    draw_filled_circle_mut(canvas, (click_x, click_y), 5, CLICK_POINT_COLOR);

    let center_x = (button.x + button.width / 2) as f32;
    let center_y = (button.y + button.height / 2) as f32;
    draw_line_segment_mut(
        canvas,
        (center_x, center_y),
        (click_x as f32, click_y as f32),
        OFFSET_LINE_COLOR,
    );
}
