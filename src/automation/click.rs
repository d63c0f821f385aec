//! Mouse click simulation via enigo.

use crate::detect::Rect;
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClickError {
    #[error("failed to initialize input backend: {0}")]
    Init(#[from] enigo::NewConError),

    #[error("input simulation failed: {0}")]
    Input(#[from] enigo::InputError),
}

/// Click the detected button. `button` is frame-relative; the capture
/// offset translates the click point into screen coordinates. Returns the
/// screen position that was clicked.
pub fn click_continue_button(
    button: Rect,
    offset_x: i32,
    offset_y: i32,
) -> Result<(i32, i32), ClickError> {
    let (x, y) = button.click_point(offset_x, offset_y);
    let mut enigo = Enigo::new(&Settings::default())?;
    enigo.move_mouse(x, y, Coordinate::Abs)?;
    enigo.button(Button::Left, Direction::Click)?;
    Ok((x, y))
}
