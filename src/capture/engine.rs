//! The acquisition engine: try capture strategies in order until one
//! yields a decodable frame.

use super::error::{CaptureError, CaptureResult};
use super::strategy::{CaptureStrategy, resolve_order};
use super::temp::scoped_temp;
use super::window;
use super::window::{CAPTURE_TIMEOUT, run_checked};
use crate::config::AppConfig;
use image::DynamicImage;
use std::path::Path;
use tokio::process::Command;

/// One captured frame together with the screen-space position of its
/// origin. (0, 0) for full-screen captures, the window's top-left corner
/// for single-window captures.
pub struct Captured {
    pub frame: DynamicImage,
    pub offset_x: i32,
    pub offset_y: i32,
}

pub struct ScreenCapture {
    order: Vec<CaptureStrategy>,
    window_title: String,
}

impl ScreenCapture {
    pub fn new(config: &AppConfig) -> Self {
        let order = resolve_order(&config.screenshot_methods);
        log::debug!(
            "Screenshot methods will be tried in this order: {:?}",
            order.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        Self {
            order,
            window_title: config.target_window_title.clone(),
        }
    }

    /// Try each strategy in order and return the first frame produced.
    /// Individual failures are logged and swallowed; `None` means every
    /// strategy failed.
    pub async fn capture(&self) -> Option<Captured> {
        for strategy in &self.order {
            log::debug!("Trying screenshot method: {}", strategy.name());
            match self.attempt(*strategy).await {
                Ok(captured) => {
                    log::info!(
                        "Screenshot captured successfully using {}, size: {}x{}, \
                         window offset: ({}, {})",
                        strategy.name(),
                        captured.frame.width(),
                        captured.frame.height(),
                        captured.offset_x,
                        captured.offset_y
                    );
                    return Some(captured);
                }
                Err(e) => {
                    log::debug!("Screenshot method {} failed: {e}", strategy.name());
                }
            }
        }
        log::error!("All screenshot methods failed");
        None
    }

    async fn attempt(&self, strategy: CaptureStrategy) -> CaptureResult<Captured> {
        match strategy {
            CaptureStrategy::TargetWindow => self.capture_target_window().await,
            CaptureStrategy::GnomeScreenshot => self.capture_gnome_screenshot().await,
            CaptureStrategy::Scrot => self.capture_scrot().await,
            CaptureStrategy::ActiveWindow => self.capture_active_window().await,
            CaptureStrategy::Monitor => self.capture_monitor(),
        }
    }

    /// Capture the target editor window directly. Prefers the focused
    /// window when its title matches, otherwise falls back to a title
    /// search across all windows.
    async fn capture_target_window(&self) -> CaptureResult<Captured> {
        let id = match window::focused_window().await {
            Ok(id) => {
                let name = window::window_name(&id).await.unwrap_or_default();
                if name.contains(&self.window_title) {
                    log::debug!("Active window is the target: {name}");
                    id
                } else {
                    log::debug!("Active window is not the target, searching for '{}'", self.window_title);
                    self.find_target_window().await?
                }
            }
            Err(e) => {
                log::debug!("Could not get active window ({e}), searching for '{}'", self.window_title);
                self.find_target_window().await?
            }
        };
        self.capture_window(&id).await
    }

    async fn find_target_window(&self) -> CaptureResult<String> {
        window::search_windows(&self.window_title)
            .await?
            .into_iter()
            .next()
            .ok_or(CaptureError::WindowNotFound)
    }

    /// Dump one window's pixels: xwd raster dump, ImageMagick conversion
    /// to PNG, decode. Both temp files are dropped (and deleted) on every
    /// exit path.
    async fn capture_window(&self, id: &str) -> CaptureResult<Captured> {
        // A failed geometry query degrades to a (0, 0) offset rather than
        // failing the whole strategy.
        let (offset_x, offset_y) = match window::window_origin(id).await {
            Ok(origin) => origin,
            Err(e) => {
                log::debug!("Window geometry query failed, assuming (0, 0) offset: {e}");
                (0, 0)
            }
        };

        let xwd_path = scoped_temp(".xwd")?;
        let png_path = scoped_temp(".png")?;

        let mut dump = Command::new("xwd");
        dump.arg("-id")
            .arg(id)
            .arg("-silent")
            .arg("-out")
            .arg(&*xwd_path);
        run_checked(dump, "xwd", CAPTURE_TIMEOUT).await?;

        let mut convert = Command::new("convert");
        convert.arg(&*xwd_path).arg(&*png_path);
        run_checked(convert, "convert", CAPTURE_TIMEOUT).await?;

        let frame = decode(&png_path)?;
        Ok(Captured {
            frame,
            offset_x,
            offset_y,
        })
    }

    async fn capture_gnome_screenshot(&self) -> CaptureResult<Captured> {
        let png_path = scoped_temp(".png")?;
        let mut cmd = Command::new("gnome-screenshot");
        cmd.arg("-f").arg(&*png_path);
        run_checked(cmd, "gnome-screenshot", CAPTURE_TIMEOUT).await?;

        let frame = decode(&png_path)?;
        Ok(Captured {
            frame,
            offset_x: 0,
            offset_y: 0,
        })
    }

    async fn capture_scrot(&self) -> CaptureResult<Captured> {
        let png_path = scoped_temp(".png")?;
        let mut cmd = Command::new("scrot");
        cmd.arg("--overwrite").arg(&*png_path);
        run_checked(cmd, "scrot", CAPTURE_TIMEOUT).await?;

        let frame = decode(&png_path)?;
        Ok(Captured {
            frame,
            offset_x: 0,
            offset_y: 0,
        })
    }

    /// Capture the active window with gnome-screenshot, reporting its
    /// geometry as the offset. Unlike `capture_window`, a geometry
    /// failure here fails the strategy: without it the offset would be
    /// meaningless for a window capture.
    async fn capture_active_window(&self) -> CaptureResult<Captured> {
        let (offset_x, offset_y) = window::active_window_origin().await?;
        log::debug!("Active window position: ({offset_x}, {offset_y})");

        let png_path = scoped_temp(".png")?;
        let mut cmd = Command::new("gnome-screenshot");
        cmd.arg("-w").arg("-f").arg(&*png_path);
        run_checked(cmd, "gnome-screenshot -w", CAPTURE_TIMEOUT).await?;

        let frame = decode(&png_path)?;
        Ok(Captured {
            frame,
            offset_x,
            offset_y,
        })
    }

    fn capture_monitor(&self) -> CaptureResult<Captured> {
        let monitors = xcap::Monitor::all()?;
        let monitor = monitors.first().ok_or(CaptureError::NoMonitor)?;
        let image = monitor.capture_image()?;
        Ok(Captured {
            frame: DynamicImage::ImageRgba8(image),
            offset_x: 0,
            offset_y: 0,
        })
    }
}

fn decode(path: &Path) -> CaptureResult<DynamicImage> {
    image::open(path).map_err(|source| CaptureError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
