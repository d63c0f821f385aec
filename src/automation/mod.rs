//! The detection/click cycle and the continuous polling loop.

pub mod click;

pub use click::{ClickError, click_continue_button};

use crate::capture::ScreenCapture;
use crate::config::AppConfig;
use crate::debug_image;
use crate::detect::ButtonDetector;
use std::time::Duration;
use tokio::process::Command;

pub struct AutoContinue {
    config: AppConfig,
    capture: ScreenCapture,
    detector: ButtonDetector,
}

impl AutoContinue {
    pub fn new(config: AppConfig) -> Self {
        let capture = ScreenCapture::new(&config);
        let detector = ButtonDetector::new(&config);
        log::debug!("AutoContinue initialized");
        Self {
            config,
            capture,
            detector,
        }
    }

    /// Check whether the target editor process is running. Any failure to
    /// run pgrep counts as "not running".
    pub async fn is_editor_running(&self) -> bool {
        match Command::new("pgrep")
            .arg(&self.config.process_name)
            .output()
            .await
        {
            Ok(output) => {
                log::debug!(
                    "Editor process check for '{}': {}",
                    self.config.process_name,
                    output.status
                );
                output.status.success()
            }
            Err(e) => {
                log::error!("Failed to check editor running status: {e}");
                false
            }
        }
    }

    /// One full cycle: process check, capture, two-phase detection,
    /// optional debug annotation, click. Returns whether a click was
    /// performed. Never panics or propagates an error; every failure is
    /// logged and ends the cycle.
    pub async fn run_once(&mut self) -> bool {
        if !self.is_editor_running().await {
            log::debug!("Editor is not running");
            return false;
        }

        let Some(captured) = self.capture.capture().await else {
            log::error!("Failed to capture screen");
            return false;
        };

        let gray = captured.frame.to_luma8();
        let button = match self.detector.detect(&gray) {
            Ok(Some(button)) => button,
            Ok(None) => {
                log::debug!("Continue button not found in this frame");
                return false;
            }
            Err(e) => {
                log::error!("Detection misconfigured: {e}");
                return false;
            }
        };
        log::info!("Continue button found: {button:?}");

        if self.config.debug_mode {
            // The line area is recomputed for the annotation; with a warm
            // cache this costs one extra scan per successful detection.
            if let Ok(Some(area)) = self.detector.find_line_area(&gray) {
                debug_image::save_annotated(
                    &captured.frame,
                    area,
                    button,
                    &self.config.debug_output_dir,
                );
            }
        }

        match click_continue_button(button, captured.offset_x, captured.offset_y) {
            Ok((x, y)) => {
                log::info!(
                    "Clicked continue button at screen position: ({x}, {y}) \
                     (window offset: ({}, {}))",
                    captured.offset_x,
                    captured.offset_y
                );
                true
            }
            Err(e) => {
                log::error!("Button click failed: {e}");
                false
            }
        }
    }

    pub fn detector_mut(&mut self) -> &mut ButtonDetector {
        &mut self.detector
    }

    /// Poll forever with a fixed interval between cycles.
    pub async fn run_continuously(&mut self, interval: Option<u64>) {
        let interval = interval.unwrap_or(self.config.default_interval);
        log::info!("Start continuous monitoring, detection interval: {interval} seconds");
        loop {
            log::debug!("Starting detection cycle");
            let result = self.run_once().await;
            log::debug!("Detection cycle completed, result: {result}");
            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_process_reported_as_not_running() {
        let config = AppConfig {
            process_name: "definitely-not-a-real-process-name".to_string(),
            ..AppConfig::default()
        };
        let auto_continue = AutoContinue::new(config);
        assert!(!auto_continue.is_editor_running().await);
    }
}
