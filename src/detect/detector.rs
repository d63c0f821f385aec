//! Two-phase continue-button detection.
//!
//! Phase 1 locates the distinctive "button line" area with the line
//! templates; phase 2 searches only inside that area (plus padding) with
//! the button templates. The button template alone is ambiguous across a
//! whole frame, so narrowing first is what keeps false positives down.

use super::cache::TemplateCache;
use super::matcher::{best_match, meets_threshold};
use super::rect::Rect;
use crate::config::AppConfig;
use image::GrayImage;
use std::path::PathBuf;
use thiserror::Error;

/// Padding around the phase-1 area when cropping for phase 2, to tolerate
/// an imprecise line-area fix.
pub const SEARCH_PADDING: u32 = 10;

/// Missing template configuration. Distinct from a clean "not found" so
/// the caller can log it as a setup problem instead of a quiet miss.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("no line template paths configured")]
    NoLineTemplates,

    #[error("no button template paths configured")]
    NoButtonTemplates,
}

pub struct ButtonDetector {
    threshold: f32,
    line_templates: Vec<PathBuf>,
    button_templates: Vec<PathBuf>,
    cache: TemplateCache,
}

impl ButtonDetector {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_templates(
            config.threshold,
            config.line_template_paths.clone(),
            config.button_template_paths.clone(),
        )
    }

    pub fn with_templates(
        threshold: f32,
        line_templates: Vec<PathBuf>,
        button_templates: Vec<PathBuf>,
    ) -> Self {
        log::debug!("ButtonDetector initialized with threshold: {threshold}");
        Self {
            threshold,
            line_templates,
            button_templates,
            cache: TemplateCache::new(),
        }
    }

    /// Phase 1: locate the button line area anywhere in the frame.
    pub fn find_line_area(&mut self, frame: &GrayImage) -> Result<Option<Rect>, DetectError> {
        if self.line_templates.is_empty() {
            return Err(DetectError::NoLineTemplates);
        }

        match best_match(frame, &self.line_templates, &mut self.cache) {
            Some(best) if meets_threshold(best.score, self.threshold) => {
                log::info!(
                    "Found button line area using template {} at ({}, {}, {}, {}), \
                     matching degree: {:.2}",
                    best.template.display(),
                    best.x,
                    best.y,
                    best.width,
                    best.height,
                    best.score
                );
                Ok(Some(Rect::new(best.x, best.y, best.width, best.height)))
            }
            Some(best) => {
                log::debug!(
                    "Button line area not found, best matching degree: {:.2} (threshold: {})",
                    best.score,
                    self.threshold
                );
                Ok(None)
            }
            None => {
                log::debug!("Button line area not found, no usable line templates");
                Ok(None)
            }
        }
    }

    /// Phase 2: locate the continue button inside `area`, padded by
    /// `SEARCH_PADDING` and clamped to the frame. The returned rectangle
    /// is frame-relative.
    pub fn find_button_in_area(
        &mut self,
        frame: &GrayImage,
        area: Rect,
    ) -> Result<Option<Rect>, DetectError> {
        if self.button_templates.is_empty() {
            return Err(DetectError::NoButtonTemplates);
        }

        let search = area.padded(SEARCH_PADDING, frame.width(), frame.height());
        log::debug!(
            "Searching for continue button in ({}, {}, {}, {}) (area: ({}, {}, {}, {}))",
            search.x,
            search.y,
            search.width,
            search.height,
            area.x,
            area.y,
            area.width,
            area.height
        );
        let crop =
            image::imageops::crop_imm(frame, search.x, search.y, search.width, search.height)
                .to_image();

        match best_match(&crop, &self.button_templates, &mut self.cache) {
            Some(best) if meets_threshold(best.score, self.threshold) => {
                // Translate the crop-local hit back to frame coordinates.
                let button = Rect::new(search.x + best.x, search.y + best.y, best.width, best.height);
                log::info!(
                    "Found continue button using template {} at ({}, {}, {}, {}), \
                     matching degree: {:.2}",
                    best.template.display(),
                    button.x,
                    button.y,
                    button.width,
                    button.height,
                    best.score
                );
                Ok(Some(button))
            }
            Some(best) => {
                log::debug!(
                    "Continue button not found, best matching degree: {:.2} (threshold: {})",
                    best.score,
                    self.threshold
                );
                Ok(None)
            }
            None => {
                log::debug!("Continue button not found, no usable button templates");
                Ok(None)
            }
        }
    }

    /// Full two-phase detection. A phase-1 miss short-circuits; phase 2
    /// is never attempted against the whole frame.
    pub fn detect(&mut self, frame: &GrayImage) -> Result<Option<Rect>, DetectError> {
        let Some(area) = self.find_line_area(frame)? else {
            log::debug!("Phase 1 (button line area detection) failed, skipping phase 2");
            return Ok(None);
        };
        self.find_button_in_area(frame, area)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
