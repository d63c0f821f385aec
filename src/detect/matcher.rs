//! Best-of-N normalized cross-correlation scan over a template list.

use super::cache::TemplateCache;
use image::GrayImage;
use imageproc::template_matching::{MatchTemplateMethod, find_extremes, match_template};
use std::path::{Path, PathBuf};

/// Winning candidate of one scan: peak score, its position and the size
/// of the template that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub score: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub template: PathBuf,
}

/// Threshold comparison is inclusive: a score exactly at the threshold
/// counts as a match.
pub fn meets_threshold(score: f32, threshold: f32) -> bool {
    score >= threshold
}

/// Scan every template against `frame` and fold the per-template peaks
/// into a single best candidate. Unloadable templates and templates
/// larger than the frame are skipped. On an exact score tie the template
/// listed first wins.
pub fn best_match(
    frame: &GrayImage,
    templates: &[PathBuf],
    cache: &mut TemplateCache,
) -> Option<BestMatch> {
    templates
        .iter()
        .filter_map(|path| score_template(frame, path, cache))
        .fold(None, |best, candidate| match best {
            Some(b) if b.score >= candidate.score => Some(b),
            _ => Some(candidate),
        })
}

fn score_template(
    frame: &GrayImage,
    path: &Path,
    cache: &mut TemplateCache,
) -> Option<BestMatch> {
    let template = match cache.get(path) {
        Some(t) => t,
        None => {
            log::debug!(
                "Skipping template {} because it could not be loaded",
                path.display()
            );
            return None;
        }
    };

    // match_template asserts the template fits inside the image, so a
    // too-large template is a skip, not a scan abort.
    if template.width() > frame.width() || template.height() > frame.height() {
        log::debug!(
            "Skipping template {} ({}x{}): larger than search frame ({}x{})",
            path.display(),
            template.width(),
            template.height(),
            frame.width(),
            frame.height()
        );
        return None;
    }

    let scores = match_template(
        frame,
        template,
        MatchTemplateMethod::CrossCorrelationNormalized,
    );
    let extremes = find_extremes(&scores);
    let (x, y) = extremes.max_value_location;
    log::debug!(
        "Template {} matching result: {:.4} at ({x}, {y})",
        path.display(),
        extremes.max_value
    );

    Some(BestMatch {
        score: extremes.max_value,
        x,
        y,
        width: template.width(),
        height: template.height(),
        template: path.to_path_buf(),
    })
}
