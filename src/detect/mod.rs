//! Template-matching detection engine for the continue button.

pub mod cache;
pub mod detector;
pub mod matcher;
pub mod rect;

#[cfg(test)]
mod tests;

pub use cache::TemplateCache;
pub use detector::{ButtonDetector, DetectError, SEARCH_PADDING};
pub use matcher::{BestMatch, best_match, meets_threshold};
pub use rect::{CLICK_HEIGHT_FRACTION, Rect};
