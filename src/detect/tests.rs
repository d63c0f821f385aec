use super::cache::TemplateCache;
use super::detector::{ButtonDetector, DetectError};
use super::matcher::{best_match, meets_threshold};
use super::rect::Rect;
use image::GrayImage;
use std::path::PathBuf;
use tempfile::TempDir;

const THRESHOLD: f32 = 0.8;

fn flat(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, image::Luma([value]))
}

/// High-contrast checkerboard. Normalized cross-correlation against a
/// flat background stays around 0.77, safely below the 0.8 threshold,
/// while the planted copy scores 1.0.
fn checker(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        image::Luma([if (x + y) % 2 == 0 { 20 } else { 230 }])
    })
}

/// Horizontal stripes, distinct enough from `checker` that line and
/// button templates never match each other's patterns.
fn stripes(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |_, y| {
        image::Luma([if y % 2 == 0 { 20 } else { 230 }])
    })
}

fn paste(canvas: &mut GrayImage, x: u32, y: u32, patch: &GrayImage) {
    image::imageops::overlay(canvas, patch, x as i64, y as i64);
}

fn save_template(dir: &TempDir, name: &str, img: &GrayImage) -> PathBuf {
    let path = dir.path().join(name);
    img.save(&path).unwrap();
    path
}

#[test]
fn threshold_is_inclusive() {
    assert!(meets_threshold(0.80, THRESHOLD));
    assert!(meets_threshold(1.0, THRESHOLD));
    assert!(!meets_threshold(0.7999, THRESHOLD));
}

#[test]
fn finds_line_area_at_planted_position() {
    let dir = TempDir::new().unwrap();
    let pattern = checker(40, 20);
    let line = save_template(&dir, "line.png", &pattern);

    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 100, 50, &pattern);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![line], vec![]);
    let area = detector.find_line_area(&frame).unwrap();
    assert_eq!(area, Some(Rect::new(100, 50, 40, 20)));
}

#[test]
fn line_area_not_found_on_blank_frame() {
    let dir = TempDir::new().unwrap();
    let line = save_template(&dir, "line.png", &checker(40, 20));

    let frame = flat(200, 100, 10);
    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![line], vec![]);
    assert_eq!(detector.find_line_area(&frame).unwrap(), None);
}

#[test]
fn exact_tie_prefers_first_template() {
    let dir = TempDir::new().unwrap();
    let pattern = checker(16, 16);
    let first = save_template(&dir, "first.png", &pattern);
    let second = save_template(&dir, "second.png", &pattern);

    let mut frame = flat(64, 64, 10);
    paste(&mut frame, 30, 10, &pattern);

    let mut cache = TemplateCache::new();
    let best = best_match(&frame, &[first.clone(), second.clone()], &mut cache).unwrap();
    assert_eq!(best.template, first);

    // Reversing the list flips the winner, so the tie-break really is
    // list order rather than anything path-dependent.
    let mut cache = TemplateCache::new();
    let best = best_match(&frame, &[second.clone(), first], &mut cache).unwrap();
    assert_eq!(best.template, second);
}

#[test]
fn button_translated_back_from_padded_crop() {
    let dir = TempDir::new().unwrap();
    let pattern = stripes(10, 8);
    let button = save_template(&dir, "button.png", &pattern);

    // Button sits just outside the reported area; the 10px padding is
    // what brings it into the crop. Crop origin is (90, 40), the hit is
    // crop-local (5, 5), so the result must be (95, 45).
    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 95, 45, &pattern);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![], vec![button]);
    let found = detector
        .find_button_in_area(&frame, Rect::new(100, 50, 40, 20))
        .unwrap();
    assert_eq!(found, Some(Rect::new(95, 45, 10, 8)));
}

#[test]
fn detect_runs_both_phases() {
    let dir = TempDir::new().unwrap();
    let line_pattern = checker(40, 20);
    let button_pattern = stripes(10, 8);
    let line = save_template(&dir, "line.png", &line_pattern);
    let button = save_template(&dir, "button.png", &button_pattern);

    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 100, 50, &line_pattern);
    paste(&mut frame, 140, 70, &button_pattern);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![line], vec![button]);
    let found = detector.detect(&frame).unwrap();
    assert_eq!(found, Some(Rect::new(140, 70, 10, 8)));
}

#[test]
fn detect_short_circuits_without_line_area() {
    let dir = TempDir::new().unwrap();
    let button_pattern = stripes(10, 8);
    let line = save_template(&dir, "line.png", &checker(40, 20));
    let button = save_template(&dir, "button.png", &button_pattern);

    // The button is present but the line pattern is not.
    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 60, 30, &button_pattern);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![line], vec![button]);

    // A whole-frame button search would find it...
    let full = Rect::new(0, 0, frame.width(), frame.height());
    assert!(detector.find_button_in_area(&frame, full).unwrap().is_some());

    // ...but detect must not, because phase 1 misses.
    assert_eq!(detector.detect(&frame).unwrap(), None);
}

#[test]
fn detect_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let line_pattern = checker(40, 20);
    let button_pattern = stripes(10, 8);
    let line = save_template(&dir, "line.png", &line_pattern);
    let button = save_template(&dir, "button.png", &button_pattern);

    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 100, 50, &line_pattern);
    paste(&mut frame, 140, 70, &button_pattern);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![line], vec![button]);
    let first = detector.detect(&frame).unwrap();
    let second = detector.detect(&frame).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_template_lists_are_config_errors() {
    let dir = TempDir::new().unwrap();
    let button = save_template(&dir, "button.png", &stripes(10, 8));
    let frame = flat(100, 100, 10);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![], vec![button]);
    assert_eq!(
        detector.find_line_area(&frame).unwrap_err(),
        DetectError::NoLineTemplates
    );
    assert_eq!(
        detector.detect(&frame).unwrap_err(),
        DetectError::NoLineTemplates
    );

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![], vec![]);
    assert_eq!(
        detector
            .find_button_in_area(&frame, Rect::new(10, 10, 20, 20))
            .unwrap_err(),
        DetectError::NoButtonTemplates
    );
}

#[test]
fn unreadable_templates_are_skipped() {
    let dir = TempDir::new().unwrap();
    let pattern = checker(40, 20);
    let good = save_template(&dir, "good.png", &pattern);
    let missing = dir.path().join("missing.png");
    let corrupt = dir.path().join("corrupt.png");
    std::fs::write(&corrupt, b"not a png").unwrap();

    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 100, 50, &pattern);

    let mut detector =
        ButtonDetector::with_templates(THRESHOLD, vec![missing, corrupt, good], vec![]);
    let area = detector.find_line_area(&frame).unwrap();
    assert_eq!(area, Some(Rect::new(100, 50, 40, 20)));
}

#[test]
fn failed_loads_are_retried_not_cached() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("late.png");

    let mut cache = TemplateCache::new();
    assert!(cache.get(&path).is_none());
    assert_eq!(cache.disk_loads(), 0);

    // The file appears later; the cache must pick it up on next use.
    checker(8, 8).save(&path).unwrap();
    assert!(cache.get(&path).is_some());
    assert_eq!(cache.disk_loads(), 1);
}

#[test]
fn clear_cache_forces_fresh_disk_loads() {
    let dir = TempDir::new().unwrap();
    let line_pattern = checker(40, 20);
    let button_pattern = stripes(10, 8);
    let line = save_template(&dir, "line.png", &line_pattern);
    let button = save_template(&dir, "button.png", &button_pattern);

    let mut frame = flat(200, 100, 10);
    paste(&mut frame, 100, 50, &line_pattern);
    paste(&mut frame, 140, 70, &button_pattern);

    let mut detector = ButtonDetector::with_templates(THRESHOLD, vec![line], vec![button]);
    detector.detect(&frame).unwrap();
    assert_eq!(detector.cache().disk_loads(), 2);

    // Second cycle is served entirely from cache.
    detector.detect(&frame).unwrap();
    assert_eq!(detector.cache().disk_loads(), 2);

    detector.clear_cache();
    detector.detect(&frame).unwrap();
    assert_eq!(detector.cache().disk_loads(), 4);
}

#[test]
fn oversized_template_is_skipped_without_panic() {
    let dir = TempDir::new().unwrap();
    let big = save_template(&dir, "big.png", &checker(100, 100));

    let frame = flat(50, 50, 10);
    let mut cache = TemplateCache::new();
    assert!(best_match(&frame, &[big], &mut cache).is_none());
}
