pub mod automation;
pub mod capture;
pub mod config;
pub mod debug_image;
pub mod detect;

pub use automation::AutoContinue;
pub use capture::{CaptureStrategy, Captured, ScreenCapture};
pub use config::AppConfig;
pub use detect::{ButtonDetector, DetectError, Rect, TemplateCache};
