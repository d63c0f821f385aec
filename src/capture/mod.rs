//! Screen acquisition with a prioritized fallback chain of capture
//! strategies.

pub mod engine;
pub mod error;
pub mod strategy;
pub mod temp;
pub mod window;


pub use engine::{Captured, ScreenCapture};
pub use error::{CaptureError, CaptureResult};
pub use strategy::{CaptureStrategy, resolve_order};
