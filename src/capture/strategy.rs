//! The closed set of capture strategies and configured ordering.

/// One way of acquiring a frame. The set is fixed; configuration only
/// reorders or drops entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStrategy {
    /// Find the target editor window and dump its pixels (xdotool + xwd +
    /// ImageMagick convert). Reports the window origin as the offset.
    TargetWindow,
    /// Full-screen capture via gnome-screenshot.
    GnomeScreenshot,
    /// Full-screen capture via scrot.
    Scrot,
    /// Active-window capture: geometry via xdotool, pixels via
    /// gnome-screenshot -w.
    ActiveWindow,
    /// In-process capture via the xcap library. Last resort because it can
    /// cause visible flicker, but it has no external-tool dependency.
    Monitor,
}

impl CaptureStrategy {
    pub const DEFAULT_ORDER: [CaptureStrategy; 5] = [
        CaptureStrategy::TargetWindow,
        CaptureStrategy::GnomeScreenshot,
        CaptureStrategy::Scrot,
        CaptureStrategy::ActiveWindow,
        CaptureStrategy::Monitor,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "target_window" => Some(Self::TargetWindow),
            "gnome_screenshot" => Some(Self::GnomeScreenshot),
            "scrot" => Some(Self::Scrot),
            "active_window" => Some(Self::ActiveWindow),
            "monitor" => Some(Self::Monitor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetWindow => "target_window",
            Self::GnomeScreenshot => "gnome_screenshot",
            Self::Scrot => "scrot",
            Self::ActiveWindow => "active_window",
            Self::Monitor => "monitor",
        }
    }
}

/// Resolve configured strategy names into an ordered list. Unknown names
/// are dropped with a warning; an empty result falls back to the default
/// order.
pub fn resolve_order(names: &[String]) -> Vec<CaptureStrategy> {
    let mut order: Vec<CaptureStrategy> = Vec::new();
    for name in names {
        match CaptureStrategy::from_name(name) {
            Some(strategy) => order.push(strategy),
            None => log::warn!("Unknown screenshot method '{name}' in config, ignoring"),
        }
    }
    if order.is_empty() {
        log::debug!("Using default screenshot method order");
        order = CaptureStrategy::DEFAULT_ORDER.to_vec();
    } else {
        log::debug!("Using configured screenshot method order");
    }
    order
}
