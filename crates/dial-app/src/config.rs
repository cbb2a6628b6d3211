use std::path::PathBuf;
use std::time::Duration;

use dial_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Fonts tried in order; the first readable one is used for all text.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Application settings. Fixed at startup; there is no config file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Opened when the face is clicked.
    pub link: String,
    pub font_paths: Vec<PathBuf>,
    pub tick: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Simple-Clock".to_string(),
            width: 800.0,
            height: 600.0,
            link: "https://github.com/hellofun-github/Kotlin-JS-Clock".to_string(),
            font_paths: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            tick: Duration::from_secs(1),
        }
    }
}

impl AppConfig {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            tick: self.tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_ticks_at_configured_period() {
        let cfg = AppConfig { tick: Duration::from_millis(500), ..AppConfig::default() };
        let rt = cfg.runtime();
        assert_eq!(rt.tick, Duration::from_millis(500));
        assert_eq!(rt.title, "Simple-Clock");
    }

    #[test]
    fn default_links_to_project_page() {
        assert!(AppConfig::default().link.starts_with("https://"));
    }
}
