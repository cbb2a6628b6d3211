use std::fs;
use std::path::PathBuf;

use dial_engine::text::{FontId, FontSystem};

/// Reads the first path that exists and parses as a font.
fn load_first(fonts: &mut FontSystem, paths: &[PathBuf]) -> Option<(FontId, PathBuf)> {
    for path in paths {
        let Ok(bytes) = fs::read(path) else { continue };
        match fonts.load_font(&bytes) {
            Ok(id) => return Some((id, path.clone())),
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }
    None
}

/// Builds the font system for the clock.
///
/// Returns `None` for the font when nothing on the search list could be
/// loaded; the canvas then skips all text.
pub fn load_fonts(paths: &[PathBuf]) -> (FontSystem, Option<FontId>) {
    let mut fonts = FontSystem::new();
    match load_first(&mut fonts, paths) {
        Some((id, path)) => {
            log::info!("loaded font {}", path.display());
            (fonts, Some(id))
        }
        None => {
            log::warn!("no usable font in {} candidates; labels will not be drawn", paths.len());
            (fonts, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_yield_no_font() {
        let paths = vec![PathBuf::from("/nonexistent/dial/a.ttf"), PathBuf::from("/nonexistent/dial/b.ttf")];
        let (fonts, id) = load_fonts(&paths);
        assert!(id.is_none());
        assert!(fonts.is_empty());
    }

    #[test]
    fn unparsable_file_is_skipped() {
        let path = std::env::temp_dir().join(format!("dial-not-a-font-{}.ttf", std::process::id()));
        fs::write(&path, b"definitely not a font").unwrap();
        let (fonts, id) = load_fonts(&[path.clone()]);
        let _ = fs::remove_file(&path);
        assert!(id.is_none());
        assert!(fonts.is_empty());
    }
}
