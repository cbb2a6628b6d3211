use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Vertical metrics of one line of text, in logical pixels.
///
/// `ascent` is positive (above the baseline), `descent` is negative.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl LineMetrics {
    /// Fallback metrics used when a font carries no horizontal line metrics.
    #[inline]
    pub fn approximate(size: f32) -> Self {
        Self { ascent: size * 0.8, descent: -size * 0.2 }
    }

    /// Height of the em box (ascent to descent).
    #[inline]
    pub fn height(self) -> f32 {
        self.ascent - self.descent
    }
}

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is owned by the canvas and
/// lent to [`TextRenderer::prepare`](crate::render::shapes::text::TextRenderer)
/// each frame so new glyphs can be rasterized on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    ///
    /// Returns the `FontId` that identifies the font in draw commands.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Number of fonts loaded so far.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Line metrics for `id` at `size`, falling back to [`LineMetrics::approximate`].
    pub fn line_metrics(&self, id: FontId, size: f32) -> LineMetrics {
        self.get(id)
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| LineMetrics { ascent: m.ascent, descent: m.descent })
            .unwrap_or_else(|| LineMetrics::approximate(size))
    }

    /// Computes the advance extent of a single line of text.
    ///
    /// Returns `(width, height)` in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        self.measure_text_scaled(text, id, size, 1.0)
    }

    /// Like [`measure_text`](Self::measure_text) but performs the layout at
    /// `size * scale` and divides the result back to logical pixels.
    ///
    /// Pass the same `scale` the text renderer rasterizes at so centered labels
    /// line up with the glyph positions it actually produces.
    #[must_use]
    pub fn measure_text_scaled(&self, text: &str, id: FontId, size: f32, scale: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let scale = scale.max(0.01);
        let phys_size = size * scale;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, phys_size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Pen position after each glyph rather than its bitmap edge, so the
        // width matches what the layout advances by.
        let w = glyphs.iter().map(|g| {
            let m = font.metrics_indexed(g.key.glyph_index, phys_size);
            (g.x - m.xmin as f32 + m.advance_width).max(0.0)
        }).fold(0.0f32, f32::max) / scale;
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(phys_size, f32::max) / scale;
        Vec2::new(w, h)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(b"not a font").is_err());
        assert!(fs.is_empty());
    }

    #[test]
    fn unknown_font_uses_approximate_metrics() {
        let fs = FontSystem::new();
        let m = fs.line_metrics(FontId(3), 10.0);
        assert_eq!(m, LineMetrics::approximate(10.0));
        assert!((m.height() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_font_measures_zero_width() {
        let fs = FontSystem::new();
        assert_eq!(fs.measure_text("12", FontId(0), 35.0).x, 0.0);
    }
}
