//! Runtime-loaded TTF faces: glyph measurement and canvas drawing.
//!
//! Wraps `ab_glyph` for the two things the compositor needs: horizontal
//! advances for the layout engine and coverage-based rasterization of
//! glyphs onto an RGBA canvas. Faces are loaded from a file at startup;
//! the overlay alphabet (CJK names and addresses) rules out embedding a
//! font in the binary, so when no path is configured we probe the host's
//! font directories for any usable face.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::error::StampaError;

/// Directories probed for a fallback face when none is configured.
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// How deep to recurse into font directories.
const FONT_DIR_MAX_DEPTH: usize = 3;

/// A loaded font face. Cloning is cheap (the underlying data is shared).
#[derive(Clone, Debug)]
pub struct Typeface {
    font: FontArc,
}

impl Typeface {
    /// Parse a face from raw TTF/OTF bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, StampaError> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| StampaError::ArtifactBuild(format!("Invalid font file: {e}")))?;
        Ok(Self { font })
    }

    /// Load a face from a font file on disk.
    pub fn load(path: &Path) -> Result<Self, StampaError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Probe standard font directories for any loadable face.
    pub fn find_system() -> Option<Self> {
        SYSTEM_FONT_DIRS
            .iter()
            .find_map(|dir| find_in_dir(Path::new(dir), 0))
    }

    /// Load `path` when given, otherwise fall back to a system face.
    pub fn load_or_system(path: Option<&Path>) -> Result<Self, StampaError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::find_system().ok_or_else(|| {
                StampaError::ArtifactBuild(
                    "No usable font found in system font directories; pass --font".to_string(),
                )
            }),
        }
    }

    /// Horizontal advance of a single character at `px` pixels.
    pub fn char_width(&self, ch: char, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        scaled.h_advance(self.font.glyph_id(ch))
    }

    /// Rendered width of a string at `px` pixels (sum of advances).
    pub fn text_width(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        text.chars()
            .map(|ch| scaled.h_advance(self.font.glyph_id(ch)))
            .sum()
    }

    /// Baseline y that vertically centers glyphs on `y`.
    ///
    /// The templates were calibrated against a canvas "middle" text
    /// baseline: the anchor y is the vertical center of the glyph extent,
    /// not the baseline itself. Descent is negative, so the baseline sits
    /// below the anchor by half of (ascent + descent).
    pub fn middle_baseline(&self, y: f32, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        y + (scaled.ascent() + scaled.descent()) / 2.0
    }

    /// Draw one character with its baseline origin at `(x, baseline)`,
    /// black ink, coverage-blended over whatever is on the canvas.
    pub fn draw_char(&self, canvas: &mut RgbaImage, ch: char, x: f32, baseline: f32, px: f32) {
        let glyph = self
            .font
            .glyph_id(ch)
            .with_scale_and_position(PxScale::from(px), ab_glyph::point(x, baseline));

        if let Some(outlined) = self.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (w, h) = (canvas.width() as i32, canvas.height() as i32);
            outlined.draw(|gx, gy, coverage| {
                let px_x = gx as i32 + bounds.min.x as i32;
                let px_y = gy as i32 + bounds.min.y as i32;
                if px_x >= 0 && px_x < w && px_y >= 0 && px_y < h && coverage > 0.0 {
                    blend_black(canvas.get_pixel_mut(px_x as u32, px_y as u32), coverage);
                }
            });
        }
    }

    /// Draw a string starting at `x` with its baseline at `baseline`.
    pub fn draw_text(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, px: f32) {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut caret = x;
        for ch in text.chars() {
            self.draw_char(canvas, ch, caret, baseline, px);
            caret += scaled.h_advance(self.font.glyph_id(ch));
        }
    }
}

/// Alpha-blend black ink at `coverage` over an opaque pixel.
fn blend_black(pixel: &mut Rgba<u8>, coverage: f32) {
    let c = coverage.clamp(0.0, 1.0);
    for channel in &mut pixel.0[..3] {
        *channel = (*channel as f32 * (1.0 - c)) as u8;
    }
    pixel.0[3] = 255;
}

fn find_in_dir(dir: &Path, depth: usize) -> Option<Typeface> {
    if depth > FONT_DIR_MAX_DEPTH {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(face) = find_in_dir(&path, depth + 1) {
                return Some(face);
            }
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("ttf" | "otf" | "TTF" | "OTF")
        ) && let Ok(face) = Typeface::load(&path)
        {
            return Some(face);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let err = Typeface::from_bytes(vec![0u8; 16]).unwrap_err();
        assert!(matches!(err, StampaError::ArtifactBuild(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Typeface::load(Path::new("/no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, StampaError::Io(_)));
    }

    #[test]
    fn test_blend_black_full_coverage() {
        let mut px = Rgba([200u8, 100, 50, 255]);
        blend_black(&mut px, 1.0);
        assert_eq!(px, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_blend_black_partial_coverage_darkens() {
        let mut px = Rgba([200u8, 200, 200, 255]);
        blend_black(&mut px, 0.5);
        assert_eq!(px, Rgba([100, 100, 100, 255]));
    }
}
