//! Glyph layout: even character spacing and greedy line wrapping.
//!
//! Pure functions over [`FieldSpec`] and caller-supplied width
//! measurements. Nothing here touches a font or a canvas, which keeps the
//! numeric edge cases (single characters, overfull fields) easy to pin
//! down in tests.

use crate::template::FieldSpec;

/// Ratio of line height to font size for wrapped text.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// One positioned character on a shared baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedChar {
    pub ch: char,
    pub x: f32,
}

/// One wrapped line and the y it is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y: f32,
}

/// Distribute the characters of `text` evenly across `spec.max_width`.
///
/// `glyph_width` is the advance of a single representative glyph; fields
/// using this layout have bounded alphabets (ideographs, digits) where
/// one measured character stands in for all of them. The first character
/// sits exactly at `spec.x` and the last ends the field at
/// `spec.x + spec.max_width - glyph_width`.
///
/// Edge cases: empty text yields no positions (the caller skips the
/// field); a single character sits at the anchor without evaluating the
/// spacing formula, which would otherwise divide by zero. When the glyphs
/// alone are wider than the field, spacing goes negative and characters
/// overlap; that is accepted rather than treated as an error.
pub fn even_spacing(text: &str, spec: &FieldSpec, glyph_width: f32) -> Vec<PlacedChar> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![PlacedChar {
            ch: chars[0],
            x: spec.x,
        }];
    }

    let spacing = (spec.max_width - glyph_width * n as f32) / (n as f32 - 1.0);
    let step = glyph_width + spacing;
    chars
        .into_iter()
        .enumerate()
        .map(|(i, ch)| PlacedChar {
            ch,
            x: spec.x + step * i as f32,
        })
        .collect()
}

/// Greedily wrap `text` into lines no wider than `spec.max_width`.
///
/// `measure` returns the rendered width of a candidate line. Text that
/// fits whole becomes a single line at `spec.y`. Otherwise characters
/// accumulate one at a time; when appending a character would overflow a
/// non-empty line, that line is flushed and the character starts the next
/// one. The final line is flushed unconditionally. Line `i` lands at
/// `spec.y + i × font_size × 1.2`.
///
/// Concatenating the returned lines reproduces `text` exactly. A single
/// character wider than the field overflows its own line; there is no
/// narrower place to put it.
pub fn line_wrap(text: &str, spec: &FieldSpec, measure: impl Fn(&str) -> f32) -> Vec<PlacedLine> {
    let line_height = spec.font_size * LINE_HEIGHT_FACTOR;

    if measure(text) <= spec.max_width {
        return vec![PlacedLine {
            text: text.to_string(),
            y: spec.y,
        }];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && measure(&candidate) > spec.max_width {
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current = candidate;
        }
    }
    lines.push(current);

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            y: spec.y + i as f32 * line_height,
        })
        .collect()
}
