//! Canvas composition: the template background plus laid-out field text.
//!
//! The buffer is allocated at the template's natural pixel dimensions
//! (scaling to the output page happens later, during assembly) and the
//! form's values are drawn per the target's field specs. Which layout a
//! field gets is decided by its name: names and id numbers spread evenly
//! across their box, addresses wrap, everything else is a single run.

use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;

use crate::form::FormData;
use crate::layout;
use crate::template::FieldSpec;
use crate::typeface::Typeface;

/// Representative glyph for ideographic fields. Any full-width character
/// serves; the field's alphabet is assumed uniform-width.
const REFERENCE_IDEOGRAPH: char = '永';

/// Representative glyph for numeric id fields.
const REFERENCE_DIGIT: char = '0';

/// How a field's text is arranged on the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Characters distributed evenly across the field, full-width alphabet.
    SpacedIdeographic,
    /// Characters distributed evenly, digit alphabet.
    SpacedNumeric,
    /// Free-form text wrapped into lines.
    Wrapped,
    /// Drawn as one unmodified run at the anchor.
    Plain,
}

impl FieldKind {
    /// The character measured as the representative glyph width for a
    /// spaced field.
    pub fn reference_char(self) -> char {
        match self {
            FieldKind::SpacedIdeographic => REFERENCE_IDEOGRAPH,
            _ => REFERENCE_DIGIT,
        }
    }
}

/// Classify a template field by its wire name. Unknown names draw plain.
pub fn field_kind(name: &str) -> FieldKind {
    match name {
        "name" => FieldKind::SpacedIdeographic,
        "idNumber" => FieldKind::SpacedNumeric,
        "address" => FieldKind::Wrapped,
        _ => FieldKind::Plain,
    }
}

/// Compose the template image and form values into a raster buffer.
///
/// Fields missing from `fields`, or whose form value is empty, are
/// silently skipped; a template that doesn't print a birth date is
/// configuration, not an error. Inputs are never mutated; the returned
/// buffer is owned by the caller.
pub fn compose(
    template: &DynamicImage,
    form: &FormData,
    fields: &HashMap<String, FieldSpec>,
    face: &Typeface,
) -> RgbaImage {
    let mut canvas = template.to_rgba8();
    for (field_name, spec) in fields {
        let Some(value) = form.field(field_name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        draw_field(&mut canvas, field_kind(field_name), value, spec, face);
    }
    canvas
}

fn draw_field(canvas: &mut RgbaImage, kind: FieldKind, value: &str, spec: &FieldSpec, face: &Typeface) {
    let px = spec.font_size;
    match kind {
        FieldKind::SpacedIdeographic | FieldKind::SpacedNumeric => {
            let glyph_width = face.char_width(kind.reference_char(), px);
            let baseline = face.middle_baseline(spec.y, px);
            for placed in layout::even_spacing(value, spec, glyph_width) {
                face.draw_char(canvas, placed.ch, placed.x, baseline, px);
            }
        }
        FieldKind::Wrapped => {
            for line in layout::line_wrap(value, spec, |s| face.text_width(s, px)) {
                let baseline = face.middle_baseline(line.y, px);
                face.draw_text(canvas, &line.text, spec.x, baseline, px);
            }
        }
        FieldKind::Plain => {
            let baseline = face.middle_baseline(spec.y, px);
            face.draw_text(canvas, value, spec.x, baseline, px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_kind_by_wire_name() {
        assert_eq!(field_kind("name"), FieldKind::SpacedIdeographic);
        assert_eq!(field_kind("idNumber"), FieldKind::SpacedNumeric);
        assert_eq!(field_kind("address"), FieldKind::Wrapped);
        assert_eq!(field_kind("birthDate"), FieldKind::Plain);
        assert_eq!(field_kind("anythingElse"), FieldKind::Plain);
    }

    #[test]
    fn test_reference_chars() {
        assert_eq!(FieldKind::SpacedIdeographic.reference_char(), '永');
        assert_eq!(FieldKind::SpacedNumeric.reference_char(), '0');
    }
}
