//! Template configuration: per-target layout contracts.
//!
//! The configuration is fetched as JSON mapping each target name to the
//! template image it uses and the overlay fields drawn onto it. A field
//! missing from a target's `fields` map means "intentionally not rendered
//! for this template", not an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anchor position, font size and maximum horizontal extent for one
/// overlay field, in template pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub max_width: f32,
}

/// Layout contract for one target: the background image plus its fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Asset reference for the background image, resolved against the
    /// configuration source (a relative path or URL).
    pub template: String,
    /// Field name → layout spec.
    pub fields: HashMap<String, FieldSpec>,
}

/// The full fetched configuration: target name → layout contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateConfig {
    pub entries: HashMap<String, TemplateEntry>,
}

impl TemplateConfig {
    /// Layout contract for `target`, if one is configured.
    pub fn entry(&self, target: &str) -> Option<&TemplateEntry> {
        self.entries.get(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "Jane Doe": {
            "template": "templates/jane-doe.png",
            "fields": {
                "name": {"x": 120, "y": 340, "fontSize": 36, "maxWidth": 220},
                "idNumber": {"x": 420, "y": 340, "fontSize": 28, "maxWidth": 300},
                "address": {"x": 120, "y": 480, "fontSize": 24, "maxWidth": 600}
            }
        }
    }"#;

    #[test]
    fn test_parse_wire_format() {
        let config: TemplateConfig = serde_json::from_str(SAMPLE).unwrap();
        let entry = config.entry("Jane Doe").unwrap();
        assert_eq!(entry.template, "templates/jane-doe.png");
        let name = &entry.fields["name"];
        assert_eq!(name.x, 120.0);
        assert_eq!(name.font_size, 36.0);
        assert_eq!(name.max_width, 220.0);
    }

    #[test]
    fn test_absent_field_means_not_rendered() {
        let config: TemplateConfig = serde_json::from_str(SAMPLE).unwrap();
        let entry = config.entry("Jane Doe").unwrap();
        // This template declares no birthDate field.
        assert!(!entry.fields.contains_key("birthDate"));
    }

    #[test]
    fn test_unknown_target_has_no_entry() {
        let config: TemplateConfig = serde_json::from_str(SAMPLE).unwrap();
        assert!(config.entry("Nobody").is_none());
    }
}
