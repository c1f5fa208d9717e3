use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Attribute that carries the serialized snapshot on the element itself, so
/// the cache lives and dies with the element.
pub const ORIGINAL_STYLE_ATTR: &str = "data-original-style";

/// The text styling captured from an element the first time the
/// synchronizer sees it, and restored verbatim when the light theme is
/// active again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSnapshot {
    pub fill: String,
    pub color: String,
    pub font_size: String,
    pub font_weight: String,
    pub font_family: String,
    pub text_decoration: String,
}

impl StyleSnapshot {
    /// Capture the six text properties from the element's effective style.
    /// Properties the host never resolved are stored as empty strings.
    pub fn capture(doc: &Document, id: NodeId) -> Self {
        let prop = |property: &str| {
            doc.computed_style(id, property)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            fill: prop("fill"),
            color: prop("color"),
            font_size: prop("font-size"),
            font_weight: prop("font-weight"),
            font_family: prop("font-family"),
            text_decoration: prop("text-decoration"),
        }
    }

    /// Read the snapshot stored on the element, if there is a parseable
    /// one. Malformed data counts as "no snapshot": the caller re-captures.
    pub fn load(doc: &Document, id: NodeId) -> Option<Self> {
        let raw = doc.get(id)?.attribute(ORIGINAL_STYLE_ATTR)?;
        match serde_json::from_str(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("discarding unparseable style snapshot: {}", e);
                None
            }
        }
    }

    /// Serialize and attach to the element.
    pub fn store(&self, doc: &mut Document, id: NodeId) -> Result<()> {
        let json = serde_json::to_string(self)?;
        doc.set_attribute(id, ORIGINAL_STYLE_ATTR, &json);
        Ok(())
    }

    /// Write all six properties back onto the element's inline style. An
    /// empty captured value clears the inline override instead.
    pub fn restore(&self, doc: &mut Document, id: NodeId) {
        let entries = [
            ("fill", &self.fill),
            ("color", &self.color),
            ("font-size", &self.font_size),
            ("font-weight", &self.font_weight),
            ("font-family", &self.font_family),
            ("text-decoration", &self.text_decoration),
        ];
        for (property, value) in entries {
            if value.is_empty() {
                if doc.style(id, property).is_some() {
                    doc.remove_style(id, property);
                }
            } else if doc.style(id, property) != Some(value.as_str()) {
                doc.set_style(id, property, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn doc_with_text() -> (Document, NodeId) {
        let mut doc = Document::new(Element::new("body"));
        let text = doc.append_child(
            doc.root(),
            Element::new("text")
                .with_computed("fill", "rgb(10, 10, 10)")
                .with_computed("font-size", "12px"),
        );
        (doc, text)
    }

    #[test]
    fn test_capture_reads_effective_style() {
        let (doc, text) = doc_with_text();
        let snapshot = StyleSnapshot::capture(&doc, text);
        assert_eq!(snapshot.fill, "rgb(10, 10, 10)");
        assert_eq!(snapshot.font_size, "12px");
        assert_eq!(snapshot.color, ""); // never resolved by the host
    }

    #[test]
    fn test_store_load_round_trip() {
        let (mut doc, text) = doc_with_text();
        let snapshot = StyleSnapshot::capture(&doc, text);
        snapshot.store(&mut doc, text).unwrap();
        assert_eq!(StyleSnapshot::load(&doc, text), Some(snapshot));
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let (mut doc, text) = doc_with_text();
        StyleSnapshot::capture(&doc, text).store(&mut doc, text).unwrap();
        let raw = doc.get(text).unwrap().attribute(ORIGINAL_STYLE_ATTR).unwrap();
        assert!(raw.contains("\"fontSize\""));
        assert!(raw.contains("\"textDecoration\""));
    }

    #[test]
    fn test_load_returns_none_without_attribute() {
        let (doc, text) = doc_with_text();
        assert_eq!(StyleSnapshot::load(&doc, text), None);
    }

    #[test]
    fn test_load_treats_malformed_data_as_missing() {
        let (mut doc, text) = doc_with_text();
        doc.set_attribute(text, ORIGINAL_STYLE_ATTR, "not json at all");
        assert_eq!(StyleSnapshot::load(&doc, text), None);
    }

    #[test]
    fn test_restore_writes_and_clears() {
        let (mut doc, text) = doc_with_text();
        doc.set_style(text, "color", "white");
        let snapshot = StyleSnapshot {
            fill: "rgb(10, 10, 10)".to_string(),
            ..Default::default()
        };

        snapshot.restore(&mut doc, text);
        assert_eq!(doc.style(text, "fill"), Some("rgb(10, 10, 10)"));
        // Empty captured color clears the inline override
        assert_eq!(doc.style(text, "color"), None);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let (mut doc, text) = doc_with_text();
        let snapshot = StyleSnapshot::capture(&doc, text);
        snapshot.restore(&mut doc, text);
        doc.take_mutations();

        snapshot.restore(&mut doc, text);
        assert!(doc.take_mutations().is_empty());
    }
}
