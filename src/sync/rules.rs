use crate::config::SyncConfig;
use crate::dom::{Document, NodeId};
use crate::sync::ThemeMode;

/// Table-region classes whose text color follows the theme.
pub const TABLE_CLASSES: [&str; 4] = [
    "gt_table_body",
    "gt_heading",
    "gt_sourcenotes",
    "gt_footnotes",
];

/// Element predicate for a style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A tag that carries an inline value for the given property.
    TagWithStyle {
        tag: &'static str,
        property: &'static str,
    },
    /// Class list contains any of the given tokens.
    ClassAny(&'static [&'static str]),
}

impl Selector {
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(element) = doc.get(id) else {
            return false;
        };
        match self {
            Selector::TagWithStyle { tag, property } => {
                element.tag() == *tag && element.style(property).is_some()
            }
            Selector::ClassAny(classes) => classes.iter().any(|class| element.has_class(class)),
        }
    }
}

/// What a rule writes for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    Set(String),
    /// Remove the inline override so the stylesheet default shows through.
    Clear,
}

/// One row of the rewrite table: which elements, which property, and the
/// value per theme. Every application is compare-then-set.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: Selector,
    pub property: &'static str,
    pub light: RuleValue,
    pub dark: RuleValue,
}

impl StyleRule {
    fn value_for(&self, mode: ThemeMode) -> &RuleValue {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Apply to one element. Returns true if anything was written.
    pub fn apply(&self, doc: &mut Document, id: NodeId, mode: ThemeMode) -> bool {
        if !self.selector.matches(doc, id) {
            return false;
        }
        match self.value_for(mode) {
            RuleValue::Set(value) => {
                if doc.style(id, self.property) != Some(value.as_str()) {
                    doc.set_style(id, self.property, value);
                    true
                } else {
                    false
                }
            }
            RuleValue::Clear => {
                if doc.style(id, self.property).is_some() {
                    doc.remove_style(id, self.property);
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// The built-in rewrite table: plot backgrounds and fills follow the
/// configured palette, table text goes white under dark and back to the
/// stylesheet default under light.
pub fn builtin_rules(config: &SyncConfig) -> Vec<StyleRule> {
    vec![
        StyleRule {
            selector: Selector::TagWithStyle {
                tag: "svg",
                property: "background",
            },
            property: "background",
            light: RuleValue::Set(config.plot_light_color.clone()),
            dark: RuleValue::Set(config.plot_dark_color.clone()),
        },
        StyleRule {
            selector: Selector::TagWithStyle {
                tag: "rect",
                property: "fill",
            },
            property: "fill",
            light: RuleValue::Set(config.plot_light_color.clone()),
            dark: RuleValue::Set(config.plot_dark_color.clone()),
        },
        StyleRule {
            selector: Selector::ClassAny(&TABLE_CLASSES),
            property: "color",
            light: RuleValue::Clear,
            dark: RuleValue::Set("white".to_string()),
        },
    ]
}
