use std::collections::HashMap;

use super::NodeId;

/// A rendered element: tag name, class list, attributes, inline style, and
/// the computed style the host rendered it with.
///
/// Elements are described with the builder methods below and handed to a
/// [`Document`](super::Document), which assigns their id. All mutation after
/// insertion goes through the document so the change is recorded.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: HashMap<String, String>,
    pub(crate) style: HashMap<String, String>,
    pub(crate) computed: HashMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId(0),
            parent: None,
            children: Vec::new(),
            tag: tag.into(),
            classes: Vec::new(),
            attributes: HashMap::new(),
            style: HashMap::new(),
            computed: HashMap::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an inline style property.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Set a computed style property, standing in for the value the host's
    /// stylesheets resolved for this element.
    pub fn with_computed(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.computed.insert(property.into(), value.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Substring match over the class list, for markers that appear inside
    /// longer generated class names.
    pub fn class_contains(&self, needle: &str) -> bool {
        self.classes.iter().any(|c| c.contains(needle))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Current inline value for a style property, if any.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Effective style: the inline value if present, otherwise the computed
    /// base supplied by the host.
    pub fn computed_style(&self, property: &str) -> Option<&str> {
        self.style(property)
            .or_else(|| self.computed.get(property).map(String::as_str))
    }
}
