//! In-memory model of the host page's rendered element tree.
//!
//! The document records every write made through it as a [`MutationRecord`],
//! the same shape a subtree-wide mutation observer would be handed. The host
//! drains those batches from its event loop and feeds them to the observer.

mod element;

pub use element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// One observed change to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// An attribute changed on `target`. Class-list and inline-style edits
    /// are attribute writes too, recorded as `"class"` and `"style"`.
    Attributes {
        target: NodeId,
        attribute_name: String,
    },
    /// Children were added to or removed from `target`.
    ChildList { target: NodeId },
}

impl MutationRecord {
    pub fn target(&self) -> NodeId {
        match self {
            MutationRecord::Attributes { target, .. } => *target,
            MutationRecord::ChildList { target } => *target,
        }
    }
}

/// The rendered element tree, rooted at the host page's top-level container.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    next_id: u64,
    pending: Vec<MutationRecord>,
}

impl Document {
    pub fn new(mut root: Element) -> Self {
        root.id = NodeId(1);
        Self {
            nodes: vec![root],
            root: NodeId(1),
            next_id: 2,
            pending: Vec::new(),
        }
    }

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert an element under `parent` and record a child-list mutation
    /// against the parent.
    pub fn append_child(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = self.next_node_id();
        element.id = id;
        element.parent = Some(parent);

        let parent_element = self
            .element_mut(parent)
            .expect("parent element not in document");
        parent_element.children.push(id);

        self.nodes.push(element);
        self.pending.push(MutationRecord::ChildList { target: parent });
        id
    }

    /// Detach an element and its whole subtree. Records a child-list
    /// mutation against the former parent. The root cannot be removed.
    pub fn remove_child(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        let parent = match self.get(id) {
            Some(element) => element.parent,
            None => return,
        };

        let mut doomed = vec![id];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.get(current) {
                for child in &element.children {
                    doomed.push(*child);
                    stack.push(*child);
                }
            }
        }
        self.nodes.retain(|e| !doomed.contains(&e.id));

        if let Some(parent) = parent {
            if let Some(parent_element) = self.element_mut(parent) {
                parent_element.children.retain(|c| *c != id);
            }
            self.pending.push(MutationRecord::ChildList { target: parent });
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.iter_mut().find(|e| e.id == id)
    }

    /// Every element currently in the document, in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.nodes
    }

    /// Ids of every element, for scans that mutate as they go.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|e| e.id).collect()
    }

    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    // --- Attribute and class mutators (every write is recorded) ---

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        element.attributes.insert(name.to_string(), value.to_string());
        self.pending.push(MutationRecord::Attributes {
            target: id,
            attribute_name: name.to_string(),
        });
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        if element.attributes.remove(name).is_some() {
            self.pending.push(MutationRecord::Attributes {
                target: id,
                attribute_name: name.to_string(),
            });
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        if element.classes.iter().any(|c| c == class) {
            return;
        }
        element.classes.push(class.to_string());
        self.pending.push(MutationRecord::Attributes {
            target: id,
            attribute_name: "class".to_string(),
        });
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        if element.classes.len() != before {
            self.pending.push(MutationRecord::Attributes {
                target: id,
                attribute_name: "class".to_string(),
            });
        }
    }

    // --- Inline style (an attribute write, recorded as "style") ---

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        element.style.insert(property.to_string(), value.to_string());
        self.pending.push(MutationRecord::Attributes {
            target: id,
            attribute_name: "style".to_string(),
        });
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        if element.style.remove(property).is_some() {
            self.pending.push(MutationRecord::Attributes {
                target: id,
                attribute_name: "style".to_string(),
            });
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)?.style(property)
    }

    pub fn computed_style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)?.computed_style(property)
    }

    /// Walk the parent chain looking for a tag.
    pub fn has_ancestor(&self, id: NodeId, tag: &str) -> bool {
        let mut current = self.get(id).and_then(|e| e.parent);
        while let Some(ancestor) = current {
            let Some(element) = self.get(ancestor) else {
                return false;
            };
            if element.tag() == tag {
                return true;
            }
            current = element.parent;
        }
        false
    }

    /// Drain the pending mutation batch.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_mutation_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_child(tag: &str) -> (Document, NodeId) {
        let mut doc = Document::new(Element::new("body"));
        let id = doc.append_child(doc.root(), Element::new(tag));
        (doc, id)
    }

    #[test]
    fn test_append_assigns_unique_ids() {
        let mut doc = Document::new(Element::new("body"));
        let a = doc.append_child(doc.root(), Element::new("div"));
        let b = doc.append_child(doc.root(), Element::new("div"));
        assert_ne!(a, b);
        assert_eq!(doc.count(), 3);
        assert_eq!(doc.get(a).unwrap().parent(), Some(doc.root()));
        assert_eq!(doc.get(doc.root()).unwrap().children(), &[a, b]);
    }

    #[test]
    fn test_append_records_child_list_mutation() {
        let (mut doc, _) = doc_with_child("div");
        let records = doc.take_mutations();
        assert_eq!(records, vec![MutationRecord::ChildList { target: doc.root() }]);
    }

    #[test]
    fn test_remove_child_drops_subtree() {
        let mut doc = Document::new(Element::new("body"));
        let svg = doc.append_child(doc.root(), Element::new("svg"));
        let text = doc.append_child(svg, Element::new("text"));
        doc.take_mutations();

        doc.remove_child(svg);
        assert!(doc.get(svg).is_none());
        assert!(doc.get(text).is_none());
        assert_eq!(doc.count(), 1);
        assert_eq!(
            doc.take_mutations(),
            vec![MutationRecord::ChildList { target: doc.root() }]
        );
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut doc = Document::new(Element::new("body"));
        doc.remove_child(doc.root());
        assert_eq!(doc.count(), 1);
    }

    #[test]
    fn test_set_attribute_records_name() {
        let (mut doc, img) = doc_with_child("img");
        doc.take_mutations();
        doc.set_attribute(img, "src", "chart.dark.png");
        assert_eq!(doc.get(img).unwrap().attribute("src"), Some("chart.dark.png"));
        assert_eq!(
            doc.take_mutations(),
            vec![MutationRecord::Attributes {
                target: img,
                attribute_name: "src".to_string()
            }]
        );
    }

    #[test]
    fn test_class_edits_record_class_attribute() {
        let (mut doc, div) = doc_with_child("div");
        doc.take_mutations();

        doc.add_class(div, "gt_heading");
        doc.add_class(div, "gt_heading"); // already present, no record
        doc.remove_class(div, "gt_heading");
        doc.remove_class(div, "gt_heading"); // already gone, no record

        let records = doc.take_mutations();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| matches!(
            r,
            MutationRecord::Attributes { attribute_name, .. } if attribute_name == "class"
        )));
    }

    #[test]
    fn test_style_edits_record_style_attribute() {
        let (mut doc, rect) = doc_with_child("rect");
        doc.take_mutations();

        doc.set_style(rect, "fill", "white");
        doc.remove_style(rect, "fill");
        doc.remove_style(rect, "fill"); // already gone, no record

        let records = doc.take_mutations();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| matches!(
            r,
            MutationRecord::Attributes { attribute_name, .. } if attribute_name == "style"
        )));
    }

    #[test]
    fn test_reads_record_nothing() {
        let (mut doc, div) = doc_with_child("div");
        doc.take_mutations();
        let _ = doc.style(div, "color");
        let _ = doc.computed_style(div, "color");
        let _ = doc.get(div);
        assert_eq!(doc.pending_mutation_count(), 0);
    }

    #[test]
    fn test_has_ancestor() {
        let mut doc = Document::new(Element::new("body"));
        let svg = doc.append_child(doc.root(), Element::new("svg"));
        let g = doc.append_child(svg, Element::new("g"));
        let text = doc.append_child(g, Element::new("text"));

        assert!(doc.has_ancestor(text, "svg"));
        assert!(doc.has_ancestor(text, "body"));
        assert!(!doc.has_ancestor(text, "table"));
        assert!(!doc.has_ancestor(svg, "svg"));
    }

    #[test]
    fn test_take_mutations_drains() {
        let (mut doc, div) = doc_with_child("div");
        doc.set_attribute(div, "alt", "x");
        assert!(!doc.take_mutations().is_empty());
        assert!(doc.take_mutations().is_empty());
    }
}
