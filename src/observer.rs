use crate::dom::{Document, MutationRecord};

/// What the observer watches. All three are on by default, matching a
/// subtree-wide observation of attribute and child-list changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverOptions {
    pub attributes: bool,
    pub child_list: bool,
    pub subtree: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            attributes: true,
            child_list: true,
            subtree: true,
        }
    }
}

/// Filters mutation batches down to the ones that warrant a
/// synchronization pass: a class change anywhere, or children added to or
/// removed from a vector-graphics container.
#[derive(Debug, Clone)]
pub struct MutationObserver {
    options: ObserverOptions,
}

impl MutationObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// True when any record in the batch should trigger a pass.
    pub fn qualifies(&self, doc: &Document, records: &[MutationRecord]) -> bool {
        records.iter().any(|record| self.record_qualifies(doc, record))
    }

    fn record_qualifies(&self, doc: &Document, record: &MutationRecord) -> bool {
        if !self.options.subtree && record.target() != doc.root() {
            return false;
        }
        match record {
            MutationRecord::Attributes { attribute_name, .. } => {
                self.options.attributes && attribute_name == "class"
            }
            MutationRecord::ChildList { target } => {
                self.options.child_list
                    && doc.get(*target).is_some_and(|element| element.tag() == "svg")
            }
        }
    }
}
