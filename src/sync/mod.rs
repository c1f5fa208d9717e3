//! The synchronization pass and its page-lifetime attachment.
//!
//! A pass reads the theme marker off the document root, then rewrites
//! rendered content to match: image sources swap between themed asset
//! variants, plot backgrounds take the configured palette, plot text is
//! forced white under dark and restored from its captured snapshot under
//! light, and table text follows along. Every write is compare-then-set,
//! so a pass over an already-synchronized document writes nothing.

pub mod rules;
pub mod snapshot;

use tracing::{debug, trace, warn};

use crate::config::SyncConfig;
use crate::dom::{Document, NodeId};
use crate::observer::{MutationObserver, ObserverOptions};

use self::rules::{StyleRule, builtin_rules};
use self::snapshot::StyleSnapshot;

/// The active theme, derived from the document root's class list on every
/// pass and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Runs synchronization passes against a document.
pub struct ThemeSynchronizer {
    config: SyncConfig,
    rules: Vec<StyleRule>,
}

impl ThemeSynchronizer {
    pub fn new(config: SyncConfig) -> Self {
        let rules = builtin_rules(&config);
        Self { config, rules }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Read the theme marker off the document root. `None` when the host
    /// is in neither recognized theme, e.g. mid-transition. When both
    /// markers are present dark wins, deterministically.
    pub fn detect_mode(&self, doc: &Document) -> Option<ThemeMode> {
        let root = doc.get(doc.root())?;
        let light = root.has_class(&self.config.light_class);
        let dark = root.has_class(&self.config.dark_class);
        match (light, dark) {
            (false, false) => None,
            (true, true) => {
                warn!(
                    "both {:?} and {:?} are set on the document root; treating the theme as dark",
                    self.config.light_class, self.config.dark_class
                );
                Some(ThemeMode::Dark)
            }
            (_, true) => Some(ThemeMode::Dark),
            (true, false) => Some(ThemeMode::Light),
        }
    }

    /// One full synchronization pass, run to completion on the caller's
    /// tick. Aborts with no side effects when no theme marker is present.
    pub fn run_pass(&self, doc: &mut Document) {
        let Some(mode) = self.detect_mode(doc) else {
            return;
        };
        debug!("synchronizing rendered content to {:?}", mode);
        self.swap_image_sources(doc, mode);
        self.apply_style_rules(doc, mode);
        self.sync_text_elements(doc, mode);
    }

    /// Swap themed asset markers in image sources. Sources containing
    /// neither marker are left untouched.
    fn swap_image_sources(&self, doc: &mut Document, mode: ThemeMode) {
        let (from, to) = match mode {
            ThemeMode::Dark => (&self.config.light_marker, &self.config.dark_marker),
            ThemeMode::Light => (&self.config.dark_marker, &self.config.light_marker),
        };
        for id in doc.ids() {
            let swapped = {
                let Some(element) = doc.get(id) else { continue };
                if element.tag() != "img" {
                    continue;
                }
                let Some(src) = element.attribute("src") else {
                    continue;
                };
                let swapped = src.replacen(from.as_str(), to.as_str(), 1);
                if swapped == src {
                    continue;
                }
                swapped
            };
            doc.set_attribute(id, "src", &swapped);
        }
    }

    /// Drive the typed rewrite table: plot backgrounds, rect fills, table
    /// text color.
    fn apply_style_rules(&self, doc: &mut Document, mode: ThemeMode) {
        for id in doc.ids() {
            for rule in &self.rules {
                rule.apply(doc, id, mode);
            }
        }
    }

    /// Plot text: capture the original styling on first sight, then force
    /// white under dark or restore the snapshot under light.
    fn sync_text_elements(&self, doc: &mut Document, mode: ThemeMode) {
        for id in doc.ids() {
            if !self.is_text_target(doc, id) {
                continue;
            }
            let snapshot = match StyleSnapshot::load(doc, id) {
                Some(snapshot) => snapshot,
                None => {
                    // First sight (or unparseable data): capture before
                    // any theme-driven write touches this element.
                    let snapshot = StyleSnapshot::capture(doc, id);
                    if let Err(e) = snapshot.store(doc, id) {
                        warn!("failed to persist style snapshot: {}", e);
                    }
                    snapshot
                }
            };
            match mode {
                ThemeMode::Dark => {
                    set_style_if_changed(doc, id, "fill", "white");
                    set_style_if_changed(doc, id, "color", "white");
                }
                ThemeMode::Light => {
                    snapshot.restore(doc, id);
                }
            }
        }
    }

    /// Legend text anywhere, or any text span inside a vector-graphics
    /// container.
    fn is_text_target(&self, doc: &Document, id: NodeId) -> bool {
        let Some(element) = doc.get(id) else {
            return false;
        };
        match element.tag() {
            "text" => element.class_contains("legendtext") || doc.has_ancestor(id, "svg"),
            "tspan" => doc.has_ancestor(id, "svg"),
            _ => false,
        }
    }
}

fn set_style_if_changed(doc: &mut Document, id: NodeId, property: &str, value: &str) {
    if doc.style(id, property) != Some(value) {
        doc.set_style(id, property, value);
    }
}

/// The page-lifetime attachment: one observer plus one synchronizer,
/// created at startup and never disposed. The host runs its own event
/// loop and calls [`pump`](ThemeSync::pump) after document work.
pub struct ThemeSync {
    observer: MutationObserver,
    synchronizer: ThemeSynchronizer,
}

impl ThemeSync {
    /// Attach to a document and run the first pass immediately.
    pub fn attach(doc: &mut Document, config: SyncConfig) -> Self {
        let sync = Self {
            observer: MutationObserver::new(ObserverOptions::default()),
            synchronizer: ThemeSynchronizer::new(config),
        };
        debug!("theme synchronizer attached");
        sync.synchronizer.run_pass(doc);
        sync
    }

    /// The host's document-ready hook.
    pub fn document_ready(&self, doc: &mut Document) {
        self.synchronizer.run_pass(doc);
    }

    /// Drain the pending mutation batch and run one pass if any record in
    /// it qualifies.
    pub fn pump(&self, doc: &mut Document) {
        let records = doc.take_mutations();
        if records.is_empty() {
            return;
        }
        if self.observer.qualifies(doc, &records) {
            self.synchronizer.run_pass(doc);
        } else {
            trace!("ignoring {} mutation records", records.len());
        }
    }

    pub fn synchronizer(&self) -> &ThemeSynchronizer {
        &self.synchronizer
    }
}
