//! Keeps rendered images, plots and tables legible when the host document
//! toggles between light and dark themes.
//!
//! The host page owns the theme decision and marks it as a class on the
//! document root; this crate only reacts. On every qualifying mutation
//! batch (and once eagerly at attach time) a synchronization pass swaps
//! themed image asset paths, recolors plot backgrounds, forces plot text
//! white under dark (restoring the captured original under light), and
//! toggles table text color.
//!
//! # Structure
//!
//! - `dom` - the rendered element tree and its mutation records
//! - `observer` - filters mutation batches down to qualifying ones
//! - `sync` - the synchronization pass, snapshots, and the rewrite table
//! - `config` - recognized theme tokens, asset markers, plot palette
//! - `error` - crate error type
//!
//! # Example
//!
//! ```
//! use themesync::{Document, Element, SyncConfig, ThemeSync};
//!
//! let mut doc = Document::new(Element::new("body").with_class("quarto-dark"));
//! let root = doc.root();
//! let img = doc.append_child(root, Element::new("img").with_attribute("src", "plot.light.png"));
//!
//! // Attaching runs an eager pass, like a script executing at load.
//! let sync = ThemeSync::attach(&mut doc, SyncConfig::default());
//! assert_eq!(doc.get(img).unwrap().attribute("src"), Some("plot.dark.png"));
//!
//! // Later mutations are pumped in batches from the host's event loop.
//! doc.add_class(root, "quarto-light");
//! doc.remove_class(root, "quarto-dark");
//! sync.pump(&mut doc);
//! assert_eq!(doc.get(img).unwrap().attribute("src"), Some("plot.light.png"));
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod observer;
pub mod sync;

// Re-exports for convenient external access
pub use config::SyncConfig;
pub use dom::{Document, Element, MutationRecord, NodeId};
pub use error::{Result, SyncError};
pub use observer::{MutationObserver, ObserverOptions};
pub use sync::{ThemeMode, ThemeSync, ThemeSynchronizer};
