//! Root style mirror
//!
//! Styling that lives outside the typography tree (global stylesheets, the
//! document root) still needs the selected font and root font size. The
//! playground state pushes those values through a [`RootStyleMirror`] on
//! every change; the mirror always holds the latest selection.

use rustc_hash::FxHashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Custom property carrying the selected font stack
pub const APP_FONT_VARIABLE: &str = "--app-font";

/// Root font size property (value like `"12px"`)
pub const ROOT_FONT_SIZE_PROPERTY: &str = "font-size";

/// Write side of the root style channel
pub trait RootStyleMirror: Send + Sync {
    fn set_property(&self, name: &str, value: &str);
}

/// Process-wide document root properties
static ROOT_PROPERTIES: OnceLock<RwLock<FxHashMap<String, String>>> = OnceLock::new();

fn root_properties() -> &'static RwLock<FxHashMap<String, String>> {
    ROOT_PROPERTIES.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Mirror that writes the process-wide document root
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentRoot;

impl RootStyleMirror for DocumentRoot {
    fn set_property(&self, name: &str, value: &str) {
        tracing::trace!(name, value, "root property");
        root_properties()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
    }
}

/// Read a document root property, for styling outside the typography tree
pub fn root_property(name: &str) -> Option<String> {
    root_properties()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}
