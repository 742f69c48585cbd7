//! Simulated document
//!
//! Stands in for a browser: one text element per variant, styled from the
//! latest typography snapshot, with font sizes resolved through the
//! min-width media cascade at the current viewport width.

use std::sync::{Arc, PoisonError, RwLock};
use typescale_core::events::{Event, EventDispatcher};
use typescale_core::probe::{ElementId, RenderTarget};
use typescale_theme::{ResponsiveTypography, Variant};

/// Element ids start at 1; 0 is the viewport
pub fn element_for(variant: Variant) -> ElementId {
    variant.index() as ElementId + 1
}

fn variant_for(element: ElementId) -> Option<Variant> {
    let index = usize::try_from(element.checked_sub(1)?).ok()?;
    Variant::all().get(index).copied()
}

pub struct SimulatedDocument {
    snapshot: RwLock<Arc<ResponsiveTypography>>,
    viewport_width: RwLock<f32>,
}

impl SimulatedDocument {
    pub fn new(snapshot: Arc<ResponsiveTypography>, viewport_width: f32) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            viewport_width: RwLock::new(viewport_width),
        }
    }

    /// Apply a new snapshot (a re-render)
    pub fn restyle(&self, snapshot: Arc<ResponsiveTypography>) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    pub fn set_viewport_width(&self, width: f32) {
        *self
            .viewport_width
            .write()
            .unwrap_or_else(PoisonError::into_inner) = width;
    }

    pub fn viewport_width(&self) -> f32 {
        *self
            .viewport_width
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// After layout: every text element may have changed size
    pub fn notify_layout(&self, dispatcher: &EventDispatcher) {
        for variant in Variant::all() {
            dispatcher.dispatch(&mut Event::element_resize(element_for(*variant)));
        }
    }
}

impl RenderTarget for SimulatedDocument {
    fn computed_font_size(&self, element: ElementId) -> Option<String> {
        let variant = variant_for(element)?;
        let snapshot = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let px = snapshot.resolve_px(variant, self.viewport_width());
        Some(format!("{px}px"))
    }
}
