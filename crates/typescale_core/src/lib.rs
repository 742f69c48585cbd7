//! Typescale Core Runtime
//!
//! Foundational plumbing shared by the typography playground:
//!
//! - **Event Dispatch**: viewport and element resize events routed per target
//! - **Render Targets**: the computed-style query surface of whatever renders the text
//! - **Measurement Probes**: read back the pixel size an element actually resolved to
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use typescale_core::events::{Event, EventDispatcher};
//! use typescale_core::probe::{ElementId, Measurement, MeasurementProbe, RenderTarget};
//!
//! struct Fixed;
//!
//! impl RenderTarget for Fixed {
//!     fn computed_font_size(&self, _element: ElementId) -> Option<String> {
//!         Some("18.75px".to_string())
//!     }
//! }
//!
//! let mut dispatcher = EventDispatcher::new();
//! let probe = MeasurementProbe::new(Arc::new(Fixed));
//!
//! assert_eq!(probe.attach(&mut dispatcher, 1), Measurement::Px(18.8));
//! dispatcher.dispatch(&mut Event::element_resize(1));
//! assert_eq!(probe.measurement(), Measurement::Px(18.8));
//! ```

pub mod events;
pub mod probe;

pub use events::{Event, EventData, EventDispatcher, EventType, HandlerId, TargetId, VIEWPORT_TARGET};
pub use probe::{ElementId, Measurement, MeasurementProbe, RenderTarget};
