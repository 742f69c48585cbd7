//! Measurement probes
//!
//! A probe observes one rendered text element and reports the font size the
//! rendering target actually resolved for it, after the cascade and every
//! responsive rule have been applied. Probes are read-only: nothing they
//! measure flows back into the typography parameters.

use crate::events::{event_types, EventDispatcher, HandlerId, TargetId};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Element identifier inside a render target
pub type ElementId = TargetId;

/// Something that can answer computed-style queries for rendered elements.
///
/// `computed_font_size` returns the raw computed value (e.g. `"18.75px"`),
/// or `None` when the element is not rendered.
pub trait RenderTarget: Send + Sync {
    fn computed_font_size(&self, element: ElementId) -> Option<String>;
}

/// Result of reading an element's font size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Measurement {
    /// Pixel size rounded to one decimal place
    Px(f32),
    /// No numeric value could be parsed (or nothing has been read yet)
    #[default]
    Unavailable,
}

impl Measurement {
    /// Build a measurement from a computed style string
    pub fn from_computed(value: Option<&str>) -> Self {
        match value.and_then(parse_css_number) {
            Some(px) => Measurement::Px(round_to_tenth(px)),
            None => Measurement::Unavailable,
        }
    }

    pub fn px(self) -> Option<f32> {
        match self {
            Measurement::Px(px) => Some(px),
            Measurement::Unavailable => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Px(px) => write!(f, "{px}px"),
            Measurement::Unavailable => f.write_str("\u{2014}"),
        }
    }
}

/// Parse the leading number of a CSS value the way `parseFloat` does.
///
/// Leading whitespace is skipped and trailing units are ignored. Returns
/// `None` for anything that does not start with a finite number.
pub fn parse_css_number(value: &str) -> Option<f32> {
    let trimmed = value.trim_start();
    let numeric_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    // Longest parseable prefix wins ("1e" falls back to "1")
    (1..=numeric_len)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f32>().ok())
        .filter(|v| v.is_finite())
}

/// Round half up to one decimal place
pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0 + 0.5).floor() / 10.0
}

struct Subscription {
    element: ElementId,
    handler: HandlerId,
}

/// Observes the resolved font size of a single element.
///
/// Reads once when attached (first render) and again on every
/// element-resize event for that element. Attaching to a replacement element
/// drops the previous subscription first, so the reported value always
/// belongs to the element currently on screen.
pub struct MeasurementProbe {
    target: Arc<dyn RenderTarget>,
    latest: Arc<Mutex<Measurement>>,
    subscription: Mutex<Option<Subscription>>,
}

impl MeasurementProbe {
    pub fn new(target: Arc<dyn RenderTarget>) -> Self {
        Self {
            target,
            latest: Arc::new(Mutex::new(Measurement::Unavailable)),
            subscription: Mutex::new(None),
        }
    }

    /// Start observing `element`, replacing any previous subscription
    pub fn attach(&self, dispatcher: &mut EventDispatcher, element: ElementId) -> Measurement {
        self.detach(dispatcher);

        let target = self.target.clone();
        let latest = self.latest.clone();
        let handler = dispatcher.register(element, event_types::ELEMENT_RESIZE, move |event| {
            let measurement = read(target.as_ref(), event.target);
            tracing::trace!(element = event.target, %measurement, "probe re-read");
            *latest.lock().unwrap_or_else(PoisonError::into_inner) = measurement;
        });

        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Subscription { element, handler });

        self.refresh()
    }

    /// Stop observing. Keeps the last measurement.
    pub fn detach(&self, dispatcher: &mut EventDispatcher) {
        let previous = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sub) = previous {
            dispatcher.unregister(sub.handler);
            tracing::trace!(element = sub.element, "probe detached");
        }
    }

    /// Element currently observed
    pub fn element(&self) -> Option<ElementId> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|sub| sub.element)
    }

    /// Re-read the observed element immediately
    pub fn refresh(&self) -> Measurement {
        let measurement = match self.element() {
            Some(element) => read(self.target.as_ref(), element),
            None => Measurement::Unavailable,
        };
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = measurement;
        measurement
    }

    /// Last reported measurement
    pub fn measurement(&self) -> Measurement {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read(target: &dyn RenderTarget, element: ElementId) -> Measurement {
    Measurement::from_computed(target.computed_font_size(element).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_number_like_parse_float() {
        assert_eq!(parse_css_number("18.75px"), Some(18.75));
        assert_eq!(parse_css_number("  16px"), Some(16.0));
        assert_eq!(parse_css_number("-0.5em"), Some(-0.5));
        assert_eq!(parse_css_number(".5rem"), Some(0.5));
        assert_eq!(parse_css_number("1e1px"), Some(10.0));
        assert_eq!(parse_css_number("3e"), Some(3.0));
        assert_eq!(parse_css_number("px"), None);
        assert_eq!(parse_css_number(""), None);
        assert_eq!(parse_css_number("normal"), None);
    }

    #[test]
    fn test_round_to_tenth_rounds_half_up() {
        assert_eq!(round_to_tenth(18.75), 18.8);
        assert_eq!(round_to_tenth(18.74), 18.7);
        assert_eq!(round_to_tenth(12.0), 12.0);
    }

    #[test]
    fn test_measurement_display() {
        assert_eq!(Measurement::Px(18.8).to_string(), "18.8px");
        assert_eq!(Measurement::Px(12.0).to_string(), "12px");
        assert_eq!(Measurement::Unavailable.to_string(), "\u{2014}");
    }

    #[test]
    fn test_from_computed_falls_back_to_unavailable() {
        assert_eq!(Measurement::from_computed(None), Measurement::Unavailable);
        assert_eq!(Measurement::from_computed(Some("auto")), Measurement::Unavailable);
        assert_eq!(Measurement::from_computed(Some("20.04px")), Measurement::Px(20.0));
    }
}
