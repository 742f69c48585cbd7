use std::sync::{Arc, Mutex};

use typescale_core::events::event_types;
use typescale_core::{ElementId, Event, EventDispatcher, Measurement, MeasurementProbe, RenderTarget};

/// Render target whose computed sizes can be changed between layouts
#[derive(Default)]
struct MutableTarget {
    sizes: Mutex<Vec<(ElementId, String)>>,
}

impl MutableTarget {
    fn set(&self, element: ElementId, value: &str) {
        let mut sizes = self.sizes.lock().unwrap();
        sizes.retain(|(id, _)| *id != element);
        sizes.push((element, value.to_string()));
    }
}

impl RenderTarget for MutableTarget {
    fn computed_font_size(&self, element: ElementId) -> Option<String> {
        self.sizes
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, v)| v.clone())
    }
}

#[test]
fn probe_reads_on_attach_and_on_element_resize() {
    let target = Arc::new(MutableTarget::default());
    target.set(1, "16px");

    let mut dispatcher = EventDispatcher::new();
    let probe = MeasurementProbe::new(target.clone());

    assert_eq!(probe.measurement(), Measurement::Unavailable);
    assert_eq!(probe.attach(&mut dispatcher, 1), Measurement::Px(16.0));

    target.set(1, "21.333px");
    // No layout event yet: the previous reading stands
    assert_eq!(probe.measurement(), Measurement::Px(16.0));

    dispatcher.dispatch(&mut Event::element_resize(1));
    assert_eq!(probe.measurement(), Measurement::Px(21.3));
}

#[test]
fn reattaching_drops_the_stale_subscription() {
    let target = Arc::new(MutableTarget::default());
    target.set(1, "16px");
    target.set(2, "24px");

    let mut dispatcher = EventDispatcher::new();
    let probe = MeasurementProbe::new(target.clone());

    probe.attach(&mut dispatcher, 1);
    assert_eq!(probe.attach(&mut dispatcher, 2), Measurement::Px(24.0));
    assert_eq!(probe.element(), Some(2));
    assert_eq!(dispatcher.handler_count(1, event_types::ELEMENT_RESIZE), 0);
    assert_eq!(dispatcher.handler_count(2, event_types::ELEMENT_RESIZE), 1);

    // Resizing the replaced element must not overwrite the current reading
    target.set(1, "99px");
    dispatcher.dispatch(&mut Event::element_resize(1));
    assert_eq!(probe.measurement(), Measurement::Px(24.0));
}

#[test]
fn unparseable_values_report_unavailable() {
    let target = Arc::new(MutableTarget::default());
    target.set(3, "inherit");

    let mut dispatcher = EventDispatcher::new();
    let probe = MeasurementProbe::new(target.clone());

    assert_eq!(probe.attach(&mut dispatcher, 3), Measurement::Unavailable);
    assert_eq!(probe.attach(&mut dispatcher, 4), Measurement::Unavailable);
    assert_eq!(probe.measurement().to_string(), "\u{2014}");
}
