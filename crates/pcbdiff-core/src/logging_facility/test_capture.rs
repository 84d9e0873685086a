//! In-memory event capture for logging assertions in tests
//!
//! `init_test_capture()` installs one global subscriber that records every
//! event. Tests share it, so assertions should filter by `op` or by a
//! reference id unique to the test rather than count all events.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_REFERENCE_ID};

/// One recorded event; every field value is kept as display text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: BTreeMap<String, String>) -> Self {
        Self {
            level,
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    /// Text of a field, if the event carried it
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.field(FIELD_REFERENCE_ID)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldText(BTreeMap<String, String>);

impl FieldText {
    fn put(&mut self, field: &Field, text: String) {
        self.0.insert(field.name().to_string(), text);
    }
}

impl Visit for FieldText {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    log: EventLog,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), text.0);
        if let Ok(mut log) = self.log.lock() {
            log.push(captured);
        }
    }
}

/// Shared handle on the captured events
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    /// Snapshot of everything captured so far, in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// # Panics
    ///
    /// Panics if no event with this `op` and `event` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {}/{} event among {} captured",
            op,
            event,
            events.len()
        );
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Events mentioning one component, useful to isolate a test's own records
    pub fn events_for_reference(&self, reference_id: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.reference_id() == Some(reference_id))
            .collect()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber on first use and return its handle
///
/// # Example
///
/// ```
/// use pcbdiff_core::logging_facility::test_capture::init_test_capture;
/// use pcbdiff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("load_layout", slot = "A");
/// capture.assert_event_exists("load_layout", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let log = EventLog::default();
            tracing_subscriber::registry()
                .with(CaptureLayer { log: log.clone() })
                .init();
            TestCapture { log }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_reads_canonical_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("op".to_string(), "load_layout".to_string());
        fields.insert("event".to_string(), "start".to_string());
        fields.insert("reference_id".to_string(), "C1".to_string());

        let event = CapturedEvent::from_fields(Level::INFO, fields);

        assert!(event.is("load_layout", "start"));
        assert_eq!(event.reference_id(), Some("C1"));
        assert_eq!(event.component, None);
        assert_eq!(event.field("duration_ms"), None);
    }

    #[test]
    fn test_clear_empties_a_private_log() {
        let capture = TestCapture {
            log: EventLog::default(),
        };
        if let Ok(mut log) = capture.log.lock() {
            log.push(CapturedEvent::from_fields(Level::WARN, BTreeMap::new()));
        }
        assert_eq!(capture.events().len(), 1);
        capture.clear();
        assert!(capture.events().is_empty());
    }
}
