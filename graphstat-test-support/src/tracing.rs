//! In-memory capture of spans and events for instrumentation assertions.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use ::tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

/// Layer that keeps every closed span and every event in memory.
///
/// Clones share storage, so a test can keep one handle while the subscriber
/// owns another.
///
/// # Examples
/// ```
/// use graphstat_test_support::tracing::RecordingLayer;
///
/// let (answer, layer) = RecordingLayer::capture(|| {
///     tracing::info!(answer = 42, "computed");
///     42
/// });
/// assert_eq!(answer, 42);
/// assert_eq!(layer.events()[0].field("answer"), Some("42"));
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Runs `f` with a fresh recording subscriber installed for the current
    /// thread and returns its result with the layer.
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Self) {
        let layer = Self::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let value = ::tracing::subscriber::with_default(subscriber, f);
        (value, layer)
    }

    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// The first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        lock(&self.spans).iter().find(|span| span.name == name).cloned()
    }

    /// Events recorded at exactly `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
        lock(&self.events)
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// A closed span with the fields recorded on it over its lifetime.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanRecord {
    /// Span name as given to `instrument` or `span!`.
    pub name: String,
    /// Fields recorded at creation or through `Span::record`, formatted.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Looks up one recorded field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// An emitted event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    /// Severity of the event.
    pub level: Level,
    /// Module path the event was emitted from.
    pub target: String,
    /// Event fields, including `message`, formatted.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Looks up one field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The event's formatted message, if it has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

struct PendingSpan {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut Fields(&mut fields));
        span.extensions_mut().insert(PendingSpan {
            name: attrs.metadata().name().to_owned(),
            fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id)
            && let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>()
        {
            values.record(&mut Fields(&mut pending.fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut Fields(&mut fields));
        lock(&self.events).push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields,
        });
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
            return;
        };
        lock(&self.spans).push(SpanRecord {
            name: pending.name,
            fields: pending.fields,
        });
    }
}

/// Stores each field as a string. Unhandled primitive kinds fall back to
/// `record_debug` through the trait defaults.
struct Fields<'a>(&'a mut HashMap<String, String>);

impl Fields<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for Fields<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.to_string());
    }
}
