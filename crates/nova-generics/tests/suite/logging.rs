use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nova_generics::{BindingTable, TypeDescriptor, TypeResolver};
use tracing::{field::Visit, Event, Level};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

use super::fixtures::{fixture, var};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct CapturingLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CapturingLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(CapturedEvent {
                level: *event.metadata().level(),
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

#[test]
fn unbound_type_variable_emits_an_info_event() {
    let fx = fixture();
    let layer = CapturingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let resolved = tracing::subscriber::with_default(subscriber, || {
        TypeResolver::new(&fx.universe)
            .resolve(&BindingTable::empty(fx.boxed), &var(fx.boxed, 1))
            .unwrap()
    });
    assert_eq!(resolved, TypeDescriptor::OBJECT);

    let events = layer.events.lock().expect("events mutex poisoned");
    let event = events
        .iter()
        .find(|e| e.fields.get("type_var").map(String::as_str) == Some("com.example.Box.B"))
        .unwrap_or_else(|| panic!("no unbound type variable event in {events:?}"));
    assert_eq!(event.level, Level::INFO);
    assert_eq!(
        event.fields.get("target").map(String::as_str),
        Some("nova.generics")
    );
}

#[test]
fn bound_type_variable_is_silent() {
    let fx = fixture();
    let layer = CapturingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let table = nova_generics::build_hierarchy(
        &fx.universe,
        &nova_generics::DeclaredType::Class(fx.boxed),
        &[TypeDescriptor::OBJECT, TypeDescriptor::OBJECT],
    )
    .unwrap();

    tracing::subscriber::with_default(subscriber, || {
        let table = table.table_for_class(fx.boxed).unwrap();
        TypeResolver::new(&fx.universe)
            .resolve(table, &var(fx.boxed, 1))
            .unwrap();
    });

    let events = layer.events.lock().expect("events mutex poisoned");
    assert!(
        events.iter().all(|e| e.level != Level::INFO),
        "unexpected info events: {events:?}"
    );
}
