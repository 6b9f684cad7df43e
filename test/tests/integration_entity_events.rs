//! Entity lifecycle notifications forwarded through the registered listener.

use std::rc::Rc;

use entbridge_server::shared::{EntityHandle, ScriptError, ScriptValue};
use entbridge_test::{BridgeFixture, CallLog};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn entity(raw: u64) -> EntityHandle {
    EntityHandle::from_raw(raw)
}

#[test]
fn spawned_subscriber_gets_the_handle_once() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    let log_in = log.clone();
    fixture.subscribe(fixture.callbacks().entity_spawned, move |context| {
        log_in.record("spawned", context.args());
        context.set_result(true);
        Ok(())
    });

    fixture.host.borrow().spawn(entity(42));

    assert_eq!(
        log.entries(),
        vec![("spawned".to_string(), vec![ScriptValue::Entity(entity(42))])]
    );
}

#[test]
fn subscribers_run_in_registration_order() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    for label in ["first", "second", "third"] {
        let log_in = log.clone();
        fixture.subscribe(fixture.callbacks().entity_deleted, move |context| {
            log_in.record(label, context.args());
            Ok(())
        });
    }

    fixture.host.borrow().delete(entity(1));
    fixture.host.borrow().delete(entity(2));

    assert_eq!(
        log.labels(),
        vec!["first", "second", "third", "first", "second", "third"]
    );
}

#[test]
fn parent_changed_pushes_child_then_parent() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    let log_in = log.clone();
    fixture.subscribe(fixture.callbacks().entity_parent_changed, move |context| {
        log_in.record("parent", context.args());
        Ok(())
    });

    fixture.host.borrow().reparent(entity(5), Some(entity(6)));
    fixture.host.borrow().reparent(entity(5), None);

    assert_eq!(
        log.entries(),
        vec![
            (
                "parent".to_string(),
                vec![ScriptValue::Entity(entity(5)), ScriptValue::Entity(entity(6))]
            ),
            (
                "parent".to_string(),
                vec![ScriptValue::Entity(entity(5)), ScriptValue::Null]
            ),
        ]
    );
}

#[test]
fn each_event_has_its_own_callback() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    let callbacks = [
        ("spawned", fixture.callbacks().entity_spawned),
        ("created", fixture.callbacks().entity_created),
        ("deleted", fixture.callbacks().entity_deleted),
        ("parent", fixture.callbacks().entity_parent_changed),
    ];
    for (label, key) in callbacks {
        let log_in = log.clone();
        fixture.subscribe(key, move |context| {
            log_in.record(label, context.args());
            Ok(())
        });
    }

    let host = fixture.host.borrow();
    host.create(entity(1));
    host.spawn(entity(1));
    host.reparent(entity(1), Some(entity(2)));
    host.delete(entity(1));

    assert_eq!(log.labels(), vec!["created", "spawned", "parent", "deleted"]);
}

#[test]
fn events_without_subscribers_skip_the_registry() {
    init();
    let fixture = BridgeFixture::running();
    let touches_before = fixture.registry.borrow().context_touches;

    let host = fixture.host.borrow();
    host.create(entity(1));
    host.spawn(entity(1));
    host.reparent(entity(1), None);
    host.delete(entity(1));

    assert_eq!(fixture.registry.borrow().context_touches, touches_before);
    assert!(fixture.registry.borrow().invocations.is_empty());
}

#[test]
fn failing_subscriber_does_not_stop_the_next_one() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    fixture.subscribe(fixture.callbacks().entity_created, |_| {
        Err(ScriptError::failed("handler threw"))
    });
    let log_in = log.clone();
    fixture.subscribe(fixture.callbacks().entity_created, move |context| {
        log_in.record("after", context.args());
        Ok(())
    });

    fixture.host.borrow().create(entity(3));

    assert_eq!(log.labels(), vec!["after"]);
}

#[test]
fn no_events_before_the_entity_system_is_ready() {
    init();
    let mut fixture = BridgeFixture::new();
    fixture.manager.start().expect("bridge starts");
    let log = CallLog::new();
    let log_in = log.clone();
    fixture.subscribe(fixture.callbacks().entity_spawned, move |context| {
        log_in.record("spawned", context.args());
        Ok(())
    });

    fixture.host.borrow().spawn(entity(1));
    assert!(log.is_empty());

    fixture
        .manager
        .on_entity_system_ready(fixture.host.clone())
        .expect("listener registers");
    fixture.host.borrow().spawn(entity(2));

    assert_eq!(log.len(), 1);
}

#[test]
fn subscriber_can_trigger_events_on_other_callbacks() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    let host = Rc::downgrade(&fixture.host);
    let log_created = log.clone();
    fixture.subscribe(fixture.callbacks().entity_created, move |context| {
        log_created.record("created", context.args());
        if let Some(host) = host.upgrade() {
            host.borrow().spawn(entity(99));
        }
        Ok(())
    });
    let log_spawned = log.clone();
    fixture.subscribe(fixture.callbacks().entity_spawned, move |context| {
        log_spawned.record("spawned", context.args());
        Ok(())
    });

    fixture.host.borrow().create(entity(1));

    assert_eq!(
        log.entries(),
        vec![
            ("created".to_string(), vec![ScriptValue::Entity(entity(1))]),
            ("spawned".to_string(), vec![ScriptValue::Entity(entity(99))]),
        ]
    );
}

#[test]
fn nested_event_on_the_running_callback_is_dropped() {
    init();
    let fixture = BridgeFixture::running();
    let log = CallLog::new();
    let host = Rc::downgrade(&fixture.host);
    let log_in = log.clone();
    fixture.subscribe(fixture.callbacks().entity_deleted, move |context| {
        if let Some(host) = host.upgrade() {
            host.borrow().delete(entity(7));
        }
        log_in.record("deleted", context.args());
        Ok(())
    });

    fixture.host.borrow().delete(entity(1));
    fixture.host.borrow().delete(entity(2));

    assert_eq!(
        log.entries(),
        vec![
            ("deleted".to_string(), vec![ScriptValue::Entity(entity(1))]),
            ("deleted".to_string(), vec![ScriptValue::Entity(entity(2))]),
        ]
    );
}
