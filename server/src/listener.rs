use std::{cell::RefCell, rc::Rc};

use log::{error, warn};

use entbridge_shared::{
    CallbackKey, CallbackRegistry, Dispatch, EntityHandle, Invocation, ScriptValue,
};

use crate::host::EntityListener;

/// The four lifecycle callbacks the listener forwards to
#[derive(Clone, Copy, Debug)]
pub(crate) struct ListenerCallbacks {
    pub spawned: CallbackKey,
    pub created: CallbackKey,
    pub deleted: CallbackKey,
    pub parent_changed: CallbackKey,
}

/// Forwards host entity lifecycle notifications to script callbacks.
///
/// Each notification is fire-and-forget: subscriber results are discarded
/// and faults are only logged.
pub struct EntityEventListener<R: CallbackRegistry> {
    registry: Rc<RefCell<R>>,
    callbacks: ListenerCallbacks,
}

impl<R: CallbackRegistry> EntityEventListener<R> {
    pub(crate) fn new(registry: Rc<RefCell<R>>, callbacks: ListenerCallbacks) -> Self {
        Self {
            registry,
            callbacks,
        }
    }

    fn notify<const N: usize>(&self, key: CallbackKey, args: [ScriptValue; N]) {
        let mut invocation = {
            let Ok(mut registry) = self.registry.try_borrow_mut() else {
                warn!(
                    "Dropped entity notification for {:?}: the callback registry is in use",
                    key
                );
                return;
            };
            if registry.function_count(key) == 0 {
                return;
            }
            match registry.begin_invocation(key) {
                Ok(invocation) => invocation,
                Err(err) => {
                    warn!("Dropped entity notification: {}", err);
                    return;
                }
            }
        };

        let context = invocation.script_context();
        context.reset();
        for arg in args {
            context.push(arg);
        }

        if let Err(err) = invocation.execute(Dispatch::Broadcast) {
            warn!("{}", err);
        }

        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.end_invocation(key, invocation),
            Err(_) => error!(
                "Could not return {:?} to the callback registry; it stays detached",
                key
            ),
        }
    }
}

impl<R: CallbackRegistry> EntityListener for EntityEventListener<R> {
    fn on_entity_spawned(&self, entity: EntityHandle) {
        self.notify(self.callbacks.spawned, [entity.into()]);
    }

    fn on_entity_created(&self, entity: EntityHandle) {
        self.notify(self.callbacks.created, [entity.into()]);
    }

    fn on_entity_deleted(&self, entity: EntityHandle) {
        self.notify(self.callbacks.deleted, [entity.into()]);
    }

    fn on_entity_parent_changed(&self, entity: EntityHandle, new_parent: Option<EntityHandle>) {
        self.notify(
            self.callbacks.parent_changed,
            [entity.into(), new_parent.into()],
        );
    }
}
