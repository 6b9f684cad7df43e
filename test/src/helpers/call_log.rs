use std::{cell::RefCell, rc::Rc};

use entbridge_server::shared::ScriptValue;

/// Append-only record of subscriber invocations, shared between subscribers
/// and the test body
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Rc<RefCell<Vec<(String, Vec<ScriptValue>)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: &str, args: &[ScriptValue]) {
        self.entries
            .borrow_mut()
            .push((label.to_string(), args.to_vec()));
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    pub fn entries(&self) -> Vec<(String, Vec<ScriptValue>)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
