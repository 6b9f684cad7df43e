use crate::types::EntityIndex;

use super::value::ScriptValue;

/// Argument stack and result slot for one callback invocation
#[derive(Debug, Default)]
pub struct ScriptContext {
    args: Vec<ScriptValue>,
    result: Option<ScriptValue>,
}

impl ScriptContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all pushed arguments and any previous result
    pub fn reset(&mut self) {
        self.args.clear();
        self.result = None;
    }

    /// Appends an argument; subscribers see arguments in push order
    pub fn push(&mut self, value: impl Into<ScriptValue>) {
        self.args.push(value.into());
    }

    pub fn args(&self) -> &[ScriptValue] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&ScriptValue> {
        self.args.get(index)
    }

    pub fn set_result(&mut self, value: impl Into<ScriptValue>) {
        self.result = Some(value.into());
    }

    pub fn result(&self) -> Option<&ScriptValue> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<ScriptValue> {
        self.result.take()
    }

    /// The result as a count-prefixed index buffer, if that is what the
    /// subscriber produced
    pub fn result_buffer(&self) -> Option<&[EntityIndex]> {
        self.result.as_ref().and_then(ScriptValue::as_index_buffer)
    }

    pub(crate) fn has_usable_result(&self) -> bool {
        matches!(&self.result, Some(value) if !value.is_null())
    }

    pub(crate) fn discard_null_result(&mut self) {
        if matches!(self.result, Some(ScriptValue::Null)) {
            self.result = None;
        }
    }
}
