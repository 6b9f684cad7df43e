use std::collections::{HashMap, HashSet};

use entbridge_server::shared::{ScriptContext, ScriptError, ScriptValue};

/// Builds a check-transmit subscriber that answers from a fixed table.
///
/// `overrides` maps a recipient slot to the raw count-prefixed buffer to
/// return; recipients in `failing` make the subscriber fail instead. Anyone
/// else gets no result.
pub fn override_table(
    overrides: HashMap<i64, Vec<u32>>,
    failing: HashSet<i64>,
) -> impl FnMut(&mut ScriptContext) -> Result<(), ScriptError> + 'static {
    move |context| {
        let Some(slot) = context.arg(0).and_then(ScriptValue::as_int) else {
            return Err(ScriptError::failed("missing recipient slot"));
        };
        if failing.contains(&slot) {
            return Err(ScriptError::failed(format!("script error for slot {}", slot)));
        }
        if let Some(buffer) = overrides.get(&slot) {
            context.set_result(buffer.clone());
        }
        Ok(())
    }
}

/// Count-prefixed override buffer for the given indices
pub fn counted(indices: &[u32]) -> Vec<u32> {
    let mut buffer = Vec::with_capacity(indices.len() + 1);
    buffer.push(indices.len() as u32);
    buffer.extend_from_slice(indices);
    buffer
}
