use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use log::{debug, error, trace, warn};

use entbridge_shared::{
    ApplyOutcome, CallbackKey, CallbackRegistry, Dispatch, Invocation, OverrideList,
    RecipientSlot, ScriptError, TransmitRecord,
};

use crate::host::TransmitHook;

/// What one transmit check did to its batch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransmitReport {
    /// Records a subscriber was asked about
    pub recipients: usize,
    /// Records whose subscriber returned a non-empty override list
    pub overridden: usize,
    /// Records skipped because the host gave no valid slot or bitmap
    pub skipped: usize,
    /// Per-index tally summed over the whole batch
    pub applied: ApplyOutcome,
    /// Recipients whose subscriber faulted; they got no override
    pub faults: Vec<(RecipientSlot, ScriptError)>,
}

/// Applies scripted visibility overrides to each recipient's transmit bitmap.
///
/// For every record, the check-transmit callback is asked (with the recipient
/// slot as its only argument) for a count-prefixed list of entity indices to
/// hide. Those bits are cleared; nothing else in the bitmap changes.
pub struct TransmitFilter<R: CallbackRegistry> {
    registry: Rc<RefCell<R>>,
    callback: CallbackKey,
    warn_on_discarded_index: bool,
    /// Records skipped in the previous check, so a host that keeps sending
    /// the same malformed batch is only reported once
    last_skipped: Cell<usize>,
}

impl<R: CallbackRegistry> TransmitFilter<R> {
    pub(crate) fn new(
        registry: Rc<RefCell<R>>,
        callback: CallbackKey,
        warn_on_discarded_index: bool,
    ) -> Self {
        Self {
            registry,
            callback,
            warn_on_discarded_index,
            last_skipped: Cell::new(0),
        }
    }

    /// Runs the check over a batch. Records are handled in order and
    /// independently; a failing subscriber only costs its own recipient the
    /// override.
    pub fn check_transmit<T: TransmitRecord>(&self, records: &mut [T]) -> TransmitReport {
        let mut report = TransmitReport::default();

        let mut invocation = {
            let Ok(mut registry) = self.registry.try_borrow_mut() else {
                warn!("Skipped transmit check: the callback registry is in use");
                return report;
            };
            if registry.function_count(self.callback) == 0 {
                return report;
            }
            match registry.begin_invocation(self.callback) {
                Ok(invocation) => invocation,
                Err(err) => {
                    warn!("Skipped transmit check: {}", err);
                    return report;
                }
            }
        };

        for record in records.iter_mut() {
            self.check_record(&mut invocation, record, &mut report);
        }

        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.end_invocation(self.callback, invocation),
            Err(_) => error!(
                "Could not return {:?} to the callback registry; it stays detached",
                self.callback
            ),
        }

        if report.skipped != self.last_skipped.replace(report.skipped) && report.skipped > 0 {
            warn!(
                "Skipped {} transmit records with an invalid recipient slot or no bitmap",
                report.skipped
            );
        }

        if report.overridden > 0 || !report.faults.is_empty() {
            trace!(
                "Transmit check: {} recipients, {} overridden, {} bits cleared, {} faults",
                report.recipients,
                report.overridden,
                report.applied.cleared,
                report.faults.len()
            );
        }

        report
    }

    fn check_record<T: TransmitRecord>(
        &self,
        invocation: &mut R::Invocation,
        record: &mut T,
        report: &mut TransmitReport,
    ) {
        let Some(recipient) = record.recipient() else {
            debug!("Skipped transmit record with an invalid recipient slot");
            report.skipped += 1;
            return;
        };
        if record.transmit_bits().is_none() {
            debug!(
                "Skipped transmit record for recipient {} with no bitmap",
                recipient.get()
            );
            report.skipped += 1;
            return;
        }
        report.recipients += 1;

        let context = invocation.script_context();
        context.reset();
        context.push(recipient);

        if let Err(err) = invocation.execute(Dispatch::SingleProvider) {
            warn!(
                "Transmit override for recipient {} faulted, leaving bitmap untouched: {}",
                recipient.get(),
                err
            );
            report.faults.push((recipient, err));
            return;
        }

        let Some(list) = invocation
            .script_context()
            .result_buffer()
            .and_then(OverrideList::from_counted)
        else {
            return;
        };

        if list.is_truncated() {
            warn!(
                "Override for recipient {} declared {} indices but only carried {}",
                recipient.get(),
                list.declared_len(),
                list.len()
            );
        }

        let Some(bits) = record.transmit_bits() else {
            return;
        };
        let outcome = list.apply(bits);

        if outcome.out_of_range > 0 && self.warn_on_discarded_index {
            warn!(
                "Discarded {} out-of-range entity indices in override for recipient {}",
                outcome.out_of_range,
                recipient.get()
            );
        }

        report.overridden += 1;
        report.applied.merge(&outcome);
    }
}

impl<R: CallbackRegistry> TransmitHook for TransmitFilter<R> {
    fn on_check_transmit(&self, records: &mut [&mut dyn TransmitRecord]) {
        self.check_transmit(records);
    }
}
