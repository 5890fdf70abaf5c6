//! Status channel for fill progress.
//!
//! Progress messages are meant for the person watching, not for the log;
//! they are a separate channel from `tracing`. [`TracingProgress`] mirrors
//! them into the log when that is wanted.

use parking_lot::Mutex;
use tracing::info;

/// Receiver of human-readable status updates.
///
/// Called synchronously from the fill engine any number of times per
/// invocation. `percent` is in `0.0..=100.0`.
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str, percent: f64);

    /// Reports a message without a meaningful percentage.
    fn report_message(&self, message: &str) {
        self.report(message, 0.0);
    }
}

impl<F> ProgressSink for F
where
    F: Fn(&str, f64) + Send + Sync,
{
    fn report(&self, message: &str, percent: f64) {
        self(message, percent)
    }
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _message: &str, _percent: f64) {}
}

/// Logs every update at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, message: &str, percent: f64) {
        info!(percent = percent.round() as u32, "{}", message);
    }
}

/// One recorded status update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub message: String,
    pub percent: f64,
}

/// Collects updates in order for later inspection.
#[derive(Debug, Default)]
pub struct ProgressRecorder {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every update so far.
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().clone()
    }

    /// Just the messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

impl ProgressSink for ProgressRecorder {
    fn report(&self, message: &str, percent: f64) {
        self.events.lock().push(ProgressEvent {
            message: message.to_string(),
            percent,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_closure_sink() {
        let count = AtomicUsize::new(0);
        let sink = |_: &str, _: f64| {
            count.fetch_add(1, Ordering::SeqCst);
        };
        sink.report("one", 10.0);
        sink.report_message("two");
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_recorder_keeps_order() {
        let recorder = ProgressRecorder::new();
        recorder.report("first", 10.0);
        recorder.report_message("second");

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].percent, 0.0);
        assert_eq!(recorder.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_sinks_as_trait_objects() {
        let sinks: Vec<Box<dyn ProgressSink>> =
            vec![Box::new(NoProgress), Box::new(TracingProgress)];
        for sink in &sinks {
            sink.report("noop", 50.0);
        }
    }
}
