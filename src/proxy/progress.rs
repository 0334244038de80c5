//! Progress events emitted while a batch is being classified

use crate::proxy::models::ClassificationResult;
use tokio::sync::mpsc::UnboundedSender;

/// Event describing the progress of a classification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A batch of `total` candidates was submitted
    Started { total: usize },
    /// One candidate finished classification
    Classified(ClassificationResult),
    /// The batch finished after classifying `checked` candidates
    Finished { checked: usize },
}

/// Optional subscriber for progress events.
///
/// Sending never fails from the caller's point of view: a dropped
/// receiver just means nobody is listening anymore.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressSink {
    pub fn new(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_emit_delivers_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ProgressSink::new(tx);
        sink.emit(ProgressEvent::Started { total: 2 });
        assert_eq!(rx.try_recv().unwrap(), ProgressEvent::Started { total: 2 });
    }

    #[test]
    fn test_emit_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = ProgressSink::new(tx);
        sink.emit(ProgressEvent::Finished { checked: 0 });

        ProgressSink::disabled().emit(ProgressEvent::Finished { checked: 0 });
    }
}
