//! Diagnostic events emitted while expanding.
//!
//! Expansion never prints. It reports what happened through an
//! [`EventSink`], and the caller decides where that goes: the CLI prints via
//! [`output::StdoutSink`](crate::output::StdoutSink), quiet mode uses
//! [`NullSink`], and an embedding build driver can hand in an
//! `mpsc::Sender` and drain events on its own thread.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Something notable that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandEvent {
    /// The destination directory did not exist and was created.
    DestDirCreated { path: PathBuf },
    /// A source file did not exist; an empty artifact is written in its place.
    SourceMissing { path: PathBuf },
    /// An artifact was written.
    Expanded {
        source: PathBuf,
        output: PathBuf,
        directives: usize,
    },
}

pub trait EventSink {
    fn emit(&self, event: ExpandEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ExpandEvent) {}
}

/// A dropped receiver is not an error; the events just go nowhere.
impl EventSink for Sender<ExpandEvent> {
    fn emit(&self, event: ExpandEvent) {
        let _ = self.send(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: ExpandEvent) {
        (**self).emit(event)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::mpsc;

    /// Keeps every event in order for assertions.
    #[derive(Default)]
    pub struct RecordingSink {
        events: RefCell<Vec<ExpandEvent>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<ExpandEvent> {
            self.events.borrow().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: ExpandEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn sender_forwards_events() {
        let (tx, rx) = mpsc::channel();
        tx.emit(ExpandEvent::SourceMissing {
            path: PathBuf::from("/tmp/x"),
        });
        drop(tx);

        let received: Vec<_> = rx.iter().collect();
        assert_eq!(
            received,
            vec![ExpandEvent::SourceMissing {
                path: PathBuf::from("/tmp/x")
            }]
        );
    }

    #[test]
    fn sender_with_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        tx.emit(ExpandEvent::DestDirCreated {
            path: PathBuf::from("/tmp/out"),
        });
    }

    #[test]
    fn reference_to_sink_is_a_sink() {
        fn emit_owned(sink: impl EventSink) {
            sink.emit(ExpandEvent::DestDirCreated {
                path: PathBuf::from("out"),
            });
        }

        let sink = RecordingSink::new();
        emit_owned(&sink);
        assert_eq!(sink.events().len(), 1);
    }
}
