//! Append-only sequence buffers owned by one trial at a time.

use crate::event::{EventKind, EventRecord};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct BufferState {
    records: Vec<EventRecord>,
    diagnostics: Vec<String>,
}

/// Ordered record of the events observed during one trial.
///
/// Cloning yields another handle to the same buffer; listeners installed by
/// the recorder each hold one. The handle is `!Send`: recording happens on a
/// single logical thread, and concurrent trials use separate buffers.
#[derive(Clone)]
pub struct SequenceBuffer {
    name: Rc<str>,
    state: Rc<RefCell<BufferState>>,
}

impl fmt::Debug for SequenceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceBuffer")
            .field("name", &self.name)
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl SequenceBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            state: Rc::default(),
        }
    }

    /// Create a buffer pre-filled with records
    #[must_use]
    pub fn from_records(name: &str, records: Vec<EventRecord>) -> Self {
        let buffer = Self::new(name);
        buffer.state.borrow_mut().records = records;
        buffer
    }

    /// Create a buffer of bare records, one per kind
    #[must_use]
    pub fn from_kinds(name: &str, kinds: &[EventKind]) -> Self {
        Self::from_records(name, kinds.iter().copied().map(EventRecord::bare).collect())
    }

    /// Buffer name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one record
    pub fn push(&self, record: EventRecord) {
        self.state.borrow_mut().records.push(record);
    }

    /// Append one diagnostic line
    pub fn log(&self, line: impl Into<String>) {
        self.state.borrow_mut().diagnostics.push(line.into());
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    /// Whether no record has been appended since creation or the last reset
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().records.is_empty()
    }

    /// Borrow the records in arrival order.
    ///
    /// Appending while the borrow is held panics; validate only after the
    /// trial is over.
    #[must_use]
    pub fn records(&self) -> Ref<'_, [EventRecord]> {
        Ref::map(self.state.borrow(), |state| state.records.as_slice())
    }

    /// Copy of the records
    #[must_use]
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.state.borrow().records.clone()
    }

    /// Kinds of the records in arrival order
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.state.borrow().records.iter().map(|r| r.kind).collect()
    }

    /// Diagnostic text, one line per recorded event
    #[must_use]
    pub fn diagnostics(&self) -> String {
        let state = self.state.borrow();
        let mut text = String::new();
        for line in &state.diagnostics {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Number of diagnostic lines
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.state.borrow().diagnostics.len()
    }

    /// Clear records and diagnostic text
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.records.clear();
        state.diagnostics.clear();
    }

    /// Whether both handles point at the same buffer
    #[must_use]
    pub fn same_buffer(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let buffer = SequenceBuffer::new("tap");
        assert!(buffer.is_empty());
        assert_eq!(buffer.name(), "tap");
        assert_eq!(buffer.diagnostics(), "");
    }

    #[test]
    fn test_push_preserves_order() {
        let buffer = SequenceBuffer::new("tap");
        buffer.push(EventRecord::bare(EventKind::Entered));
        buffer.push(EventRecord::bare(EventKind::Moved));
        buffer.push(EventRecord::bare(EventKind::Exited));
        assert_eq!(
            buffer.kinds(),
            vec![EventKind::Entered, EventKind::Moved, EventKind::Exited]
        );
        assert_eq!(buffer.records().len(), 3);
    }

    #[test]
    fn test_clones_share_state() {
        let buffer = SequenceBuffer::new("shared");
        let handle = buffer.clone();
        handle.push(EventRecord::bare(EventKind::Tapped));
        assert_eq!(buffer.len(), 1);
        assert!(buffer.same_buffer(&handle));
        assert!(!buffer.same_buffer(&SequenceBuffer::new("shared")));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let buffer = SequenceBuffer::from_kinds("tap", &[EventKind::Entered]);
        buffer.log("[tap] Entered");
        buffer.clear();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.diagnostic_count(), 0);
    }

    #[test]
    fn test_diagnostics_joined_by_lines() {
        let buffer = SequenceBuffer::new("tap");
        buffer.log("[tap] Tapped");
        buffer.log("[tap] Exited");
        assert_eq!(buffer.diagnostics(), "[tap] Tapped\n[tap] Exited\n");
    }

    #[test]
    fn test_snapshot_is_independent() {
        let buffer = SequenceBuffer::from_kinds("tap", &[EventKind::Pressed]);
        let snapshot = buffer.snapshot();
        buffer.clear();
        assert_eq!(snapshot.len(), 1);
    }
}
