//! Event recorder: bridges target notifications into a sequence buffer.
//!
//! The recorder does not interpret anything. Each listener it installs appends
//! exactly one record and emits one diagnostic line. Activation channels of
//! every control shape are normalized to [`EventKind::Activated`] here, so
//! grammars never depend on which control raised the activation.

use crate::buffer::SequenceBuffer;
use crate::category::CategoryMask;
use crate::event::{
    ActivationSource, EventKind, EventPayload, EventRecord, GesturePayload, PointerPayload,
};
use crate::target::{InteractiveTarget, ListenerId};
use std::fmt;
use std::rc::{Rc, Weak};

/// Listeners installed by one [`EventRecorder::attach`] call.
///
/// Dropping the subscription detaches every listener it owns.
#[must_use = "dropping a Subscription detaches its listeners"]
pub struct Subscription {
    target: Weak<dyn InteractiveTarget>,
    target_name: String,
    mask: CategoryMask,
    ids: Vec<ListenerId>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("target", &self.target_name)
            .field("mask", &self.mask)
            .field("listeners", &self.ids.len())
            .finish()
    }
}

impl Subscription {
    /// Name of the subscribed target
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Mask the subscription was created with
    #[must_use]
    pub const fn mask(&self) -> CategoryMask {
        self.mask
    }

    /// Number of listeners still installed by this subscription
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.ids.len()
    }

    /// Whether no channel matched the mask
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove every listener. Safe to call more than once.
    pub fn detach(&mut self) {
        let ids = std::mem::take(&mut self.ids);
        if let Some(target) = self.target.upgrade() {
            for id in ids {
                target.unsubscribe(id);
            }
            tracing::debug!(target_name = %self.target_name, "detached recorder listeners");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Installs recording listeners on interactive targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecorder {
    /// Append a diagnostic line per recorded event
    pub emit_diagnostics: bool,
    /// Request pointer capture when a press is recorded
    pub capture_on_press: bool,
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self {
            emit_diagnostics: true,
            capture_on_press: false,
        }
    }
}

impl EventRecorder {
    /// Create a recorder with diagnostics enabled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable diagnostic lines
    #[must_use]
    pub const fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.emit_diagnostics = enabled;
        self
    }

    /// Capture the pointer on every recorded press
    #[must_use]
    pub const fn with_capture_on_press(mut self, enabled: bool) -> Self {
        self.capture_on_press = enabled;
        self
    }

    /// Subscribe `target` to every category in `mask`, recording into `buffer`.
    ///
    /// Categories the target has no channel for are skipped silently.
    pub fn attach<T>(
        &self,
        target: &Rc<T>,
        mask: CategoryMask,
        buffer: &SequenceBuffer,
    ) -> Subscription
    where
        T: InteractiveTarget + 'static,
    {
        let weak: Weak<T> = Rc::downgrade(target);
        let weak: Weak<dyn InteractiveTarget> = weak;
        let name = target.name().to_string();
        let mut ids = Vec::new();

        if mask.contains(CategoryMask::POINTER) {
            for kind in EventKind::POINTER {
                let sink = self.sink(&name, buffer);
                let capture = (self.capture_on_press && kind == EventKind::Pressed)
                    .then(|| weak.clone());
                let listener = Box::new(move |payload: &PointerPayload| {
                    sink.pointer(kind, payload);
                    if let Some(target) = capture.as_ref().and_then(Weak::upgrade) {
                        let captured = target.capture_pointer(payload.pointer_id);
                        sink.note(&format!("Captured: {captured}"));
                    }
                });
                ids.extend(target.subscribe_pointer(kind, listener));
            }
        }

        if mask.contains(CategoryMask::GESTURE) {
            for kind in EventKind::GESTURE {
                let sink = self.sink(&name, buffer);
                let listener = Box::new(move |payload: &GesturePayload| {
                    sink.event(kind, EventPayload::Gesture(*payload));
                });
                ids.extend(target.subscribe_gesture(kind, listener));
            }
        }

        if mask.contains(CategoryMask::ACTIVATION) {
            let sink = self.sink(&name, buffer);
            let listener = Box::new(move |source: &ActivationSource| {
                sink.event(source.kind(), EventPayload::Activation(*source));
            });
            if let Some((source, id)) = target.subscribe_activation(listener) {
                tracing::trace!(target_name = %name, channel = source.channel_name(), "activation channel");
                ids.push(id);
            }
        }

        tracing::debug!(
            target_name = %name,
            buffer = buffer.name(),
            mask = ?mask,
            listeners = ids.len(),
            "attached recorder"
        );

        Subscription {
            target: weak,
            target_name: name,
            mask,
            ids,
        }
    }

    /// Clear a buffer and its diagnostic text. Idempotent.
    pub fn reset(buffer: &SequenceBuffer) {
        buffer.clear();
        tracing::debug!(buffer = buffer.name(), "reset sequence buffer");
    }

    fn sink(&self, name: &str, buffer: &SequenceBuffer) -> Sink {
        Sink {
            name: Rc::from(name),
            buffer: buffer.clone(),
            diagnostics: self.emit_diagnostics,
        }
    }
}

/// Shared append path of every listener
struct Sink {
    name: Rc<str>,
    buffer: SequenceBuffer,
    diagnostics: bool,
}

impl Sink {
    fn pointer(&self, kind: EventKind, payload: &PointerPayload) {
        self.buffer.push(EventRecord::new(
            self.name.as_ref(),
            kind,
            EventPayload::Pointer(payload.clone()),
        ));
        self.note(&format!("{kind}: {payload}"));
    }

    fn event(&self, kind: EventKind, payload: EventPayload) {
        self.buffer
            .push(EventRecord::new(self.name.as_ref(), kind, payload));
        self.note(kind.name());
    }

    fn note(&self, message: &str) {
        if !self.diagnostics {
            return;
        }
        let line = format!("[{}] {message}", self.name);
        tracing::debug!(buffer = self.buffer.name(), "{line}");
        self.buffer.log(line);
    }
}
