//! Interactive targets: the notification channels a recorder subscribes to.
//!
//! The real dispatch pipeline (hit-testing, routing, capture) lives outside
//! this crate. [`InteractiveTarget`] is the seam it plugs into, and
//! [`SimulatedTarget`] is an in-memory implementation that tests and demos use
//! to raise notifications by hand.

use crate::event::{
    ActivationSource, EventKind, GesturePayload, Point, PointerDeviceType, PointerPayload,
};
use crate::result::{EvseqError, EvseqResult};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Callback installed on a notification channel
pub type Listener<T> = Box<dyn FnMut(&T)>;

/// Handle identifying one installed listener on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw id value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Composition of the element under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetShape {
    /// Plain element with pointer and gesture channels
    Element,
    /// Button-like control; consumes press/release and raises Click
    Button,
    /// Inline hyperlink nested in a text element; only raises Click
    Hyperlink,
    /// List item; consumes press/release and raises ItemClick
    ListItem,
}

impl TargetShape {
    /// Every shape
    pub const ALL: [Self; 4] = [Self::Element, Self::Button, Self::Hyperlink, Self::ListItem];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Element => "Element",
            Self::Button => "Button",
            Self::Hyperlink => "Hyperlink",
            Self::ListItem => "ListItem",
        }
    }

    /// Whether targets of this shape expose pointer and gesture channels
    #[must_use]
    pub const fn has_pointer_channels(self) -> bool {
        !matches!(self, Self::Hyperlink)
    }

    /// Activation channel exposed by targets of this shape
    #[must_use]
    pub const fn activation_source(self) -> Option<ActivationSource> {
        match self {
            Self::Element => None,
            Self::Button => Some(ActivationSource::ButtonClick),
            Self::Hyperlink => Some(ActivationSource::HyperlinkClick),
            Self::ListItem => Some(ActivationSource::ItemClick),
        }
    }
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetShape {
    type Err = EvseqError;

    fn from_str(s: &str) -> EvseqResult<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "element" | "tap" => Ok(Self::Element),
            "button" | "click" => Ok(Self::Button),
            "hyperlink" | "link" => Ok(Self::Hyperlink),
            "listitem" | "listview" | "item" => Ok(Self::ListItem),
            _ => Err(EvseqError::unknown("target shape", s)),
        }
    }
}

/// An element that exposes interaction notification channels.
///
/// Every `subscribe_*` method returns `None` when the target has no such
/// channel; callers treat that as a no-op, never as an error.
pub trait InteractiveTarget {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Install a listener on a pointer-family channel
    fn subscribe_pointer(
        &self,
        kind: EventKind,
        listener: Listener<PointerPayload>,
    ) -> Option<ListenerId>;

    /// Install a listener on a gesture channel (Tapped, DoubleTapped)
    fn subscribe_gesture(
        &self,
        kind: EventKind,
        listener: Listener<GesturePayload>,
    ) -> Option<ListenerId>;

    /// Install a listener on the target's activation channel
    fn subscribe_activation(
        &self,
        listener: Listener<ActivationSource>,
    ) -> Option<(ActivationSource, ListenerId)>;

    /// Remove a listener. Returns whether it was installed.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Capture a pointer. Returns whether capture was granted.
    fn capture_pointer(&self, _pointer_id: u32) -> bool {
        false
    }
}

struct Slot<T> {
    id: ListenerId,
    listener: Listener<T>,
}

struct Channel<T> {
    slots: Vec<Slot<T>>,
    /// Ids of slots taken out by an in-flight dispatch
    running: Vec<ListenerId>,
    /// Running ids unsubscribed before their dispatch returned
    removed: Vec<ListenerId>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            running: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> Channel<T> {
    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        if self.slots.len() != before {
            return true;
        }
        if self.running.contains(&id) && !self.removed.contains(&id) {
            self.removed.push(id);
            return true;
        }
        false
    }

    fn is_removed(&self, id: ListenerId) -> bool {
        self.removed.contains(&id)
    }

    fn len(&self) -> usize {
        self.slots.len() + self.running.len() - self.removed.len()
    }
}

/// Invoke every listener of a channel in subscription order.
///
/// Slots are taken out while they run so a listener may subscribe on the same
/// target without a borrow conflict. A running slot unsubscribed during the
/// dispatch is skipped if it has not run yet and dropped when the slots are put
/// back.
fn dispatch<T>(channel: &RefCell<Channel<T>>, payload: &T) -> usize {
    let mut running = {
        let mut channel = channel.borrow_mut();
        let running = std::mem::take(&mut channel.slots);
        channel.running.extend(running.iter().map(|slot| slot.id));
        running
    };
    let mut count = 0;
    for slot in &mut running {
        if channel.borrow().is_removed(slot.id) {
            continue;
        }
        (slot.listener)(payload);
        count += 1;
    }
    let mut channel = channel.borrow_mut();
    let mine: Vec<ListenerId> = running.iter().map(|slot| slot.id).collect();
    channel.running.retain(|id| !mine.contains(id));
    let removed: Vec<ListenerId> = channel
        .removed
        .iter()
        .copied()
        .filter(|id| mine.contains(id))
        .collect();
    channel.removed.retain(|id| !mine.contains(id));
    running.retain(|slot| !removed.contains(&slot.id));
    let added = std::mem::take(&mut channel.slots);
    running.extend(added);
    channel.slots = running;
    count
}

/// In-memory target that raises notifications on demand
pub struct SimulatedTarget {
    name: String,
    shape: TargetShape,
    next_id: Cell<u64>,
    pointer: HashMap<EventKind, RefCell<Channel<PointerPayload>>>,
    gesture: HashMap<EventKind, RefCell<Channel<GesturePayload>>>,
    activation: Option<(ActivationSource, RefCell<Channel<ActivationSource>>)>,
    captured: Cell<Option<u32>>,
}

impl fmt::Debug for SimulatedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedTarget")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("listeners", &self.listener_count())
            .field("captured", &self.captured.get())
            .finish()
    }
}

impl SimulatedTarget {
    /// Create a target whose channels follow `shape`
    #[must_use]
    pub fn new(name: impl Into<String>, shape: TargetShape) -> Self {
        let mut pointer = HashMap::new();
        let mut gesture = HashMap::new();
        if shape.has_pointer_channels() {
            for kind in EventKind::POINTER {
                pointer.insert(kind, RefCell::new(Channel::default()));
            }
            for kind in EventKind::GESTURE {
                gesture.insert(kind, RefCell::new(Channel::default()));
            }
        }
        Self {
            name: name.into(),
            shape,
            next_id: Cell::new(1),
            pointer,
            gesture,
            activation: shape
                .activation_source()
                .map(|source| (source, RefCell::new(Channel::default()))),
            captured: Cell::new(None),
        }
    }

    /// Target shape
    #[must_use]
    pub const fn shape(&self) -> TargetShape {
        self.shape
    }

    /// Pointer currently captured by this target
    #[must_use]
    pub fn captured_pointer(&self) -> Option<u32> {
        self.captured.get()
    }

    /// Number of installed listeners across all channels
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let pointer: usize = self.pointer.values().map(|c| c.borrow().len()).sum();
        let gesture: usize = self.gesture.values().map(|c| c.borrow().len()).sum();
        let activation = self
            .activation
            .as_ref()
            .map_or(0, |(_, c)| c.borrow().len());
        pointer + gesture + activation
    }

    /// Raise a pointer-family notification. Returns how many listeners ran.
    pub fn raise_pointer(&self, kind: EventKind, payload: &PointerPayload) -> usize {
        self.pointer
            .get(&kind)
            .map_or(0, |channel| dispatch(channel, payload))
    }

    /// Raise a gesture notification. Returns how many listeners ran.
    pub fn raise_gesture(&self, kind: EventKind, payload: &GesturePayload) -> usize {
        self.gesture
            .get(&kind)
            .map_or(0, |channel| dispatch(channel, payload))
    }

    /// Raise the activation notification. Returns how many listeners ran.
    pub fn raise_activation(&self) -> usize {
        self.activation
            .as_ref()
            .map_or(0, |(source, channel)| dispatch(channel, source))
    }

    /// Raise a notification of any kind with a default payload for `device`
    pub fn raise(&self, kind: EventKind, device: PointerDeviceType) -> usize {
        match kind {
            EventKind::Activated => self.raise_activation(),
            EventKind::Tapped | EventKind::DoubleTapped => {
                self.raise_gesture(kind, &GesturePayload::new(device, Point::default()))
            }
            _ => {
                let in_contact = match kind {
                    EventKind::Pressed | EventKind::Moved => device != PointerDeviceType::Mouse,
                    _ => false,
                };
                let payload = PointerPayload::new(1, device).with_contact(in_contact);
                self.raise_pointer(kind, &payload)
            }
        }
    }

    /// Release pointer capture, raising CaptureLost if a pointer was captured
    pub fn release_capture(&self, device: PointerDeviceType) -> bool {
        match self.captured.take() {
            Some(pointer_id) => {
                self.raise_pointer(
                    EventKind::CaptureLost,
                    &PointerPayload::new(pointer_id, device),
                );
                true
            }
            None => false,
        }
    }

    fn next_listener_id(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ListenerId(id)
    }
}

impl InteractiveTarget for SimulatedTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe_pointer(
        &self,
        kind: EventKind,
        listener: Listener<PointerPayload>,
    ) -> Option<ListenerId> {
        let channel = self.pointer.get(&kind)?;
        let id = self.next_listener_id();
        channel.borrow_mut().slots.push(Slot { id, listener });
        Some(id)
    }

    fn subscribe_gesture(
        &self,
        kind: EventKind,
        listener: Listener<GesturePayload>,
    ) -> Option<ListenerId> {
        let channel = self.gesture.get(&kind)?;
        let id = self.next_listener_id();
        channel.borrow_mut().slots.push(Slot { id, listener });
        Some(id)
    }

    fn subscribe_activation(
        &self,
        listener: Listener<ActivationSource>,
    ) -> Option<(ActivationSource, ListenerId)> {
        let (source, channel) = self.activation.as_ref()?;
        let id = self.next_listener_id();
        channel.borrow_mut().slots.push(Slot { id, listener });
        Some((*source, id))
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.pointer.values().any(|c| c.borrow_mut().remove(id))
            || self.gesture.values().any(|c| c.borrow_mut().remove(id))
            || self
                .activation
                .as_ref()
                .is_some_and(|(_, c)| c.borrow_mut().remove(id))
    }

    fn capture_pointer(&self, pointer_id: u32) -> bool {
        if !self.shape.has_pointer_channels() {
            return false;
        }
        self.captured.set(Some(pointer_id));
        true
    }
}
