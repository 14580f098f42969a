//! Event kinds and payloads recorded from interactive targets.

use crate::result::{EvseqError, EvseqResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family an event kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventFamily {
    /// Low-level notification tied to one tracked pointer
    Pointer,
    /// Derived by a gesture recognizer or an activation-capable control
    Synthesized,
}

/// Kind of a recorded event.
///
/// The alphabet the validator matches against. Records carry richer payloads,
/// but grammars only ever look at the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    /// Pointer entered the target bounds
    Entered,
    /// Pointer made contact / button went down
    Pressed,
    /// Pointer moved
    Moved,
    /// Pointer contact ended / button went up
    Released,
    /// Pointer interaction was canceled by the platform
    Canceled,
    /// Pointer left the target bounds
    Exited,
    /// Target lost pointer capture
    CaptureLost,
    /// Tap recognized
    Tapped,
    /// Double tap recognized
    DoubleTapped,
    /// Target was actuated (click, hyperlink click or item click)
    Activated,
}

impl EventKind {
    /// Every event kind
    pub const ALL: [Self; 10] = [
        Self::Entered,
        Self::Pressed,
        Self::Moved,
        Self::Released,
        Self::Canceled,
        Self::Exited,
        Self::CaptureLost,
        Self::Tapped,
        Self::DoubleTapped,
        Self::Activated,
    ];

    /// The pointer-family kinds, in channel order
    pub const POINTER: [Self; 7] = [
        Self::Entered,
        Self::Pressed,
        Self::Moved,
        Self::Released,
        Self::Canceled,
        Self::Exited,
        Self::CaptureLost,
    ];

    /// The gesture kinds produced by the recognizer
    pub const GESTURE: [Self; 2] = [Self::Tapped, Self::DoubleTapped];

    /// Family of this kind
    #[must_use]
    pub const fn family(self) -> EventFamily {
        match self {
            Self::Entered
            | Self::Pressed
            | Self::Moved
            | Self::Released
            | Self::Canceled
            | Self::Exited
            | Self::CaptureLost => EventFamily::Pointer,
            Self::Tapped | Self::DoubleTapped | Self::Activated => EventFamily::Synthesized,
        }
    }

    /// Whether this is a pointer-family kind
    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(self.family(), EventFamily::Pointer)
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entered => "Entered",
            Self::Pressed => "Pressed",
            Self::Moved => "Moved",
            Self::Released => "Released",
            Self::Canceled => "Canceled",
            Self::Exited => "Exited",
            Self::CaptureLost => "CaptureLost",
            Self::Tapped => "Tapped",
            Self::DoubleTapped => "DoubleTapped",
            Self::Activated => "Activated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = EvseqError;

    fn from_str(s: &str) -> EvseqResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EvseqError::UnknownEventKind {
                name: s.to_string(),
            })
    }
}

/// Pointer device type as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerDeviceType {
    /// Mouse
    #[default]
    Mouse,
    /// Pen / stylus
    Pen,
    /// Touch (finger)
    Touch,
}

impl PointerDeviceType {
    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mouse => "Mouse",
            Self::Pen => "Pen",
            Self::Touch => "Touch",
        }
    }

    /// Resolve into a device class given the platform's pen hover capability
    #[must_use]
    pub const fn with_pen_hover(self, pen_supports_hover: bool) -> DeviceClass {
        match self {
            Self::Mouse => DeviceClass::Mouse,
            Self::Pen => DeviceClass::Pen {
                hover_capable: pen_supports_hover,
            },
            Self::Touch => DeviceClass::Touch,
        }
    }
}

impl fmt::Display for PointerDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PointerDeviceType {
    type Err = EvseqError;

    fn from_str(s: &str) -> EvseqResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mouse" => Ok(Self::Mouse),
            "pen" | "stylus" => Ok(Self::Pen),
            "touch" | "finger" => Ok(Self::Touch),
            _ => Err(EvseqError::unknown("device", s)),
        }
    }
}

/// Device class used to select a grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Mouse
    Mouse,
    /// Pen; without hover support it behaves exactly like touch
    Pen {
        /// Whether the platform reports hover for pens
        hover_capable: bool,
    },
    /// Touch
    Touch,
}

impl DeviceClass {
    /// The input profile grammars are keyed on
    #[must_use]
    pub const fn profile(self) -> InputProfile {
        match self {
            Self::Mouse
            | Self::Pen {
                hover_capable: true,
            } => InputProfile::Hover,
            Self::Pen {
                hover_capable: false,
            }
            | Self::Touch => InputProfile::Contact,
        }
    }

    /// Underlying pointer device type
    #[must_use]
    pub const fn device_type(self) -> PointerDeviceType {
        match self {
            Self::Mouse => PointerDeviceType::Mouse,
            Self::Pen { .. } => PointerDeviceType::Pen,
            Self::Touch => PointerDeviceType::Touch,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pen {
                hover_capable: false,
            } => f.write_str("Pen (no hover)"),
            other => f.write_str(other.device_type().name()),
        }
    }
}

/// Whether a device reports hover before contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputProfile {
    /// Mouse and hover-capable pens: Entered/Moved before any press
    Hover,
    /// Touch and non-hover pens: Entered is raised on contact
    Contact,
}

impl InputProfile {
    /// Both profiles
    pub const ALL: [Self; 2] = [Self::Hover, Self::Contact];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hover => "Hover",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for InputProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Payload delivered with every pointer-family notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerPayload {
    /// Pointer identifier
    pub pointer_id: u32,
    /// Device type of the pointer
    pub device: PointerDeviceType,
    /// Platform frame identifier
    pub frame_id: u64,
    /// Position relative to the observing element
    pub position: Point,
    /// Raw (unadjusted) position
    pub raw_position: Point,
    /// Pointer is in contact with the surface
    pub in_contact: bool,
    /// Pointer is in detection range
    pub in_range: bool,
    /// Pointer is the primary pointer
    pub is_primary: bool,
    /// Interpolated samples since the previous event, when the platform reports them
    pub intermediates: Option<usize>,
}

impl PointerPayload {
    /// Create a payload for a primary, in-range pointer at the origin
    #[must_use]
    pub const fn new(pointer_id: u32, device: PointerDeviceType) -> Self {
        Self {
            pointer_id,
            device,
            frame_id: 0,
            position: Point::new(0.0, 0.0),
            raw_position: Point::new(0.0, 0.0),
            in_contact: false,
            in_range: true,
            is_primary: true,
            intermediates: None,
        }
    }

    /// Set frame id
    #[must_use]
    pub const fn with_frame(mut self, frame_id: u64) -> Self {
        self.frame_id = frame_id;
        self
    }

    /// Set both position and raw position
    #[must_use]
    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self.raw_position = Point::new(x, y);
        self
    }

    /// Set raw position
    #[must_use]
    pub const fn with_raw_position(mut self, raw: Point) -> Self {
        self.raw_position = raw;
        self
    }

    /// Set in-contact flag
    #[must_use]
    pub const fn with_contact(mut self, in_contact: bool) -> Self {
        self.in_contact = in_contact;
        self
    }

    /// Set in-range flag
    #[must_use]
    pub const fn with_range(mut self, in_range: bool) -> Self {
        self.in_range = in_range;
        self
    }

    /// Set primary flag
    #[must_use]
    pub const fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Set intermediate sample count
    #[must_use]
    pub const fn with_intermediates(mut self, count: usize) -> Self {
        self.intermediates = Some(count);
        self
    }
}

impl fmt::Display for PointerPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} | frame={} | type={} | position={} | rawPosition={} | inContact={} | inRange={} | primary={} | intermediates=",
            self.pointer_id,
            self.frame_id,
            self.device,
            self.position,
            self.raw_position,
            self.in_contact,
            self.in_range,
            self.is_primary,
        )?;
        match self.intermediates {
            Some(count) => write!(f, "{count}"),
            None => f.write_str("null"),
        }
    }
}

/// Payload delivered with gesture notifications
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GesturePayload {
    /// Device that performed the gesture
    pub device: PointerDeviceType,
    /// Gesture position
    pub position: Point,
}

impl GesturePayload {
    /// Create a gesture payload
    #[must_use]
    pub const fn new(device: PointerDeviceType, position: Point) -> Self {
        Self { device, position }
    }
}

/// Concrete control shape that raised an activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationSource {
    /// Button-like control "click"
    ButtonClick,
    /// Hyperlink "click"
    HyperlinkClick,
    /// List "item-click"
    ItemClick,
}

impl ActivationSource {
    /// Normalized event kind. Every source maps to [`EventKind::Activated`].
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            Self::ButtonClick | Self::HyperlinkClick | Self::ItemClick => EventKind::Activated,
        }
    }

    /// Name of the notification channel on the control
    #[must_use]
    pub const fn channel_name(self) -> &'static str {
        match self {
            Self::ButtonClick | Self::HyperlinkClick => "Click",
            Self::ItemClick => "ItemClick",
        }
    }
}

/// Payload stored with a record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum EventPayload {
    /// No payload (imported traces, hand-built buffers)
    #[default]
    Empty,
    /// Pointer-family payload
    Pointer(PointerPayload),
    /// Gesture payload
    Gesture(GesturePayload),
    /// Activation payload
    Activation(ActivationSource),
}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Name of the target that observed the event
    #[serde(default)]
    pub source: String,
    /// Event kind
    pub kind: EventKind,
    /// Event payload
    #[serde(default)]
    pub payload: EventPayload,
}

impl EventRecord {
    /// Create a record
    #[must_use]
    pub fn new(source: impl Into<String>, kind: EventKind, payload: EventPayload) -> Self {
        Self {
            source: source.into(),
            kind,
            payload,
        }
    }

    /// Create a record with no source and no payload
    #[must_use]
    pub const fn bare(kind: EventKind) -> Self {
        Self {
            source: String::new(),
            kind,
            payload: EventPayload::Empty,
        }
    }

    /// Pointer payload, if this is a pointer-family record
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerPayload> {
        match &self.payload {
            EventPayload::Pointer(payload) => Some(payload),
            _ => None,
        }
    }
}
