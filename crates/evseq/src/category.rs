//! Category masks selecting which event families a target subscribes to.

use crate::event::EventKind;

bitflags::bitflags! {
    /// Event categories a recorder installs listeners for.
    ///
    /// Combine with bitwise OR: `CategoryMask::POINTER | CategoryMask::GESTURE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CategoryMask: u8 {
        /// Entered, Pressed, Moved, Released, Canceled, Exited, CaptureLost
        const POINTER = 1 << 0;
        /// Tapped, DoubleTapped
        const GESTURE = 1 << 2;
        /// Click / hyperlink click / item click, normalized to Activated
        const ACTIVATION = 1 << 3;
    }
}

impl CategoryMask {
    /// Category an event kind is delivered through
    #[must_use]
    pub const fn of(kind: EventKind) -> Self {
        match kind {
            EventKind::Tapped | EventKind::DoubleTapped => Self::GESTURE,
            EventKind::Activated => Self::ACTIVATION,
            _ => Self::POINTER,
        }
    }

    /// Whether events of `kind` are recorded under this mask
    #[must_use]
    pub const fn covers(self, kind: EventKind) -> bool {
        self.contains(Self::of(kind))
    }

    /// Event kinds recorded under this mask
    #[must_use]
    pub fn kinds(self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| self.covers(*kind))
            .collect()
    }
}
