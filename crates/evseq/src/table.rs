//! Expected grammars per input profile, target shape and platform.
//!
//! Platform divergence lives here as data. The validator never branches on
//! the platform, the device or the control that produced an event.

use crate::event::{DeviceClass, EventKind, InputProfile, PointerDeviceType};
use crate::grammar::Grammar;
use crate::result::{EvseqError, EvseqResult};
use crate::target::TargetShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// UI platform whose event suppression quirks select table entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    /// Native Windows (reference behavior)
    Windows,
    /// WebAssembly in a browser
    Wasm,
    /// iOS
    Ios,
    /// Android
    Android,
    /// Desktop Skia backends
    #[default]
    Skia,
}

impl Platform {
    /// Every platform
    pub const ALL: [Self; 5] = [
        Self::Windows,
        Self::Wasm,
        Self::Ios,
        Self::Android,
        Self::Skia,
    ];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Wasm => "Wasm",
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::Skia => "Skia",
        }
    }

    /// Whether pens report hover. On iOS a pen is handled exactly like a finger.
    #[must_use]
    pub const fn pen_supports_hover(self) -> bool {
        !matches!(self, Self::Ios)
    }

    /// Device used by automated runs when none is selected
    #[must_use]
    pub const fn default_device(self) -> PointerDeviceType {
        match self {
            Self::Ios | Self::Android => PointerDeviceType::Touch,
            Self::Windows | Self::Wasm | Self::Skia => PointerDeviceType::Mouse,
        }
    }

    /// Whether Entered/Exited on a parent are only generated around a press,
    /// so a child that handles the press hides the whole pointer sequence
    #[must_use]
    const fn touch_enter_follows_press(self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = EvseqError;

    fn from_str(s: &str) -> EvseqResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "uwp" | "winui" => Ok(Self::Windows),
            "wasm" | "web" | "browser" => Ok(Self::Wasm),
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "skia" | "desktop" => Ok(Self::Skia),
            _ => Err(EvseqError::unknown("platform", s)),
        }
    }
}

/// Grammar table keyed by `(InputProfile, TargetShape)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarTable {
    platform: Platform,
    pen_supports_hover: bool,
    entries: BTreeMap<(InputProfile, TargetShape), Grammar>,
}

impl GrammarTable {
    /// Create an empty table
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            pen_supports_hover: platform.pen_supports_hover(),
            entries: BTreeMap::new(),
        }
    }

    /// Build the reference table for a platform
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        let mut table = Self::new(platform);
        for profile in InputProfile::ALL {
            for shape in TargetShape::ALL {
                table.set(profile, shape, reference_grammar(platform, profile, shape));
            }
        }
        table
    }

    /// Override the platform's pen hover capability
    #[must_use]
    pub const fn with_pen_hover(mut self, pen_supports_hover: bool) -> Self {
        self.pen_supports_hover = pen_supports_hover;
        self
    }

    /// Platform the table was built for
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether pens resolve to the hover profile
    #[must_use]
    pub const fn pen_supports_hover(&self) -> bool {
        self.pen_supports_hover
    }

    /// Insert or replace an entry
    pub fn set(&mut self, profile: InputProfile, shape: TargetShape, grammar: Grammar) {
        self.entries.insert((profile, shape), grammar);
    }

    /// Remove an entry
    pub fn remove(&mut self, profile: InputProfile, shape: TargetShape) -> Option<Grammar> {
        self.entries.remove(&(profile, shape))
    }

    /// Grammar for a profile and shape
    #[must_use]
    pub fn get(&self, profile: InputProfile, shape: TargetShape) -> Option<&Grammar> {
        self.entries.get(&(profile, shape))
    }

    /// Resolve a reported device type into a device class on this platform
    #[must_use]
    pub const fn device_class(&self, device: PointerDeviceType) -> DeviceClass {
        device.with_pen_hover(self.pen_supports_hover)
    }

    /// Grammar for a device class and shape
    #[must_use]
    pub fn grammar_for(&self, device: DeviceClass, shape: TargetShape) -> Option<&Grammar> {
        self.get(device.profile(), shape)
    }

    /// Grammar for a reported device type and shape
    pub fn lookup(&self, device: PointerDeviceType, shape: TargetShape) -> EvseqResult<&Grammar> {
        let class = self.device_class(device);
        self.grammar_for(class, shape)
            .ok_or_else(|| EvseqError::NoGrammar {
                device: class.to_string(),
                shape: shape.to_string(),
                platform: self.platform.to_string(),
            })
    }

    /// Entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (InputProfile, TargetShape, &Grammar)> {
        self.entries
            .iter()
            .map(|((profile, shape), grammar)| (*profile, *shape, grammar))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reference expectation for one table cell
fn reference_grammar(platform: Platform, profile: InputProfile, shape: TargetShape) -> Grammar {
    use EventKind::{Activated, CaptureLost, Entered, Exited, Moved, Pressed, Released, Tapped};

    let g = Grammar::empty();
    match (profile, shape) {
        (InputProfile::Hover, TargetShape::Element) => g
            .one(Entered)
            // Could be optional, but browser automation always produces one
            .some(Moved)
            .one(Pressed)
            .maybe_some(Moved)
            .one(Released)
            .one(Tapped)
            .maybe_some(Moved)
            .one(Exited),
        (InputProfile::Contact, TargetShape::Element) => g
            .one(Entered)
            .one(Pressed)
            .maybe_some(Moved)
            .one(Released)
            .one(Tapped)
            .one(Exited),

        // Press and release are handled by the button; it captures the pointer
        // and gives it back through CaptureLost.
        (InputProfile::Hover, TargetShape::Button) => g
            .one(Entered)
            .some(Moved)
            .one(Activated)
            .one(CaptureLost)
            .one(Tapped)
            .maybe_some(Moved)
            .one(Exited),
        (InputProfile::Contact, TargetShape::Button) => g
            .one(Entered)
            .maybe_some(Moved)
            .one(Activated)
            .one(CaptureLost)
            .one(Tapped)
            .one(Exited),

        // The text element sees the pointer, the inline link raises the click.
        // The link mutes the press, so no Tapped and no CaptureLost.
        (InputProfile::Contact, TargetShape::Hyperlink) if platform == Platform::Ios => {
            g.one(Activated)
        }
        (profile, TargetShape::Hyperlink) => {
            let g = g.one(Entered);
            let g = match profile {
                InputProfile::Hover => g.some(Moved),
                InputProfile::Contact => g.maybe_some(Moved),
            };
            let g = match platform {
                Platform::Windows => g.one(Released).one(Activated),
                // Released is never raised without a preceding press on the same element
                Platform::Wasm => g.one(Activated),
                Platform::Ios | Platform::Android | Platform::Skia => {
                    g.one(Activated).one(Released)
                }
            };
            let g = match profile {
                InputProfile::Hover => g.maybe_some(Moved),
                InputProfile::Contact => g,
            };
            g.one(Exited)
        }

        // The item handles press and release. Only Windows still raises
        // Tapped on the list.
        (InputProfile::Contact, TargetShape::ListItem) if platform.touch_enter_follows_press() => {
            g.one(Activated)
        }
        (InputProfile::Hover, TargetShape::ListItem) => {
            let g = g.one(Entered).some(Moved).one(Activated);
            let g = if platform == Platform::Windows {
                g.one(Tapped)
            } else {
                g
            };
            g.maybe_some(Moved).one(Exited)
        }
        (InputProfile::Contact, TargetShape::ListItem) => {
            let g = g.one(Entered).one(Activated);
            let g = if platform == Platform::Windows {
                g.one(Tapped)
            } else {
                g
            };
            g.one(Exited)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notation(platform: Platform, profile: InputProfile, shape: TargetShape) -> String {
        GrammarTable::for_platform(platform)
            .get(profile, shape)
            .unwrap()
            .to_string()
    }

    mod platform_tests {
        use super::*;

        #[test]
        fn test_pen_hover() {
            assert!(Platform::Windows.pen_supports_hover());
            assert!(Platform::Android.pen_supports_hover());
            assert!(!Platform::Ios.pen_supports_hover());
        }

        #[test]
        fn test_default_device() {
            assert_eq!(Platform::Ios.default_device(), PointerDeviceType::Touch);
            assert_eq!(Platform::Wasm.default_device(), PointerDeviceType::Mouse);
        }

        #[test]
        fn test_parse() {
            assert_eq!("WASM".parse::<Platform>().unwrap(), Platform::Wasm);
            assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
            assert!("amiga".parse::<Platform>().is_err());
        }
    }

    mod reference_tests {
        use super::*;

        #[test]
        fn test_table_is_complete() {
            for platform in Platform::ALL {
                let table = GrammarTable::for_platform(platform);
                assert_eq!(table.len(), 8, "{platform}");
            }
        }

        #[test]
        fn test_reference_grammars_are_unambiguous() {
            for platform in Platform::ALL {
                for (profile, shape, grammar) in GrammarTable::for_platform(platform).entries() {
                    assert!(
                        grammar.ambiguities().is_empty(),
                        "{platform} {profile} {shape}: {grammar}"
                    );
                }
            }
        }

        #[test]
        fn test_element_grammars() {
            assert_eq!(
                notation(Platform::Skia, InputProfile::Hover, TargetShape::Element),
                "Entered Moved+ Pressed Moved* Released Tapped Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Skia, InputProfile::Contact, TargetShape::Element),
                "Entered Pressed Moved* Released Tapped Exited"
            );
        }

        #[test]
        fn test_button_grammars() {
            assert_eq!(
                notation(Platform::Wasm, InputProfile::Hover, TargetShape::Button),
                "Entered Moved+ Activated CaptureLost Tapped Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Android, InputProfile::Contact, TargetShape::Button),
                "Entered Moved* Activated CaptureLost Tapped Exited"
            );
        }

        #[test]
        fn test_hyperlink_divergence() {
            assert_eq!(
                notation(Platform::Windows, InputProfile::Hover, TargetShape::Hyperlink),
                "Entered Moved+ Released Activated Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Wasm, InputProfile::Hover, TargetShape::Hyperlink),
                "Entered Moved+ Activated Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Skia, InputProfile::Hover, TargetShape::Hyperlink),
                "Entered Moved+ Activated Released Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Ios, InputProfile::Contact, TargetShape::Hyperlink),
                "Activated"
            );
            assert_eq!(
                notation(Platform::Android, InputProfile::Contact, TargetShape::Hyperlink),
                "Entered Moved* Activated Released Exited"
            );
        }

        #[test]
        fn test_list_item_divergence() {
            assert_eq!(
                notation(Platform::Windows, InputProfile::Hover, TargetShape::ListItem),
                "Entered Moved+ Activated Tapped Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Skia, InputProfile::Hover, TargetShape::ListItem),
                "Entered Moved+ Activated Moved* Exited"
            );
            assert_eq!(
                notation(Platform::Android, InputProfile::Contact, TargetShape::ListItem),
                "Activated"
            );
            assert_eq!(
                notation(Platform::Windows, InputProfile::Contact, TargetShape::ListItem),
                "Entered Activated Tapped Exited"
            );
            assert_eq!(
                notation(Platform::Wasm, InputProfile::Contact, TargetShape::ListItem),
                "Entered Activated Exited"
            );
        }
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_pen_resolves_through_platform() {
            let ios = GrammarTable::for_platform(Platform::Ios);
            let pen = ios.lookup(PointerDeviceType::Pen, TargetShape::Element).unwrap();
            let touch = ios.lookup(PointerDeviceType::Touch, TargetShape::Element).unwrap();
            assert_eq!(pen, touch);

            let skia = GrammarTable::for_platform(Platform::Skia);
            let pen = skia.lookup(PointerDeviceType::Pen, TargetShape::Element).unwrap();
            let mouse = skia.lookup(PointerDeviceType::Mouse, TargetShape::Element).unwrap();
            assert_eq!(pen, mouse);
        }

        #[test]
        fn test_pen_hover_override() {
            let table = GrammarTable::for_platform(Platform::Skia).with_pen_hover(false);
            assert_eq!(
                table.device_class(PointerDeviceType::Pen).profile(),
                InputProfile::Contact
            );
        }

        #[test]
        fn test_missing_entry_is_error() {
            let mut table = GrammarTable::for_platform(Platform::Wasm);
            table.remove(InputProfile::Contact, TargetShape::Button);
            let err = table
                .lookup(PointerDeviceType::Touch, TargetShape::Button)
                .unwrap_err();
            assert!(matches!(err, EvseqError::NoGrammar { .. }));
        }

        #[test]
        fn test_set_replaces() {
            let mut table = GrammarTable::new(Platform::Skia);
            assert!(table.is_empty());
            table.set(InputProfile::Hover, TargetShape::Element, Grammar::empty());
            table.set(
                InputProfile::Hover,
                TargetShape::Element,
                Grammar::empty().one(EventKind::Tapped),
            );
            assert_eq!(table.len(), 1);
            assert_eq!(
                table
                    .get(InputProfile::Hover, TargetShape::Element)
                    .map(Grammar::len),
                Some(1)
            );
        }
    }
}
