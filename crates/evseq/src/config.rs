//! Harness configuration loaded from YAML or JSON.
//!
//! ```yaml
//! platform: Wasm
//! pen_supports_hover: true
//! capture_on_press: false
//! overrides:
//!   - profile: Contact
//!     shape: ListItem
//!     grammar: "Entered Activated Exited"
//! ```

use crate::event::InputProfile;
use crate::grammar::Grammar;
use crate::recorder::EventRecorder;
use crate::result::{EvseqError, EvseqResult};
use crate::table::{GrammarTable, Platform};
use crate::target::TargetShape;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Replacement grammar for one table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarOverride {
    /// Input profile of the entry
    pub profile: InputProfile,
    /// Target shape of the entry
    pub shape: TargetShape,
    /// Grammar in text notation
    pub grammar: Grammar,
}

/// Configuration for recording and validating trials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvseqConfig {
    /// Platform whose reference table is used
    pub platform: Platform,
    /// Whether pens hover; `None` uses the platform default
    pub pen_supports_hover: Option<bool>,
    /// Write diagnostic lines into buffers
    pub emit_diagnostics: bool,
    /// Capture the pointer when it is pressed
    pub capture_on_press: bool,
    /// Entries replacing the reference grammars
    pub overrides: Vec<GrammarOverride>,
}

impl Default for EvseqConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            pen_supports_hover: None,
            emit_diagnostics: true,
            capture_on_press: false,
            overrides: Vec::new(),
        }
    }
}

impl EvseqConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a file, choosing the format by extension (`.json`, otherwise YAML)
    pub fn from_path(path: impl AsRef<Path>) -> EvseqResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), platform = %config.platform, "loaded config");
        Ok(config)
    }

    /// Parse YAML
    pub fn from_yaml_str(text: &str) -> EvseqResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON
    pub fn from_json_str(text: &str) -> EvseqResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> EvseqResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject overrides that name the same entry twice
    pub fn validate(&self) -> EvseqResult<()> {
        for (i, first) in self.overrides.iter().enumerate() {
            let duplicate = self.overrides[i + 1..]
                .iter()
                .any(|other| other.profile == first.profile && other.shape == first.shape);
            if duplicate {
                return Err(EvseqError::config(format!(
                    "duplicate override for {} {}",
                    first.profile, first.shape
                )));
            }
        }
        Ok(())
    }

    /// Set the platform
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set pen hover support
    #[must_use]
    pub const fn with_pen_hover(mut self, pen_supports_hover: bool) -> Self {
        self.pen_supports_hover = Some(pen_supports_hover);
        self
    }

    /// Set diagnostic emission
    #[must_use]
    pub const fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.emit_diagnostics = enabled;
        self
    }

    /// Set capture on press
    #[must_use]
    pub const fn with_capture_on_press(mut self, enabled: bool) -> Self {
        self.capture_on_press = enabled;
        self
    }

    /// Add a grammar override
    #[must_use]
    pub fn with_override(
        mut self,
        profile: InputProfile,
        shape: TargetShape,
        grammar: Grammar,
    ) -> Self {
        self.overrides.push(GrammarOverride {
            profile,
            shape,
            grammar,
        });
        self
    }

    /// Grammar table for the configured platform with overrides applied
    #[must_use]
    pub fn table(&self) -> GrammarTable {
        let mut table = GrammarTable::for_platform(self.platform);
        if let Some(hover) = self.pen_supports_hover {
            table = table.with_pen_hover(hover);
        }
        for entry in &self.overrides {
            table.set(entry.profile, entry.shape, entry.grammar.clone());
        }
        table
    }

    /// Recorder configured for this harness
    #[must_use]
    pub fn recorder(&self) -> EventRecorder {
        EventRecorder::new()
            .with_diagnostics(self.emit_diagnostics)
            .with_capture_on_press(self.capture_on_press)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::event::PointerDeviceType;
    use std::io::Write;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_empty_yaml_is_default() {
            let config = EvseqConfig::from_yaml_str("{}").unwrap();
            assert_eq!(config, EvseqConfig::default());
            assert!(config.emit_diagnostics);
        }

        #[test]
        fn test_yaml_overrides() {
            let config = EvseqConfig::from_yaml_str(
                "platform: Wasm\noverrides:\n  - profile: Contact\n    shape: ListItem\n    grammar: \"Entered Activated Tapped Exited\"\n",
            )
            .unwrap();
            assert_eq!(config.platform, Platform::Wasm);
            assert_eq!(config.overrides.len(), 1);
            assert_eq!(config.overrides[0].grammar.len(), 4);
        }

        #[test]
        fn test_json() {
            let config =
                EvseqConfig::from_json_str(r#"{"platform":"Ios","capture_on_press":true}"#)
                    .unwrap();
            assert_eq!(config.platform, Platform::Ios);
            assert!(config.capture_on_press);
        }

        #[test]
        fn test_bad_grammar_is_rejected() {
            let result = EvseqConfig::from_yaml_str(
                "overrides:\n  - profile: Hover\n    shape: Button\n    grammar: \"Entered Wiggled\"\n",
            );
            assert!(result.is_err());
        }

        #[test]
        fn test_duplicate_override_is_rejected() {
            let config = EvseqConfig::new()
                .with_override(InputProfile::Hover, TargetShape::Button, Grammar::empty())
                .with_override(InputProfile::Hover, TargetShape::Button, Grammar::empty());
            assert!(matches!(config.validate(), Err(EvseqError::Config { .. })));
        }

        #[test]
        fn test_yaml_round_trip() {
            let config = EvseqConfig::new()
                .with_platform(Platform::Android)
                .with_pen_hover(false);
            let text = config.to_yaml().unwrap();
            assert_eq!(EvseqConfig::from_yaml_str(&text).unwrap(), config);
        }
    }

    mod file_tests {
        use super::*;

        #[test]
        fn test_from_path_by_extension() {
            let dir = tempfile::tempdir().unwrap();
            let json = dir.path().join("evseq.json");
            std::fs::File::create(&json)
                .unwrap()
                .write_all(br#"{"platform":"Windows"}"#)
                .unwrap();
            assert_eq!(
                EvseqConfig::from_path(&json).unwrap().platform,
                Platform::Windows
            );

            let yaml = dir.path().join("evseq.yaml");
            std::fs::write(&yaml, "platform: Android\n").unwrap();
            assert_eq!(
                EvseqConfig::from_path(&yaml).unwrap().platform,
                Platform::Android
            );
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let err = EvseqConfig::from_path("/nonexistent/evseq.yaml").unwrap_err();
            assert!(matches!(err, EvseqError::Io(_)));
        }
    }

    mod build_tests {
        use super::*;

        #[test]
        fn test_table_applies_overrides_and_pen_hover() {
            let grammar: Grammar = "Entered Activated Exited".parse().unwrap();
            let table = EvseqConfig::new()
                .with_platform(Platform::Ios)
                .with_pen_hover(true)
                .with_override(InputProfile::Contact, TargetShape::ListItem, grammar.clone())
                .table();
            assert!(table.pen_supports_hover());
            assert_eq!(
                table.get(InputProfile::Contact, TargetShape::ListItem),
                Some(&grammar)
            );
            assert_eq!(
                table.device_class(PointerDeviceType::Pen).profile(),
                InputProfile::Hover
            );
        }

        #[test]
        fn test_recorder() {
            let recorder = EvseqConfig::new()
                .with_diagnostics(false)
                .with_capture_on_press(true)
                .recorder();
            assert_eq!(
                recorder,
                EventRecorder::new()
                    .with_diagnostics(false)
                    .with_capture_on_press(true)
            );
        }
    }
}
