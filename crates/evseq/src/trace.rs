//! JSON trace files for validating recorded trials offline

use crate::buffer::SequenceBuffer;
use crate::event::{EventKind, EventRecord, PointerDeviceType};
use crate::grammar::Grammar;
use crate::result::EvseqResult;
use crate::table::{GrammarTable, Platform};
use crate::target::TargetShape;
use crate::validator::{self, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A recorded trial together with the context needed to validate it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Name of the buffer the trial was recorded into
    #[serde(default)]
    pub name: String,
    /// Platform the trial ran on
    #[serde(default)]
    pub platform: Platform,
    /// Device reported by the trial
    #[serde(default)]
    pub device: PointerDeviceType,
    /// Shape of the target under test
    pub shape: TargetShape,
    /// Recorded events in arrival order
    #[serde(default)]
    pub records: Vec<EventRecord>,
}

impl Trace {
    /// Create an empty trace
    #[must_use]
    pub fn new(shape: TargetShape) -> Self {
        Self {
            name: String::new(),
            platform: Platform::default(),
            device: PointerDeviceType::default(),
            shape,
            records: Vec::new(),
        }
    }

    /// Capture a snapshot of a buffer
    #[must_use]
    pub fn from_buffer(
        buffer: &SequenceBuffer,
        platform: Platform,
        device: PointerDeviceType,
        shape: TargetShape,
    ) -> Self {
        Self {
            name: buffer.name().to_string(),
            platform,
            device,
            shape,
            records: buffer.snapshot(),
        }
    }

    /// Set the platform
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the device
    #[must_use]
    pub const fn with_device(mut self, device: PointerDeviceType) -> Self {
        self.device = device;
        self
    }

    /// Append bare records
    #[must_use]
    pub fn with_kinds(mut self, kinds: &[EventKind]) -> Self {
        self.records
            .extend(kinds.iter().copied().map(EventRecord::bare));
        self
    }

    /// Kinds of the recorded events
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.records.iter().map(|record| record.kind).collect()
    }

    /// Parse JSON
    pub fn from_json(text: &str) -> EvseqResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> EvseqResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a trace file
    pub fn load(path: impl AsRef<Path>) -> EvseqResult<Self> {
        let path = path.as_ref();
        let trace = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::debug!(
            path = %path.display(),
            records = trace.records.len(),
            "loaded trace"
        );
        Ok(trace)
    }

    /// Write a trace file
    pub fn save(&self, path: impl AsRef<Path>) -> EvseqResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Rebuild a buffer holding the recorded events
    #[must_use]
    pub fn into_buffer(self) -> SequenceBuffer {
        let name = if self.name.is_empty() {
            self.shape.name().to_string()
        } else {
            self.name
        };
        SequenceBuffer::from_records(&name, self.records)
    }

    /// Check against an explicit grammar
    #[must_use]
    pub fn check(&self, grammar: &Grammar) -> ValidationReport {
        validator::check_records(&self.records, grammar)
    }

    /// Check against the table entry for the recorded device and shape
    pub fn check_with(&self, table: &GrammarTable) -> EvseqResult<ValidationReport> {
        let grammar = table.lookup(self.device, self.shape)?;
        Ok(self.check(grammar))
    }
}
