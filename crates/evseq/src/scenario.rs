//! Scenarios: one buffer, the targets wired into it, and the trial verdict.

use crate::buffer::SequenceBuffer;
use crate::category::CategoryMask;
use crate::event::PointerDeviceType;
use crate::recorder::{EventRecorder, Subscription};
use crate::result::EvseqResult;
use crate::table::{GrammarTable, Platform};
use crate::target::{InteractiveTarget, SimulatedTarget, TargetShape};
use crate::validator::{self, ValidationReport};
use std::fmt;
use std::rc::Rc;

/// Text shown for a scenario that has not been validated since its last reset
pub const NO_RESULT: &str = "** no result **";

/// Verdict of one trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Not validated since the last reset
    Pending,
    /// The recorded sequence matched
    Success(ValidationReport),
    /// The recorded sequence did not match
    Failed(ValidationReport),
}

impl TrialOutcome {
    /// Whether the trial passed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable verdict
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Pending => NO_RESULT,
            Self::Success(_) => "SUCCESS",
            Self::Failed(_) => "FAILED",
        }
    }

    /// Validation report, if validated
    #[must_use]
    pub const fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Pending => None,
            Self::Success(report) | Self::Failed(report) => Some(report),
        }
    }
}

impl fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A recorded interaction test against one target composition
#[derive(Debug)]
pub struct Scenario {
    name: String,
    shape: TargetShape,
    recorder: EventRecorder,
    buffer: SequenceBuffer,
    subscriptions: Vec<Subscription>,
    outcome: TrialOutcome,
}

impl Scenario {
    /// Create a scenario with its own buffer
    #[must_use]
    pub fn new(name: impl Into<String>, shape: TargetShape) -> Self {
        let name = name.into();
        Self {
            buffer: SequenceBuffer::new(&name),
            name,
            shape,
            recorder: EventRecorder::new(),
            subscriptions: Vec::new(),
            outcome: TrialOutcome::Pending,
        }
    }

    /// Use a specific recorder for targets wired afterwards
    #[must_use]
    pub const fn with_recorder(mut self, recorder: EventRecorder) -> Self {
        self.recorder = recorder;
        self
    }

    /// Scenario name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape whose grammar the scenario is validated against
    #[must_use]
    pub const fn shape(&self) -> TargetShape {
        self.shape
    }

    /// Buffer the wired targets record into
    #[must_use]
    pub const fn buffer(&self) -> &SequenceBuffer {
        &self.buffer
    }

    /// Latest outcome
    #[must_use]
    pub const fn outcome(&self) -> &TrialOutcome {
        &self.outcome
    }

    /// Subscriptions held by the scenario
    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Subscribe a target to the categories in `mask`
    pub fn wire<T>(&mut self, target: &Rc<T>, mask: CategoryMask) -> &mut Self
    where
        T: InteractiveTarget + 'static,
    {
        let subscription = self.recorder.attach(target, mask, &self.buffer);
        self.subscriptions.push(subscription);
        self
    }

    /// Clear the buffer and the outcome before the next trial
    pub fn reset(&mut self) {
        EventRecorder::reset(&self.buffer);
        self.outcome = TrialOutcome::Pending;
    }

    /// Validate the recorded trial against the grammar for `device`
    pub fn validate(
        &mut self,
        device: PointerDeviceType,
        table: &GrammarTable,
    ) -> EvseqResult<&TrialOutcome> {
        let grammar = table.lookup(device, self.shape)?;
        let report = validator::check(&self.buffer, grammar);
        if report.passed {
            tracing::info!(scenario = %self.name, %device, "SUCCESS");
            self.outcome = TrialOutcome::Success(report);
        } else {
            tracing::warn!(scenario = %self.name, %device, %report, "FAILED");
            self.outcome = TrialOutcome::Failed(report);
        }
        Ok(&self.outcome)
    }

    /// Drop every subscription. Recorded events are kept.
    pub fn detach(&mut self) {
        self.subscriptions.clear();
    }
}

/// Targets and scenarios of the standard pointer sequence page
#[derive(Debug)]
pub struct EventsSequencesPage {
    /// Plain element recording pointer and gesture events
    pub tap_target: Rc<SimulatedTarget>,
    /// Button recording pointer, gesture and click events
    pub click_target: Rc<SimulatedTarget>,
    /// Text element hosting the hyperlink; records pointer and gesture events
    pub hyperlink_target: Rc<SimulatedTarget>,
    /// Inline hyperlink; records its click into the hyperlink scenario
    pub hyperlink_inner: Rc<SimulatedTarget>,
    /// List recording pointer, gesture and item-click events
    pub list_view_target: Rc<SimulatedTarget>,
    /// Tap scenario
    pub tap: Scenario,
    /// Click scenario
    pub click: Scenario,
    /// Hyperlink scenario
    pub hyperlink: Scenario,
    /// List view scenario
    pub list_view: Scenario,
    /// Device selected for validation
    pub device: PointerDeviceType,
    table: GrammarTable,
}

impl EventsSequencesPage {
    /// Build the page with the reference table of `platform`
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self::with_table(GrammarTable::for_platform(platform), EventRecorder::new())
    }

    /// Build the page with an explicit table and recorder
    #[must_use]
    pub fn with_table(table: GrammarTable, recorder: EventRecorder) -> Self {
        let pointer_gesture = CategoryMask::POINTER | CategoryMask::GESTURE;

        let tap_target = Rc::new(SimulatedTarget::new("TestTapTarget", TargetShape::Element));
        let click_target = Rc::new(SimulatedTarget::new("TestClickTarget", TargetShape::Button));
        let hyperlink_target = Rc::new(SimulatedTarget::new(
            "TestHyperlinkTarget",
            TargetShape::Element,
        ));
        let hyperlink_inner = Rc::new(SimulatedTarget::new(
            "TestHyperlinkInner",
            TargetShape::Hyperlink,
        ));
        let list_view_target = Rc::new(SimulatedTarget::new(
            "TestListViewTarget",
            TargetShape::ListItem,
        ));

        let mut tap = Scenario::new("tap", TargetShape::Element).with_recorder(recorder);
        tap.wire(&tap_target, pointer_gesture);

        let mut click = Scenario::new("click", TargetShape::Button).with_recorder(recorder);
        click.wire(&click_target, pointer_gesture | CategoryMask::ACTIVATION);

        let mut hyperlink =
            Scenario::new("hyperlink", TargetShape::Hyperlink).with_recorder(recorder);
        hyperlink
            .wire(&hyperlink_target, pointer_gesture)
            .wire(&hyperlink_inner, CategoryMask::ACTIVATION);

        let mut list_view =
            Scenario::new("list_view", TargetShape::ListItem).with_recorder(recorder);
        list_view.wire(&list_view_target, pointer_gesture | CategoryMask::ACTIVATION);

        Self {
            tap_target,
            click_target,
            hyperlink_target,
            hyperlink_inner,
            list_view_target,
            tap,
            click,
            hyperlink,
            list_view,
            device: table.platform().default_device(),
            table,
        }
    }

    /// Grammar table used for validation
    #[must_use]
    pub const fn table(&self) -> &GrammarTable {
        &self.table
    }

    /// Select the device used for validation
    pub fn select_device(&mut self, device: PointerDeviceType) {
        self.device = device;
    }

    /// Scenarios in page order
    pub fn scenarios_mut(&mut self) -> [&mut Scenario; 4] {
        [
            &mut self.tap,
            &mut self.click,
            &mut self.hyperlink,
            &mut self.list_view,
        ]
    }

    /// Reset every scenario
    pub fn reset_all(&mut self) {
        for scenario in self.scenarios_mut() {
            scenario.reset();
        }
    }

    /// Validate every scenario with the selected device
    pub fn validate_all(&mut self) -> EvseqResult<Vec<(String, TrialOutcome)>> {
        let device = self.device;
        let table = self.table.clone();
        let mut outcomes = Vec::new();
        for scenario in self.scenarios_mut() {
            let outcome = scenario.validate(device, &table)?.clone();
            outcomes.push((scenario.name().to_string(), outcome));
        }
        Ok(outcomes)
    }
}
