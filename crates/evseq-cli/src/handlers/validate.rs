//! Validate command handler

use super::inspect::load_table;
use super::Verdict;
use crate::commands::ValidateArgs;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Reporter};
use evseq::{Grammar, Platform, PointerDeviceType, TargetShape, Trace};
use serde::Serialize;

/// Machine-readable result of a validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateSummary {
    /// SUCCESS or FAILED
    pub verdict: String,
    /// Trace file path
    pub trace: String,
    /// Platform whose table was used
    pub platform: String,
    /// Device validated as
    pub device: String,
    /// Target shape
    pub shape: String,
    /// Grammar notation
    pub grammar: String,
    /// Recorded kinds in order
    pub records: Vec<String>,
    /// Cursor where validation stopped
    pub cursor: usize,
    /// Why validation failed
    pub failure: Option<String>,
}

/// Pick the grammar: the explicit `--grammar`, otherwise the table entry
pub fn resolve_grammar(
    args: &ValidateArgs,
    platform: Platform,
    device: PointerDeviceType,
    shape: TargetShape,
) -> CliResult<Grammar> {
    if let Some(notation) = &args.grammar {
        return notation
            .parse()
            .map_err(|err| CliError::invalid_argument(format!("--grammar: {err}")));
    }
    let table = load_table(platform, args.config.as_deref())?;
    Ok(table.lookup(device, shape)?.clone())
}

/// Execute the validate command
pub fn execute_validate(args: &ValidateArgs, reporter: &Reporter) -> CliResult<Verdict> {
    let path = args.trace.display().to_string();
    let trace = Trace::load(&args.trace).map_err(|err| CliError::trace_load(&path, err))?;

    let platform = args.platform.map_or(trace.platform, Platform::from);
    let device = args.device.map_or(trace.device, PointerDeviceType::from);
    let shape = args.shape.map_or(trace.shape, TargetShape::from);
    let grammar = resolve_grammar(args, platform, device, shape)?;

    let report = trace.check(&grammar);
    let verdict = Verdict::from_passed(report.passed);
    tracing::info!(
        trace = %path,
        %platform,
        %device,
        %shape,
        passed = report.passed,
        "validated trace"
    );

    let summary = ValidateSummary {
        verdict: if report.passed { "SUCCESS" } else { "FAILED" }.to_string(),
        trace: path,
        platform: platform.to_string(),
        device: device.to_string(),
        shape: shape.to_string(),
        grammar: grammar.to_string(),
        records: trace.kinds().iter().map(ToString::to_string).collect(),
        cursor: report.cursor,
        failure: report.failure.map(|failure| failure.to_string()),
    };

    match OutputFormat::from(args.format) {
        OutputFormat::Json => reporter.json(&summary)?,
        OutputFormat::Text => {
            reporter.verdict(
                report.passed,
                &format!(
                    "{} ({} on {}, {})",
                    summary.trace, summary.device, summary.shape, summary.platform
                ),
            );
            reporter.detail(&format!("grammar: {}", summary.grammar));
            reporter.detail(&format!("records: {}", summary.records.join(" ")));
            if let Some(failure) = &summary.failure {
                reporter.detail(&format!("{failure} (at record {} of {})", report.cursor, report.len));
            }
        }
    }
    Ok(verdict)
}
