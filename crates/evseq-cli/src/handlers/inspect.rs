//! Grammar, table and lint command handlers

use super::Verdict;
use crate::commands::{GrammarArgs, LintArgs, TableArgs};
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Reporter};
use evseq::{EvseqConfig, Grammar, GrammarTable, Platform, PointerDeviceType, TargetShape};
use serde::Serialize;
use std::path::Path;

/// One table entry in JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Input profile
    pub profile: String,
    /// Target shape
    pub shape: String,
    /// Grammar notation
    pub grammar: String,
}

/// Reference table for `platform`, with overrides from a config file if given
pub fn load_table(platform: Platform, config: Option<&Path>) -> CliResult<GrammarTable> {
    match config {
        None => Ok(GrammarTable::for_platform(platform)),
        Some(path) => {
            let config = EvseqConfig::from_path(path)
                .map_err(|err| CliError::config(format!("{}: {err}", path.display())))?;
            Ok(config.with_platform(platform).table())
        }
    }
}

/// Execute the grammar command
pub fn execute_grammar(args: &GrammarArgs, reporter: &Reporter) -> CliResult<Verdict> {
    let mut table = GrammarTable::for_platform(args.platform.into());
    if let Some(hover) = args.pen_hover {
        table = table.with_pen_hover(hover);
    }
    let device = PointerDeviceType::from(args.device);
    let shape = TargetShape::from(args.shape);
    let grammar = table.lookup(device, shape)?;
    tracing::debug!(
        device = %table.device_class(device),
        %shape,
        platform = %table.platform(),
        "resolved grammar"
    );
    reporter.line(&grammar.to_string());
    Ok(Verdict::Success)
}

/// Execute the table command
pub fn execute_table(args: &TableArgs, reporter: &Reporter) -> CliResult<Verdict> {
    let table = load_table(args.platform.into(), args.config.as_deref())?;
    let rows: Vec<TableRow> = table
        .entries()
        .map(|(profile, shape, grammar)| TableRow {
            profile: profile.to_string(),
            shape: shape.to_string(),
            grammar: grammar.to_string(),
        })
        .collect();

    match OutputFormat::from(args.format) {
        OutputFormat::Json => reporter.json(&rows)?,
        OutputFormat::Text => {
            reporter.line(&format!(
                "{} (pen hover: {})",
                table.platform(),
                table.pen_supports_hover()
            ));
            for row in &rows {
                reporter.line(&format!("  {:<8} {:<10} {}", row.profile, row.shape, row.grammar));
            }
        }
    }
    Ok(Verdict::Success)
}

/// Execute the lint command
pub fn execute_lint(args: &LintArgs, reporter: &Reporter) -> CliResult<Verdict> {
    let grammar: Grammar = args
        .grammar
        .parse()
        .map_err(|err| CliError::invalid_argument(format!("grammar: {err}")))?;
    let ambiguities = grammar.ambiguities();
    if ambiguities.is_empty() {
        reporter.verdict(true, &format!("{grammar}: no ambiguous terms"));
        return Ok(Verdict::Success);
    }
    reporter.verdict(false, &format!("{grammar}: {} ambiguous term(s)", ambiguities.len()));
    for ambiguity in &ambiguities {
        reporter.detail(&ambiguity.to_string());
    }
    Ok(Verdict::Failed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::{DeviceArg, FormatArg, PlatformArg, ShapeArg};
    use evseq::InputProfile;

    mod table_tests {
        use super::*;

        #[test]
        fn test_load_reference_table() {
            let table = load_table(Platform::Windows, None).unwrap();
            assert_eq!(table.len(), 8);
        }

        #[test]
        fn test_load_table_with_config() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("evseq.json");
            std::fs::write(
                &path,
                r#"{"platform":"Ios","overrides":[{"profile":"Hover","shape":"Button","grammar":"Activated"}]}"#,
            )
            .unwrap();
            let table = load_table(Platform::Wasm, Some(&path)).unwrap();
            assert_eq!(table.platform(), Platform::Wasm);
            assert_eq!(
                table.get(InputProfile::Hover, TargetShape::Button).unwrap().len(),
                1
            );
        }

        #[test]
        fn test_bad_config_is_config_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("evseq.yaml");
            std::fs::write(&path, "platform: Amiga\n").unwrap();
            let err = load_table(Platform::Skia, Some(&path)).unwrap_err();
            assert!(matches!(err, CliError::Config { .. }));
        }

        #[test]
        fn test_execute_table_json() {
            let args = TableArgs {
                platform: PlatformArg::Android,
                config: None,
                format: FormatArg::Json,
            };
            assert_eq!(
                execute_table(&args, &Reporter::default()).unwrap(),
                Verdict::Success
            );
        }
    }

    mod grammar_tests {
        use super::*;

        #[test]
        fn test_execute_grammar() {
            let args = GrammarArgs {
                device: DeviceArg::Pen,
                shape: ShapeArg::ListItem,
                platform: PlatformArg::Ios,
                pen_hover: Some(false),
            };
            assert_eq!(
                execute_grammar(&args, &Reporter::default()).unwrap(),
                Verdict::Success
            );
        }
    }

    mod lint_tests {
        use super::*;

        fn lint(notation: &str) -> CliResult<Verdict> {
            execute_lint(
                &LintArgs {
                    grammar: notation.to_string(),
                },
                &Reporter::default(),
            )
        }

        #[test]
        fn test_clean_grammar() {
            assert_eq!(
                lint("Entered Moved+ Pressed Moved* Released Tapped Moved* Exited").unwrap(),
                Verdict::Success
            );
        }

        #[test]
        fn test_ambiguous_grammar() {
            assert_eq!(lint("Moved* Moved").unwrap(), Verdict::Failed);
        }

        #[test]
        fn test_unparseable_grammar() {
            assert!(matches!(
                lint("Moved Wiggled"),
                Err(CliError::InvalidArgument { .. })
            ));
        }
    }
}
