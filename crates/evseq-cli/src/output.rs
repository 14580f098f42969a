//! Output formatting

use console::{style, Term};
use serde::{Deserialize, Serialize};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes results to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a verdict line; failures are printed even in quiet mode
    pub fn verdict(&self, passed: bool, message: &str) {
        let prefix = match (passed, self.use_color) {
            (true, true) => style("SUCCESS").green().bold().to_string(),
            (true, false) => "SUCCESS".to_string(),
            (false, true) => style("FAILED").red().bold().to_string(),
            (false, false) => "FAILED".to_string(),
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a detail line, suppressed in quiet mode
    pub fn detail(&self, message: &str) {
        if self.quiet {
            return;
        }
        let text = if self.use_color {
            style(message).dim().to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&format!("  {text}"));
    }

    /// Print a plain line
    pub fn line(&self, message: &str) {
        let _ = self.term.write_line(message);
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        self.line(&serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_reporter_flags() {
        let reporter = Reporter::new(true, true);
        assert!(reporter.use_color);
        assert!(reporter.quiet);
        let reporter = Reporter::default();
        assert!(!reporter.use_color);
    }

    #[test]
    fn test_json_output() {
        let reporter = Reporter::default();
        assert!(reporter.json(&["Entered", "Exited"]).is_ok());
    }
}
