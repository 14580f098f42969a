//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use evseq::{Platform, PointerDeviceType, TargetShape};
use std::path::PathBuf;

/// Evseq: validate recorded pointer event sequences against grammars
#[derive(Parser, Debug)]
#[command(name = "evseq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (verdicts and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a recorded trace file
    ///
    /// Exits 0 when the trace matches, 1 when it does not, and 2 on errors.
    Validate(ValidateArgs),

    /// Print the grammar expected for a device and target shape
    Grammar(GrammarArgs),

    /// Print every grammar of a platform's table
    Table(TableArgs),

    /// Report grammar terms that starve later terms
    Lint(LintArgs),
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Trace file (JSON)
    pub trace: PathBuf,

    /// Device to validate as (defaults to the trace's device)
    #[arg(short, long)]
    pub device: Option<DeviceArg>,

    /// Target shape (defaults to the trace's shape)
    #[arg(short, long)]
    pub shape: Option<ShapeArg>,

    /// Platform table (defaults to the trace's platform)
    #[arg(short, long)]
    pub platform: Option<PlatformArg>,

    /// Configuration file (YAML or JSON) with grammar overrides
    #[arg(short, long, env = "EVSEQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Validate against this grammar instead of the table
    #[arg(short, long)]
    pub grammar: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the grammar command
#[derive(Args, Debug)]
pub struct GrammarArgs {
    /// Pointing device
    #[arg(short, long, default_value = "mouse")]
    pub device: DeviceArg,

    /// Target shape
    #[arg(short, long, default_value = "element")]
    pub shape: ShapeArg,

    /// Platform table
    #[arg(short, long, default_value = "skia")]
    pub platform: PlatformArg,

    /// Override pen hover support
    #[arg(long)]
    pub pen_hover: Option<bool>,
}

/// Arguments for the table command
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Platform table
    #[arg(short, long, default_value = "skia")]
    pub platform: PlatformArg,

    /// Configuration file (YAML or JSON) with grammar overrides
    #[arg(short, long, env = "EVSEQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the lint command
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Grammar notation, e.g. "Entered Moved+ Pressed Exited"
    pub grammar: String,
}

/// Device argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceArg {
    /// Mouse
    Mouse,
    /// Pen or stylus
    Pen,
    /// Touch
    Touch,
}

impl From<DeviceArg> for PointerDeviceType {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Mouse => Self::Mouse,
            DeviceArg::Pen => Self::Pen,
            DeviceArg::Touch => Self::Touch,
        }
    }
}

/// Target shape argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeArg {
    /// Plain element (tap)
    Element,
    /// Button (click)
    Button,
    /// Inline hyperlink
    Hyperlink,
    /// List item (list view)
    ListItem,
}

impl From<ShapeArg> for TargetShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Element => Self::Element,
            ShapeArg::Button => Self::Button,
            ShapeArg::Hyperlink => Self::Hyperlink,
            ShapeArg::ListItem => Self::ListItem,
        }
    }
}

/// Platform argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformArg {
    /// Native Windows
    Windows,
    /// WebAssembly
    Wasm,
    /// iOS
    Ios,
    /// Android
    Android,
    /// Desktop Skia
    Skia,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Windows => Self::Windows,
            PlatformArg::Wasm => Self::Wasm,
            PlatformArg::Ios => Self::Ios,
            PlatformArg::Android => Self::Android,
            PlatformArg::Skia => Self::Skia,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
