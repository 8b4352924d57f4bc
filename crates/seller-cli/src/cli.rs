//! CLI argument definitions for `seller-import`.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use seller_cli::logging::{LogConfig, LogFormat};
use seller_model::{ImportKind, TimeFrame};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "seller-import",
    version,
    about = "Seller Import - Validate and import seller analytics CSV files",
    long_about = "Validate, sanitize and import seller analytics CSV files.\n\n\
                  Handles sales, inventory, product and PPC campaign exports.\n\
                  Also writes import templates, CSV exports and PPC performance reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging settings; `--log-level` wins over `-v`/`-q`, and either disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi,
            ..LogConfig::default()
        }
        .with_level(explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()))
        .with_format(self.log_format.into())
        .with_log_file(self.log_file.clone())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate, preview and import a CSV file.
    Import(ImportArgs),

    /// Write a header-only CSV template for an import kind.
    Template(TemplateArgs),

    /// Run file and content validation only.
    Check(CheckArgs),

    /// Build a text performance report from a PPC campaign CSV.
    Report(ReportArgs),
}

#[derive(Args)]
pub struct ImportArgs {
    /// CSV files; the first with an allowed extension is imported.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Kind of data the file contains.
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Period the data covers.
    #[arg(long = "time-frame", value_enum)]
    pub time_frame: Option<TimeFrameArg>,

    /// First day of a custom time frame (YYYY-MM-DD).
    #[arg(long = "start", value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of a custom time frame (YYYY-MM-DD).
    #[arg(long = "end", value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// TOML file overriding the CSV limits.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write the imported records as CSV.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Print the imported records as JSON instead of the summary table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct TemplateArgs {
    #[arg(long = "kind", value_enum)]
    pub kind: KindArg,

    /// Template name (file becomes `<name>-template.csv`).
    #[arg(long = "name")]
    pub name: Option<String>,

    /// Directory to write into (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// TOML file overriding the CSV limits.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// PPC campaign CSV.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "title", default_value = "PPC Performance Report")]
    pub title: String,

    /// Period label printed under the title.
    #[arg(long = "period", default_value = "Last 30 days")]
    pub period: String,

    /// Report path (default: `performance-report-<date>.txt` in the current directory).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Sales,
    Inventory,
    Product,
    Ppc,
}

impl From<KindArg> for ImportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Sales => ImportKind::Sales,
            KindArg::Inventory => ImportKind::Inventory,
            KindArg::Product => ImportKind::Product,
            KindArg::Ppc => ImportKind::PpcCampaign,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TimeFrameArg {
    #[value(name = "7days")]
    SevenDays,
    #[value(name = "lastweek")]
    LastWeek,
    #[value(name = "thismonth")]
    ThisMonth,
    #[value(name = "lastmonth")]
    LastMonth,
    #[value(name = "thisyear")]
    ThisYear,
    Custom,
}

impl TimeFrameArg {
    /// Resolves the preset, or the custom range when both dates are given.
    pub fn resolve(self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<TimeFrame> {
        match self {
            Self::SevenDays => Some(TimeFrame::SevenDays),
            Self::LastWeek => Some(TimeFrame::LastWeek),
            Self::ThisMonth => Some(TimeFrame::ThisMonth),
            Self::LastMonth => Some(TimeFrame::LastMonth),
            Self::ThisYear => Some(TimeFrame::ThisYear),
            Self::Custom => Some(TimeFrame::Custom {
                start: start?,
                end: end?,
            }),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
