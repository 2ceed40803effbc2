//! CLI argument definitions for the migration tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bcm",
    version,
    about = "BigCommerce Catalog Migrator - Map platform CSV exports to the BigCommerce schema",
    long_about = "Migrate catalog data from a source e-commerce platform into the\n\
                  BigCommerce product schema: list the target fields, discover the\n\
                  columns of a CSV export via the import service, and run a scripted\n\
                  column-to-field mapping."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

#[derive(Subcommand)]
pub enum Command {
    /// List the BigCommerce target fields, grouped by category.
    Fields(FieldsArgs),

    /// Submit a CSV export to the import service and show the discovered columns.
    Headers(HeadersArgs),

    /// Run a scripted migration: platform, CSV and column assignments.
    Plan(PlanArgs),
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Emit the schema as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// Path to the CSV export.
    #[arg(value_name = "CSV_FILE")]
    pub file: PathBuf,

    /// Base URL of the import service.
    #[arg(long = "url", value_name = "URL")]
    pub url: String,

    /// Bearer token for the import service.
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Emit the discovered columns as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Path to the CSV export.
    #[arg(value_name = "CSV_FILE")]
    pub file: PathBuf,

    /// Base URL of the import service.
    #[arg(long = "url", value_name = "URL")]
    pub url: String,

    /// Bearer token for the import service.
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Source platform (shopify, woocommerce, magento, wix, squarespace,
    /// or any other name).
    #[arg(long = "platform", value_name = "NAME")]
    pub platform: String,

    /// Column assignment as `<field>=<header>`, e.g. `sku=header_1`.
    /// Repeatable.
    #[arg(long = "assign", value_name = "FIELD=HEADER")]
    pub assign: Vec<String>,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
