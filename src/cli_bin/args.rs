//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "pagematter",
    version,
    about = "Split documents into front matter and content",
    long_about = "pagematter detects YAML (---), TOML (+++) and JSON ({ }) front matter at \
                  the head of a document, optionally wrapped in an HTML comment, and \
                  separates it from the body. Files can be split, have their metadata \
                  decoded, or be checked for malformed front matter."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the raw front matter or content of pages
    Split(SplitArgs),
    /// Decode and print page metadata
    Meta(MetaArgs),
    /// Check that pages split (and optionally decode) cleanly
    Check(CheckArgs),
}

/// Common options for selecting files
#[derive(Args, Debug, Clone)]
pub struct CommonFileOptions {
    /// Files or directories to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Follow symbolic links when processing directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum depth for directory recursion
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Include hidden files (starting with .)
    #[arg(long)]
    pub include_hidden: bool,

    /// Only collect files with these extensions from directories
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Exclude files matching these patterns
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,

    /// Which part of the page to print
    #[arg(long, value_enum, default_value = "content")]
    pub part: Part,
}

/// Arguments for the meta command
#[derive(Args, Debug)]
pub struct MetaArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty print output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub files: CommonFileOptions,

    /// Also decode the front matter
    #[arg(long)]
    pub decode: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "human")]
    pub format: CheckFormat,
}

/// Page parts
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// The raw front matter block, delimiters included
    FrontMatter,
    /// The content after the front matter
    Content,
}

/// Output formats for metadata
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Output formats for check reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
