//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! the C-minus compiler.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for the compiler.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the source file to compile.
    #[arg(index = 1, default_value = "input.txt")]
    pub file: std::path::PathBuf,

    /// The directory the report files are written into.
    #[arg(short, long, default_value = ".")]
    pub out_dir: std::path::PathBuf,

    /// Whether to dump the token stream as JSON (for debugging).
    #[arg(long)]
    pub dump_tokens: bool,

    /// Whether to dump the intermediate code as JSON (for debugging).
    #[arg(long)]
    pub dump_code: bool,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of the compiler.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where also warnings are logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the compiler, e.g.,
    /// which report files are written.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the compiler.
    #[value(alias("3"))]
    Debug,

    /// Log extra information, including every committed lexeme and emitted
    /// instruction.
    #[value(alias("4"))]
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
