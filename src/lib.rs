#![doc = include_str!("../README.md")]

pub mod srp_cli;
pub use srp_cli::{parse_invocation, Cli, Invocation, UsageError};
pub mod srp_command_builder;
pub mod srp_config;
pub use srp_config::RunnerConfig;
pub mod srp_emit;
pub use srp_emit::{write_framed, BEGIN_MARKER, END_MARKER};
pub mod srp_extract;
pub mod srp_logging;
pub mod srp_render;
pub mod srp_report;
pub use srp_report::{Diagnostic, Report, Severity, TestRecord, TestStatus};
pub mod srp_runner;
pub use srp_runner::translate_exercise;
pub mod srp_scanner;
pub use srp_scanner::scan_output;
