use crate::srp_config::RunnerConfig;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// The only command type the runner accepts.
pub const TEST_COMMAND: &str = "test";

#[derive(Parser, Debug)]
#[command(name = "runner", version, about = "Run a lesson's tests and print the results as an SRP payload.", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        short = 'c',
        value_name = "PATH",
        help = "Read the test command from this TOML file."
    )]
    pub config: Option<PathBuf>,

    #[arg(value_name = "TYPE", help = "Command type. Only `test` is supported.")]
    pub command_type: Option<String>,

    #[arg(value_name = "ID", help = "Exercise identifier, e.g. the lesson directory name.")]
    pub exercise_id: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

/// Reasons the runner stops before running anything. `Display` is the text printed on stdout.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Usage: runner <type> <id>")]
    Usage,
    #[error("Only 'test' command is supported")]
    UnsupportedCommand(String),
    #[error("{0}")]
    Config(String),
    /// `--help` or `--version`; not a failure.
    #[error("{0}")]
    Info(String),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::Info(_) => 0,
            _ => 1,
        }
    }
}

/// A validated request to test one exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub exercise_id: String,
    pub config: RunnerConfig,
}

impl Cli {
    /// Parses `args` (program name first), mapping every clap failure to the usage line.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                UsageError::Info(e.render().to_string())
            }
            _ => {
                debug!("argument error: {}", e);
                UsageError::Usage
            }
        })
    }

    /// Checks the positional arguments and resolves the runner config.
    pub fn validate(self) -> Result<Invocation, UsageError> {
        let (Some(command_type), Some(exercise_id)) = (self.command_type, self.exercise_id) else {
            return Err(UsageError::Usage);
        };
        if command_type != TEST_COMMAND {
            return Err(UsageError::UnsupportedCommand(command_type));
        }
        if !self.extra.is_empty() {
            debug!("ignoring extra arguments: {:?}", self.extra);
        }
        let config = RunnerConfig::resolve(self.config.as_deref())
            .map_err(|e| UsageError::Config(format!("{:#}", e)))?;
        Ok(Invocation {
            exercise_id,
            config,
        })
    }
}

/// Parses and validates a full argument list.
pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_from_args(args)?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_file(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runner.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn program_name_alone_is_a_usage_error() {
        let err = parse_invocation(["runner"]).unwrap_err();
        assert!(matches!(err, UsageError::Usage));
        assert_eq!(err.to_string(), "Usage: runner <type> <id>");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn one_positional_is_a_usage_error() {
        assert!(matches!(
            parse_invocation(["runner", "test"]),
            Err(UsageError::Usage)
        ));
    }

    #[test]
    fn only_test_is_supported() {
        let err = parse_invocation(["runner", "run", "hello"]).unwrap_err();
        assert!(matches!(&err, UsageError::UnsupportedCommand(c) if c == "run"));
        assert_eq!(err.to_string(), "Only 'test' command is supported");
    }

    #[test]
    fn unknown_flag_maps_to_usage() {
        assert!(matches!(
            parse_invocation(["runner", "--bogus", "test", "hello"]),
            Err(UsageError::Usage)
        ));
    }

    #[test]
    fn help_is_informational() {
        let err = parse_invocation(["runner", "--help"]).unwrap_err();
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("Usage"));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let (_dir, path) = config_file("program = \"cat\"\nargs = [\"{id}.txt\"]\n");
        let path = path.to_string_lossy().to_string();
        let invocation =
            parse_invocation(["runner", "--config", path.as_str(), "test", "hello"]).unwrap();
        assert_eq!(invocation.exercise_id, "hello");
        assert_eq!(invocation.config.program, "cat");
        assert_eq!(invocation.config.args, vec!["{id}.txt"]);
    }

    #[test]
    fn extra_positionals_are_ignored() {
        let (_dir, path) = config_file("program = \"cat\"\n");
        let path = path.to_string_lossy().to_string();
        let invocation =
            parse_invocation(["runner", "-c", path.as_str(), "test", "hello", "surplus"]).unwrap();
        assert_eq!(invocation.exercise_id, "hello");
    }

    #[test]
    fn broken_config_is_reported() {
        let (_dir, path) = config_file("program = [\n");
        let path = path.to_string_lossy().to_string();
        let err =
            parse_invocation(["runner", "-c", path.as_str(), "test", "hello"]).unwrap_err();
        assert!(matches!(err, UsageError::Config(_)));
        assert!(err.to_string().contains("Failed to parse config"));
        assert_eq!(err.exit_code(), 1);
    }
}
