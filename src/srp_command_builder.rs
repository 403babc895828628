use crate::srp_config::{RunnerConfig, ID_PLACEHOLDER};
use std::path::PathBuf;
use std::process::Command;

/// A builder that constructs the test command for a given exercise.
pub struct TestCommandBuilder {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl TestCommandBuilder {
    /// Starts from the configured program and argument template.
    pub fn new(config: &RunnerConfig) -> Self {
        TestCommandBuilder {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.clone(),
        }
    }

    /// Substitutes the exercise identifier into every `{id}` placeholder.
    pub fn with_exercise(mut self, exercise_id: &str) -> Self {
        for arg in self.args.iter_mut() {
            if arg.contains(ID_PLACEHOLDER) {
                *arg = arg.replace(ID_PLACEHOLDER, exercise_id);
            }
        }
        self
    }

    /// Renders the command the way it would be typed, for logging.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn build_command(self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}
