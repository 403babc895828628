use crate::srp_command_builder::TestCommandBuilder;
use crate::srp_config::RunnerConfig;
use crate::srp_report::Report;
use crate::srp_scanner::scan_output;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Combined output and exit state of one test command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// stdout and stderr in the order the child wrote them, decoded lossily.
    pub output: String,
    /// `true` only if the child was launched and exited with status zero.
    pub success: bool,
}

/// Runs the test command for `exercise_id` and waits for it to exit.
///
/// Launch failures are not errors: they yield an unsuccessful run with whatever output was
/// captured (usually none).
pub fn run_exercise(config: &RunnerConfig, exercise_id: &str) -> RunOutput {
    let builder = TestCommandBuilder::new(config).with_exercise(exercise_id);
    info!("Running: {}", builder.display());
    let cmd = builder.build_command();
    match run_combined(cmd) {
        Ok(run) => {
            debug!(
                "test command finished: success={} bytes={}",
                run.success,
                run.output.len()
            );
            run
        }
        Err(e) => {
            warn!("failed to run test command for {}: {}", exercise_id, e);
            RunOutput::default()
        }
    }
}

/// Spawns `cmd` with stdout and stderr sharing one pipe, so the buffer keeps the child's
/// write order across both streams.
pub fn run_combined(mut cmd: Command) -> io::Result<RunOutput> {
    let (mut reader, writer) = os_pipe::pipe()?;
    cmd.stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);
    let mut child = cmd.spawn()?;
    // The command still owns the parent's copies of the write end; the read below only sees
    // EOF once they are closed.
    drop(cmd);

    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes) {
        warn!("error reading child output: {}", e);
    }
    let status = child.wait()?;

    Ok(RunOutput {
        output: String::from_utf8_lossy(&bytes).into_owned(),
        success: status.success(),
    })
}

/// Runs the exercise's tests and translates the output into a [`Report`].
pub fn translate_exercise(config: &RunnerConfig, exercise_id: &str) -> Report {
    let run = run_exercise(config, exercise_id);
    let outcome = scan_output(&run.output);
    Report::assemble(
        exercise_id,
        run.success,
        run.output,
        outcome.diagnostics,
        outcome.tests,
    )
}
