#![allow(dead_code)]
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Captured `go test -v` output of a passing lesson.
pub const PASSING_OUTPUT: &str = "=== RUN   TestGreet
    hello_test.go:7: Greet returned \"Hello, Gopher!\"
--- PASS: TestGreet (0.00s)
PASS
ok  \tsrp-runner/lessons/hello\t0.002s
";

/// Captured `go test -v` output of a lesson with one failing and one passing test.
pub const FAILING_OUTPUT: &str = "=== RUN   TestAdd
    add_test.go:9: Add(1, 2) = 4, want 3
--- FAIL: TestAdd (0.00s)
=== RUN   TestSub
--- PASS: TestSub (0.00s)
FAIL
FAIL\tsrp-runner/lessons/math\t0.003s
FAIL
";

/// Captured `go test -v` output of a lesson that does not compile.
pub const BUILD_FAILED_OUTPUT: &str = "# srp-runner/lessons/math
lessons/math/add.go:4:9: undefined: total
lessons/math/add.go:4:9: undefined: total
lessons/math/add.go:8:12: invalid operation: a + b (mismatched types int and string)
FAIL\tsrp-runner/lessons/math [build failed]
FAIL
";

/// A temporary directory holding a runner config whose test command replays canned output.
pub struct FakeLesson {
    /// The temporary directory. When this is dropped, the directory and its contents are removed.
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl FakeLesson {
    /// The test command prints `output` for the exercise and exits with `exit_code`.
    pub fn new(exercise_id: &str, output: &str, exit_code: i32) -> IoResult<Self> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join(format!("{}.out", exercise_id)), output)?;
        let config_path = temp_dir.path().join("srp-runner.toml");
        write_config(
            &config_path,
            "sh",
            &["-c", &format!("cat {{id}}.out; exit {}", exit_code)],
            Some(temp_dir.path()),
        )?;
        Ok(FakeLesson {
            temp_dir,
            config_path,
        })
    }

    pub fn config_arg(&self) -> String {
        self.config_path.to_string_lossy().to_string()
    }
}

/// Writes a runner config using TOML literal strings so paths need no escaping.
pub fn write_config(
    path: &Path,
    program: &str,
    args: &[&str],
    working_dir: Option<&Path>,
) -> IoResult<()> {
    let args = args
        .iter()
        .map(|a| format!("'{}'", a))
        .collect::<Vec<_>>()
        .join(", ");
    let mut content = format!("program = '{}'\nargs = [{}]\n", program, args);
    if let Some(dir) = working_dir {
        content.push_str(&format!("working_dir = '{}'\n", dir.display()));
    }
    fs::write(path, content)
}
