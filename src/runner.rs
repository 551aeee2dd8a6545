//! osascript execution.
//!
//! The window builder hands a finished script buffer to a [`ScriptRunner`].
//! The default runner spawns `osascript` with one `-e` argument per buffered
//! line — the argument-vector form of the rendered command line, with no
//! shell in between. The core never interprets the interpreter's failures;
//! it surfaces the raw outcome to its caller.

use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::script::ScriptBuffer;

/// The external interpreter the assembled script is handed to.
pub const PROGRAM: &str = "osascript";

/// Raw outcome of one script invocation.
#[derive(Debug, Clone)]
pub struct Execution {
    pub succeeded: bool,
    /// Captured stdout of the invocation.
    pub output: String,
}

/// Runs a fully assembled script as a single external invocation.
pub trait ScriptRunner {
    fn run(&self, script: &ScriptBuffer) -> Result<Execution>;
}

/// Spawns `osascript` with one `-e` argument per buffered line.
#[derive(Debug, Default)]
pub struct Osascript;

impl ScriptRunner for Osascript {
    fn run(&self, script: &ScriptBuffer) -> Result<Execution> {
        debug!(command = %command_line(script), "running osascript");

        let mut cmd = Command::new(PROGRAM);
        for line in script.lines() {
            cmd.arg("-e").arg(line);
        }
        let output = cmd
            .output()
            .context("failed to run osascript — iTerm automation requires macOS")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "osascript reported failure");
        }

        Ok(Execution {
            succeeded: output.status.success(),
            output: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}

/// Textual form of the full invocation: the interpreter name followed by one
/// single-quoted `-e` token per line. Used for dry runs, logs and tests.
pub fn command_line(script: &ScriptBuffer) -> String {
    let rendered = script.render();
    if rendered.is_empty() {
        PROGRAM.to_string()
    } else {
        format!("{PROGRAM} {rendered}")
    }
}

/// Check that osascript is installed and answering.
pub fn check_osascript() -> Result<()> {
    let output = Command::new(PROGRAM)
        .args(["-e", "return \"ok\""])
        .output()
        .context("osascript not found — iTerm automation requires macOS")?;

    if !output.status.success() {
        bail!(
            "osascript probe failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    debug!("osascript probe succeeded");
    Ok(())
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;

    use anyhow::Result;

    use super::{Execution, ScriptRunner, command_line};
    use crate::script::ScriptBuffer;

    /// Records the command line of every script it is asked to run.
    #[derive(Default)]
    pub struct RecordingRunner {
        commands: RefCell<Vec<String>>,
    }

    impl RecordingRunner {
        pub fn commands(&self) -> Vec<String> {
            self.commands.borrow().clone()
        }
    }

    impl ScriptRunner for RecordingRunner {
        fn run(&self, script: &ScriptBuffer) -> Result<Execution> {
            self.commands.borrow_mut().push(command_line(script));
            Ok(Execution {
                succeeded: true,
                output: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_prefixes_the_interpreter() {
        let mut script = ScriptBuffer::new();
        script.emit("activate");
        assert_eq!(command_line(&script), "osascript -e 'activate'");
    }

    #[test]
    fn command_line_of_empty_script_is_bare() {
        assert_eq!(command_line(&ScriptBuffer::new()), "osascript");
    }

    #[test]
    fn recording_runner_reports_success() {
        let runner = testing::RecordingRunner::default();
        let mut script = ScriptBuffer::new();
        script.emit("activate");

        let execution = runner.run(&script).unwrap();
        assert!(execution.succeeded);
        assert!(execution.output.is_empty());
        assert_eq!(runner.commands(), ["osascript -e 'activate'"]);
    }
}
