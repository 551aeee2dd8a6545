//! Window-level orchestration.
//!
//! A [`Window`] owns the script buffer and the registry of tabs opened in
//! it. The build pass is bracketed by the outer `tell application "iTerm"`
//! scope: opening lines, the caller's build closure, closing lines. Only a
//! build that runs to completion produces a script — an error anywhere
//! abandons the buffer, so a partial program is never executed.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use crate::runner::{Execution, ScriptRunner};
use crate::script::{ScriptBuffer, quote};
use crate::tab::{Tab, TabState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("unknown window mode '{0}' — expected 'new' or 'current'")]
    InvalidMode(String),
    #[error("tab '{0}' is already open in this window")]
    DuplicateTab(String),
    #[error("no tab named '{0}' has been opened")]
    UnknownTab(String),
    #[error("invalid tab name '{0}' — use letters, digits and underscores, not starting with a digit")]
    InvalidTabName(String),
}

/// Which terminal window the script targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Make a new terminal window.
    New,
    /// Reuse the first existing terminal window.
    Current,
}

impl WindowMode {
    fn terminal_expr(self) -> &'static str {
        match self {
            WindowMode::New => "(make new terminal)",
            WindowMode::Current => "first terminal",
        }
    }
}

impl FromStr for WindowMode {
    type Err = WindowError;

    fn from_str(raw: &str) -> Result<Self, WindowError> {
        match raw {
            "new" => Ok(WindowMode::New),
            "current" => Ok(WindowMode::Current),
            other => Err(WindowError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WindowMode::New => "new",
            WindowMode::Current => "current",
        })
    }
}

/// One iTerm window being scripted.
pub struct Window {
    buffer: ScriptBuffer,
    tabs: Vec<TabState>,
}

impl Window {
    /// Open a new window, run `build` in it, execute the resulting script.
    pub fn open<F>(runner: &dyn ScriptRunner, build: F) -> Result<Execution>
    where
        F: FnOnce(&mut Window) -> Result<()>,
    {
        Self::run(WindowMode::New, runner, build)
    }

    /// Target the current window, run `build` in it, execute the result.
    pub fn current<F>(runner: &dyn ScriptRunner, build: F) -> Result<Execution>
    where
        F: FnOnce(&mut Window) -> Result<()>,
    {
        Self::run(WindowMode::Current, runner, build)
    }

    /// Build and execute in one pass.
    pub fn run<F>(mode: WindowMode, runner: &dyn ScriptRunner, build: F) -> Result<Execution>
    where
        F: FnOnce(&mut Window) -> Result<()>,
    {
        let script = Self::script(mode, build)?;
        runner.run(&script)
    }

    /// Build the script without executing it.
    ///
    /// Emits the outer scope's opening lines, runs `build`, emits the
    /// closing lines and hands back the buffer. A failing build abandons
    /// the buffer entirely.
    pub fn script<F>(mode: WindowMode, build: F) -> Result<ScriptBuffer>
    where
        F: FnOnce(&mut Window) -> Result<()>,
    {
        let mut window = Window {
            buffer: ScriptBuffer::new(),
            tabs: Vec::new(),
        };
        window.buffer.emit("tell application \"iTerm\"");
        window.buffer.emit("activate");
        window
            .buffer
            .emit(format!("set myterm to {}", mode.terminal_expr()));
        window.buffer.emit("tell myterm");
        build(&mut window)?;
        window.buffer.emit("end tell");
        window.buffer.emit("end tell");

        debug!(
            tabs = window.tabs.len(),
            lines = window.buffer.lines().len(),
            "script assembled"
        );
        Ok(window.buffer)
    }

    /// Launch a tab from the default session and register it under `name`.
    pub fn open_tab(&mut self, name: &str) -> Result<Tab<'_>> {
        self.create_tab(name, None)
    }

    /// Launch a tab from a named bookmark and register it under `name`.
    pub fn open_bookmark(&mut self, name: &str, bookmark: &str) -> Result<Tab<'_>> {
        self.create_tab(name, Some(bookmark))
    }

    /// Look up a previously opened tab by name.
    pub fn tab(&mut self, name: &str) -> Result<Tab<'_>> {
        let Some(state) = self.tabs.iter_mut().find(|tab| tab.name() == name) else {
            return Err(WindowError::UnknownTab(name.to_string()).into());
        };
        Ok(Tab {
            state,
            buffer: &mut self.buffer,
        })
    }

    fn create_tab(&mut self, name: &str, bookmark: Option<&str>) -> Result<Tab<'_>> {
        if !is_valid_tab_name(name) {
            return Err(WindowError::InvalidTabName(name.to_string()).into());
        }
        if self.tabs.iter().any(|tab| tab.name() == name) {
            return Err(WindowError::DuplicateTab(name.to_string()).into());
        }

        let state = TabState::new(name, bookmark);
        debug!(tab = name, bookmark = state.bookmark(), "launching tab");
        self.buffer
            .emit(format!("launch session \"{}\"", quote(state.bookmark())));
        self.buffer
            .emit(format!("set {} to the tty of the last session", state.tty()));
        self.tabs.push(state);

        let index = self.tabs.len() - 1;
        Ok(Tab {
            state: &mut self.tabs[index],
            buffer: &mut self.buffer,
        })
    }
}

/// Tab names are spliced into the `<name>_tty` script variable, so they must
/// be AppleScript-identifier-safe.
fn is_valid_tab_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
