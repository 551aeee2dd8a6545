//! Tab (session) commands.
//!
//! Commands addressed to one tab must run inside that tab's
//! `tell session id <tty>` / `end tell` scope. Every mutating operation here
//! is scope-safe whether issued standalone or inside a batch: when the tab's
//! scope is already open the command appends directly, otherwise it wraps
//! itself in its own enter/exit pair. A standalone call and a one-command
//! batch therefore emit identical lines.

use tracing::debug;

use crate::script::{ScriptBuffer, quote};

/// Bookmark used when a tab is opened without naming one.
pub const DEFAULT_BOOKMARK: &str = "Default Session";

/// Registry entry for one tab opened in a window.
#[derive(Debug)]
pub struct TabState {
    name: String,
    bookmark: Option<String>,
    in_scope: bool,
}

impl TabState {
    pub(crate) fn new(name: &str, bookmark: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            bookmark: bookmark.map(str::to_string),
            in_scope: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bookmark this tab launches from.
    pub fn bookmark(&self) -> &str {
        self.bookmark.as_deref().unwrap_or(DEFAULT_BOOKMARK)
    }

    /// Script-level variable that holds this tab's tty. Only addressable
    /// after the window has emitted the tab's launch lines.
    pub fn tty(&self) -> String {
        format!("{}_tty", self.name)
    }
}

/// Handle for issuing commands to one tab.
///
/// Borrows the tab's registry entry and the window's buffer for the duration
/// of the calls; obtained from `Window::open_tab`, `Window::open_bookmark`
/// or `Window::tab`.
#[derive(Debug)]
pub struct Tab<'w> {
    pub(crate) state: &'w mut TabState,
    pub(crate) buffer: &'w mut ScriptBuffer,
}

impl Tab<'_> {
    /// Bring this tab into focus.
    ///
    /// Emits a bare select line; to run commands in the tab, use
    /// [`with_scope`](Self::with_scope).
    pub fn select(&mut self) {
        let line = format!("select session id {}", self.state.tty());
        self.buffer.emit(line);
    }

    /// Type a command into the tab's terminal.
    pub fn write(&mut self, text: &str) {
        self.scoped_emit(format!("write text \"{}\"", quote(text)));
    }

    /// Set the tab's title (the text shown on the iTerm tab itself).
    pub fn set_title(&mut self, title: &str) {
        self.scoped_emit(format!("set name to \"{}\"", quote(title)));
    }

    /// Run a batch of commands under one enter/exit scope pair.
    ///
    /// If this tab's scope is already open, the body runs directly — no
    /// second pair is opened. Otherwise the enter line is emitted, the body
    /// runs with the scope flag set so its commands append directly, and the
    /// matching `end tell` closes the scope. The pair is balanced for every
    /// body that returns; fallible work belongs at window level, where an
    /// error abandons the whole script before it reaches a runner.
    pub fn with_scope(&mut self, body: impl FnOnce(&mut Self)) {
        if self.state.in_scope {
            body(self);
            return;
        }

        debug!(tab = self.state.name(), "entering tab scope");
        self.buffer.emit(format!("tell session id {}", self.state.tty()));
        self.state.in_scope = true;
        body(self);
        self.buffer.emit("end tell");
        self.state.in_scope = false;
    }

    fn scoped_emit(&mut self, line: String) {
        self.with_scope(move |tab| tab.buffer.emit(line));
    }
}
