//! AppleScript line buffer.
//!
//! The generated program accumulates here one line at a time, in emission
//! order, and is rendered as the argument list of a single `osascript`
//! invocation at the end of the window's build pass.

/// Make caller-supplied text safe to embed in an already-quoted script line.
///
/// osascript receives each line as a single-quoted `-e` argument, so literal
/// text may not contain single quotes; they are replaced with double quotes.
/// Structural keywords never pass through here — only written commands,
/// titles and bookmark names do.
pub fn quote(text: &str) -> String {
    text.replace('\'', "\"")
}

/// Append-only log of script lines.
///
/// Lines are never reordered or removed once emitted; the emission order is
/// the program being built.
#[derive(Debug, Default)]
pub struct ScriptBuffer {
    lines: Vec<String>,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one already-safe script line.
    pub fn emit(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render the buffer as the textual argument list of one osascript
    /// invocation: each line becomes a single-quoted `-e` token, tokens
    /// joined with single spaces. An empty buffer renders to "".
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("-e '{line}'"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
