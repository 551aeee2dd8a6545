//! Layout files.
//!
//! A layout is a TOML description of the tabs to open in one iTerm window:
//! which bookmark each launches from, the commands typed into it, its title,
//! and which tab ends up focused.
//!
//! ```toml
//! mode = "current"
//! focus = "editor"
//!
//! [[tabs]]
//! name = "editor"
//! title = "Editor"
//! commands = ["cd ~/src/project", "nvim ."]
//!
//! [[tabs]]
//! name = "server"
//! bookmark = "Project Server"
//! ```
//!
//! Top-level keys (`mode`, `focus`) must come before the first `[[tabs]]`
//! table, per TOML's table rules.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::window::{Window, WindowMode};

#[derive(Debug, Deserialize)]
pub struct Layout {
    /// Window mode, "new" or "current".
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub tabs: Vec<TabSpec>,
    /// Tab to select once everything is open.
    #[serde(default)]
    pub focus: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TabSpec {
    /// Registry key for the tab; also the stem of its tty handle.
    pub name: String,
    /// Bookmark to launch from; the default session when absent.
    #[serde(default)]
    pub bookmark: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Commands typed into the tab, in order.
    #[serde(default)]
    pub commands: Vec<String>,
}

fn default_mode() -> String {
    "new".to_string()
}

impl Layout {
    /// Read and parse a layout file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let layout: Layout = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(layout)
    }

    /// The window mode this layout asks for.
    pub fn mode(&self) -> Result<WindowMode> {
        Ok(self.mode.parse()?)
    }

    /// Drive a window through this layout.
    ///
    /// Tabs open in declaration order. A tab with commands or a title gets
    /// exactly one scope pair wrapping all of them; a bare tab gets only its
    /// launch lines. `focus` resolves through the window's registry, so
    /// naming a tab that was never opened is an error.
    pub fn apply(&self, window: &mut Window) -> Result<()> {
        for spec in &self.tabs {
            let mut tab = match &spec.bookmark {
                Some(bookmark) => window.open_bookmark(&spec.name, bookmark)?,
                None => window.open_tab(&spec.name)?,
            };
            if spec.commands.is_empty() && spec.title.is_none() {
                continue;
            }
            tab.with_scope(|tab| {
                for command in &spec.commands {
                    tab.write(command);
                }
                if let Some(title) = &spec.title {
                    tab.set_title(title);
                }
            });
        }

        if let Some(focus) = &self.focus {
            window.tab(focus)?.select();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowError;

    #[test]
    fn minimal_layout_defaults() {
        let layout: Layout = toml::from_str("").unwrap();
        assert_eq!(layout.mode, "new");
        assert!(layout.tabs.is_empty());
        assert!(layout.focus.is_none());
    }

    #[test]
    fn parse_full_layout() {
        let layout: Layout = toml::from_str(
            r#"
mode = "current"
focus = "editor"

[[tabs]]
name = "editor"
title = "Editor"
commands = ["cd ~/src", "nvim ."]

[[tabs]]
name = "server"
bookmark = "Project Server"
"#,
        )
        .unwrap();

        assert_eq!(layout.mode().unwrap(), WindowMode::Current);
        assert_eq!(layout.focus.as_deref(), Some("editor"));
        assert_eq!(layout.tabs.len(), 2);
        assert_eq!(layout.tabs[0].name, "editor");
        assert_eq!(layout.tabs[0].commands, ["cd ~/src", "nvim ."]);
        assert_eq!(layout.tabs[1].bookmark.as_deref(), Some("Project Server"));
        assert!(layout.tabs[1].commands.is_empty());
    }

    #[test]
    fn unknown_mode_string_is_invalid() {
        let layout: Layout = toml::from_str(r#"mode = "maximized""#).unwrap();
        let err = layout.mode().unwrap_err();
        assert_eq!(
            err.downcast_ref::<WindowError>(),
            Some(&WindowError::InvalidMode("maximized".to_string()))
        );
    }

    #[test]
    fn apply_batches_commands_and_title_under_one_scope() {
        let layout: Layout = toml::from_str(
            r#"
focus = "work"

[[tabs]]
name = "work"
title = "Work"
commands = ["ls"]

[[tabs]]
name = "scratch"
"#,
        )
        .unwrap();

        let script = Window::script(WindowMode::New, |window| layout.apply(window)).unwrap();
        let lines: Vec<&str> = script.lines().iter().map(String::as_str).collect();
        assert_eq!(
            lines,
            [
                "tell application \"iTerm\"",
                "activate",
                "set myterm to (make new terminal)",
                "tell myterm",
                "launch session \"Default Session\"",
                "set work_tty to the tty of the last session",
                "tell session id work_tty",
                "write text \"ls\"",
                "set name to \"Work\"",
                "end tell",
                "launch session \"Default Session\"",
                "set scratch_tty to the tty of the last session",
                "select session id work_tty",
                "end tell",
                "end tell",
            ]
        );
    }

    #[test]
    fn focus_on_unopened_tab_fails() {
        let layout: Layout = toml::from_str(r#"focus = "ghost""#).unwrap();
        let result = Window::script(WindowMode::New, |window| layout.apply(window));
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WindowError>(),
            Some(&WindowError::UnknownTab("ghost".to_string()))
        );
    }

    #[test]
    fn load_reads_layout_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "mode = \"current\"\n\n[[tabs]]\nname = \"t\"\n").unwrap();

        let layout = Layout::load(&path).unwrap();
        assert_eq!(layout.mode().unwrap(), WindowMode::Current);
        assert_eq!(layout.tabs[0].name, "t");
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let err = Layout::load(Path::new("/nonexistent/layout.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/layout.toml"));
    }
}
