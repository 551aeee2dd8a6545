//! Scripted iTerm window and tab automation.
//!
//! Builds an AppleScript program line by line — open or reuse a window,
//! launch named tabs from bookmarks, type commands into them, retitle and
//! focus them — and executes the assembled program as one `osascript`
//! invocation.
//!
//! The pieces: [`script::ScriptBuffer`] accumulates the program,
//! [`window::Window`] brackets a build pass with the outer application scope
//! and tracks tabs by name, [`tab::Tab`] issues scope-safe per-tab commands,
//! and a [`runner::ScriptRunner`] executes the finished script.
//!
//! ```no_run
//! use itermctl::runner::Osascript;
//! use itermctl::window::Window;
//!
//! Window::open(&Osascript, |window| {
//!     window.open_tab("project")?.with_scope(|tab| {
//!         tab.write("cd ~/projects/my_project");
//!         tab.write("ls");
//!         tab.set_title("My Project");
//!     });
//!     Ok(())
//! })?;
//! # anyhow::Ok(())
//! ```

pub mod layout;
pub mod runner;
pub mod script;
pub mod tab;
pub mod window;
