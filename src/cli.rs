use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};

#[derive(Parser, Debug)]
#[command(
    name = "itermctl",
    about = "Scripted iTerm window and tab automation over AppleScript",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open an iTerm window laid out from a TOML layout file
    Run {
        /// Path to the layout file
        layout: PathBuf,

        /// Override the layout's window mode ("new" or "current")
        #[arg(long)]
        mode: Option<String>,

        /// Print the osascript invocation instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that osascript is available on this machine
    Check,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

pub fn print_completions(shell: CompletionShell) {
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
    };

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "itermctl", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_mode_override_and_dry_run() {
        let cli = Cli::parse_from(["itermctl", "run", "dev.toml", "--mode", "current", "--dry-run"]);
        match cli.command {
            Command::Run {
                layout,
                mode,
                dry_run,
            } => {
                assert_eq!(layout, PathBuf::from("dev.toml"));
                assert_eq!(mode.as_deref(), Some("current"));
                assert!(dry_run);
            }
            other => panic!("expected run command, got {other:?}"),
        }
    }
}
