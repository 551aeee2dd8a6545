mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Command};
use itermctl::layout::Layout;
use itermctl::runner::{self, Osascript};
use itermctl::window::{Window, WindowMode};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "itermctl=info",
        1 => "itermctl=debug",
        _ => "itermctl=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Command::Run {
            layout,
            mode,
            dry_run,
        } => run_layout(&layout, mode.as_deref(), dry_run),
        Command::Check => check(),
        Command::Completions { shell } => {
            cli::print_completions(shell);
            Ok(())
        }
    }
}

fn run_layout(path: &Path, mode_override: Option<&str>, dry_run: bool) -> Result<()> {
    let layout = Layout::load(path)?;
    let mode = match mode_override {
        Some(raw) => raw.parse::<WindowMode>()?,
        None => layout.mode()?,
    };
    info!(
        layout = %path.display(),
        mode = %mode,
        tabs = layout.tabs.len(),
        "applying layout"
    );

    if dry_run {
        let script = Window::script(mode, |window| layout.apply(window))?;
        println!("{}", runner::command_line(&script));
        return Ok(());
    }

    let execution = Window::run(mode, &Osascript, |window| layout.apply(window))?;
    if !execution.output.is_empty() {
        print!("{}", execution.output);
    }
    if !execution.succeeded {
        anyhow::bail!("osascript reported failure");
    }
    info!("layout applied");
    Ok(())
}

fn check() -> Result<()> {
    runner::check_osascript()?;
    println!("osascript available");
    Ok(())
}
