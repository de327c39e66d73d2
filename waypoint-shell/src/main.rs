//! Waypoint Shell
//!
//! Hosts the router over an in-memory history. Reads navigation commands
//! from stdin and prints the navigation state as one JSON line after each.

mod command;

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use command::ShellCommand;
use waypoint_core::{MemoryHistory, NavigationMode, Router, RouterConfig};

#[derive(Debug, Parser)]
#[command(name = "waypoint-shell", version, about = "Drive the router from stdin commands")]
struct Args {
    /// JSON route manifest; the built-in application routes when omitted
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    waypoint_core::init_logging();

    let config = match &args.config {
        Some(path) => RouterConfig::from_file(path)
            .with_context(|| format!("failed to load router config from {}", path.display()))?,
        None => RouterConfig::default(),
    };

    let history = MemoryHistory::new().with_base(&config.base);
    let router = Router::from_config(&config, Arc::new(history.clone()))
        .context("invalid route table")?;
    router.start().context("failed to resolve initial location")?;

    tracing::info!(routes = router.table().len(), base = %history.base(), "Shell ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_state(&mut out, &router)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        let outcome = match command {
            ShellCommand::Quit => break,
            ShellCommand::State => Ok(()),
            ShellCommand::Push(path) => router.navigate(&path, NavigationMode::Push).map(|_| ()),
            ShellCommand::Replace(path) => {
                router.navigate(&path, NavigationMode::Replace).map(|_| ())
            }
            ShellCommand::Named { route, params } => router
                .navigate_named(&route, &params, NavigationMode::Push)
                .map(|_| ()),
            ShellCommand::Back => {
                history.back();
                Ok(())
            }
            ShellCommand::Forward => {
                history.forward();
                Ok(())
            }
            ShellCommand::Go(delta) => {
                history.go(delta);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("error: {}", e);
        }
        print_state(&mut out, &router)?;
    }

    Ok(())
}

fn print_state(out: &mut impl Write, router: &Router) -> anyhow::Result<()> {
    if let Some(state) = router.state() {
        serde_json::to_writer(&mut *out, &state.snapshot())?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}
